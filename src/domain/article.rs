// ==========================================
// DWG 后台 - 商品领域模型
// ==========================================
// 对齐: 远程存储 artikel 表（列名即 serde 名）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawProductRecord - 导入中间结构体
// ==========================================
// 用途: 文件解析产物（XML <Product> → 字段表）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawProductRecord {
    /// 记录在文档中的位置（从 1 开始）
    pub position: usize,

    /// 元素本地名 → 文本值（未做类型转换）
    pub fields: HashMap<String, String>,
}

impl RawProductRecord {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            fields: HashMap::new(),
        }
    }

    /// 读取源字段（不存在返回 None）
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    /// 构建器风格写入（测试与夹具使用）
    pub fn with_field(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }
}

// ==========================================
// ArticleRow - 规范化商品行
// ==========================================
// 红线: 主键 id 必须为数值，缺失则整条记录不可导入
// 用途: 导入层写入 artikel，写入后本系统不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRow {
    // ===== 主键 =====
    pub id: i64,

    // ===== 基础信息 =====
    pub code_nr: Option<String>,
    pub barcode_nr: Option<String>,
    pub name: Option<String>,
    pub description: String, // 已去除 RTF 控制字
    pub category: Option<String>,
    pub unit: Option<String>,

    // ===== 价格 =====
    pub purchase_price: f64,
    pub sales_price_min: f64,
    pub sales_price: f64,
    pub sales_price_max: f64,
    pub is_brutto: bool,
    pub discount: f64,
    pub vat: f64,
    pub undiscountable: bool,

    // ===== 库存 =====
    pub stock_tot: f64,
    pub stock_min: f64,
    pub stock_max: f64,
    pub storehouse_name: Option<String>,
    pub use_stock: bool,

    // ===== 可用性 =====
    pub unavailability: bool,
    pub unavailability_date: Option<String>,

    // ===== 元信息（源系统原样保留）=====
    pub timestamp: Option<String>,
    pub register_date: Option<String>,
    pub short_comment: Option<String>,

    // ===== 会计与收藏 =====
    #[serde(rename = "buchhaltungskonto")]
    pub ledger_account: Option<String>,
    #[serde(rename = "ist_favorit")]
    pub is_favorite: bool,
    #[serde(rename = "position_favorit")]
    pub favorite_position: i64,
    #[serde(rename = "ist_retourartikel")]
    pub is_return_article: bool,
}

// ==========================================
// RecordFailure - 单条记录失败
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordFailureKind {
    Skipped,      // 主键无效，跳过
    PersistFailed, // 存储写入失败
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordFailure {
    pub position: usize,
    pub article_id: Option<i64>,
    pub kind: RecordFailureKind,
    pub reason: String,
}

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub source: String,
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
    pub failed: usize,
    pub failures: Vec<RecordFailure>,
    pub elapsed_ms: u64,
}

impl ImportSummary {
    /// 是否全部成功
    pub fn is_clean(&self) -> bool {
        self.skipped == 0 && self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_record_get_missing_field() {
        let record = RawProductRecord::new(3).with_field("ID", "7");
        assert_eq!(record.get("ID"), Some("7"));
        assert_eq!(record.get("Name"), None);
        assert_eq!(record.position, 3);
    }

    #[test]
    fn test_article_row_uses_store_column_names() {
        let row = ArticleRow {
            id: 1,
            code_nr: None,
            barcode_nr: None,
            name: Some("Schraube".to_string()),
            description: String::new(),
            category: None,
            unit: None,
            purchase_price: 0.0,
            sales_price_min: 0.0,
            sales_price: 0.0,
            sales_price_max: 0.0,
            is_brutto: false,
            discount: 0.0,
            vat: 0.0,
            undiscountable: false,
            stock_tot: 0.0,
            stock_min: 0.0,
            stock_max: 0.0,
            storehouse_name: None,
            use_stock: false,
            unavailability: false,
            unavailability_date: None,
            timestamp: None,
            register_date: None,
            short_comment: None,
            ledger_account: Some("8400".to_string()),
            is_favorite: true,
            favorite_position: 2,
            is_return_article: false,
        };

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["buchhaltungskonto"], "8400");
        assert_eq!(json["ist_favorit"], true);
        assert_eq!(json["position_favorit"], 2);
        assert!(json["barcode_nr"].is_null());
    }
}
