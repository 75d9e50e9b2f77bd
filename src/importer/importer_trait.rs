// ==========================================
// DWG 后台 - 商品导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 解析 → 映射（含清洗/RTF）→ 逐条 upsert → 汇总
// ==========================================

use crate::domain::article::{ArticleRow, ImportSummary, RawProductRecord};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ArticleImporter Trait
// ==========================================
// 用途: 商品导入主接口
// 实现者: ArticleImporterImpl
#[async_trait]
pub trait ArticleImporter: Send + Sync {
    /// 从 XML 文件导入商品
    ///
    /// # 返回
    /// - Ok(ImportSummary): 批次完成（可能含记录级失败）
    /// - Err: 致命错误（文件缺失/不可读/格式错误/零记录）
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportSummary>;

    /// 从已读入的文档内容导入
    ///
    /// # 参数
    /// - content: XML 文本
    /// - source: 来源描述（仅用于日志与汇总）
    async fn import_from_str(&self, content: &str, source: &str) -> ImportResult<ImportSummary>;
}

// ==========================================
// CatalogParser Trait
// ==========================================
// 用途: 文档解析（阶段 0）
// 实现者: XmlCatalogParser
pub trait CatalogParser: Send + Sync {
    /// 解析为原始商品记录（文档顺序）
    ///
    /// # 返回
    /// - Ok(Vec): 可能为空（由调用方决定是否致命）
    /// - Err(MalformedDocument): 文档无法按 XML 解析
    fn parse_records(&self, content: &str) -> ImportResult<Vec<RawProductRecord>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射（阶段 1），确定性、无副作用
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将原始记录映射为 ArticleRow
    ///
    /// # 返回
    /// - Err(InvalidIdentifier): 主键缺失或非数值
    fn map_to_article(&self, record: &RawProductRecord) -> ImportResult<ArticleRow>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 单字段类型转换与默认值替换
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 可选文本：缺失/空白 → None，否则原样保留
    fn normalize_null(&self, value: Option<&str>) -> Option<String>;

    /// 数值：缺失/空/非数值/非有限值 → 0
    fn number_or_zero(&self, value: Option<&str>) -> f64;

    /// 整数：缺失/空/非整数 → 0
    fn integer_or_zero(&self, value: Option<&str>) -> i64;

    /// 标志位：当且仅当等于 "1" 时为 true
    fn sentinel_flag(&self, value: Option<&str>) -> bool;

    /// 主键：整数（允许 "42.0" 这类整值小数），否则 None
    fn parse_identifier(&self, value: Option<&str>) -> Option<i64>;
}
