// ==========================================
// DWG 后台 - 数据清洗器实现
// ==========================================
// 职责: NULL 标准化 / 数值默认 0 / 标志位 "1" 判定 / 主键解析
// ==========================================

use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn normalize_null(&self, value: Option<&str>) -> Option<String> {
        value
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.to_string())
    }

    fn number_or_zero(&self, value: Option<&str>) -> f64 {
        parse_finite(value).unwrap_or(0.0)
    }

    fn integer_or_zero(&self, value: Option<&str>) -> i64 {
        parse_integral(value).unwrap_or(0)
    }

    fn sentinel_flag(&self, value: Option<&str>) -> bool {
        value == Some("1")
    }

    fn parse_identifier(&self, value: Option<&str>) -> Option<i64> {
        parse_integral(value)
    }
}

/// 解析有限浮点数
fn parse_finite(value: Option<&str>) -> Option<f64> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 解析整数（整值小数也接受）
fn parse_integral(value: Option<&str>) -> Option<i64> {
    let trimmed = value?.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }

    let n = parse_finite(Some(trimmed))?;
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n <= i64::MAX as f64 {
        Some(n as i64)
    } else {
        None
    }
}
