// ==========================================
// DWG 后台 - 导入配置
// ==========================================
// 导入工具不接受命令行参数，源文件路径固定
// ==========================================

use crate::config::tables;

/// 固定的源文件相对路径
pub const DEFAULT_SOURCE_PATH: &str = "./produkte.xml";

/// 导出文件根元素
pub const DEFAULT_ROOT_TAG: &str = "dataroot";

/// 重复出现的商品元素（单条与多条统一按列表处理）
pub const DEFAULT_RECORD_TAG: &str = "Product";

/// 日志预览的字符数
pub const PREVIEW_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub source_path: String,
    pub root_tag: String,
    pub record_tag: String,
    pub target_table: String,
    pub key_column: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            source_path: DEFAULT_SOURCE_PATH.to_string(),
            root_tag: DEFAULT_ROOT_TAG.to_string(),
            record_tag: DEFAULT_RECORD_TAG.to_string(),
            target_table: tables::ARTICLE_TABLE.to_string(),
            key_column: tables::ARTICLE_KEY_COLUMN.to_string(),
        }
    }
}
