// ==========================================
// DWG 后台 - 配置层
// ==========================================
// 职责: 读取存储端点/凭证（环境变量）、导入参数、表名常量
// ==========================================

pub mod import_config;
pub mod store_config;
pub mod tables;

// 重导出核心配置
pub use import_config::ImportConfig;
pub use store_config::{env_keys, StoreConfig};
