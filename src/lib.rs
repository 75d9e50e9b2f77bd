// ==========================================
// DWG 后台 - 核心库
// ==========================================
// 技术栈: Rust + tokio + 远程存储(PostgREST) / SQLite 镜像
// 系统定位: 商品目录导入 + 报价/订单数据访问层
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 存储能力接口与实现
pub mod repository;

// 导入层 - 旧版 XML 商品目录
pub mod importer;

// 配置层 - 环境变量与表名
pub mod config;

// 数据库基础设施（SQLite 镜像连接初始化）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 报价/订单访问
pub mod api;

// 导入工具运行入口（dwg-import）
pub mod cli;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{ArticleRow, ImportSummary, RawProductRecord, RecordFailure, RecordFailureKind};

pub use importer::{ArticleImporter, ArticleImporterImpl, ImportError, ImportResult};

pub use repository::{BackendStore, ListQuery, RestStore, SqliteStore, StoreError, StoreResult};

pub use api::{ApiError, ApiResult, Notice, NoticeLevel, OfferApi, OrderApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "DWG 后台";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
