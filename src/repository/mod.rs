// ==========================================
// DWG 后台 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 提供外部存储访问能力,屏蔽远程/本地差异
// 约束: 本地 SQL 全部参数化
// ==========================================

pub mod backend_store;
pub mod error;
pub mod rest_store;
pub mod sqlite_store;

// 重导出核心仓储
pub use backend_store::{BackendStore, ListQuery};
pub use error::{StoreError, StoreResult};
pub use rest_store::RestStore;
pub use sqlite_store::{ProcedureHandler, SqliteStore};
