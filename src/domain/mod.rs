// ==========================================
// DWG 后台 - 领域模型层
// ==========================================
// 职责: 定义导入管道的实体与结果类型
// 红线: 不含数据访问逻辑
// ==========================================

pub mod article;

// 重导出核心类型
pub use article::{ArticleRow, ImportSummary, RawProductRecord, RecordFailure, RecordFailureKind};
