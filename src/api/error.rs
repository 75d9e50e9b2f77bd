// ==========================================
// DWG 后台 - API 层错误类型
// ==========================================
// 职责: 定义访问层错误，转换存储错误为可展示的消息
// ==========================================

use crate::repository::error::StoreError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（不发起远程调用）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 远程错误
    // ==========================================
    #[error("远程查询失败: {0}")]
    RemoteQueryError(String),

    /// 存储过程拒绝或失败，消息原样保留
    #[error("{0}")]
    RemoteProcedureError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 StoreError 转换
// ==========================================
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::LockError(msg) => ApiError::InternalError(msg),
            other => ApiError::RemoteQueryError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
