// ==========================================
// DWG 后台 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 存储访问错误类型（远程与本地镜像共用）
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== 配置错误 =====
    #[error("存储未配置: 缺少环境变量 {0}")]
    NotConfigured(String),

    // ===== 远程错误 =====
    #[error("网络请求失败: {0}")]
    Transport(String),

    #[error("远程存储返回错误 (HTTP {status}): {message}")]
    Remote {
        status: u16,
        message: String,
        code: Option<String>,
        details: Option<String>,
        hint: Option<String>,
    },

    #[error("响应解析失败: {0}")]
    Decode(String),

    // ===== 数据错误 =====
    #[error("无效的数据行: {0}")]
    InvalidRow(String),

    // ===== 存储过程 =====
    #[error("存储过程不存在: {0}")]
    ProcedureNotFound(String),

    #[error("存储过程执行失败 ({name}): {message}")]
    ProcedureFailed { name: String, message: String },

    // ===== 本地数据库错误 =====
    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),
}

impl StoreError {
    /// 存储方给出的原始错误信息（不带本地前缀）
    pub fn detail(&self) -> String {
        match self {
            StoreError::Remote { message, .. } => message.clone(),
            StoreError::ProcedureFailed { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                StoreError::UniqueConstraintViolation(msg)
            }
            _ => StoreError::DatabaseQueryError(err.to_string()),
        }
    }
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::Decode(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}

/// Result 类型别名
pub type StoreResult<T> = Result<T, StoreError>;
