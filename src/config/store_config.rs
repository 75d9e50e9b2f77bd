// ==========================================
// DWG 后台 - 存储连接配置
// ==========================================
// 来源: 进程环境变量（main 中先加载 .env）
// 红线: 缺失 URL/KEY 不在启动时报错，由存储客户端在首次调用时报错
// ==========================================

use std::time::Duration;

/// 环境变量名
pub mod env_keys {
    pub const STORE_URL: &str = "SUPABASE_URL";
    pub const STORE_KEY: &str = "SUPABASE_KEY";
    pub const STORE_TIMEOUT_SECS: &str = "DWG_STORE_TIMEOUT_SECS";
    pub const LOCAL_DB: &str = "DWG_LOCAL_DB";
    pub const LOG_FORMAT: &str = "DWG_LOG_FORMAT";
}

/// 默认 HTTP 超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// 存储端点（如 https://xyz.supabase.co）
    pub url: Option<String>,

    /// 访问凭证
    pub api_key: Option<String>,

    /// HTTP 请求超时
    pub timeout: Duration,

    /// 本地 SQLite 镜像路径（设置后导入写入本地而非远程）
    pub local_db_path: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            local_db_path: None,
        }
    }
}

impl StoreConfig {
    /// 从进程环境读取
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取（测试中避免修改进程环境）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_secs = match non_blank(env_keys::STORE_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        default = DEFAULT_TIMEOUT_SECS,
                        "超时配置无效，使用默认值"
                    );
                    DEFAULT_TIMEOUT_SECS
                }
            },
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self {
            url: non_blank(env_keys::STORE_URL),
            api_key: non_blank(env_keys::STORE_KEY),
            timeout: Duration::from_secs(timeout_secs),
            local_db_path: non_blank(env_keys::LOCAL_DB),
        }
    }
}
