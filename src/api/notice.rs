// ==========================================
// DWG 后台 - 用户提示
// ==========================================
// 职责: 访问层结果 → 短暂提示（级别、颜色、显示时长、位置）
// 渲染由界面负责，这里只给出数据
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::ApiResult;

/// 提示显示时长（毫秒）
pub const NOTICE_DURATION_MS: u64 = 2500;

/// 提示显示位置
pub const NOTICE_POSITION: &str = "top-right";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

impl NoticeLevel {
    /// 背景色
    pub fn color(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "#16a34a",
            NoticeLevel::Error => "#dc2626",
            NoticeLevel::Info => "#2563eb",
        }
    }

    /// 未知级别按 Info 处理
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => NoticeLevel::Success,
            "error" => NoticeLevel::Error,
            _ => NoticeLevel::Info,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
    pub color: String,
    pub duration_ms: u64,
    pub position: String,
}

impl Notice {
    pub fn new(message: impl Into<String>, level: NoticeLevel) -> Self {
        Self {
            message: message.into(),
            level,
            color: level.color().to_string(),
            duration_ms: NOTICE_DURATION_MS,
            position: NOTICE_POSITION.to_string(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NoticeLevel::Error)
    }

    /// 成功时显示给定消息，失败时显示错误消息
    pub fn from_result<T>(result: &ApiResult<T>, success_message: &str) -> Self {
        match result {
            Ok(_) => Self::success(success_message),
            Err(e) => Self::error(e.to_string()),
        }
    }
}
