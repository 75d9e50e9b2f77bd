// ==========================================
// DWG 后台 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分级: 致命错误中止整个批次；记录级错误只跳过当前记录
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误（致命）=====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("XML 解析失败: {0}")]
    MalformedDocument(String),

    #[error("未找到任何商品记录 <{record_tag}>，请检查导入文件")]
    EmptyCatalog { record_tag: String },

    // ===== 记录级错误（跳过并记录）=====
    #[error("主键无效 (记录 {position}): {raw:?}")]
    InvalidIdentifier {
        position: usize,
        raw: Option<String>,
    },

    #[error("写入失败 (商品 {article_id}): {message}")]
    PersistFailed { article_id: i64, message: String },

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<quick_xml::Error>
impl From<quick_xml::Error> for ImportError {
    fn from(err: quick_xml::Error) -> Self {
        ImportError::MalformedDocument(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_becomes_read_error() {
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        let err: ImportError = io.into();
        assert!(matches!(err, ImportError::FileReadError(ref m) if m.contains("UTF-8")));
    }

    #[test]
    fn test_record_level_messages_carry_context() {
        let err = ImportError::InvalidIdentifier {
            position: 2,
            raw: Some("X-1".into()),
        };
        assert!(err.to_string().contains("记录 2"));

        let err = ImportError::PersistFailed {
            article_id: 1001,
            message: "timeout".into(),
        };
        assert!(err.to_string().contains("1001"));
    }
}
