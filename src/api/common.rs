// ==========================================
// DWG 后台 - 访问层公共工具
// ==========================================
// 职责: 分页列表与状态更新的共用实现（报价/订单共用）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::tables;
use crate::repository::{BackendStore, ListQuery};
use serde_json::Value;
use tracing::{debug, error};

/// 按创建时间倒序读取一页
///
/// limit 为 0 时直接返回空列表，不访问存储
pub(crate) async fn list_newest_first(
    store: &dyn BackendStore,
    view: &str,
    offset: usize,
    limit: usize,
) -> ApiResult<Vec<Value>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let query = ListQuery::newest_first(view, offset, limit);
    let rows = store.list_rows(&query).await.map_err(|e| {
        error!(view = %view, offset = offset, limit = limit, error = %e, "列表查询失败");
        ApiError::from(e)
    })?;

    debug!(view = %view, offset = offset, rows = rows.len(), "列表查询完成");
    Ok(rows)
}

/// 更新一行的 status 字段（状态值不做校验）
pub(crate) async fn update_status(
    store: &dyn BackendStore,
    table: &str,
    id: &str,
    status: &str,
) -> ApiResult<()> {
    let id = require_id(id)?;

    store
        .update_field(
            table,
            tables::ID_COLUMN,
            id,
            tables::STATUS_COLUMN,
            Value::String(status.to_string()),
        )
        .await
        .map_err(|e| {
            error!(table = %table, id = %id, error = %e, "状态更新失败");
            ApiError::from(e)
        })?;

    debug!(table = %table, id = %id, status = %status, "状态已更新");
    Ok(())
}

/// 主键不能为空白；非空主键原样返回
pub(crate) fn require_id(id: &str) -> ApiResult<&str> {
    if id.trim().is_empty() {
        return Err(ApiError::InvalidInput("id 不能为空".to_string()));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(" 17 ").unwrap(), " 17 ");
        assert_eq!(require_id("B-17").unwrap(), "B-17");
        assert!(matches!(require_id(""), Err(ApiError::InvalidInput(_))));
        assert!(matches!(require_id("   "), Err(ApiError::InvalidInput(_))));
    }
}
