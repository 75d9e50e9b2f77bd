// ==========================================
// DWG 后台 - 订单 API
// ==========================================
// 职责: 订单列表查询、订单状态更新、带库存联动的状态流转
// 数据源: v_bestellungen_list（只读视图）、bestellungen（状态写入）
// 红线: 库存联动由存储过程 set_bestellung_status 原子完成，本地不做状态规则
// ==========================================

use std::sync::Arc;

use serde_json::{json, Map, Value};
use tracing::{error, info, instrument};

use crate::api::common;
use crate::api::error::{ApiError, ApiResult};
use crate::config::tables;
use crate::repository::BackendStore;

// ==========================================
// OrderApi - 订单 API
// ==========================================
pub struct OrderApi {
    store: Arc<dyn BackendStore>,
}

impl OrderApi {
    pub fn new(store: Arc<dyn BackendStore>) -> Self {
        Self { store }
    }

    /// 订单列表（最新在前）
    #[instrument(skip(self))]
    pub async fn list_orders(&self, offset: usize, limit: usize) -> ApiResult<Vec<Value>> {
        common::list_newest_first(self.store.as_ref(), tables::ORDER_LIST_VIEW, offset, limit).await
    }

    /// 直接设置订单状态（不触发库存变动）
    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: &str, status: &str) -> ApiResult<()> {
        common::update_status(self.store.as_ref(), tables::ORDER_TABLE, id, status).await
    }

    /// 通过存储过程设置订单状态并联动库存
    ///
    /// 失败时返回存储方的原始消息，不重试
    #[instrument(skip(self))]
    pub async fn update_order_status_with_stock(
        &self,
        order_id: &str,
        new_status: &str,
    ) -> ApiResult<()> {
        let order_id = common::require_id(order_id)?;

        let mut args = Map::new();
        args.insert(tables::ORDER_STATUS_PARAM_ID.to_string(), json!(order_id));
        args.insert(tables::ORDER_STATUS_PARAM_STATUS.to_string(), json!(new_status));

        self.store
            .invoke_procedure(tables::ORDER_STATUS_PROCEDURE, Value::Object(args))
            .await
            .map_err(|e| {
                error!(order_id = %order_id, new_status = %new_status, error = %e, "存储过程调用失败");
                ApiError::RemoteProcedureError(e.detail())
            })?;

        info!(order_id = %order_id, new_status = %new_status, "订单状态已更新（含库存）");
        Ok(())
    }
}
