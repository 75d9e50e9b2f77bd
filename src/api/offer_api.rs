// ==========================================
// DWG 后台 - 报价 API
// ==========================================
// 职责: 报价列表查询、报价状态更新
// 数据源: v_angebote_list（只读视图）、angebote（状态写入）
// ==========================================

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::api::common;
use crate::api::error::ApiResult;
use crate::config::tables;
use crate::repository::BackendStore;

// ==========================================
// OfferApi - 报价 API
// ==========================================
pub struct OfferApi {
    store: Arc<dyn BackendStore>,
}

impl OfferApi {
    pub fn new(store: Arc<dyn BackendStore>) -> Self {
        Self { store }
    }

    /// 报价列表（最新在前）
    ///
    /// # 参数
    /// - offset: 起始行（从 0 开始）
    /// - limit: 最多返回行数，0 返回空列表
    #[instrument(skip(self))]
    pub async fn list_offers(&self, offset: usize, limit: usize) -> ApiResult<Vec<Value>> {
        common::list_newest_first(self.store.as_ref(), tables::OFFER_LIST_VIEW, offset, limit).await
    }

    /// 设置报价状态
    #[instrument(skip(self))]
    pub async fn update_offer_status(&self, id: &str, status: &str) -> ApiResult<()> {
        common::update_status(self.store.as_ref(), tables::OFFER_TABLE, id, status).await
    }
}
