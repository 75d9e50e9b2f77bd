// ==========================================
// DWG 后台 - API 层
// ==========================================
// 职责: 报价/订单的查询与状态访问，供界面调用
// ==========================================

mod common;
pub mod error;
pub mod notice;
pub mod offer_api;
pub mod order_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use notice::{Notice, NoticeLevel, NOTICE_DURATION_MS};
pub use offer_api::OfferApi;
pub use order_api::OrderApi;
