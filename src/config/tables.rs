// ==========================================
// DWG 后台 - 远程存储对象名
// ==========================================
// 红线: 表/视图/存储过程归远程存储所有，这里只保存名字
// ==========================================

/// 商品表
pub const ARTICLE_TABLE: &str = "artikel";

/// 商品主键列（upsert 冲突键）
pub const ARTICLE_KEY_COLUMN: &str = "id";

/// 报价表 / 报价列表视图
pub const OFFER_TABLE: &str = "angebote";
pub const OFFER_LIST_VIEW: &str = "v_angebote_list";

/// 订单表 / 订单列表视图
pub const ORDER_TABLE: &str = "bestellungen";
pub const ORDER_LIST_VIEW: &str = "v_bestellungen_list";

/// 通用列名
pub const ID_COLUMN: &str = "id";
pub const STATUS_COLUMN: &str = "status";
pub const CREATED_AT_COLUMN: &str = "created_at";

/// 订单状态 + 库存联动存储过程（远程事务，黑盒）
pub const ORDER_STATUS_PROCEDURE: &str = "set_bestellung_status";
pub const ORDER_STATUS_PARAM_ID: &str = "p_bestell_id";
pub const ORDER_STATUS_PARAM_STATUS: &str = "p_new_status";
