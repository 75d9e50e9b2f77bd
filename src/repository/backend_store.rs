// ==========================================
// DWG 后台 - 存储能力 Trait
// ==========================================
// 职责: 定义对外部存储的四种访问能力（不包含实现）
// 实现者: RestStore（生产，远程）、SqliteStore（本地镜像/测试）
// 红线: 仓储不含业务规则，只做读写
// ==========================================

use crate::config::tables;
use crate::repository::error::StoreResult;
use async_trait::async_trait;
use serde_json::Value;

// ==========================================
// ListQuery - 分页列表查询
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub table: String,
    pub order_by: String,
    pub descending: bool,
    pub offset: usize,
    pub limit: usize,
}

impl ListQuery {
    /// 按 created_at 倒序（最新在前）
    pub fn newest_first(table: &str, offset: usize, limit: usize) -> Self {
        Self {
            table: table.to_string(),
            order_by: tables::CREATED_AT_COLUMN.to_string(),
            descending: true,
            offset,
            limit,
        }
    }
}

// ==========================================
// BackendStore Trait
// ==========================================
#[async_trait]
pub trait BackendStore: Send + Sync {
    /// 分页读取一张表/视图
    ///
    /// # 返回
    /// - Ok(Vec<Value>): 最多 limit 行，每行为 JSON 对象
    /// - Err: 网络/查询错误
    async fn list_rows(&self, query: &ListQuery) -> StoreResult<Vec<Value>>;

    /// 更新单个字段（key_column = key 的行）
    ///
    /// 未命中任何行不视为错误
    async fn update_field(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()>;

    /// 插入或替换（按 conflict_column 去重）
    async fn upsert_row(&self, table: &str, conflict_column: &str, row: Value) -> StoreResult<()>;

    /// 调用远程存储过程（原子执行，内部规则对本系统不可见）
    async fn invoke_procedure(&self, name: &str, args: Value) -> StoreResult<Value>;
}
