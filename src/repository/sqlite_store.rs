// ==========================================
// DWG 后台 - SQLite 镜像存储
// ==========================================
// 职责: 以 SQLite 实现 BackendStore（本地试运行、离线导入、测试替身）
// 存储: store_row 表，每行一个 JSON 文档，主键 (table_name, row_key)
// 红线: 存储过程只执行注册的处理器，不内置任何业务规则
// ==========================================

use crate::db::{init_mirror_schema, open_in_memory_connection, open_sqlite_connection};
use crate::repository::backend_store::{BackendStore, ListQuery};
use crate::repository::error::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// 存储过程处理器（在单个事务中执行，返回 Err 则整体回滚）
pub type ProcedureHandler =
    Box<dyn Fn(&Transaction<'_>, &Value) -> StoreResult<Value> + Send + Sync>;

// ==========================================
// SqliteStore
// ==========================================
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
    view_aliases: HashMap<String, String>,
    procedures: HashMap<String, ProcedureHandler>,
}

impl SqliteStore {
    /// 打开（或创建）镜像数据库文件
    pub fn new(db_path: &str) -> StoreResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 内存数据库
    pub fn in_memory() -> StoreResult<Self> {
        let conn = open_in_memory_connection()?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建（会初始化镜像 schema，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> StoreResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| StoreError::LockError(e.to_string()))?;
            init_mirror_schema(&guard)?;
        }

        Ok(Self {
            conn,
            view_aliases: HashMap::new(),
            procedures: HashMap::new(),
        })
    }

    /// 将视图名映射到基表（远程的 v_*_list 在本地直接读基表）
    pub fn with_view_alias(mut self, view: &str, table: &str) -> Self {
        self.view_aliases
            .insert(view.to_string(), table.to_string());
        self
    }

    /// 注册存储过程处理器
    pub fn with_procedure<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Transaction<'_>, &Value) -> StoreResult<Value> + Send + Sync + 'static,
    {
        self.procedures.insert(name.to_string(), Box::new(handler));
        self
    }

    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    fn resolve_table<'a>(&'a self, name: &'a str) -> &'a str {
        self.view_aliases
            .get(name)
            .map(String::as_str)
            .unwrap_or(name)
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))
    }

    /// 表内行数
    pub fn count_rows(&self, table: &str) -> StoreResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM store_row WHERE table_name = ?1",
            params![self.resolve_table(table)],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    /// 按主键读取一行
    pub fn get_row(&self, table: &str, key: &str) -> StoreResult<Option<Value>> {
        let conn = self.lock()?;
        Self::read_row(&conn, self.resolve_table(table), key)
    }

    /// 按主键顺序读取整张表
    pub fn all_rows(&self, table: &str) -> StoreResult<Vec<Value>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT data FROM store_row WHERE table_name = ?1 ORDER BY row_key",
        )?;
        let raw: Vec<String> = stmt
            .query_map(params![self.resolve_table(table)], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;

        raw.iter()
            .map(|data| serde_json::from_str(data).map_err(StoreError::from))
            .collect()
    }

    // ==========================================
    // 连接级辅助（供存储过程处理器在事务内使用）
    // ==========================================

    pub fn read_row(conn: &Connection, table: &str, key: &str) -> StoreResult<Option<Value>> {
        let data: Option<String> = conn
            .query_row(
                "SELECT data FROM store_row WHERE table_name = ?1 AND row_key = ?2",
                params![table, key],
                |row| row.get(0),
            )
            .optional()?;

        data.map(|d| serde_json::from_str(&d).map_err(StoreError::from))
            .transpose()
    }

    pub fn write_row(conn: &Connection, table: &str, key: &str, row: &Value) -> StoreResult<()> {
        conn.execute(
            r#"
            INSERT OR REPLACE INTO store_row (table_name, row_key, data, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![table, key, serde_json::to_string(row)?, Utc::now()],
        )?;
        Ok(())
    }
}

/// 列名 → JSON 路径（只允许字母数字下划线）
fn json_path(column: &str) -> StoreResult<String> {
    let valid = !column.is_empty()
        && column
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        return Err(StoreError::InvalidRow(format!("非法列名: {}", column)));
    }
    Ok(format!("$.{}", column))
}

/// 主键值 → 文本（数字与字符串均可作为主键）
fn key_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl BackendStore for SqliteStore {
    async fn list_rows(&self, query: &ListQuery) -> StoreResult<Vec<Value>> {
        let path = json_path(&query.order_by)?;
        let direction = if query.descending { "DESC" } else { "ASC" };

        // 超出 i64 的偏移量必然越过末尾；超出的 limit 按 SQLite 的 -1（不限）处理
        let offset = match i64::try_from(query.offset) {
            Ok(offset) => offset,
            Err(_) => return Ok(Vec::new()),
        };
        let limit = i64::try_from(query.limit).unwrap_or(-1);
        let sql = format!(
            "SELECT data FROM store_row WHERE table_name = ?1 \
             ORDER BY json_extract(data, ?2) {dir}, row_key {dir} \
             LIMIT ?3 OFFSET ?4",
            dir = direction
        );

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let raw: Vec<String> = stmt
            .query_map(
                params![
                    self.resolve_table(&query.table),
                    path,
                    limit,
                    offset
                ],
                |row| row.get(0),
            )?
            .collect::<Result<Vec<_>, _>>()?;

        raw.iter()
            .map(|data| serde_json::from_str(data).map_err(StoreError::from))
            .collect()
    }

    async fn update_field(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()> {
        let field_path = json_path(field)?;
        let key_path = json_path(key_column)?;

        let conn = self.lock()?;
        let updated = conn.execute(
            r#"
            UPDATE store_row
            SET data = json_set(data, ?1, json(?2)), updated_at = ?6
            WHERE table_name = ?3 AND CAST(json_extract(data, ?4) AS TEXT) = ?5
            "#,
            params![
                field_path,
                serde_json::to_string(&value)?,
                self.resolve_table(table),
                key_path,
                key,
                Utc::now()
            ],
        )?;

        debug!(table, key, field, updated, "字段更新完成");
        Ok(())
    }

    async fn upsert_row(&self, table: &str, conflict_column: &str, row: Value) -> StoreResult<()> {
        let key = row
            .get(conflict_column)
            .and_then(key_text)
            .ok_or_else(|| {
                StoreError::InvalidRow(format!("缺少冲突键 {} 或类型不支持", conflict_column))
            })?;

        let conn = self.lock()?;
        Self::write_row(&conn, self.resolve_table(table), &key, &row)
    }

    async fn invoke_procedure(&self, name: &str, args: Value) -> StoreResult<Value> {
        let handler = self
            .procedures
            .get(name)
            .ok_or_else(|| StoreError::ProcedureNotFound(name.to_string()))?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        // 处理器失败时 tx 被 drop，自动回滚
        let output = handler(&tx, &args)?;
        tx.commit()?;
        Ok(output)
    }
}
