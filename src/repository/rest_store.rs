// ==========================================
// DWG 后台 - 远程存储客户端
// ==========================================
// 协议: PostgREST 约定（{url}/rest/v1/...）
// 认证: apikey 头 + Bearer 令牌
// 红线: 不做重试；URL/KEY 缺失时在首次调用报错
// ==========================================

use crate::config::store_config::{env_keys, StoreConfig};
use crate::repository::backend_store::{BackendStore, ListQuery};
use crate::repository::error::{StoreError, StoreResult};
use async_trait::async_trait;
use reqwest::{Client, Method, Request, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

const REST_PREFIX: &str = "rest/v1";

// ==========================================
// RestStore
// ==========================================
pub struct RestStore {
    client: Client,
    base_url: Option<String>,
    api_key: Option<String>,
}

impl RestStore {
    /// 创建远程存储客户端
    ///
    /// 仅构建 HTTP 客户端；端点与凭证在首次请求时校验
    pub fn new(config: &StoreConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Transport(format!("HTTP 客户端构建失败: {}", e)))?;

        Ok(Self {
            client,
            base_url: config
                .url
                .as_ref()
                .map(|u| u.trim_end_matches('/').to_string()),
            api_key: config.api_key.clone(),
        })
    }

    /// 构造带认证头的请求
    fn request(&self, method: Method, path: &str) -> StoreResult<RequestBuilder> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| StoreError::NotConfigured(env_keys::STORE_URL.to_string()))?;
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| StoreError::NotConfigured(env_keys::STORE_KEY.to_string()))?;

        let url = format!("{}/{}/{}", base, REST_PREFIX, path);
        Ok(self
            .client
            .request(method, url)
            .header("apikey", key)
            .bearer_auth(key))
    }

    /// 非 2xx 响应转换为 StoreError::Remote
    async fn ensure_success(resp: Response) -> StoreResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(decode_error_body(status.as_u16(), &body))
    }
}

/// PostgREST 错误响应体
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

fn decode_error_body(status: u16, body: &str) -> StoreError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => StoreError::Remote {
            status,
            message: parsed.message.unwrap_or_else(|| body.to_string()),
            code: parsed.code,
            details: parsed.details,
            hint: parsed.hint,
        },
        Err(_) => StoreError::Remote {
            status,
            message: if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body.trim().to_string()
            },
            code: None,
            details: None,
            hint: None,
        },
    }
}

fn order_param(query: &ListQuery) -> String {
    let direction = if query.descending { "desc" } else { "asc" };
    format!("{}.{}", query.order_by, direction)
}

impl RestStore {
    /// 分页列表请求: select=*&order=<col>.<dir>&offset=&limit=
    fn list_request(&self, query: &ListQuery) -> StoreResult<Request> {
        let params = [
            ("select", "*".to_string()),
            ("order", order_param(query)),
            ("offset", query.offset.to_string()),
            ("limit", query.limit.to_string()),
        ];
        Ok(self.request(Method::GET, &query.table)?.query(&params).build()?)
    }

    /// 单字段更新请求: PATCH ?<key>=eq.<value>
    fn update_request(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<Request> {
        let mut body = Map::new();
        body.insert(field.to_string(), value);

        Ok(self
            .request(Method::PATCH, table)?
            .query(&[(key_column, format!("eq.{}", key))])
            .header("Prefer", "return=minimal")
            .json(&Value::Object(body))
            .build()?)
    }

    /// upsert 请求: POST ?on_conflict=<col>，冲突时合并
    fn upsert_request(&self, table: &str, conflict_column: &str, row: &Value) -> StoreResult<Request> {
        Ok(self
            .request(Method::POST, table)?
            .query(&[("on_conflict", conflict_column)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .build()?)
    }

    /// 存储过程请求: POST rpc/<name>
    fn procedure_request(&self, name: &str, args: &Value) -> StoreResult<Request> {
        Ok(self
            .request(Method::POST, &format!("rpc/{}", name))?
            .json(args)
            .build()?)
    }

    async fn execute(&self, request: Request) -> StoreResult<Response> {
        let resp = self.client.execute(request).await?;
        Self::ensure_success(resp).await
    }
}

#[async_trait]
impl BackendStore for RestStore {
    #[instrument(skip(self), fields(table = %query.table))]
    async fn list_rows(&self, query: &ListQuery) -> StoreResult<Vec<Value>> {
        let request = self.list_request(query)?;
        let rows: Vec<Value> = self.execute(request).await?.json().await?;

        debug!(rows = rows.len(), "列表查询完成");
        Ok(rows)
    }

    async fn update_field(
        &self,
        table: &str,
        key_column: &str,
        key: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()> {
        let request = self.update_request(table, key_column, key, field, value)?;
        self.execute(request).await?;
        Ok(())
    }

    async fn upsert_row(&self, table: &str, conflict_column: &str, row: Value) -> StoreResult<()> {
        let request = self.upsert_request(table, conflict_column, &row)?;
        self.execute(request).await?;
        Ok(())
    }

    #[instrument(skip(self, args))]
    async fn invoke_procedure(&self, name: &str, args: Value) -> StoreResult<Value> {
        let request = self.procedure_request(name, &args)?;
        let text = self.execute(request).await?.text().await?;

        // void 过程返回空体
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text)?)
    }
}
