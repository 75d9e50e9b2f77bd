// ==========================================
// DWG 后台 - 商品导入器实现
// ==========================================
// 职责: 整合导入流程，从 XML 文件到 artikel 表
// 流程: 读取 → 解析 → 映射（清洗/RTF）→ 逐条 upsert → 汇总
// 红线: 记录按文档顺序逐条写入；单条失败不中止批次
// ==========================================

use crate::config::import_config::{ImportConfig, PREVIEW_CHARS};
use crate::domain::article::{ImportSummary, RecordFailure, RecordFailureKind};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as DefaultFieldMapper;
use crate::importer::file_parser::XmlCatalogParser;
use crate::importer::importer_trait::{ArticleImporter, CatalogParser, FieldMapper};
use crate::repository::BackendStore;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ArticleImporterImpl - 商品导入器实现
// ==========================================
pub struct ArticleImporterImpl<S>
where
    S: BackendStore + ?Sized,
{
    // 数据访问层
    store: Arc<S>,

    // 导入参数（目标表、冲突键、元素名）
    config: ImportConfig,

    // 导入组件
    catalog_parser: Box<dyn CatalogParser>,
    field_mapper: Box<dyn FieldMapper>,
}

impl<S> ArticleImporterImpl<S>
where
    S: BackendStore + ?Sized,
{
    /// 创建导入器
    ///
    /// # 参数
    /// - store: 存储端
    /// - config: 导入参数
    /// - catalog_parser: 目录解析器
    /// - field_mapper: 字段映射器
    pub fn new(
        store: Arc<S>,
        config: ImportConfig,
        catalog_parser: Box<dyn CatalogParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            store,
            config,
            catalog_parser,
            field_mapper,
        }
    }

    /// 使用默认 XML 解析器与字段映射器
    pub fn with_defaults(store: Arc<S>, config: ImportConfig) -> Self {
        let parser = XmlCatalogParser::new(&config.root_tag, &config.record_tag);
        Self::new(
            store,
            config,
            Box::new(parser),
            Box::new(DefaultFieldMapper),
        )
    }
}

/// 文档开头的预览（按字符截断）
fn preview(content: &str) -> String {
    content.chars().take(PREVIEW_CHARS).collect()
}

#[async_trait]
impl<S> ArticleImporter for ArticleImporterImpl<S>
where
    S: BackendStore + ?Sized,
{
    async fn import_from_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportSummary> {
        let path = file_path.as_ref();
        let path_str = path.display().to_string();

        if !path.exists() {
            error!(file_path = %path_str, "导入文件不存在");
            return Err(ImportError::FileNotFound(path_str));
        }

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            error!(file_path = %path_str, error = %e, "导入文件读取失败");
            ImportError::FileReadError(format!("{}: {}", path_str, e))
        })?;

        info!(file_path = %path_str, length = content.len(), "导入文件已读取");
        debug!(preview = %preview(&content), "文档预览");

        self.import_from_str(&content, &path_str).await
    }

    #[instrument(skip(self, content), fields(batch_id))]
    async fn import_from_str(&self, content: &str, source: &str) -> ImportResult<ImportSummary> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(source = %source, "开始导入商品数据");

        // === 步骤 1: 解析文档 ===
        debug!("步骤 1: 解析文档");
        let records = self.catalog_parser.parse_records(content).map_err(|e| {
            error!(error = %e, "文档解析失败");
            e
        })?;

        if records.is_empty() {
            error!(record_tag = %self.config.record_tag, "文档中没有商品记录");
            return Err(ImportError::EmptyCatalog {
                record_tag: self.config.record_tag.clone(),
            });
        }

        let total = records.len();
        info!(total = total, "文档解析完成");

        // === 步骤 2: 逐条映射并写入 ===
        debug!("步骤 2: 映射并写入");
        let mut imported = 0usize;
        let mut failures: Vec<RecordFailure> = Vec::new();

        for record in &records {
            let row = match self.field_mapper.map_to_article(record) {
                Ok(row) => row,
                Err(e) => {
                    warn!(position = record.position, error = %e, "记录已跳过");
                    failures.push(RecordFailure {
                        position: record.position,
                        article_id: None,
                        kind: RecordFailureKind::Skipped,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let article_id = row.id;
            let payload = match serde_json::to_value(&row) {
                Ok(payload) => payload,
                Err(e) => {
                    let err = ImportError::InternalError(e.to_string());
                    error!(article_id = article_id, error = %err, "商品序列化失败");
                    failures.push(RecordFailure {
                        position: record.position,
                        article_id: Some(article_id),
                        kind: RecordFailureKind::PersistFailed,
                        reason: err.to_string(),
                    });
                    continue;
                }
            };

            match self
                .store
                .upsert_row(&self.config.target_table, &self.config.key_column, payload)
                .await
            {
                Ok(()) => {
                    imported += 1;
                    debug!(article_id = article_id, "商品已写入");
                }
                Err(e) => {
                    let err = ImportError::PersistFailed {
                        article_id,
                        message: e.detail(),
                    };
                    error!(article_id = article_id, error = %err, "商品写入失败");
                    failures.push(RecordFailure {
                        position: record.position,
                        article_id: Some(article_id),
                        kind: RecordFailureKind::PersistFailed,
                        reason: err.to_string(),
                    });
                }
            }
        }

        // === 步骤 3: 汇总 ===
        let skipped = failures
            .iter()
            .filter(|f| f.kind == RecordFailureKind::Skipped)
            .count();
        let failed = failures.len() - skipped;
        let elapsed_ms = start_time.elapsed().as_millis() as u64;

        info!(
            total = total,
            imported = imported,
            skipped = skipped,
            failed = failed,
            elapsed_ms = elapsed_ms,
            "商品导入完成"
        );

        Ok(ImportSummary {
            batch_id,
            source: source.to_string(),
            total,
            imported,
            skipped,
            failed,
            failures,
            elapsed_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{ListQuery, SqliteStore, StoreError, StoreResult};
    use serde_json::Value;
    use std::sync::Mutex;

    const TWO_PRODUCTS: &str = r#"<dataroot>
        <Product><ID>1</ID><Name>Schraube</Name><SalesPrice>0.25</SalesPrice></Product>
        <Product><ID>2</ID><Name>Mutter</Name><SalesPrice>0.10</SalesPrice></Product>
    </dataroot>"#;

    /// 记录写入顺序，指定 id 的写入失败
    struct RecordingStore {
        upserts: Mutex<Vec<Value>>,
        reject_id: Option<i64>,
    }

    impl RecordingStore {
        fn new(reject_id: Option<i64>) -> Self {
            Self {
                upserts: Mutex::new(Vec::new()),
                reject_id,
            }
        }
    }

    #[async_trait]
    impl BackendStore for RecordingStore {
        async fn list_rows(&self, _query: &ListQuery) -> StoreResult<Vec<Value>> {
            Ok(Vec::new())
        }

        async fn update_field(
            &self,
            _table: &str,
            _key_column: &str,
            _key: &str,
            _field: &str,
            _value: Value,
        ) -> StoreResult<()> {
            Ok(())
        }

        async fn upsert_row(&self, _table: &str, _conflict: &str, row: Value) -> StoreResult<()> {
            if self.reject_id.is_some() && row["id"].as_i64() == self.reject_id {
                return Err(StoreError::Remote {
                    status: 400,
                    message: "value too long for type character varying(20)".to_string(),
                    code: Some("22001".to_string()),
                    details: None,
                    hint: None,
                });
            }
            self.upserts.lock().unwrap().push(row);
            Ok(())
        }

        async fn invoke_procedure(&self, name: &str, _args: Value) -> StoreResult<Value> {
            Err(StoreError::ProcedureNotFound(name.to_string()))
        }
    }

    #[tokio::test]
    async fn test_records_are_written_in_document_order() {
        let store = Arc::new(RecordingStore::new(None));
        let importer = ArticleImporterImpl::with_defaults(store.clone(), ImportConfig::default());

        let summary = importer.import_from_str(TWO_PRODUCTS, "test").await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.imported, 2);
        assert!(summary.is_clean());
        let upserts = store.upserts.lock().unwrap();
        assert_eq!(upserts[0]["id"], 1);
        assert_eq!(upserts[1]["id"], 2);
        assert_eq!(upserts[1]["name"], "Mutter");
    }

    #[tokio::test]
    async fn test_persist_failure_does_not_stop_batch() {
        let store = Arc::new(RecordingStore::new(Some(1)));
        let importer = ArticleImporterImpl::with_defaults(store.clone(), ImportConfig::default());

        let summary = importer.import_from_str(TWO_PRODUCTS, "test").await.unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].article_id, Some(1));
        assert_eq!(summary.failures[0].kind, RecordFailureKind::PersistFailed);
        assert!(summary.failures[0].reason.contains("character varying(20)"));
        assert_eq!(store.upserts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_identifier_is_skipped() {
        let store = Arc::new(RecordingStore::new(None));
        let importer = ArticleImporterImpl::with_defaults(store.clone(), ImportConfig::default());
        let xml = "<dataroot><Product><Name>ohne</Name></Product><Product><ID>3</ID></Product></dataroot>";

        let summary = importer.import_from_str(xml, "test").await.unwrap();

        assert_eq!(summary.total, 2);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failures[0].position, 1);
        assert_eq!(summary.failures[0].kind, RecordFailureKind::Skipped);
    }

    #[tokio::test]
    async fn test_identifier_attribute_is_not_an_identifier() {
        let store = Arc::new(RecordingStore::new(None));
        let importer = ArticleImporterImpl::with_defaults(store.clone(), ImportConfig::default());
        let xml = r#"<dataroot><Product ID="6"><Name>Nur Attribut</Name></Product></dataroot>"#;

        let summary = importer.import_from_str(xml, "test").await.unwrap();

        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.imported, 0);
        assert!(store.upserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_catalog_makes_no_store_calls() {
        let store = Arc::new(RecordingStore::new(None));
        let importer = ArticleImporterImpl::with_defaults(store.clone(), ImportConfig::default());

        let result = importer.import_from_str("<dataroot/>", "test").await;

        assert!(matches!(result, Err(ImportError::EmptyCatalog { .. })));
        assert!(store.upserts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let importer = ArticleImporterImpl::with_defaults(store, ImportConfig::default());

        let result = importer.import_from_file("/nonexistent/produkte.xml").await;

        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_preview_is_char_bounded() {
        let content = "ä".repeat(PREVIEW_CHARS + 10);
        assert_eq!(preview(&content).chars().count(), PREVIEW_CHARS);
        assert_eq!(preview("kurz"), "kurz");
    }
}
