// ==========================================
// ArticleImporter 集成测试
// ==========================================
// 测试目标: 验证从 XML 文件到 artikel 表的完整导入流程
// ==========================================


use dwg_backoffice::config::{tables, ImportConfig};
use dwg_backoffice::domain::RecordFailureKind;
use dwg_backoffice::importer::{ArticleImporter, ArticleImporterImpl, ImportError};
use dwg_backoffice::logging;
use dwg_backoffice::repository::SqliteStore;
use std::sync::Arc;
use test_helpers::{catalog_xml, create_test_store, product_xml, write_temp_catalog};

const SAMPLE_PATH: &str = "tests/fixtures/produkte_sample.xml";

/// 创建测试用的导入器
fn create_test_importer(store: Arc<SqliteStore>) -> ArticleImporterImpl<SqliteStore> {
    ArticleImporterImpl::with_defaults(store, ImportConfig::default())
}

#[tokio::test]
async fn test_import_sample_catalog() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let summary = importer
        .import_from_file(SAMPLE_PATH)
        .await
        .expect("Import should succeed");

    assert_eq!(summary.total, 3);
    assert_eq!(summary.imported, 3);
    assert!(summary.is_clean());
    assert_eq!(summary.source, SAMPLE_PATH);
    assert_eq!(store.count_rows(tables::ARTICLE_TABLE).unwrap(), 3);

    // 完整记录
    let row = store.get_row(tables::ARTICLE_TABLE, "1001").unwrap().unwrap();
    assert_eq!(row["code_nr"], "SCH-M8-40");
    assert_eq!(row["sales_price"], 0.25);
    assert_eq!(row["stock_tot"], 1200.0);
    assert_eq!(row["is_brutto"], true);
    assert_eq!(row["buchhaltungskonto"], "8400");
    assert_eq!(row["ist_favorit"], true);
    assert_eq!(row["position_favorit"], 2);
    let description = row["description"].as_str().unwrap();
    assert!(description.contains("Verzinkt, DIN 933"));
    assert!(!description.contains('\\'));
    assert!(!description.contains('{'));

    // 稀疏记录：缺失数值为 0，缺失文本为 null
    let row = store.get_row(tables::ARTICLE_TABLE, "1002").unwrap().unwrap();
    assert_eq!(row["name"], "Mutter M8 & Scheibe");
    assert_eq!(row["purchase_price"], 0.0);
    assert!(row["barcode_nr"].is_null());
    assert!(row["storehouse_name"].is_null());
    assert_eq!(row["description"], "");
    assert_eq!(row["is_brutto"], false);

    let row = store.get_row(tables::ARTICLE_TABLE, "1003").unwrap().unwrap();
    assert_eq!(row["description"], "Pauschal je Einsatz");
    assert_eq!(row["undiscountable"], true);
    assert_eq!(row["use_stock"], false);
    assert_eq!(row["short_comment"], "nur Inland");
}

#[tokio::test]
async fn test_import_is_idempotent() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    importer.import_from_file(SAMPLE_PATH).await.unwrap();
    let first = store.all_rows(tables::ARTICLE_TABLE).unwrap();

    let summary = importer.import_from_file(SAMPLE_PATH).await.unwrap();
    let second = store.all_rows(tables::ARTICLE_TABLE).unwrap();

    assert_eq!(summary.imported, 3);
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_reimport_overwrites_changed_article() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let v1 = catalog_xml(&[product_xml(&[("ID", "7"), ("Name", "Alt"), ("SalesPrice", "1.5")])]);
    let v2 = catalog_xml(&[product_xml(&[("ID", "7"), ("Name", "Neu")])]);

    importer.import_from_str(&v1, "v1").await.unwrap();
    importer.import_from_str(&v2, "v2").await.unwrap();

    assert_eq!(store.count_rows(tables::ARTICLE_TABLE).unwrap(), 1);
    let row = store.get_row(tables::ARTICLE_TABLE, "7").unwrap().unwrap();
    assert_eq!(row["name"], "Neu");
    assert_eq!(row["sales_price"], 0.0);
}

#[tokio::test]
async fn test_invalid_identifier_is_skipped_and_batch_completes() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let xml = catalog_xml(&[
        product_xml(&[("ID", "1"), ("Name", "Eins")]),
        product_xml(&[("ID", "X-2"), ("Name", "Kaputt")]),
        product_xml(&[("ID", "3"), ("Name", "Drei")]),
        product_xml(&[("Name", "Ohne ID")]),
        product_xml(&[("ID", "5"), ("Name", "Fünf")]),
    ]);
    let (_temp_file, path) = write_temp_catalog(&xml);

    let summary = importer.import_from_file(&path).await.unwrap();

    assert_eq!(summary.total, 5);
    assert_eq!(summary.imported, 3);
    assert_eq!(summary.skipped, 2);
    assert_eq!(summary.failed, 0);
    assert_eq!(store.count_rows(tables::ARTICLE_TABLE).unwrap(), 3);

    let positions: Vec<usize> = summary.failures.iter().map(|f| f.position).collect();
    assert_eq!(positions, vec![2, 4]);
    assert!(summary
        .failures
        .iter()
        .all(|f| f.kind == RecordFailureKind::Skipped && f.article_id.is_none()));
}

#[tokio::test]
async fn test_single_product_document() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let xml = catalog_xml(&[product_xml(&[("ID", "42"), ("Name", "Einzeln")])]);
    let summary = importer.import_from_str(&xml, "<memory>").await.unwrap();

    assert_eq!(summary.total, 1);
    assert_eq!(summary.imported, 1);
    assert!(store.get_row(tables::ARTICLE_TABLE, "42").unwrap().is_some());
}

#[tokio::test]
async fn test_zero_products_is_fatal_without_writes() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let (_temp_file, path) = write_temp_catalog(&catalog_xml(&[]));
    let result = importer.import_from_file(&path).await;

    match result {
        Err(ImportError::EmptyCatalog { record_tag }) => assert_eq!(record_tag, "Product"),
        other => panic!("expected EmptyCatalog, got {:?}", other),
    }
    assert_eq!(store.count_rows(tables::ARTICLE_TABLE).unwrap(), 0);
}

#[tokio::test]
async fn test_missing_file_is_fatal() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let result = importer.import_from_file("tests/fixtures/does_not_exist.xml").await;

    assert!(matches!(result, Err(ImportError::FileNotFound(ref p)) if p.ends_with("does_not_exist.xml")));
}

#[tokio::test]
async fn test_malformed_document_is_fatal_without_writes() {
    logging::init_test();

    let store = Arc::new(create_test_store());
    let importer = create_test_importer(store.clone());

    let (_temp_file, path) =
        write_temp_catalog("<dataroot><Product><ID>1</ID></Product><Product><ID>2</ID>");
    let result = importer.import_from_file(&path).await;

    assert!(matches!(result, Err(ImportError::MalformedDocument(_))));
    assert_eq!(store.count_rows(tables::ARTICLE_TABLE).unwrap(), 0);
}

#[tokio::test]
async fn test_import_into_sqlite_file_mirror() {
    logging::init_test();

    let temp_db = tempfile::NamedTempFile::new().unwrap();
    let db_path = temp_db.path().to_str().unwrap().to_string();

    {
        let store = Arc::new(SqliteStore::new(&db_path).unwrap());
        let importer = create_test_importer(store);
        importer.import_from_file(SAMPLE_PATH).await.unwrap();
    }

    // 重新打开后数据仍在
    let reopened = SqliteStore::new(&db_path).unwrap();
    assert_eq!(reopened.count_rows(tables::ARTICLE_TABLE).unwrap(), 3);
}
