// ==========================================
// DWG 后台 - 导入层
// ==========================================
// 职责: 旧系统 XML 商品目录 → artikel 表
// 支持: Access 风格 XML 导出（dataroot/Product）
// ==========================================

// 模块声明
pub mod article_importer_impl;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod rtf;

// 重导出核心类型
pub use article_importer_impl::ArticleImporterImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::XmlCatalogParser;
pub use rtf::rtf_to_plain;

// 重导出 Trait 接口
pub use importer_trait::{ArticleImporter, CatalogParser, DataCleaner, FieldMapper};
