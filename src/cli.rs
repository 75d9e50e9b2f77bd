// ==========================================
// DWG 后台 - 导入工具运行入口
// ==========================================
// 退出码: 0 = 批次完成（可能含记录级失败），1 = 致命错误
// ==========================================

use std::sync::Arc;

use anyhow::Context;

use crate::config::{ImportConfig, StoreConfig};
use crate::importer::{ArticleImporter, ArticleImporterImpl};
use crate::repository::{BackendStore, RestStore, SqliteStore};

/// 批次完成
pub const EXIT_OK: u8 = 0;

/// 存储初始化失败或导入中止
pub const EXIT_FATAL: u8 = 1;

/// 按配置选择存储端：设置了本地镜像路径则写入 SQLite，否则写入远程存储
pub fn build_store(config: &StoreConfig) -> anyhow::Result<Arc<dyn BackendStore>> {
    match &config.local_db_path {
        Some(path) => {
            tracing::info!(db_path = %path, "使用本地 SQLite 镜像");
            let store = SqliteStore::new(path)
                .with_context(|| format!("无法打开本地镜像: {}", path))?;
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!(url = config.url.as_deref().unwrap_or("<未配置>"), "使用远程存储");
            let store = RestStore::new(config).context("无法创建远程存储客户端")?;
            Ok(Arc::new(store))
        }
    }
}

/// 执行一次导入并返回进程退出码
pub async fn run(store_config: &StoreConfig, import_config: ImportConfig) -> u8 {
    let store = match build_store(store_config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "存储初始化失败");
            return EXIT_FATAL;
        }
    };

    let source_path = import_config.source_path.clone();
    let importer = ArticleImporterImpl::with_defaults(store, import_config);

    match importer.import_from_file(&source_path).await {
        Ok(summary) => {
            if summary.is_clean() {
                tracing::info!(imported = summary.imported, "导入成功");
            } else {
                tracing::warn!(
                    imported = summary.imported,
                    skipped = summary.skipped,
                    failed = summary.failed,
                    "导入完成，部分记录未写入"
                );
            }
            EXIT_OK
        }
        Err(e) => {
            tracing::error!(error = %e, source = %source_path, "导入中止");
            EXIT_FATAL
        }
    }
}
