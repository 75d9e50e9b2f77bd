// ==========================================
// DWG 后台 - 商品目录导入工具
// ==========================================
// 用法: dwg-import（无参数，读取 ./produkte.xml）
// ==========================================

use std::process::ExitCode;

use dwg_backoffice::config::{ImportConfig, StoreConfig};
use dwg_backoffice::{cli, logging};

#[tokio::main]
async fn main() -> ExitCode {
    // .env 文件可选
    dotenvy::dotenv().ok();

    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 商品目录导入", dwg_backoffice::APP_NAME);
    tracing::info!("系统版本: {}", dwg_backoffice::VERSION);
    tracing::info!("==================================================");

    let code = cli::run(&StoreConfig::from_env(), ImportConfig::default()).await;
    ExitCode::from(code)
}
