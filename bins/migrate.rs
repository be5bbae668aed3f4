use std::process::ExitCode;
use std::sync::Arc;

use configs::AppConfig;
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use service::repo::seaorm::{SeaOrmFamilyRepository, SeaOrmProductRepository};
use service::services::{FamilyService, ProductService};
use tracing::{error, info};

async fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    Migrator::up(&db, None).await?;
    info!(service = "migrate", event = "migrations_applied", "schema is up to date");

    let families = FamilyService::new(Arc::new(SeaOrmFamilyRepository { db: db.clone() }));
    let products = ProductService::new(Arc::new(SeaOrmProductRepository { db }));
    info!(
        service = "migrate",
        event = "catalog_summary",
        families = families.get_number_of_families().await?,
        products = products.get_number_of_products().await?,
        "catalog loaded"
    );
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok();
    let cfg = AppConfig::load_or_env();
    common::utils::logging::init_logging(cfg.as_ref().map(|c| c.logging.json).unwrap_or(false));

    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "migrate", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "migrate", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(&cfg)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "migrate", event = "run_failed", error = %e, "migration run failed");
            ExitCode::FAILURE
        }
    }
}
