use std::error::Error;
use std::path::Path;

use chrono::Utc;
use crm::executable_utils::{initialize_executable, initialize_tracing};
use crm::maintenance::cleanup::run_cleanup;
use crm::storage::ProdCrmStorage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    initialize_tracing(&config.cleanup.log_level);

    let storage = ProdCrmStorage::new(&config.common.database_url).await?;
    let deleted = run_cleanup(
        &storage,
        Path::new(&config.cleanup.log_path),
        Utc::now().naive_utc(),
    )
    .await?;

    println!("Deleted {} inactive customers", deleted);
    Ok(())
}
