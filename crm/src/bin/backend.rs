use std::error::Error;
use std::sync::Arc;

use crm::executable_utils::{initialize_executable, initialize_tracing, run_backend};
use crm::storage::{CrmStorage, ProdCrmStorage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    initialize_tracing(&config.backend.log_level);

    let storage = ProdCrmStorage::new(&config.common.database_url).await?;
    let db = storage.db.clone();
    let storage: Arc<dyn CrmStorage> = Arc::new(storage);

    run_backend(config.backend, db, storage).await
}
