use std::error::Error;
use std::path::Path;

use chrono::Local;
use crm::executable_utils::{initialize_executable, initialize_tracing};
use crm::maintenance::heartbeat::run_heartbeat;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    initialize_tracing(&config.heartbeat.log_level);

    let client = reqwest::Client::new();
    run_heartbeat(
        &client,
        Path::new(&config.heartbeat.log_path),
        config.heartbeat.graphql_endpoint.as_ref(),
        Local::now().naive_local(),
    )
    .await?;

    Ok(())
}
