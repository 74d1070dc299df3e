use std::error::Error;
use std::path::Path;

use chrono::Utc;
use crm::executable_utils::{initialize_executable, initialize_tracing};
use crm::maintenance::reminders::run_reminders;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    initialize_tracing(&config.reminders.log_level);

    let client = reqwest::Client::new();
    let written = run_reminders(
        &client,
        config.reminders.graphql_endpoint.clone(),
        Path::new(&config.reminders.log_path),
        Utc::now().naive_utc(),
    )
    .await?;

    tracing::info!(written, "reminder lines appended");
    println!("Order reminders processed!");
    Ok(())
}
