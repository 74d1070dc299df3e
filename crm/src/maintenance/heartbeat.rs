use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::maintenance::append_log_line;

pub fn heartbeat_line(now: NaiveDateTime) -> String {
    format!("{} CRM is alive", now.format("%d/%m/%Y-%H:%M:%S"))
}

/// Append a liveness line, then optionally probe the backend's `hello` query.
/// The probe is informational; its failure never fails the heartbeat itself.
pub async fn run_heartbeat(
    client: &reqwest::Client,
    log_path: &Path,
    graphql_endpoint: Option<&Url>,
    now: NaiveDateTime,
) -> anyhow::Result<()> {
    append_log_line(log_path, &heartbeat_line(now))
        .with_context(|| format!("failed to append to {}", log_path.display()))?;

    if let Some(endpoint) = graphql_endpoint {
        match client
            .post(endpoint.clone())
            .json(&json!({ "query": "{ hello }" }))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                debug!(%endpoint, "GraphQL endpoint responsive");
            }
            Ok(response) => {
                warn!(%endpoint, status = %response.status(), "GraphQL endpoint returned an error");
            }
            Err(error) => {
                warn!(%endpoint, %error, "GraphQL endpoint unreachable");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heartbeat_line_uses_day_first_format() {
        let now = chrono::NaiveDateTime::parse_from_str("2026-08-06T07:05:09", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        assert_eq!(heartbeat_line(now), "06/08/2026-07:05:09 CRM is alive");
    }
}
