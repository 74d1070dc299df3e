use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::maintenance::append_log_line;

/// Orders placed within this trailing window get a reminder line.
pub const REMINDER_WINDOW_DAYS: i64 = 7;

const RECENT_ORDERS_QUERY: &str =
    "query RecentOrders { orders { nodes { id orderDate customer { email } } } }";

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<OrdersData>,
}

#[derive(Debug, Deserialize)]
struct OrdersData {
    orders: OrderConnection,
}

#[derive(Debug, Deserialize)]
struct OrderConnection {
    nodes: Vec<OrderNode>,
}

#[derive(Debug, Deserialize)]
pub struct OrderNode {
    pub id: i64,
    #[serde(rename = "orderDate")]
    pub order_date: String,
    pub customer: Option<CustomerNode>,
}

#[derive(Debug, Deserialize)]
pub struct CustomerNode {
    pub email: String,
}

fn parse_order_date(raw: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f").ok())
}

/// One reminder line per order placed on or after `now - 7 days`.
///
/// Orders with an unparseable date or no customer are skipped with a warning
/// rather than failing the whole run.
pub fn reminder_lines(now: NaiveDateTime, orders: &[OrderNode]) -> Vec<String> {
    let cutoff = (now - chrono::Duration::days(REMINDER_WINDOW_DAYS)).date();

    orders
        .iter()
        .filter_map(|order| {
            let Some(order_date) = parse_order_date(&order.order_date) else {
                warn!(order_id = order.id, raw = %order.order_date, "skipping order with unparseable date");
                return None;
            };
            if order_date.date() < cutoff {
                return None;
            }
            let Some(customer) = &order.customer else {
                warn!(order_id = order.id, "skipping order without customer");
                return None;
            };
            Some(format!(
                "{} - Reminder for Order {} (Customer: {})",
                now.format("%Y-%m-%d %H:%M:%S"),
                order.id,
                customer.email
            ))
        })
        .collect()
}

/// Fetch recent orders from the backend and append a reminder line for each.
/// Returns the number of reminders written.
pub async fn run_reminders(
    client: &reqwest::Client,
    endpoint: Url,
    log_path: &Path,
    now: NaiveDateTime,
) -> anyhow::Result<usize> {
    let response = client
        .post(endpoint.clone())
        .json(&json!({ "query": RECENT_ORDERS_QUERY }))
        .send()
        .await
        .with_context(|| format!("failed to reach GraphQL endpoint {}", endpoint))?
        .error_for_status()
        .context("GraphQL endpoint returned an error status")?;

    let body: GraphQlResponse = response
        .json()
        .await
        .context("failed to decode GraphQL response")?;
    let orders = body.data.map(|d| d.orders.nodes).unwrap_or_default();
    debug!(fetched = orders.len(), "fetched orders for reminder scan");

    let lines = reminder_lines(now, &orders);
    for line in &lines {
        append_log_line(log_path, line)
            .with_context(|| format!("failed to append to {}", log_path.display()))?;
    }

    Ok(lines.len())
}
