use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::prelude::Decimal;

use crate::entities::{customer, order, product};
use crate::error::CrmError;

mod prod;

pub use prod::ProdCrmStorage;

/// New-customer data as accepted by the create mutations.
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub product_ids: Vec<i64>,
    /// Defaults to the current time when absent.
    pub order_date: Option<NaiveDateTime>,
}

/// Persistence seam for the CRM.
///
/// The production implementation talks to Postgres through SeaORM; tests
/// substitute mocks. Validation failures come back as the dedicated
/// `CrmError` variants so resolvers can fold them into payload error lists.
#[async_trait]
pub trait CrmStorage: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, CrmError>;

    async fn insert_customer(&self, input: NewCustomer) -> Result<customer::Model, CrmError>;

    /// Insert every valid row, skipping invalid ones. Returns the created
    /// customers plus row-prefixed error messages for the rejected rows.
    /// All inserts share one transaction, so earlier rows of the same batch
    /// count for the duplicate-email check.
    async fn bulk_create_customers(
        &self,
        rows: Vec<NewCustomer>,
    ) -> Result<(Vec<customer::Model>, Vec<String>), CrmError>;

    async fn insert_product(&self, input: NewProduct) -> Result<product::Model, CrmError>;

    /// Create an order plus its line items, computing the total from the
    /// referenced products' prices.
    async fn create_order(&self, input: NewOrder) -> Result<order::Model, CrmError>;

    /// Delete every customer with no order inside the trailing inactivity
    /// window ending at `now`, cascading to their orders. Returns the number
    /// of customers removed.
    async fn find_and_delete_inactive_customers(
        &self,
        now: NaiveDateTime,
    ) -> Result<u64, CrmError>;
}
