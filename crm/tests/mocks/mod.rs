#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDateTime;
use crm::entities::{customer, order, product};
use crm::error::CrmError;
use crm::storage::{CrmStorage, NewCustomer, NewOrder, NewProduct};
use mockall::mock;
use sea_orm::prelude::Decimal;

mock! {
    pub Storage {}

    #[async_trait]
    impl CrmStorage for Storage {
        async fn email_exists(&self, email: &str) -> Result<bool, CrmError>;
        async fn insert_customer(&self, input: NewCustomer) -> Result<customer::Model, CrmError>;
        async fn bulk_create_customers(
            &self,
            rows: Vec<NewCustomer>,
        ) -> Result<(Vec<customer::Model>, Vec<String>), CrmError>;
        async fn insert_product(&self, input: NewProduct) -> Result<product::Model, CrmError>;
        async fn create_order(&self, input: NewOrder) -> Result<order::Model, CrmError>;
        async fn find_and_delete_inactive_customers(
            &self,
            now: NaiveDateTime,
        ) -> Result<u64, CrmError>;
    }
}

pub fn epoch() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc()
}

pub fn customer_model(id: i64, name: &str, email: &str) -> customer::Model {
    customer::Model {
        id,
        name: name.to_string(),
        email: email.to_string(),
        phone: None,
        created_at: epoch(),
    }
}

pub fn product_model(id: i64, name: &str, price_cents: i64, stock: i32) -> product::Model {
    product::Model {
        id,
        name: name.to_string(),
        price: Decimal::new(price_cents, 2),
        stock,
        created_at: epoch(),
    }
}

pub fn order_model(id: i64, customer_id: i64, total_cents: i64) -> order::Model {
    order::Model {
        id,
        customer_id,
        total_amount: Decimal::new(total_cents, 2),
        order_date: epoch(),
    }
}
