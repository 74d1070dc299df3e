use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use sea_orm::prelude::Decimal;
use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DeleteMany,
    EntityTrait, NotSet, QueryFilter, Set, TransactionTrait,
};
use tracing::{debug, info};

use crate::entities::{customer, order, order_product, product};
use crate::error::CrmError;
use crate::maintenance::cleanup::inactivity_cutoff;
use crate::storage::{CrmStorage, NewCustomer, NewOrder, NewProduct};
use crate::validation::bulk_row_errors;

/// SeaORM-backed storage implementation for the CRM.
#[derive(Clone)]
pub struct ProdCrmStorage {
    pub db: DatabaseConnection,
}

impl ProdCrmStorage {
    pub async fn new(database_url: &str) -> Result<Self, CrmError> {
        let db = Database::connect(database_url).await?;
        Ok(Self { db })
    }

    pub fn with_connection(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn email_taken<C: ConnectionTrait>(conn: &C, email: &str) -> Result<bool, CrmError> {
        let existing = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .one(conn)
            .await?;
        Ok(existing.is_some())
    }
}

/// Filter matching every inactive customer: no order on or after the cutoff.
///
/// A single `NOT IN (recent orders)` subquery is the deduplicated union of
/// "has no orders at all" and "has only orders older than the window".
pub(crate) fn inactive_customers_filter(cutoff: NaiveDateTime) -> SimpleExpr {
    customer::Column::Id.not_in_subquery(
        Query::select()
            .column(order::Column::CustomerId)
            .from(order::Entity)
            .and_where(order::Column::OrderDate.gte(cutoff))
            .to_owned(),
    )
}

pub(crate) fn inactive_customers_delete(cutoff: NaiveDateTime) -> DeleteMany<customer::Entity> {
    customer::Entity::delete_many().filter(inactive_customers_filter(cutoff))
}

#[async_trait]
impl CrmStorage for ProdCrmStorage {
    async fn email_exists(&self, email: &str) -> Result<bool, CrmError> {
        Self::email_taken(&self.db, email).await
    }

    async fn insert_customer(&self, input: NewCustomer) -> Result<customer::Model, CrmError> {
        let model = customer::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
            phone: Set(input.phone),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&self.db)
        .await?;

        debug!(customer_id = model.id, "created customer");
        Ok(model)
    }

    async fn bulk_create_customers(
        &self,
        rows: Vec<NewCustomer>,
    ) -> Result<(Vec<customer::Model>, Vec<String>), CrmError> {
        let txn = self.db.begin().await?;

        let mut created = Vec::new();
        let mut errors = Vec::new();
        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + 1;

            let mut errs = Vec::new();
            if Self::email_taken(&txn, &row.email).await? {
                errs.push(format!("Row {}: Email already exists", row_number));
            }
            errs.extend(bulk_row_errors(
                row_number,
                &row.name,
                &row.email,
                row.phone.as_deref(),
            ));

            if !errs.is_empty() {
                errors.extend(errs);
                continue;
            }

            let model = customer::ActiveModel {
                id: NotSet,
                name: Set(row.name),
                email: Set(row.email),
                phone: Set(row.phone),
                created_at: Set(Utc::now().naive_utc()),
            }
            .insert(&txn)
            .await?;
            created.push(model);
        }

        txn.commit().await?;
        info!(
            created = created.len(),
            rejected = errors.len(),
            "bulk customer creation finished"
        );
        Ok((created, errors))
    }

    async fn insert_product(&self, input: NewProduct) -> Result<product::Model, CrmError> {
        let model = product::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            price: Set(input.price),
            stock: Set(input.stock),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&self.db)
        .await?;

        debug!(product_id = model.id, "created product");
        Ok(model)
    }

    async fn create_order(&self, input: NewOrder) -> Result<order::Model, CrmError> {
        customer::Entity::find_by_id(input.customer_id)
            .one(&self.db)
            .await?
            .ok_or(CrmError::CustomerNotFound(input.customer_id))?;

        if input.product_ids.is_empty() {
            return Err(CrmError::NoProducts);
        }

        let requested: BTreeSet<i64> = input.product_ids.iter().copied().collect();
        let products = product::Entity::find()
            .filter(product::Column::Id.is_in(requested.iter().copied()))
            .all(&self.db)
            .await?;

        let found: BTreeSet<i64> = products.iter().map(|p| p.id).collect();
        let missing: Vec<i64> = requested.difference(&found).copied().collect();
        if !missing.is_empty() {
            return Err(CrmError::ProductsNotFound(missing));
        }

        let order_date = input.order_date.unwrap_or_else(|| Utc::now().naive_utc());
        let total: Decimal = products.iter().map(|p| p.price).sum();

        let txn = self.db.begin().await?;
        let order = order::ActiveModel {
            id: NotSet,
            customer_id: Set(input.customer_id),
            total_amount: Set(total),
            order_date: Set(order_date),
        }
        .insert(&txn)
        .await?;

        for product in &products {
            order_product::ActiveModel {
                id: NotSet,
                order_id: Set(order.id),
                product_id: Set(product.id),
            }
            .insert(&txn)
            .await?;
        }
        txn.commit().await?;

        debug!(order_id = order.id, total = %order.total_amount, "created order");
        Ok(order)
    }

    async fn find_and_delete_inactive_customers(
        &self,
        now: NaiveDateTime,
    ) -> Result<u64, CrmError> {
        let cutoff = inactivity_cutoff(now);
        let result = inactive_customers_delete(cutoff).exec(&self.db).await?;

        info!(
            deleted = result.rows_affected,
            %cutoff,
            "deleted inactive customers"
        );
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn inactive_delete_targets_customers_without_recent_orders() {
        let cutoff = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc();
        let sql = inactive_customers_delete(cutoff)
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.starts_with(r#"DELETE FROM "customers""#), "sql: {sql}");
        assert!(sql.contains("NOT IN"), "sql: {sql}");
        assert!(sql.contains(r#"FROM "orders""#), "sql: {sql}");
        assert!(sql.contains(r#""order_date" >="#), "sql: {sql}");
    }

    #[test]
    fn inactive_filter_uses_single_subquery() {
        let cutoff = chrono::DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .naive_utc();
        let sql = customer::Entity::find()
            .filter(inactive_customers_filter(cutoff))
            .build(DbBackend::Postgres)
            .to_string();

        // One subquery covers both "no orders" and "only stale orders".
        assert_eq!(sql.matches("SELECT").count(), 2, "sql: {sql}");
    }
}
