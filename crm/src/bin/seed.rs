use std::error::Error;

use chrono::Utc;
use crm::entities::{customer, product};
use crm::error::CrmError;
use crm::executable_utils::{initialize_executable, initialize_tracing};
use crm::storage::ProdCrmStorage;
use sea_orm::prelude::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, NotSet, QueryFilter, Set};

const CUSTOMERS: &[(&str, &str, Option<&str>)] = &[
    ("Alice", "alice@example.com", Some("+123456789")),
    ("Bob", "bob@example.com", Some("123-456-7890")),
    ("Carol", "carol@example.com", None),
];

// (name, price in cents, stock)
const PRODUCTS: &[(&str, i64, i32)] = &[
    ("Laptop", 99999, 10),
    ("Phone", 49999, 20),
    ("Headphones", 9999, 50),
];

/// Insert the demo customers and products, skipping rows that already exist.
async fn seed(storage: &ProdCrmStorage) -> Result<(), CrmError> {
    for &(name, email, phone) in CUSTOMERS {
        let existing = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .one(&storage.db)
            .await?;
        if existing.is_some() {
            continue;
        }
        customer::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            email: Set(email.to_string()),
            phone: Set(phone.map(str::to_string)),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&storage.db)
        .await?;
    }

    for &(name, price_cents, stock) in PRODUCTS {
        let existing = product::Entity::find()
            .filter(product::Column::Name.eq(name))
            .one(&storage.db)
            .await?;
        if existing.is_some() {
            continue;
        }
        product::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            price: Set(Decimal::new(price_cents, 2)),
            stock: Set(stock),
            created_at: Set(Utc::now().naive_utc()),
        }
        .insert(&storage.db)
        .await?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = initialize_executable()?;
    initialize_tracing(&config.backend.log_level);

    let storage = ProdCrmStorage::new(&config.common.database_url).await?;
    seed(&storage).await?;

    println!("Database seeded successfully!");
    Ok(())
}
