use std::sync::Arc;

use async_graphql::dynamic::Schema;
use crm::storage::CrmStorage;
use sea_orm::{DatabaseBackend, MockDatabase};

mod mocks;

use mocks::{MockStorage, customer_model, order_model, product_model};

/// Schema over a mock connection; the seaography queries are never executed
/// here, only the hand-written mutations backed by the mocked storage.
fn test_schema(storage: MockStorage) -> Schema {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let storage: Arc<dyn CrmStorage> = Arc::new(storage);
    crm::graphql::schema(db, storage, None, None).expect("schema should build")
}

#[tokio::test]
async fn hello_answers() {
    let schema = test_schema(MockStorage::new());

    let response = schema.execute("{ hello }").await;
    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["hello"], "Hello, GraphQL!");
}

#[tokio::test]
async fn schema_exposes_custom_mutations_and_inputs() {
    let schema = test_schema(MockStorage::new());
    let sdl = schema.sdl();

    for needle in [
        "createCustomer",
        "bulkCreateCustomers",
        "createProduct",
        "createOrder",
        "CustomerInput",
        "ProductInput",
    ] {
        assert!(sdl.contains(needle), "SDL is missing {needle}");
    }
}

#[tokio::test]
async fn create_customer_succeeds() {
    let mut storage = MockStorage::new();
    storage.expect_email_exists().returning(|_| Ok(false));
    storage.expect_insert_customer().returning(|input| {
        let mut model = customer_model(1, &input.name, &input.email);
        model.phone = input.phone;
        Ok(model)
    });

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createCustomer(input: { name: "Alice", email: "alice@example.com", phone: "+123456789" }) {
                    customer { name email }
                    message
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["createCustomer"]["message"], "Customer created");
    assert_eq!(data["createCustomer"]["customer"]["name"], "Alice");
    assert_eq!(
        data["createCustomer"]["customer"]["email"],
        "alice@example.com"
    );
    assert_eq!(data["createCustomer"]["errors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_customer_rejects_duplicate_email() {
    let mut storage = MockStorage::new();
    storage.expect_email_exists().returning(|_| Ok(true));

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createCustomer(input: { name: "Alice", email: "alice@example.com" }) {
                    customer { id }
                    message
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["createCustomer"]["customer"].is_null());
    assert!(data["createCustomer"]["message"].is_null());
    assert_eq!(
        data["createCustomer"]["errors"],
        serde_json::json!(["Email already exists"])
    );
}

#[tokio::test]
async fn create_customer_collects_every_validation_error() {
    let mut storage = MockStorage::new();
    storage.expect_email_exists().returning(|_| Ok(true));

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createCustomer(input: { name: "Alice", email: "alice@example.com", phone: "nope" }) {
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(
        data["createCustomer"]["errors"],
        serde_json::json!(["Email already exists", "Invalid phone format"])
    );
}

#[tokio::test]
async fn bulk_create_customers_reports_partial_success() {
    let mut storage = MockStorage::new();
    storage.expect_bulk_create_customers().returning(|rows| {
        assert_eq!(rows.len(), 2);
        Ok((
            vec![customer_model(1, &rows[0].name, &rows[0].email)],
            vec!["Row 2: Email already exists".to_string()],
        ))
    });

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                bulkCreateCustomers(input: [
                    { name: "Alice", email: "alice@example.com" },
                    { name: "Bob", email: "alice@example.com" }
                ]) {
                    customers { name }
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["bulkCreateCustomers"]["customers"].as_array().unwrap().len(), 1);
    assert_eq!(
        data["bulkCreateCustomers"]["errors"],
        serde_json::json!(["Row 2: Email already exists"])
    );
}

#[tokio::test]
async fn create_product_succeeds_with_default_stock() {
    let mut storage = MockStorage::new();
    storage.expect_insert_product().returning(|input| {
        assert_eq!(input.stock, 0);
        Ok(product_model(1, &input.name, 99999, input.stock))
    });

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createProduct(input: { name: "Laptop", price: 999.99 }) {
                    product { name stock }
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["createProduct"]["product"]["name"], "Laptop");
    assert_eq!(data["createProduct"]["product"]["stock"], 0);
    assert_eq!(data["createProduct"]["errors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_product_rejects_bad_price_and_stock() {
    // No storage expectations: validation must fail before any insert
    let schema = test_schema(MockStorage::new());
    let response = schema
        .execute(
            r#"mutation {
                createProduct(input: { name: "Laptop", price: -1.0, stock: -5 }) {
                    product { id }
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["createProduct"]["product"].is_null());
    assert_eq!(
        data["createProduct"]["errors"],
        serde_json::json!(["Price must be positive", "Stock cannot be negative"])
    );
}

#[tokio::test]
async fn create_order_succeeds() {
    let mut storage = MockStorage::new();
    storage.expect_create_order().returning(|input| {
        assert_eq!(input.customer_id, 1);
        assert_eq!(input.product_ids, vec![1, 2]);
        Ok(order_model(7, input.customer_id, 149998))
    });

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createOrder(customerId: 1, productIds: [1, 2]) {
                    order { id }
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert_eq!(data["createOrder"]["order"]["id"], 7);
    assert_eq!(data["createOrder"]["errors"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_order_surfaces_validation_errors_in_payload() {
    let mut storage = MockStorage::new();
    storage
        .expect_create_order()
        .returning(|_| Err(crm::error::CrmError::CustomerNotFound(99)));

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createOrder(customerId: 99, productIds: [1]) {
                    order { id }
                    errors
                }
            }"#,
        )
        .await;

    assert!(response.errors.is_empty(), "{:?}", response.errors);
    let data = response.data.into_json().unwrap();
    assert!(data["createOrder"]["order"].is_null());
    assert_eq!(
        data["createOrder"]["errors"],
        serde_json::json!(["Invalid customer ID"])
    );
}

#[tokio::test]
async fn create_order_propagates_database_failures() {
    let mut storage = MockStorage::new();
    storage.expect_create_order().returning(|_| {
        Err(crm::error::CrmError::Database(sea_orm::DbErr::Custom(
            "connection refused".to_string(),
        )))
    });

    let schema = test_schema(storage);
    let response = schema
        .execute(
            r#"mutation {
                createOrder(customerId: 1, productIds: [1]) {
                    errors
                }
            }"#,
        )
        .await;

    assert!(
        !response.errors.is_empty(),
        "database failures must not be folded into payload errors"
    );
}
