use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, Schema, SchemaError, TypeRef};
use lazy_static::lazy_static;
use sea_orm::DatabaseConnection;
use seaography::{Builder, BuilderContext, EntityObjectBuilder};

use crate::entities::{customer, order, order_product, product};
use crate::storage::CrmStorage;

mod inputs;
mod mutations;
mod payload;

pub use payload::{
    BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload, CreateProductPayload,
};

lazy_static! {
    static ref CONTEXT: BuilderContext = BuilderContext::default();
}

fn hello_query() -> Field {
    Field::new("hello", TypeRef::named_nn(TypeRef::STRING), |_ctx| {
        FieldFuture::new(async move { Ok(Some(Value::from("Hello, GraphQL!"))) })
    })
    .description("Connectivity probe used by the heartbeat job.")
}

/// Build the CRM schema: seaography-generated queries (filtering, ordering,
/// pagination and relation traversal) over the four entities, plus the
/// hand-written validated mutations.
pub fn schema(
    db: DatabaseConnection,
    storage: Arc<dyn CrmStorage>,
    depth: Option<usize>,
    complexity: Option<usize>,
) -> Result<Schema, SchemaError> {
    let mut builder = Builder::new(&CONTEXT, db.clone());
    seaography::register_entities!(builder, [customer, product, order, order_product]);

    builder.queries.push(hello_query());
    builder.mutations.push(mutations::create_customer());
    builder.mutations.push(mutations::bulk_create_customers());
    builder.mutations.push(mutations::create_product());
    builder.mutations.push(mutations::create_order());

    let entity_object_builder = EntityObjectBuilder { context: &CONTEXT };
    let customer_type = entity_object_builder.type_name::<customer::Entity>();
    let product_type = entity_object_builder.type_name::<product::Entity>();
    let order_type = entity_object_builder.type_name::<order::Entity>();

    let schema = builder
        .schema_builder()
        .register(inputs::customer_input())
        .register(inputs::product_input())
        .register(payload::create_customer_payload(&customer_type))
        .register(payload::bulk_create_customers_payload(&customer_type))
        .register(payload::create_product_payload(&product_type))
        .register(payload::create_order_payload(&order_type))
        .data(db)
        .data(storage);
    let schema = if let Some(depth) = depth {
        schema.limit_depth(depth)
    } else {
        schema
    };
    let schema = if let Some(complexity) = complexity {
        schema.limit_complexity(complexity)
    } else {
        schema
    };
    schema.finish()
}
