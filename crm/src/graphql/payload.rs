use async_graphql::Value;
use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, TypeRef};

use crate::entities::{customer, order, product};

pub const CREATE_CUSTOMER_PAYLOAD: &str = "CreateCustomerPayload";
pub const BULK_CREATE_CUSTOMERS_PAYLOAD: &str = "BulkCreateCustomersPayload";
pub const CREATE_PRODUCT_PAYLOAD: &str = "CreateProductPayload";
pub const CREATE_ORDER_PAYLOAD: &str = "CreateOrderPayload";

/// Mutation results carried through the dynamic schema. The entity fields
/// resolve through the seaography-generated object types, so payloads hold
/// plain SeaORM models.
pub struct CreateCustomerPayload {
    pub customer: Option<customer::Model>,
    pub message: Option<String>,
    pub errors: Vec<String>,
}

pub struct BulkCreateCustomersPayload {
    pub customers: Vec<customer::Model>,
    pub errors: Vec<String>,
}

pub struct CreateProductPayload {
    pub product: Option<product::Model>,
    pub errors: Vec<String>,
}

pub struct CreateOrderPayload {
    pub order: Option<order::Model>,
    pub errors: Vec<String>,
}

fn errors_value(errors: &[String]) -> Value {
    Value::List(errors.iter().map(|e| Value::from(e.as_str())).collect())
}

pub fn create_customer_payload(customer_type: &str) -> Object {
    Object::new(CREATE_CUSTOMER_PAYLOAD)
        .field(Field::new(
            "customer",
            TypeRef::named(customer_type),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx.parent_value.try_downcast_ref::<CreateCustomerPayload>()?;
                    Ok(payload.customer.clone().map(FieldValue::owned_any))
                })
            },
        ))
        .field(Field::new(
            "message",
            TypeRef::named(TypeRef::STRING),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx.parent_value.try_downcast_ref::<CreateCustomerPayload>()?;
                    Ok(payload.message.as_ref().map(Value::from))
                })
            },
        ))
        .field(Field::new(
            "errors",
            TypeRef::named_nn_list_nn(TypeRef::STRING),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx.parent_value.try_downcast_ref::<CreateCustomerPayload>()?;
                    Ok(Some(errors_value(&payload.errors)))
                })
            },
        ))
}

pub fn bulk_create_customers_payload(customer_type: &str) -> Object {
    Object::new(BULK_CREATE_CUSTOMERS_PAYLOAD)
        .field(Field::new(
            "customers",
            TypeRef::named_nn_list_nn(customer_type),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx
                        .parent_value
                        .try_downcast_ref::<BulkCreateCustomersPayload>()?;
                    Ok(Some(FieldValue::list(
                        payload.customers.iter().cloned().map(FieldValue::owned_any),
                    )))
                })
            },
        ))
        .field(Field::new(
            "errors",
            TypeRef::named_nn_list_nn(TypeRef::STRING),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx
                        .parent_value
                        .try_downcast_ref::<BulkCreateCustomersPayload>()?;
                    Ok(Some(errors_value(&payload.errors)))
                })
            },
        ))
}

pub fn create_product_payload(product_type: &str) -> Object {
    Object::new(CREATE_PRODUCT_PAYLOAD)
        .field(Field::new("product", TypeRef::named(product_type), |ctx| {
            FieldFuture::new(async move {
                let payload = ctx.parent_value.try_downcast_ref::<CreateProductPayload>()?;
                Ok(payload.product.clone().map(FieldValue::owned_any))
            })
        }))
        .field(Field::new(
            "errors",
            TypeRef::named_nn_list_nn(TypeRef::STRING),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx.parent_value.try_downcast_ref::<CreateProductPayload>()?;
                    Ok(Some(errors_value(&payload.errors)))
                })
            },
        ))
}

pub fn create_order_payload(order_type: &str) -> Object {
    Object::new(CREATE_ORDER_PAYLOAD)
        .field(Field::new("order", TypeRef::named(order_type), |ctx| {
            FieldFuture::new(async move {
                let payload = ctx.parent_value.try_downcast_ref::<CreateOrderPayload>()?;
                Ok(payload.order.clone().map(FieldValue::owned_any))
            })
        }))
        .field(Field::new(
            "errors",
            TypeRef::named_nn_list_nn(TypeRef::STRING),
            |ctx| {
                FieldFuture::new(async move {
                    let payload = ctx.parent_value.try_downcast_ref::<CreateOrderPayload>()?;
                    Ok(Some(errors_value(&payload.errors)))
                })
            },
        ))
}
