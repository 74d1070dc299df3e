use std::sync::Arc;
use std::time::Instant;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, ObjectAccessor, TypeRef};
use chrono::NaiveDateTime;
use metrics::histogram;

use crate::error::CrmError;
use crate::graphql::inputs;
use crate::graphql::payload::{
    self, BulkCreateCustomersPayload, CreateCustomerPayload, CreateOrderPayload,
    CreateProductPayload,
};
use crate::storage::{CrmStorage, NewCustomer, NewOrder, NewProduct};
use crate::validation::{phone_is_valid, validate_product_input};

fn internal(error: CrmError) -> async_graphql::Error {
    async_graphql::Error::new(error.to_string())
}

fn parse_customer_input(obj: &ObjectAccessor) -> async_graphql::Result<NewCustomer> {
    let name = obj.try_get("name")?.string()?.to_string();
    let email = obj.try_get("email")?.string()?.to_string();
    let phone = match obj.get("phone") {
        Some(value) if !value.is_null() => Some(value.string()?.to_string()),
        _ => None,
    };
    Ok(NewCustomer { name, email, phone })
}

fn parse_order_date(raw: &str) -> async_graphql::Result<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.naive_utc())
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| async_graphql::Error::new("Invalid order date"))
}

pub fn create_customer() -> Field {
    Field::new(
        "createCustomer",
        TypeRef::named_nn(payload::CREATE_CUSTOMER_PAYLOAD),
        |ctx| {
            FieldFuture::new(async move {
                let storage = ctx.data::<Arc<dyn CrmStorage>>()?;
                let input = parse_customer_input(&ctx.args.try_get("input")?.object()?)?;

                let mut errors = Vec::new();
                if storage.email_exists(&input.email).await.map_err(internal)? {
                    errors.push("Email already exists".to_string());
                }
                if let Some(phone) = input.phone.as_deref() {
                    if !phone_is_valid(phone) {
                        errors.push("Invalid phone format".to_string());
                    }
                }
                if !errors.is_empty() {
                    return Ok(Some(FieldValue::owned_any(CreateCustomerPayload {
                        customer: None,
                        message: None,
                        errors,
                    })));
                }

                let t0 = Instant::now();
                let customer = storage.insert_customer(input).await.map_err(internal)?;
                let h = histogram!("crm_backend_mutation_seconds", "op" => "create_customer");
                h.record(t0.elapsed().as_secs_f64());

                Ok(Some(FieldValue::owned_any(CreateCustomerPayload {
                    customer: Some(customer),
                    message: Some("Customer created".to_string()),
                    errors: Vec::new(),
                })))
            })
        },
    )
    .argument(InputValue::new(
        "input",
        TypeRef::named_nn(inputs::CUSTOMER_INPUT),
    ))
    .description("Create a single customer after validating email uniqueness and phone format.")
}

pub fn bulk_create_customers() -> Field {
    Field::new(
        "bulkCreateCustomers",
        TypeRef::named_nn(payload::BULK_CREATE_CUSTOMERS_PAYLOAD),
        |ctx| {
            FieldFuture::new(async move {
                let storage = ctx.data::<Arc<dyn CrmStorage>>()?;
                let items = ctx.args.try_get("input")?.list()?;
                let mut rows = Vec::with_capacity(items.len());
                for item in items.iter() {
                    rows.push(parse_customer_input(&item.object()?)?);
                }

                let t0 = Instant::now();
                let (customers, errors) =
                    storage.bulk_create_customers(rows).await.map_err(internal)?;
                let h = histogram!("crm_backend_mutation_seconds", "op" => "bulk_create_customers");
                h.record(t0.elapsed().as_secs_f64());

                Ok(Some(FieldValue::owned_any(BulkCreateCustomersPayload {
                    customers,
                    errors,
                })))
            })
        },
    )
    .argument(InputValue::new(
        "input",
        TypeRef::named_nn_list_nn(inputs::CUSTOMER_INPUT),
    ))
    .description("Create many customers at once; invalid rows are skipped and reported.")
}

pub fn create_product() -> Field {
    Field::new(
        "createProduct",
        TypeRef::named_nn(payload::CREATE_PRODUCT_PAYLOAD),
        |ctx| {
            FieldFuture::new(async move {
                let storage = ctx.data::<Arc<dyn CrmStorage>>()?;
                let input = ctx.args.try_get("input")?.object()?;
                let name = input.try_get("name")?.string()?.to_string();
                let price = input.try_get("price")?.f64()?;
                let stock = match input.get("stock") {
                    Some(value) if !value.is_null() => value.i64()?,
                    _ => 0,
                };

                let (price, stock) = match validate_product_input(price, stock) {
                    Ok(validated) => validated,
                    Err(errors) => {
                        return Ok(Some(FieldValue::owned_any(CreateProductPayload {
                            product: None,
                            errors,
                        })));
                    }
                };

                let t0 = Instant::now();
                let product = storage
                    .insert_product(NewProduct { name, price, stock })
                    .await
                    .map_err(internal)?;
                let h = histogram!("crm_backend_mutation_seconds", "op" => "create_product");
                h.record(t0.elapsed().as_secs_f64());

                Ok(Some(FieldValue::owned_any(CreateProductPayload {
                    product: Some(product),
                    errors: Vec::new(),
                })))
            })
        },
    )
    .argument(InputValue::new(
        "input",
        TypeRef::named_nn(inputs::PRODUCT_INPUT),
    ))
    .description("Create a product; price must be positive and stock non-negative.")
}

pub fn create_order() -> Field {
    Field::new(
        "createOrder",
        TypeRef::named_nn(payload::CREATE_ORDER_PAYLOAD),
        |ctx| {
            FieldFuture::new(async move {
                let storage = ctx.data::<Arc<dyn CrmStorage>>()?;
                let customer_id = ctx.args.try_get("customerId")?.i64()?;
                let ids = ctx.args.try_get("productIds")?.list()?;
                let mut product_ids = Vec::with_capacity(ids.len());
                for id in ids.iter() {
                    product_ids.push(id.i64()?);
                }
                let order_date = match ctx.args.get("orderDate") {
                    Some(value) if !value.is_null() => Some(parse_order_date(value.string()?)?),
                    _ => None,
                };

                let t0 = Instant::now();
                let result = storage
                    .create_order(NewOrder {
                        customer_id,
                        product_ids,
                        order_date,
                    })
                    .await;
                let h = histogram!("crm_backend_mutation_seconds", "op" => "create_order");
                h.record(t0.elapsed().as_secs_f64());

                match result {
                    Ok(order) => Ok(Some(FieldValue::owned_any(CreateOrderPayload {
                        order: Some(order),
                        errors: Vec::new(),
                    }))),
                    Err(error) if error.is_validation() => {
                        Ok(Some(FieldValue::owned_any(CreateOrderPayload {
                            order: None,
                            errors: vec![error.to_string()],
                        })))
                    }
                    Err(error) => Err(internal(error)),
                }
            })
        },
    )
    .argument(InputValue::new("customerId", TypeRef::named_nn(TypeRef::INT)))
    .argument(InputValue::new(
        "productIds",
        TypeRef::named_nn_list_nn(TypeRef::INT),
    ))
    .argument(InputValue::new("orderDate", TypeRef::named(TypeRef::STRING)))
    .description("Create an order for a customer; the total is the sum of the product prices.")
}
