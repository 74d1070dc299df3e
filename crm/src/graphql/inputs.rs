use async_graphql::dynamic::{InputObject, InputValue, TypeRef};

pub const CUSTOMER_INPUT: &str = "CustomerInput";
pub const PRODUCT_INPUT: &str = "ProductInput";

pub fn customer_input() -> InputObject {
    InputObject::new(CUSTOMER_INPUT)
        .description("New customer attributes.")
        .field(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING)))
        .field(InputValue::new("email", TypeRef::named_nn(TypeRef::STRING)))
        .field(InputValue::new("phone", TypeRef::named(TypeRef::STRING)))
}

pub fn product_input() -> InputObject {
    InputObject::new(PRODUCT_INPUT)
        .description("New product attributes.")
        .field(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING)))
        .field(InputValue::new("price", TypeRef::named_nn(TypeRef::FLOAT)))
        .field(InputValue::new("stock", TypeRef::named(TypeRef::INT)))
}
