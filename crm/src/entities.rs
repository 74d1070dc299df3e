use chrono::NaiveDateTime;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM Customer Entity
pub mod customer {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "customers")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        #[sea_orm(unique)]
        pub email: String,
        pub phone: Option<String>,
        pub created_at: NaiveDateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order::Entity")]
        Orders,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Orders.def()
        }
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelatedEntity)]
    pub enum RelatedEntity {
        #[sea_orm(entity = "super::order::Entity")]
        Orders,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// SeaORM Product Entity
pub mod product {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub name: String,
        pub price: Decimal,
        pub stock: i32,
        pub created_at: NaiveDateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::order_product::Entity")]
        OrderProducts,
    }

    impl Related<super::order_product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderProducts.def()
        }
    }

    // orders <-> products go through the order_products line items
    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            super::order_product::Relation::Order.def()
        }

        fn via() -> Option<RelationDef> {
            Some(super::order_product::Relation::Product.def().rev())
        }
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelatedEntity)]
    pub enum RelatedEntity {
        #[sea_orm(entity = "super::order_product::Entity")]
        OrderProducts,
        #[sea_orm(entity = "super::order::Entity")]
        Orders,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// SeaORM Order Entity
pub mod order {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "orders")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub customer_id: i64,
        pub total_amount: Decimal,
        pub order_date: NaiveDateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::customer::Entity",
            from = "Column::CustomerId",
            to = "super::customer::Column::Id",
            on_update = "Cascade",
            on_delete = "Cascade"
        )]
        Customer,
        #[sea_orm(has_many = "super::order_product::Entity")]
        OrderProducts,
    }

    impl Related<super::customer::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Customer.def()
        }
    }

    impl Related<super::order_product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::OrderProducts.def()
        }
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            super::order_product::Relation::Product.def()
        }

        fn via() -> Option<RelationDef> {
            Some(super::order_product::Relation::Order.def().rev())
        }
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelatedEntity)]
    pub enum RelatedEntity {
        #[sea_orm(entity = "super::customer::Entity")]
        Customer,
        #[sea_orm(entity = "super::order_product::Entity")]
        OrderProducts,
        #[sea_orm(entity = "super::product::Entity")]
        Products,
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// SeaORM Order/Product line item
pub mod order_product {
    use super::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "order_products")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub order_id: i64,
        pub product_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::order::Entity",
            from = "Column::OrderId",
            to = "super::order::Column::Id",
            on_update = "Cascade",
            on_delete = "Cascade"
        )]
        Order,
        #[sea_orm(
            belongs_to = "super::product::Entity",
            from = "Column::ProductId",
            to = "super::product::Column::Id",
            on_update = "Cascade",
            on_delete = "Cascade"
        )]
        Product,
    }

    impl Related<super::order::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Order.def()
        }
    }

    impl Related<super::product::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Product.def()
        }
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelatedEntity)]
    pub enum RelatedEntity {
        #[sea_orm(entity = "super::order::Entity")]
        Order,
        #[sea_orm(entity = "super::product::Entity")]
        Product,
    }

    impl ActiveModelBehavior for ActiveModel {}
}
