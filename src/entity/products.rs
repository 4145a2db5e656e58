use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_SELLER_RATING: &str = "5.0";

/// Listing condition, stored and sent as its display text.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum ProductCondition {
    #[sea_orm(string_value = "New")]
    #[serde(rename = "New")]
    New,
    #[sea_orm(string_value = "Used-Like New")]
    #[serde(rename = "Used-Like New")]
    UsedLikeNew,
    #[sea_orm(string_value = "Used-Good")]
    #[serde(rename = "Used-Good")]
    UsedGood,
    #[sea_orm(string_value = "Used-Fair")]
    #[serde(rename = "Used-Fair")]
    UsedFair,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "New",
            ProductCondition::UsedLikeNew => "Used-Like New",
            ProductCondition::UsedGood => "Used-Good",
            ProductCondition::UsedFair => "Used-Fair",
        }
    }
}

/// A listing. `price` and `seller_rating` are decimals carried as text.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
#[schema(as = Product)]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: String,
    pub condition: ProductCondition,
    pub category: String,
    pub image: String,
    pub seller_id: i32,
    pub seller_name: String,
    #[sea_orm(default_value = "5.0")]
    #[serde(default = "default_seller_rating")]
    pub seller_rating: String,
}

fn default_seller_rating() -> String {
    DEFAULT_SELLER_RATING.to_string()
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SellerId",
        to = "super::users::Column::Id"
    )]
    Seller,
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seller.def()
    }
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
