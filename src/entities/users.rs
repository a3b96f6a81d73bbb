use sea_orm::entity::prelude::*;

/// Usernames are not unique; lookups resolve to the lowest live `id`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub username: String,

    /// Stored exactly as submitted
    pub password: String,

    /// Last bearer token issued for this row
    pub token: Option<String>,

    pub created_at: String,

    pub updated_at: String,

    /// Set when the row is soft-deleted; live rows have `None`.
    pub deleted_at: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
