//! User table entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{RecordId, UserRecord};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub text_field: String,
    /// Stored as sent, not hashed
    pub password: String,
    pub image: Option<String>,
    pub date_field: Option<Date>,
    #[sea_orm(column_type = "Text", nullable)]
    pub opinion: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain record
impl From<Model> for UserRecord {
    fn from(model: Model) -> Self {
        UserRecord {
            id: RecordId::Int(i64::from(model.id)),
            text_field: model.text_field,
            password: model.password,
            image: model.image,
            date_field: model.date_field,
            opinion: model.opinion,
        }
    }
}
