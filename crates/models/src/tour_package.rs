use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryOrder};
use serde::{Deserialize, Serialize};

use crate::{errors, tour};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tour_package")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub code: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Tour }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Tour => Entity::has_many(tour::Entity).into(),
        }
    }
}

impl Related<tour::Entity> for Entity {
    fn to() -> RelationDef { Relation::Tour.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_code(code: &str) -> Result<(), errors::ModelError> {
    let code = code.trim();
    if code.is_empty() || code.len() > 8 {
        return Err(errors::ModelError::Validation("package code must be 1..=8 characters".into()));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, code: &str, name: &str) -> Result<Model, errors::ModelError> {
    validate_code(code)?;
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    let am = ActiveModel {
        code: Set(code.to_string()),
        name: Set(name.to_string()),
    };
    Ok(am.insert(db).await?)
}

pub async fn find_by_code(db: &DatabaseConnection, code: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find_by_id(code.to_string()).one(db).await?)
}

pub async fn find_by_name(db: &DatabaseConnection, name: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Name.eq(name)).one(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find().order_by_asc(Column::Code).all(db).await?)
}
