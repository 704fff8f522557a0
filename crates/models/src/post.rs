use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, NotSet, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "post")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("no relations defined here")
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// All posts in store-default order (no ORDER BY clause).
pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert a post; the database assigns the id. Absent fields stay unset so
/// the NOT NULL constraints report them as a database error.
pub async fn create(
    db: &DatabaseConnection,
    title: Option<&str>,
    content: Option<&str>,
) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        title: title.map(|t| Set(t.to_string())).unwrap_or(NotSet),
        content: content.map(|c| Set(c.to_string())).unwrap_or(NotSet),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
