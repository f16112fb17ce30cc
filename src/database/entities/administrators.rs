use super::Record;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Structure for a league administrator
#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "administrators")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Unique identity document number
    #[sea_orm(unique)]
    #[serde(rename = "IDNumber")]
    pub id_number: String,
    #[sea_orm(unique)]
    pub username: String,
    #[serde(skip)]
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Entity {
    const NAME: &'static str = "administrator";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}
