use super::Record;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Structure for a chess league
#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leagues")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the league
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique name of the league
    #[sea_orm(unique)]
    pub name: String,
    pub city: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "webURL")]
    pub web_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Entity {
    const NAME: &'static str = "league";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}
