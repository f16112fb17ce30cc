use super::Record;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Structure for a tournament which is owned by its league
#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tournaments")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Unique name of the tournament
    #[sea_orm(unique)]
    pub name: String,
    pub location: Option<String>,
    /// When the tournament took place, never in the future
    pub date: Option<DateTimeUtc>,
    pub prize: Option<String>,
    pub image: Option<String>,
    /// The league owning this tournament
    pub league_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Entity {
    const NAME: &'static str = "tournament";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}
