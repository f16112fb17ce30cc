use super::Record;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Structure for a played game
#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "games")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Outcome of the game (e.g. "1-0")
    pub result: String,
    /// When the game was played
    pub date: DateTimeUtc,
    pub image: Option<String>,
    /// The tournament owning this game
    pub tournament_id: Option<i32>,
    /// The opening played in this game
    pub opening_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Entity {
    const NAME: &'static str = "game";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}
