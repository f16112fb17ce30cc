use super::Record;
use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Structure for a registered player
#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "players")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    #[serde(rename = "photoURL")]
    pub photo_url: Option<String>,
    /// Unique username of the player
    #[sea_orm(unique)]
    pub username: String,
    /// Stored password value, the form depends on the credential store
    #[serde(skip)]
    pub password: String,
    pub birth_date: Option<Date>,
    pub birth_place: Option<String>,
    pub elo_rating: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Entity {
    const NAME: &'static str = "player";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}
