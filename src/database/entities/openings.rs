use super::Record;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Structure for a named chess opening
#[derive(Serialize, Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "openings")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: Option<String>,
    pub classification: OpeningClassification,
}

/// Family of positions an opening leads to
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(16))")]
pub enum OpeningClassification {
    #[sea_orm(string_value = "OPEN")]
    #[serde(rename = "OPEN")]
    Open,
    #[sea_orm(string_value = "CLOSED")]
    #[serde(rename = "CLOSED")]
    Closed,
    #[sea_orm(string_value = "SEMI-OPEN")]
    #[serde(rename = "SEMI-OPEN")]
    SemiOpen,
    #[sea_orm(string_value = "SEMI-CLOSED")]
    #[serde(rename = "SEMI-CLOSED")]
    SemiClosed,
    #[sea_orm(string_value = "FLANK")]
    #[serde(rename = "FLANK")]
    Flank,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Record for Entity {
    const NAME: &'static str = "opening";

    fn id_column() -> Column {
        Column::Id
    }

    fn id_of(model: &Model) -> i32 {
        model.id
    }
}
