use sea_orm::entity::prelude::*;

/// Administrator managing a league
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "league_administrators")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub league_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub administrator_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
