use sea_orm::entity::prelude::*;

/// Move belonging to the line of an opening
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "opening_moves")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub opening_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub move_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
