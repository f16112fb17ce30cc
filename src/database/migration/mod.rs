pub use sea_orm_migration::prelude::*;

mod m20240302_101500_people_tables;
mod m20240302_102000_leagues_tables;
mod m20240302_102500_tournaments_tables;
mod m20240302_103000_openings_table;
mod m20240302_103500_games_tables;
mod m20240302_104000_moves_tables;
mod m20240302_104500_comments_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240302_101500_people_tables::Migration),
            Box::new(m20240302_102000_leagues_tables::Migration),
            Box::new(m20240302_102500_tournaments_tables::Migration),
            Box::new(m20240302_103000_openings_table::Migration),
            Box::new(m20240302_103500_games_tables::Migration),
            Box::new(m20240302_104000_moves_tables::Migration),
            Box::new(m20240302_104500_comments_table::Migration),
        ]
    }
}
