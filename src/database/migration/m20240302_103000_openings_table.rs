//! Migration logic for generating the openings table
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Openings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Openings::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Openings::Name).string().null())
                    .col(
                        ColumnDef::new(Openings::Classification)
                            .string_len(16)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Openings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Openings {
    Table,
    Id,
    Name,
    /// Stored as the upper case classification name (e.g. SEMI-OPEN)
    Classification,
}
