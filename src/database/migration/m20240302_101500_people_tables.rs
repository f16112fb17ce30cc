//! Migration logic for generating the players and administrators tables
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::Name).string().null())
                    .col(ColumnDef::new(Players::PhotoUrl).string().null())
                    .col(
                        ColumnDef::new(Players::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Players::Password).string().not_null())
                    .col(ColumnDef::new(Players::BirthDate).date().null())
                    .col(ColumnDef::new(Players::BirthPlace).string().null())
                    .col(ColumnDef::new(Players::EloRating).integer().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Administrators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Administrators::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Administrators::Name).string().null())
                    .col(ColumnDef::new(Administrators::PhotoUrl).string().null())
                    .col(
                        ColumnDef::new(Administrators::IdNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Administrators::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Administrators::Password).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Administrators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
    Name,
    PhotoUrl,
    Username,
    /// Password value produced by the credential store
    Password,
    BirthDate,
    BirthPlace,
    EloRating,
}

#[derive(DeriveIden)]
enum Administrators {
    Table,
    Id,
    Name,
    PhotoUrl,
    /// Identity document number
    IdNumber,
    Username,
    Password,
}
