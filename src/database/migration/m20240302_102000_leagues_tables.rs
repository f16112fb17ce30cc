//! Migration logic for generating the leagues table along with the
//! league membership join tables
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Leagues::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Leagues::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Leagues::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Leagues::City).string().null())
                    .col(ColumnDef::new(Leagues::Address).string().null())
                    .col(ColumnDef::new(Leagues::Phone).string().null())
                    .col(ColumnDef::new(Leagues::WebUrl).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeaguePlayers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(LeaguePlayers::LeagueId).integer().not_null())
                    .col(ColumnDef::new(LeaguePlayers::PlayerId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(LeaguePlayers::LeagueId)
                            .col(LeaguePlayers::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_players_league")
                            .from(LeaguePlayers::Table, LeaguePlayers::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_players_player")
                            .from(LeaguePlayers::Table, LeaguePlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(LeagueAdministrators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeagueAdministrators::LeagueId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeagueAdministrators::AdministratorId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(LeagueAdministrators::LeagueId)
                            .col(LeagueAdministrators::AdministratorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_administrators_league")
                            .from(LeagueAdministrators::Table, LeagueAdministrators::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_league_administrators_administrator")
                            .from(
                                LeagueAdministrators::Table,
                                LeagueAdministrators::AdministratorId,
                            )
                            .to(Administrators::Table, Administrators::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeagueAdministrators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeaguePlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leagues::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Leagues {
    Table,
    Id,
    Name,
    City,
    Address,
    Phone,
    WebUrl,
}

#[derive(DeriveIden)]
enum LeaguePlayers {
    Table,
    LeagueId,
    PlayerId,
}

#[derive(DeriveIden)]
enum LeagueAdministrators {
    Table,
    LeagueId,
    AdministratorId,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Administrators {
    Table,
    Id,
}
