//! Migration logic for generating the tournaments table and the
//! tournament registration join table
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Tournaments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tournaments::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Tournaments::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Tournaments::Location).string().null())
                    .col(
                        ColumnDef::new(Tournaments::Date)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Tournaments::Prize).string().null())
                    .col(ColumnDef::new(Tournaments::Image).string().null())
                    .col(ColumnDef::new(Tournaments::LeagueId).integer().null())
                    // Tournaments are owned by their league
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournaments_league")
                            .from(Tournaments::Table, Tournaments::LeagueId)
                            .to(Leagues::Table, Leagues::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TournamentPlayers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TournamentPlayers::TournamentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TournamentPlayers::PlayerId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TournamentPlayers::TournamentId)
                            .col(TournamentPlayers::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_players_tournament")
                            .from(TournamentPlayers::Table, TournamentPlayers::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tournament_players_player")
                            .from(TournamentPlayers::Table, TournamentPlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TournamentPlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Tournaments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Tournaments {
    Table,
    Id,
    Name,
    Location,
    Date,
    Prize,
    Image,
    LeagueId,
}

#[derive(DeriveIden)]
enum TournamentPlayers {
    Table,
    TournamentId,
    PlayerId,
}

#[derive(DeriveIden)]
enum Leagues {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
}
