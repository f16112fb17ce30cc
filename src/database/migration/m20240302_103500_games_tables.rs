//! Migration logic for generating the games table and the game
//! participation join table
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Games::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Games::Result).string().not_null())
                    .col(
                        ColumnDef::new(Games::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Games::Image).string().null())
                    .col(ColumnDef::new(Games::TournamentId).integer().null())
                    .col(ColumnDef::new(Games::OpeningId).integer().null())
                    // Games are owned by their tournament
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_tournament")
                            .from(Games::Table, Games::TournamentId)
                            .to(Tournaments::Table, Tournaments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_games_opening")
                            .from(Games::Table, Games::OpeningId)
                            .to(Openings::Table, Openings::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GamePlayers::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(GamePlayers::GameId).integer().not_null())
                    .col(ColumnDef::new(GamePlayers::PlayerId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(GamePlayers::GameId)
                            .col(GamePlayers::PlayerId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_players_game")
                            .from(GamePlayers::Table, GamePlayers::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_players_player")
                            .from(GamePlayers::Table, GamePlayers::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GamePlayers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Games::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
    Result,
    Date,
    Image,
    TournamentId,
    OpeningId,
}

#[derive(DeriveIden)]
enum GamePlayers {
    Table,
    GameId,
    PlayerId,
}

#[derive(DeriveIden)]
enum Tournaments {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Openings {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
}
