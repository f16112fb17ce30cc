//! Migration logic for generating the moves table and the join table
//! linking moves to the openings they belong to
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Moves::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Moves::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Moves::Notation).string().not_null())
                    .col(ColumnDef::new(Moves::PlayerId).integer().null())
                    .col(ColumnDef::new(Moves::GameId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_player")
                            .from(Moves::Table, Moves::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    // Moves are owned by their game
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_moves_game")
                            .from(Moves::Table, Moves::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(OpeningMoves::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(OpeningMoves::OpeningId).integer().not_null())
                    .col(ColumnDef::new(OpeningMoves::MoveId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(OpeningMoves::OpeningId)
                            .col(OpeningMoves::MoveId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opening_moves_opening")
                            .from(OpeningMoves::Table, OpeningMoves::OpeningId)
                            .to(Openings::Table, Openings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_opening_moves_move")
                            .from(OpeningMoves::Table, OpeningMoves::MoveId)
                            .to(Moves::Table, Moves::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(OpeningMoves::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Moves::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Moves {
    Table,
    Id,
    Notation,
    PlayerId,
    GameId,
}

#[derive(DeriveIden)]
enum OpeningMoves {
    Table,
    OpeningId,
    MoveId,
}

#[derive(DeriveIden)]
enum Players {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Games {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Openings {
    Table,
    Id,
}
