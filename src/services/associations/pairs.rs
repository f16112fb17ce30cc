//! Every association between the stored records

use super::{Backward, ColumnOf, ForeignKey, Forward, JoinTable, ModelOf};
use crate::{
    database::entities::{
        administrators, comments, game_players, games, league_administrators, league_players,
        leagues, moves, opening_moves, openings, players, tournament_players, tournaments,
    },
    utils::types::RecordId,
};
use sea_orm::ActiveValue::Set;

/// Players registered in leagues
pub struct LeaguePlayer;

impl JoinTable for LeaguePlayer {
    type Entity = league_players::Entity;
    type Link = league_players::ActiveModel;
    type Left = leagues::Entity;
    type Right = players::Entity;

    fn left_column() -> league_players::Column {
        league_players::Column::LeagueId
    }

    fn right_column() -> league_players::Column {
        league_players::Column::PlayerId
    }

    fn link(league: RecordId, player: RecordId) -> Self::Link {
        league_players::ActiveModel {
            league_id: Set(league),
            player_id: Set(player),
        }
    }
}

pub type LeaguePlayers = Forward<LeaguePlayer>;
pub type PlayerLeagues = Backward<LeaguePlayer>;

/// Administrators managing leagues
pub struct LeagueAdministrator;

impl JoinTable for LeagueAdministrator {
    type Entity = league_administrators::Entity;
    type Link = league_administrators::ActiveModel;
    type Left = leagues::Entity;
    type Right = administrators::Entity;

    fn left_column() -> league_administrators::Column {
        league_administrators::Column::LeagueId
    }

    fn right_column() -> league_administrators::Column {
        league_administrators::Column::AdministratorId
    }

    fn link(league: RecordId, administrator: RecordId) -> Self::Link {
        league_administrators::ActiveModel {
            league_id: Set(league),
            administrator_id: Set(administrator),
        }
    }
}

pub type LeagueAdministrators = Forward<LeagueAdministrator>;
pub type AdministratorLeagues = Backward<LeagueAdministrator>;

/// Players taking part in tournaments
pub struct TournamentPlayer;

impl JoinTable for TournamentPlayer {
    type Entity = tournament_players::Entity;
    type Link = tournament_players::ActiveModel;
    type Left = tournaments::Entity;
    type Right = players::Entity;

    fn left_column() -> tournament_players::Column {
        tournament_players::Column::TournamentId
    }

    fn right_column() -> tournament_players::Column {
        tournament_players::Column::PlayerId
    }

    fn link(tournament: RecordId, player: RecordId) -> Self::Link {
        tournament_players::ActiveModel {
            tournament_id: Set(tournament),
            player_id: Set(player),
        }
    }
}

pub type TournamentPlayers = Forward<TournamentPlayer>;
pub type PlayerTournaments = Backward<TournamentPlayer>;

/// Players of a game
pub struct GamePlayer;

impl JoinTable for GamePlayer {
    type Entity = game_players::Entity;
    type Link = game_players::ActiveModel;
    type Left = games::Entity;
    type Right = players::Entity;

    fn left_column() -> game_players::Column {
        game_players::Column::GameId
    }

    fn right_column() -> game_players::Column {
        game_players::Column::PlayerId
    }

    fn link(game: RecordId, player: RecordId) -> Self::Link {
        game_players::ActiveModel {
            game_id: Set(game),
            player_id: Set(player),
        }
    }
}

pub type GamePlayers = Forward<GamePlayer>;
pub type PlayerGames = Backward<GamePlayer>;

/// Moves making up an opening
pub struct OpeningMove;

impl JoinTable for OpeningMove {
    type Entity = opening_moves::Entity;
    type Link = opening_moves::ActiveModel;
    type Left = openings::Entity;
    type Right = moves::Entity;

    fn left_column() -> opening_moves::Column {
        opening_moves::Column::OpeningId
    }

    fn right_column() -> opening_moves::Column {
        opening_moves::Column::MoveId
    }

    fn link(opening: RecordId, chess_move: RecordId) -> Self::Link {
        opening_moves::ActiveModel {
            opening_id: Set(opening),
            move_id: Set(chess_move),
        }
    }
}

pub type OpeningMoves = Forward<OpeningMove>;
pub type MoveOpenings = Backward<OpeningMove>;

/// League a tournament is held in. Deleting the league deletes its
/// tournaments.
pub struct TournamentLeague;

impl ForeignKey for TournamentLeague {
    type Child = tournaments::Entity;
    type Parent = leagues::Entity;

    fn column() -> ColumnOf<Self::Child> {
        tournaments::Column::LeagueId
    }

    fn parent_of(tournament: &ModelOf<Self::Child>) -> Option<RecordId> {
        tournament.league_id
    }
}

pub type LeagueTournaments = TournamentLeague;

/// Tournament a game was played in. Deleting the tournament deletes its
/// games.
pub struct GameTournament;

impl ForeignKey for GameTournament {
    type Child = games::Entity;
    type Parent = tournaments::Entity;

    fn column() -> ColumnOf<Self::Child> {
        games::Column::TournamentId
    }

    fn parent_of(game: &ModelOf<Self::Child>) -> Option<RecordId> {
        game.tournament_id
    }
}

pub type TournamentGames = GameTournament;

/// Opening played in a game
pub struct GameOpening;

impl ForeignKey for GameOpening {
    type Child = games::Entity;
    type Parent = openings::Entity;

    fn column() -> ColumnOf<Self::Child> {
        games::Column::OpeningId
    }

    fn parent_of(game: &ModelOf<Self::Child>) -> Option<RecordId> {
        game.opening_id
    }
}

/// Game a move belongs to
pub struct MoveGame;

impl ForeignKey for MoveGame {
    type Child = moves::Entity;
    type Parent = games::Entity;

    const ORPHAN_REMOVAL: bool = true;

    fn column() -> ColumnOf<Self::Child> {
        moves::Column::GameId
    }

    fn parent_of(chess_move: &ModelOf<Self::Child>) -> Option<RecordId> {
        chess_move.game_id
    }
}

pub type GameMoves = MoveGame;

/// Player who made a move
pub struct MovePlayer;

impl ForeignKey for MovePlayer {
    type Child = moves::Entity;
    type Parent = players::Entity;

    fn column() -> ColumnOf<Self::Child> {
        moves::Column::PlayerId
    }

    fn parent_of(chess_move: &ModelOf<Self::Child>) -> Option<RecordId> {
        chess_move.player_id
    }
}

/// Game a comment was written on
pub struct CommentGame;

impl ForeignKey for CommentGame {
    type Child = comments::Entity;
    type Parent = games::Entity;

    const ORPHAN_REMOVAL: bool = true;

    fn column() -> ColumnOf<Self::Child> {
        comments::Column::GameId
    }

    fn parent_of(comment: &ModelOf<Self::Child>) -> Option<RecordId> {
        comment.game_id
    }
}

pub type GameComments = CommentGame;

/// Administrator who wrote a comment
pub struct CommentAdministrator;

impl ForeignKey for CommentAdministrator {
    type Child = comments::Entity;
    type Parent = administrators::Entity;

    fn column() -> ColumnOf<Self::Child> {
        comments::Column::AuthorId
    }

    fn parent_of(comment: &ModelOf<Self::Child>) -> Option<RecordId> {
        comment.author_id
    }
}
