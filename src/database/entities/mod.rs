use crate::utils::types::RecordId;
use sea_orm::EntityTrait;

pub mod administrators;
pub mod comments;
pub mod game_players;
pub mod games;
pub mod league_administrators;
pub mod league_players;
pub mod leagues;
pub mod moves;
pub mod opening_moves;
pub mod openings;
pub mod players;
pub mod tournament_players;
pub mod tournaments;

pub type Administrator = administrators::Model;
pub type Comment = comments::Model;
pub type Game = games::Model;
pub type League = leagues::Model;
pub type Move = moves::Model;
pub type Opening = openings::Model;
pub type Player = players::Model;
pub type Tournament = tournaments::Model;
pub use openings::OpeningClassification;

/// Entity with a single integer primary key that can be referenced
/// from associations
pub trait Record: EntityTrait {
    /// Name of the record used when describing it in errors
    const NAME: &'static str;

    /// The primary key column
    fn id_column() -> Self::Column;

    /// Reads the primary key of a loaded model
    fn id_of(model: &Self::Model) -> RecordId;
}
