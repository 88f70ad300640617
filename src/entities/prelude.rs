pub use super::clubs::Entity as Clubs;
pub use super::genders::Entity as Genders;
pub use super::league_types::Entity as LeagueTypes;
pub use super::leagues::Entity as Leagues;
pub use super::match_systems::Entity as MatchSystems;
pub use super::players::Entity as Players;
pub use super::playgrounds::Entity as Playgrounds;
pub use super::positions::Entity as Positions;
pub use super::seasons::Entity as Seasons;
pub use super::teams::Entity as Teams;
pub use super::users::Entity as Users;
