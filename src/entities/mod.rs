pub mod prelude;

pub mod clubs;
pub mod genders;
pub mod league_types;
pub mod leagues;
pub mod match_systems;
pub mod players;
pub mod playgrounds;
pub mod positions;
pub mod seasons;
pub mod teams;
pub mod users;
