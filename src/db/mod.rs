use anyhow::Result;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, PrimaryKeyTrait,
    Statement,
};
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::config::SecurityConfig;
use crate::entities::users::Role;

pub mod migrator;
pub mod repositories;

pub use repositories::club::{ClubRow, NewClub};
pub use repositories::league::{LeagueRow, NewLeague};
pub use repositories::lookup::{LookupKind, LookupRow, NewLookup};
pub use repositories::player::{NewPlayer, PlayerRow};
pub use repositories::playground::{NewPlayground, PlaygroundRow};
pub use repositories::season::{NewSeason, SeasonRow};
pub use repositories::team::{NewTeam, TeamRow};
pub use repositories::user::{NewUser, NewUserOutcome, User};
pub use repositories::{NamedRef, ResourceCounts};

/// Data-access handle. Built once at startup and passed to whoever needs it.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Whether a row with the given primary key exists in `E`.
    pub async fn exists<E>(&self, id: i32) -> Result<bool>
    where
        E: EntityTrait,
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    {
        Ok(E::find_by_id(id).one(&self.conn).await?.is_some())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn lookup_repo(&self) -> repositories::lookup::LookupRepository {
        repositories::lookup::LookupRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn league_repo(&self) -> repositories::league::LeagueRepository {
        repositories::league::LeagueRepository::new(self.conn.clone())
    }

    fn playground_repo(&self) -> repositories::playground::PlaygroundRepository {
        repositories::playground::PlaygroundRepository::new(self.conn.clone())
    }

    fn club_repo(&self) -> repositories::club::ClubRepository {
        repositories::club::ClubRepository::new(self.conn.clone())
    }

    fn team_repo(&self) -> repositories::team::TeamRepository {
        repositories::team::TeamRepository::new(self.conn.clone())
    }

    fn player_repo(&self) -> repositories::player::PlayerRepository {
        repositories::player::PlayerRepository::new(self.conn.clone())
    }

    // ========================================================================
    // Users
    // ========================================================================

    pub async fn get_user_by_id(&self, id: i32) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.user_repo().get_by_email(email).await
    }

    pub async fn create_user(
        &self,
        new_user: &NewUser,
        security: &SecurityConfig,
    ) -> Result<NewUserOutcome> {
        self.user_repo().create(new_user, security).await
    }

    pub async fn verify_user_password(&self, email: &str, password: &str) -> Result<Option<User>> {
        self.user_repo().verify_password(email, password).await
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.user_repo().list().await
    }

    pub async fn set_user_role(&self, email: &str, role: Role) -> Result<bool> {
        self.user_repo().set_role(email, role).await
    }

    pub async fn delete_user(&self, id: i32) -> Result<bool> {
        self.user_repo().delete(id).await
    }

    pub async fn count_users(&self) -> Result<u64> {
        self.user_repo().count().await
    }

    // ========================================================================
    // Lookup tables (genders, positions, league types, match systems)
    // ========================================================================

    pub async fn list_lookups(&self, kind: LookupKind) -> Result<Vec<LookupRow>> {
        self.lookup_repo().list(kind).await
    }

    pub async fn create_lookup(&self, kind: LookupKind, new: &NewLookup) -> Result<LookupRow> {
        self.lookup_repo().create(kind, new).await
    }

    // ========================================================================
    // Seasons & leagues
    // ========================================================================

    pub async fn list_seasons(&self) -> Result<Vec<SeasonRow>> {
        self.season_repo().list().await
    }

    pub async fn create_season(&self, new: &NewSeason) -> Result<SeasonRow> {
        self.season_repo().create(new).await
    }

    pub async fn list_leagues(&self) -> Result<Vec<LeagueRow>> {
        self.league_repo().list().await
    }

    pub async fn create_league(&self, new: &NewLeague) -> Result<LeagueRow> {
        self.league_repo().create(new).await
    }

    // ========================================================================
    // Venues, clubs, teams, players
    // ========================================================================

    pub async fn list_playgrounds(&self) -> Result<Vec<PlaygroundRow>> {
        self.playground_repo().list().await
    }

    pub async fn create_playground(&self, new: &NewPlayground) -> Result<PlaygroundRow> {
        self.playground_repo().create(new).await
    }

    pub async fn list_clubs(&self) -> Result<Vec<ClubRow>> {
        self.club_repo().list().await
    }

    pub async fn create_club(&self, new: &NewClub) -> Result<ClubRow> {
        self.club_repo().create(new).await
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamRow>> {
        self.team_repo().list().await
    }

    pub async fn create_team(&self, new: &NewTeam) -> Result<TeamRow> {
        self.team_repo().create(new).await
    }

    pub async fn list_players(&self) -> Result<Vec<PlayerRow>> {
        self.player_repo().list().await
    }

    pub async fn create_player(&self, new: &NewPlayer) -> Result<PlayerRow> {
        self.player_repo().create(new).await
    }

    /// Row totals shown on the admin dashboard.
    pub async fn resource_counts(&self) -> Result<ResourceCounts> {
        repositories::resource_counts(&self.conn).await
    }
}
