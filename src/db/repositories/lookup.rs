use std::collections::BTreeMap;

use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{count_by, count_of, now};
use crate::entities::{genders, league_types, leagues, match_systems, players, positions, teams};

/// The small name-only tables that other resources point at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Gender,
    Position,
    LeagueType,
    MatchSystem,
}

impl LookupKind {
    pub const ALL: [Self; 4] = [
        Self::Gender,
        Self::Position,
        Self::LeagueType,
        Self::MatchSystem,
    ];

    /// Singular label used in messages.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::Position => "position",
            Self::LeagueType => "league type",
            Self::MatchSystem => "match system",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LookupRow {
    pub id: i32,
    pub name: String,
    /// Positions only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,
    /// League types and match systems only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    #[serde(rename = "_count")]
    pub counts: BTreeMap<&'static str, i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewLookup {
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Repository for genders, positions, league types and match systems
pub struct LookupRepository {
    conn: DatabaseConnection,
}

impl LookupRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, kind: LookupKind) -> Result<Vec<LookupRow>> {
        match kind {
            LookupKind::Gender => self.list_genders().await,
            LookupKind::Position => self.list_positions().await,
            LookupKind::LeagueType => self.list_league_types().await,
            LookupKind::MatchSystem => self.list_match_systems().await,
        }
    }

    pub async fn create(&self, kind: LookupKind, new: &NewLookup) -> Result<LookupRow> {
        let created_at = now();
        let created = match kind {
            LookupKind::Gender => {
                let m = genders::ActiveModel {
                    name: Set(new.name.clone()),
                    created_at: Set(created_at),
                    ..Default::default()
                }
                .insert(&self.conn)
                .await
                .context("Failed to insert gender")?;
                row(m.id, m.name, None, None, m.created_at, &["leagues", "teams", "players"])
            }
            LookupKind::Position => {
                let m = positions::ActiveModel {
                    name: Set(new.name.clone()),
                    abbreviation: Set(new.abbreviation.clone()),
                    created_at: Set(created_at),
                    ..Default::default()
                }
                .insert(&self.conn)
                .await
                .context("Failed to insert position")?;
                row(m.id, m.name, m.abbreviation, None, m.created_at, &["players"])
            }
            LookupKind::LeagueType => {
                let m = league_types::ActiveModel {
                    name: Set(new.name.clone()),
                    description: Set(new.description.clone()),
                    created_at: Set(created_at),
                    ..Default::default()
                }
                .insert(&self.conn)
                .await
                .context("Failed to insert league type")?;
                row(m.id, m.name, None, m.description, m.created_at, &["leagues"])
            }
            LookupKind::MatchSystem => {
                let m = match_systems::ActiveModel {
                    name: Set(new.name.clone()),
                    description: Set(new.description.clone()),
                    created_at: Set(created_at),
                    ..Default::default()
                }
                .insert(&self.conn)
                .await
                .context("Failed to insert match system")?;
                row(m.id, m.name, None, m.description, m.created_at, &["leagues"])
            }
        };

        info!("Created {} {}: {}", kind.label(), created.id, created.name);
        Ok(created)
    }

    async fn list_genders(&self) -> Result<Vec<LookupRow>> {
        let rows = genders::Entity::find()
            .order_by_asc(genders::Column::Name)
            .all(&self.conn)
            .await?;
        let league_counts = count_by::<leagues::Entity>(&self.conn, leagues::Column::GenderId).await?;
        let team_counts = count_by::<teams::Entity>(&self.conn, teams::Column::GenderId).await?;
        let player_counts =
            count_by::<players::Entity>(&self.conn, players::Column::GenderId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut r = row(m.id, m.name, None, None, m.created_at, &[]);
                r.counts.insert("leagues", count_of(&league_counts, m.id));
                r.counts.insert("teams", count_of(&team_counts, m.id));
                r.counts.insert("players", count_of(&player_counts, m.id));
                r
            })
            .collect())
    }

    async fn list_positions(&self) -> Result<Vec<LookupRow>> {
        let rows = positions::Entity::find()
            .order_by_asc(positions::Column::Name)
            .all(&self.conn)
            .await?;
        let player_counts =
            count_by::<players::Entity>(&self.conn, players::Column::PositionId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut r = row(m.id, m.name, m.abbreviation, None, m.created_at, &[]);
                r.counts.insert("players", count_of(&player_counts, m.id));
                r
            })
            .collect())
    }

    async fn list_league_types(&self) -> Result<Vec<LookupRow>> {
        let rows = league_types::Entity::find()
            .order_by_asc(league_types::Column::Name)
            .all(&self.conn)
            .await?;
        let league_counts =
            count_by::<leagues::Entity>(&self.conn, leagues::Column::LeagueTypeId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut r = row(m.id, m.name, None, m.description, m.created_at, &[]);
                r.counts.insert("leagues", count_of(&league_counts, m.id));
                r
            })
            .collect())
    }

    async fn list_match_systems(&self) -> Result<Vec<LookupRow>> {
        let rows = match_systems::Entity::find()
            .order_by_asc(match_systems::Column::Name)
            .all(&self.conn)
            .await?;
        let league_counts =
            count_by::<leagues::Entity>(&self.conn, leagues::Column::MatchSystemId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let mut r = row(m.id, m.name, None, m.description, m.created_at, &[]);
                r.counts.insert("leagues", count_of(&league_counts, m.id));
                r
            })
            .collect())
    }
}

/// Builds a row with every named count set to zero (a fresh insert has no children).
fn row(
    id: i32,
    name: String,
    abbreviation: Option<String>,
    description: Option<String>,
    created_at: String,
    zero_counts: &[&'static str],
) -> LookupRow {
    LookupRow {
        id,
        name,
        abbreviation,
        description,
        created_at,
        counts: zero_counts.iter().map(|k| (*k, 0)).collect(),
    }
}
