use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{NamedRef, count_by, count_of, named, names_by_id, now};
use crate::entities::{genders, league_types, leagues, match_systems, seasons, teams};

#[derive(Debug, Clone, Serialize)]
pub struct LeagueRow {
    pub id: i32,
    pub name: String,
    pub season_id: i32,
    pub league_type_id: i32,
    pub match_system_id: i32,
    pub gender_id: i32,
    pub created_at: String,
    pub season: Option<NamedRef>,
    pub league_type: Option<NamedRef>,
    pub match_system: Option<NamedRef>,
    pub gender: Option<NamedRef>,
    #[serde(rename = "_count")]
    pub counts: LeagueCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeagueCounts {
    pub teams: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewLeague {
    pub name: String,
    pub season_id: i32,
    pub league_type_id: i32,
    pub match_system_id: i32,
    pub gender_id: i32,
}

pub struct LeagueRepository {
    conn: DatabaseConnection,
}

/// Id-to-name maps for everything a league points at.
struct LeagueRelations {
    seasons: HashMap<i32, String>,
    league_types: HashMap<i32, String>,
    match_systems: HashMap<i32, String>,
    genders: HashMap<i32, String>,
}

impl LeagueRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn relations(&self) -> Result<LeagueRelations> {
        Ok(LeagueRelations {
            seasons: names_by_id::<seasons::Entity>(
                &self.conn,
                seasons::Column::Id,
                seasons::Column::Name,
            )
            .await?,
            league_types: names_by_id::<league_types::Entity>(
                &self.conn,
                league_types::Column::Id,
                league_types::Column::Name,
            )
            .await?,
            match_systems: names_by_id::<match_systems::Entity>(
                &self.conn,
                match_systems::Column::Id,
                match_systems::Column::Name,
            )
            .await?,
            genders: names_by_id::<genders::Entity>(
                &self.conn,
                genders::Column::Id,
                genders::Column::Name,
            )
            .await?,
        })
    }

    fn map_model(m: leagues::Model, rel: &LeagueRelations, teams: i64) -> LeagueRow {
        LeagueRow {
            season: named(&rel.seasons, Some(m.season_id)),
            league_type: named(&rel.league_types, Some(m.league_type_id)),
            match_system: named(&rel.match_systems, Some(m.match_system_id)),
            gender: named(&rel.genders, Some(m.gender_id)),
            id: m.id,
            name: m.name,
            season_id: m.season_id,
            league_type_id: m.league_type_id,
            match_system_id: m.match_system_id,
            gender_id: m.gender_id,
            created_at: m.created_at,
            counts: LeagueCounts { teams },
        }
    }

    pub async fn list(&self) -> Result<Vec<LeagueRow>> {
        let rows = leagues::Entity::find()
            .order_by_asc(leagues::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list leagues")?;
        let rel = self.relations().await?;
        let team_counts = count_by::<teams::Entity>(&self.conn, teams::Column::LeagueId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let n = count_of(&team_counts, m.id);
                Self::map_model(m, &rel, n)
            })
            .collect())
    }

    pub async fn create(&self, new: &NewLeague) -> Result<LeagueRow> {
        let model = leagues::ActiveModel {
            name: Set(new.name.clone()),
            season_id: Set(new.season_id),
            league_type_id: Set(new.league_type_id),
            match_system_id: Set(new.match_system_id),
            gender_id: Set(new.gender_id),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert league")?;

        info!(
            "Created league {}: {} (season {})",
            model.id, model.name, model.season_id
        );
        let rel = self.relations().await?;
        Ok(Self::map_model(model, &rel, 0))
    }
}
