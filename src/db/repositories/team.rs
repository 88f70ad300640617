use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{NamedRef, count_by, count_of, named, names_by_id, now};
use crate::entities::{clubs, genders, leagues, players, teams};

#[derive(Debug, Clone, Serialize)]
pub struct TeamRow {
    pub id: i32,
    pub name: String,
    pub club_id: i32,
    pub gender_id: i32,
    pub league_id: Option<i32>,
    pub created_at: String,
    pub club: Option<NamedRef>,
    pub gender: Option<NamedRef>,
    pub league: Option<NamedRef>,
    #[serde(rename = "_count")]
    pub counts: TeamCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamCounts {
    pub players: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub club_id: i32,
    pub gender_id: i32,
    #[serde(default)]
    pub league_id: Option<i32>,
}

pub struct TeamRepository {
    conn: DatabaseConnection,
}

struct TeamRelations {
    clubs: HashMap<i32, String>,
    genders: HashMap<i32, String>,
    leagues: HashMap<i32, String>,
}

impl TeamRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn relations(&self) -> Result<TeamRelations> {
        Ok(TeamRelations {
            clubs: names_by_id::<clubs::Entity>(&self.conn, clubs::Column::Id, clubs::Column::Name)
                .await?,
            genders: names_by_id::<genders::Entity>(
                &self.conn,
                genders::Column::Id,
                genders::Column::Name,
            )
            .await?,
            leagues: names_by_id::<leagues::Entity>(
                &self.conn,
                leagues::Column::Id,
                leagues::Column::Name,
            )
            .await?,
        })
    }

    fn map_model(m: teams::Model, rel: &TeamRelations, players: i64) -> TeamRow {
        TeamRow {
            club: named(&rel.clubs, Some(m.club_id)),
            gender: named(&rel.genders, Some(m.gender_id)),
            league: named(&rel.leagues, m.league_id),
            id: m.id,
            name: m.name,
            club_id: m.club_id,
            gender_id: m.gender_id,
            league_id: m.league_id,
            created_at: m.created_at,
            counts: TeamCounts { players },
        }
    }

    pub async fn list(&self) -> Result<Vec<TeamRow>> {
        let rows = teams::Entity::find()
            .order_by_asc(teams::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list teams")?;
        let rel = self.relations().await?;
        let player_counts =
            count_by::<players::Entity>(&self.conn, players::Column::TeamId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let n = count_of(&player_counts, m.id);
                Self::map_model(m, &rel, n)
            })
            .collect())
    }

    pub async fn create(&self, new: &NewTeam) -> Result<TeamRow> {
        let model = teams::ActiveModel {
            name: Set(new.name.clone()),
            club_id: Set(new.club_id),
            gender_id: Set(new.gender_id),
            league_id: Set(new.league_id),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert team")?;

        info!(
            "Created team {}: {} (club {})",
            model.id, model.name, model.club_id
        );
        let rel = self.relations().await?;
        Ok(Self::map_model(model, &rel, 0))
    }
}
