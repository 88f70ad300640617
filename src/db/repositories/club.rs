use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{NamedRef, count_by, count_of, named, names_by_id, now};
use crate::entities::{clubs, playgrounds, teams};

#[derive(Debug, Clone, Serialize)]
pub struct ClubRow {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub founded_year: Option<i32>,
    pub playground_id: Option<i32>,
    pub created_at: String,
    pub playground: Option<NamedRef>,
    #[serde(rename = "_count")]
    pub counts: ClubCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ClubCounts {
    pub teams: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewClub {
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub playground_id: Option<i32>,
}

pub struct ClubRepository {
    conn: DatabaseConnection,
}

impl ClubRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn playground_names(&self) -> Result<HashMap<i32, String>> {
        names_by_id::<playgrounds::Entity>(
            &self.conn,
            playgrounds::Column::Id,
            playgrounds::Column::Name,
        )
        .await
    }

    fn map_model(m: clubs::Model, playgrounds: &HashMap<i32, String>, teams: i64) -> ClubRow {
        ClubRow {
            playground: named(playgrounds, m.playground_id),
            id: m.id,
            name: m.name,
            city: m.city,
            founded_year: m.founded_year,
            playground_id: m.playground_id,
            created_at: m.created_at,
            counts: ClubCounts { teams },
        }
    }

    pub async fn list(&self) -> Result<Vec<ClubRow>> {
        let rows = clubs::Entity::find()
            .order_by_asc(clubs::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list clubs")?;
        let playgrounds = self.playground_names().await?;
        let team_counts = count_by::<teams::Entity>(&self.conn, teams::Column::ClubId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let n = count_of(&team_counts, m.id);
                Self::map_model(m, &playgrounds, n)
            })
            .collect())
    }

    pub async fn create(&self, new: &NewClub) -> Result<ClubRow> {
        let model = clubs::ActiveModel {
            name: Set(new.name.clone()),
            city: Set(new.city.clone()),
            founded_year: Set(new.founded_year),
            playground_id: Set(new.playground_id),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert club")?;

        info!("Created club {}: {}", model.id, model.name);
        let playgrounds = self.playground_names().await?;
        Ok(Self::map_model(model, &playgrounds, 0))
    }
}
