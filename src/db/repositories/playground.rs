use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{count_by, count_of, now};
use crate::entities::{clubs, playgrounds};

#[derive(Debug, Clone, Serialize)]
pub struct PlaygroundRow {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i32>,
    pub created_at: String,
    #[serde(rename = "_count")]
    pub counts: PlaygroundCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PlaygroundCounts {
    pub clubs: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayground {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub capacity: Option<i32>,
}

pub struct PlaygroundRepository {
    conn: DatabaseConnection,
}

impl PlaygroundRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: playgrounds::Model, clubs: i64) -> PlaygroundRow {
        PlaygroundRow {
            id: m.id,
            name: m.name,
            address: m.address,
            city: m.city,
            capacity: m.capacity,
            created_at: m.created_at,
            counts: PlaygroundCounts { clubs },
        }
    }

    pub async fn list(&self) -> Result<Vec<PlaygroundRow>> {
        let rows = playgrounds::Entity::find()
            .order_by_asc(playgrounds::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list playgrounds")?;
        let club_counts =
            count_by::<clubs::Entity>(&self.conn, clubs::Column::PlaygroundId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let n = count_of(&club_counts, m.id);
                Self::map_model(m, n)
            })
            .collect())
    }

    pub async fn create(&self, new: &NewPlayground) -> Result<PlaygroundRow> {
        let model = playgrounds::ActiveModel {
            name: Set(new.name.clone()),
            address: Set(new.address.clone()),
            city: Set(new.city.clone()),
            capacity: Set(new.capacity),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert playground")?;

        info!("Created playground {}: {}", model.id, model.name);
        Ok(Self::map_model(model, 0))
    }
}
