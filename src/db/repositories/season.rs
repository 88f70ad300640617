use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{count_by, count_of, now};
use crate::entities::{leagues, seasons};

#[derive(Debug, Clone, Serialize)]
pub struct SeasonRow {
    pub id: i32,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub is_active: bool,
    pub created_at: String,
    #[serde(rename = "_count")]
    pub counts: SeasonCounts,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeasonCounts {
    pub leagues: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewSeason {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub is_active: bool,
}

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(m: seasons::Model, leagues: i64) -> SeasonRow {
        SeasonRow {
            id: m.id,
            name: m.name,
            start_date: m.start_date,
            end_date: m.end_date,
            is_active: m.is_active,
            created_at: m.created_at,
            counts: SeasonCounts { leagues },
        }
    }

    pub async fn list(&self) -> Result<Vec<SeasonRow>> {
        let rows = seasons::Entity::find()
            .order_by_asc(seasons::Column::Name)
            .all(&self.conn)
            .await
            .context("Failed to list seasons")?;
        let league_counts =
            count_by::<leagues::Entity>(&self.conn, leagues::Column::SeasonId).await?;

        Ok(rows
            .into_iter()
            .map(|m| {
                let n = count_of(&league_counts, m.id);
                Self::map_model(m, n)
            })
            .collect())
    }

    pub async fn create(&self, new: &NewSeason) -> Result<SeasonRow> {
        let model = seasons::ActiveModel {
            name: Set(new.name.clone()),
            start_date: Set(new.start_date.clone()),
            end_date: Set(new.end_date.clone()),
            is_active: Set(new.is_active),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert season")?;

        info!("Created season {}: {}", model.id, model.name);
        Ok(Self::map_model(model, 0))
    }
}
