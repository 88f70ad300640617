use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{NamedRef, named, names_by_id, now};
use crate::entities::{genders, players, positions, teams};

#[derive(Debug, Clone, Serialize)]
pub struct PlayerRow {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<String>,
    pub jersey_number: Option<i32>,
    pub team_id: Option<i32>,
    pub position_id: Option<i32>,
    pub gender_id: i32,
    pub created_at: String,
    pub team: Option<NamedRef>,
    pub position: Option<NamedRef>,
    pub gender: Option<NamedRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub jersey_number: Option<i32>,
    #[serde(default)]
    pub team_id: Option<i32>,
    #[serde(default)]
    pub position_id: Option<i32>,
    pub gender_id: i32,
}

pub struct PlayerRepository {
    conn: DatabaseConnection,
}

struct PlayerRelations {
    teams: HashMap<i32, String>,
    positions: HashMap<i32, String>,
    genders: HashMap<i32, String>,
}

impl PlayerRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    async fn relations(&self) -> Result<PlayerRelations> {
        Ok(PlayerRelations {
            teams: names_by_id::<teams::Entity>(&self.conn, teams::Column::Id, teams::Column::Name)
                .await?,
            positions: names_by_id::<positions::Entity>(
                &self.conn,
                positions::Column::Id,
                positions::Column::Name,
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

    fn map_model(m: players::Model, rel: &PlayerRelations) -> PlayerRow {
        PlayerRow {
            team: named(&rel.teams, m.team_id),
            position: named(&rel.positions, m.position_id),
            gender: named(&rel.genders, Some(m.gender_id)),
            id: m.id,
            first_name: m.first_name,
            last_name: m.last_name,
            birth_date: m.birth_date,
            jersey_number: m.jersey_number,
            team_id: m.team_id,
            position_id: m.position_id,
            gender_id: m.gender_id,
            created_at: m.created_at,
        }
    }

    pub async fn list(&self) -> Result<Vec<PlayerRow>> {
        let rows = players::Entity::find()
            .order_by_asc(players::Column::LastName)
            .order_by_asc(players::Column::FirstName)
            .all(&self.conn)
            .await
            .context("Failed to list players")?;
        let rel = self.relations().await?;

        Ok(rows
            .into_iter()
            .map(|m| Self::map_model(m, &rel))
            .collect())
    }

    pub async fn create(&self, new: &NewPlayer) -> Result<PlayerRow> {
        let model = players::ActiveModel {
            first_name: Set(new.first_name.clone()),
            last_name: Set(new.last_name.clone()),
            birth_date: Set(new.birth_date.clone()),
            jersey_number: Set(new.jersey_number),
            team_id: Set(new.team_id),
            position_id: Set(new.position_id),
            gender_id: Set(new.gender_id),
            created_at: Set(now()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await
        .context("Failed to insert player")?;

        info!(
            "Created player {}: {} {}",
            model.id, model.first_name, model.last_name
        );
        let rel = self.relations().await?;
        Ok(Self::map_model(model, &rel))
    }
}
