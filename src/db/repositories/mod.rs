//! SeaORM repositories, one per aggregate.
//!
//! List queries load the rows of one table and attach relation data with a
//! fixed number of extra queries (one grouped count or one id-to-name map per
//! relation), so a list never issues a query per row.

pub mod club;
pub mod league;
pub mod lookup;
pub mod player;
pub mod playground;
pub mod season;
pub mod team;
pub mod user;

use std::collections::HashMap;

use anyhow::{Context, Result};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QuerySelect,
};
use serde::Serialize;

use crate::entities::prelude::*;

/// `{id, name}` reference to a related row, embedded in list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedRef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, FromQueryResult)]
struct GroupCount {
    key: i32,
    total: i64,
}

/// Number of rows in `E` per distinct non-null value of `column`.
pub(crate) async fn count_by<E: EntityTrait>(
    conn: &DatabaseConnection,
    column: E::Column,
) -> Result<HashMap<i32, i64>> {
    let rows = E::find()
        .select_only()
        .column_as(column, "key")
        .column_as(Expr::col(column).count(), "total")
        .filter(column.is_not_null())
        .group_by(column)
        .into_model::<GroupCount>()
        .all(conn)
        .await
        .context("Failed to count related rows")?;

    Ok(rows.into_iter().map(|r| (r.key, r.total)).collect())
}

/// Maps every row of `E` from its id to its display name.
pub(crate) async fn names_by_id<E: EntityTrait>(
    conn: &DatabaseConnection,
    id: E::Column,
    name: E::Column,
) -> Result<HashMap<i32, String>> {
    let rows: Vec<(i32, String)> = E::find()
        .select_only()
        .column(id)
        .column(name)
        .into_tuple()
        .all(conn)
        .await
        .context("Failed to load related names")?;

    Ok(rows.into_iter().collect())
}

pub(crate) fn count_of(counts: &HashMap<i32, i64>, id: i32) -> i64 {
    counts.get(&id).copied().unwrap_or(0)
}

pub(crate) fn named(names: &HashMap<i32, String>, id: Option<i32>) -> Option<NamedRef> {
    let id = id?;
    names.get(&id).map(|name| NamedRef {
        id,
        name: name.clone(),
    })
}

pub(crate) fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Row totals per table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceCounts {
    pub seasons: u64,
    pub leagues: u64,
    pub league_types: u64,
    pub match_systems: u64,
    pub genders: u64,
    pub positions: u64,
    pub clubs: u64,
    pub teams: u64,
    pub players: u64,
    pub playgrounds: u64,
    pub users: u64,
}

pub(crate) async fn resource_counts(conn: &DatabaseConnection) -> Result<ResourceCounts> {
    Ok(ResourceCounts {
        seasons: Seasons::find().count(conn).await?,
        leagues: Leagues::find().count(conn).await?,
        league_types: LeagueTypes::find().count(conn).await?,
        match_systems: MatchSystems::find().count(conn).await?,
        genders: Genders::find().count(conn).await?,
        positions: Positions::find().count(conn).await?,
        clubs: Clubs::find().count(conn).await?,
        teams: Teams::find().count(conn).await?,
        players: Players::find().count(conn).await?,
        playgrounds: Playgrounds::find().count(conn).await?,
        users: Users::find().count(conn).await?,
    })
}
