use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// `(index name, table, column)` for every foreign key used by the list
/// endpoints' relation counts.
const INDEXES: &[(&str, &str, &str)] = &[
    ("idx_leagues_season_id", "leagues", "season_id"),
    ("idx_leagues_league_type_id", "leagues", "league_type_id"),
    ("idx_leagues_match_system_id", "leagues", "match_system_id"),
    ("idx_leagues_gender_id", "leagues", "gender_id"),
    ("idx_clubs_playground_id", "clubs", "playground_id"),
    ("idx_teams_club_id", "teams", "club_id"),
    ("idx_teams_league_id", "teams", "league_id"),
    ("idx_teams_gender_id", "teams", "gender_id"),
    ("idx_players_team_id", "players", "team_id"),
    ("idx_players_position_id", "players", "position_id"),
    ("idx_players_gender_id", "players", "gender_id"),
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, column) in INDEXES {
            manager
                .create_index(
                    Index::create()
                        .name(*name)
                        .table(Alias::new(*table))
                        .col(Alias::new(*column))
                        .if_not_exists()
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for (name, table, _) in INDEXES {
            manager
                .drop_index(
                    Index::drop()
                        .name(*name)
                        .table(Alias::new(*table))
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}
