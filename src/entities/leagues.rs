use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leagues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub season_id: i32,
    pub league_type_id: i32,
    pub match_system_id: i32,
    pub gender_id: i32,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::seasons::Entity",
        from = "Column::SeasonId",
        to = "super::seasons::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Seasons,
    #[sea_orm(
        belongs_to = "super::league_types::Entity",
        from = "Column::LeagueTypeId",
        to = "super::league_types::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    LeagueTypes,
    #[sea_orm(
        belongs_to = "super::match_systems::Entity",
        from = "Column::MatchSystemId",
        to = "super::match_systems::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    MatchSystems,
    #[sea_orm(
        belongs_to = "super::genders::Entity",
        from = "Column::GenderId",
        to = "super::genders::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Genders,
    #[sea_orm(has_many = "super::teams::Entity")]
    Teams,
}

impl Related<super::seasons::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Seasons.def()
    }
}

impl Related<super::league_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeagueTypes.def()
    }
}

impl Related<super::match_systems::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchSystems.def()
    }
}

impl Related<super::genders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Genders.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
