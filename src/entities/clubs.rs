use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "clubs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub city: Option<String>,
    pub founded_year: Option<i32>,
    /// Home ground
    pub playground_id: Option<i32>,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::playgrounds::Entity",
        from = "Column::PlaygroundId",
        to = "super::playgrounds::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Playgrounds,
    #[sea_orm(has_many = "super::teams::Entity")]
    Teams,
}

impl Related<super::playgrounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Playgrounds.def()
    }
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teams.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
