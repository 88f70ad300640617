use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Lookup tables first so foreign keys resolve in creation order.
        let tables = [
            schema.create_table_from_entity(Genders),
            schema.create_table_from_entity(Positions),
            schema.create_table_from_entity(LeagueTypes),
            schema.create_table_from_entity(MatchSystems),
            schema.create_table_from_entity(Seasons),
            schema.create_table_from_entity(Playgrounds),
            schema.create_table_from_entity(Leagues),
            schema.create_table_from_entity(Clubs),
            schema.create_table_from_entity(Teams),
            schema.create_table_from_entity(Players),
        ];

        for mut table in tables {
            manager.create_table(table.if_not_exists().to_owned()).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Players).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Clubs).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Leagues).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Playgrounds).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchSystems).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LeagueTypes).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Positions).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genders).if_exists().to_owned())
            .await?;

        Ok(())
    }
}
