use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserLocation::Table)
                    .if_not_exists()
                    .col(big_integer(UserLocation::Id).auto_increment().primary_key())
                    .col(big_integer(UserLocation::UserId))
                    .col(big_integer(UserLocation::LocationId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_location_user")
                            .from(UserLocation::Table, UserLocation::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_location_location")
                            .from(UserLocation::Table, UserLocation::LocationId)
                            .to(Location::Table, Location::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A user is linked to a location at most once
        manager
            .create_index(
                Index::create()
                    .name("uniq_user_location")
                    .table(UserLocation::Table)
                    .col(UserLocation::UserId)
                    .col(UserLocation::LocationId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserLocation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserLocation {
    #[sea_orm(iden = "users_user_location")]
    Table,
    Id,
    UserId,
    LocationId,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users_user")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Location {
    #[sea_orm(iden = "users_location")]
    Table,
    Id,
}
