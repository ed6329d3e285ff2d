use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Location::Table)
                    .if_not_exists()
                    .col(big_integer(Location::Id).auto_increment().primary_key())
                    .col(string_len(Location::Name, 150).unique_key())
                    .col(double_null(Location::Lat))
                    .col(double_null(Location::Lng))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Location::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Location {
    #[sea_orm(iden = "users_location")]
    Table,
    Id,
    Name,
    Lat,
    Lng,
}
