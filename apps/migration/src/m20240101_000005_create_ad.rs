use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ad::Table)
                    .if_not_exists()
                    .col(big_integer(Ad::Id).auto_increment().primary_key())
                    .col(string_len(Ad::Name, 255))
                    .col(big_integer(Ad::AuthorId))
                    .col(integer(Ad::Price))
                    .col(text_null(Ad::Description))
                    .col(boolean(Ad::IsPublished).default(false))
                    .col(string_len_null(Ad::Image, 255))
                    .col(big_integer(Ad::CategoryId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ad_author")
                            .from(Ad::Table, Ad::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ad_category")
                            .from(Ad::Table, Ad::CategoryId)
                            .to(Category::Table, Category::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing sorts by price
        manager
            .create_index(
                Index::create()
                    .name("idx_ad_price")
                    .table(Ad::Table)
                    .col(Ad::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Ad::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Ad {
    #[sea_orm(iden = "ads_ad")]
    Table,
    Id,
    Name,
    AuthorId,
    Price,
    Description,
    IsPublished,
    Image,
    CategoryId,
}

#[derive(DeriveIden)]
enum User {
    #[sea_orm(iden = "users_user")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Category {
    #[sea_orm(iden = "ads_category")]
    Table,
    Id,
}
