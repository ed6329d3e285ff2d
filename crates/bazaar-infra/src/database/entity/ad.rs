//! Ad entity for SeaORM.

use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use bazaar_core::domain::{Ad, NewAd};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ads_ad")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub author_id: i64,
    pub price: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_published: bool,
    pub image: Option<String>,
    pub category_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Ad.
impl From<Model> for Ad {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            author_id: model.author_id,
            category_id: model.category_id,
            price: model.price,
            description: model.description,
            is_published: model.is_published,
            image: model.image,
        }
    }
}

/// Conversion from Domain Ad to SeaORM ActiveModel.
impl From<Ad> for ActiveModel {
    fn from(ad: Ad) -> Self {
        Self {
            id: Set(ad.id),
            name: Set(ad.name),
            author_id: Set(ad.author_id),
            price: Set(ad.price),
            description: Set(ad.description),
            is_published: Set(ad.is_published),
            image: Set(ad.image),
            category_id: Set(ad.category_id),
        }
    }
}

/// A new ad leaves the id to the database sequence.
impl From<NewAd> for ActiveModel {
    fn from(ad: NewAd) -> Self {
        Self {
            id: NotSet,
            name: Set(ad.name),
            author_id: Set(ad.author_id),
            price: Set(ad.price),
            description: Set(ad.description),
            is_published: Set(ad.is_published),
            image: Set(ad.image.filter(|path| !path.is_empty())),
            category_id: Set(ad.category_id),
        }
    }
}
