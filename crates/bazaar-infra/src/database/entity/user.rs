//! User entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;

use bazaar_core::domain::UserRole;
use bazaar_core::error::RepoError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(9))")]
pub enum Role {
    #[sea_orm(string_value = "member")]
    Member,
    #[sea_orm(string_value = "moderator")]
    Moderator,
    #[sea_orm(string_value = "admin")]
    Admin,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub username: String,
    pub password: String,
    pub role: Role,
    pub age: i16,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ad::Entity")]
    Ad,
    #[sea_orm(has_many = "super::user_location::Entity")]
    UserLocation,
}

impl Related<super::ad::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ad.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        super::user_location::Relation::Location.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::user_location::Relation::User.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Role> for UserRole {
    fn from(role: Role) -> Self {
        match role {
            Role::Member => UserRole::Member,
            Role::Moderator => UserRole::Moderator,
            Role::Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for Role {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::Member => Role::Member,
            UserRole::Moderator => Role::Moderator,
            UserRole::Admin => Role::Admin,
        }
    }
}

/// Conversion from SeaORM Model to Domain User. A negative age is rejected.
impl TryFrom<Model> for bazaar_core::domain::User {
    type Error = RepoError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let age = u16::try_from(model.age).map_err(|_| {
            RepoError::Constraint(format!("user {} has negative age {}", model.id, model.age))
        })?;

        Ok(Self {
            id: model.id,
            first_name: model.first_name,
            last_name: model.last_name,
            username: model.username,
            password: model.password,
            role: model.role.into(),
            age,
        })
    }
}

/// Conversion from Domain User to SeaORM ActiveModel. The age column is a
/// signed small integer.
impl TryFrom<bazaar_core::domain::User> for ActiveModel {
    type Error = RepoError;

    fn try_from(user: bazaar_core::domain::User) -> Result<Self, Self::Error> {
        let age = i16::try_from(user.age).map_err(|_| {
            RepoError::Constraint(format!("age {} of user {} is out of range", user.age, user.id))
        })?;

        Ok(Self {
            id: Set(user.id),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            username: Set(user.username),
            password: Set(user.password),
            role: Set(user.role.into()),
            age: Set(age),
        })
    }
}
