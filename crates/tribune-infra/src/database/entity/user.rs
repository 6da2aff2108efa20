//! User entity for SeaORM.

use sea_orm::ActiveValue::NotSet;
use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub login: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<Date>,
    pub phone: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain User.
impl From<Model> for tribune_core::domain::User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            login: model.login,
            email: model.email,
            password_hash: model.password_hash,
            first_name: model.first_name,
            last_name: model.last_name,
            date_of_birth: model.date_of_birth,
            phone: model.phone,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain User to SeaORM ActiveModel.
impl From<tribune_core::domain::User> for ActiveModel {
    fn from(user: tribune_core::domain::User) -> Self {
        Self {
            id: Set(user.id),
            login: Set(user.login),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            date_of_birth: Set(user.date_of_birth),
            phone: Set(user.phone),
            created_at: Set(user.created_at.into()),
            updated_at: Set(user.updated_at.into()),
        }
    }
}

/// Conversion from a NewUser to an insertable ActiveModel; the store assigns
/// the id.
impl From<tribune_core::domain::NewUser> for ActiveModel {
    fn from(user: tribune_core::domain::NewUser) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: NotSet,
            login: Set(user.login),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            date_of_birth: Set(user.date_of_birth),
            phone: Set(user.phone),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}
