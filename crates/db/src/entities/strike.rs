//! Disciplinary strike entity.
//!
//! Strikes are immutable once created: the repository exposes no update or
//! delete path.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "strikes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Recipient trooper.
    pub user_id: String,

    pub reason: String,

    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Issuing supervisor.
    pub issued_by: String,

    pub issued_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    Recipient,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::IssuedBy",
        to = "super::user::Column::Id"
    )]
    Issuer,
}

/// The default user join targets the issuing supervisor, which is what the
/// strike listings attach.
impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issuer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
