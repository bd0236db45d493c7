//! User entity: troopers and supervisors.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role a user holds within the troop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum UserRole {
    #[sea_orm(string_value = "trooper")]
    #[default]
    Trooper,
    #[sea_orm(string_value = "supervisor")]
    Supervisor,
}

impl UserRole {
    /// Wire representation of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trooper => "trooper",
            Self::Supervisor => "supervisor",
        }
    }
}

/// Account status driven by the supervisor approval workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum UserStatus {
    #[sea_orm(string_value = "pending")]
    #[default]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "denied")]
    Denied,
}

impl UserStatus {
    /// Wire representation of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 PHC string; never serialized into API responses.
    pub password_hash: String,

    pub name: String,

    #[sea_orm(unique)]
    pub badge_number: String,

    pub role: UserRole,

    #[sea_orm(nullable)]
    pub rank: Option<String>,

    #[sea_orm(nullable)]
    pub profile_image_url: Option<String>,

    pub status: UserStatus,

    /// Set if and only if status is `denied`.
    #[sea_orm(column_type = "Text", nullable)]
    pub denial_reason: Option<String>,

    /// Supervisor who approved this user; set iff status is `approved`.
    #[sea_orm(nullable)]
    pub approved_by: Option<String>,

    #[sea_orm(nullable)]
    pub approved_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    #[sea_orm(nullable)]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
