//! # Application users and role capabilities
//!
//! [`AppUser`] is the full `app_users` row (server only, includes the
//! password hash); [`AppUserInfo`] is the client-safe projection exchanged
//! through server functions.
//!
//! Authorization is expressed as capability sets: each [`AppRole`] grants a
//! fixed set of [`Capability`] values, and navigation entries, views and the
//! pipeline drop handler all check capabilities instead of matching on role
//! names directly. `nenhum` is the not-yet-approved role: it grants nothing
//! and the UI blocks those accounts behind a pending-approval overlay.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Account role. `Nenhum` marks an account awaiting admin approval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[cfg_attr(feature = "server", sqlx(type_name = "app_role", rename_all = "lowercase"))]
pub enum AppRole {
    Admin,
    Vendedor,
    Nenhum,
}

/// What a role is allowed to do. Checked per route and per action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Access the CRM at all (dashboard, pipeline, leads, conversations).
    ViewCrm,
    /// Create, edit and delete user accounts.
    ManageUsers,
    /// Move any lead on the pipeline board, not just owned ones.
    MoveAnyLead,
}

impl AppRole {
    pub const ASSIGNABLE: [AppRole; 2] = [AppRole::Admin, AppRole::Vendedor];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "admin",
            AppRole::Vendedor => "vendedor",
            AppRole::Nenhum => "nenhum",
        }
    }

    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            AppRole::Admin => &[
                Capability::ViewCrm,
                Capability::ManageUsers,
                Capability::MoveAnyLead,
            ],
            AppRole::Vendedor => &[Capability::ViewCrm],
            AppRole::Nenhum => &[],
        }
    }

    pub fn can(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl std::fmt::Display for AppRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full user record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct AppUser {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub papel: AppRole,
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(feature = "server")]
impl AppUser {
    /// Convert to AppUserInfo for client consumption.
    pub fn to_info(&self) -> AppUserInfo {
        AppUserInfo {
            id: self.id.to_string(),
            nome: self.nome.clone(),
            email: self.email.clone(),
            papel: self.papel,
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// User information safe to send to the client. Never carries the hash.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppUserInfo {
    pub id: String,
    pub nome: String,
    pub email: String,
    pub papel: AppRole,
    pub created_at: String,
}

impl AppUserInfo {
    pub fn can(&self, capability: Capability) -> bool {
        self.papel.can(capability)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_holds_every_capability() {
        for cap in [Capability::ViewCrm, Capability::ManageUsers, Capability::MoveAnyLead] {
            assert!(AppRole::Admin.can(cap));
        }
    }

    #[test]
    fn vendedor_views_but_does_not_manage() {
        assert!(AppRole::Vendedor.can(Capability::ViewCrm));
        assert!(!AppRole::Vendedor.can(Capability::ManageUsers));
        assert!(!AppRole::Vendedor.can(Capability::MoveAnyLead));
    }

    #[test]
    fn pending_accounts_hold_nothing() {
        assert!(AppRole::Nenhum.capabilities().is_empty());
    }
}
