//! Activity (follow-up task) models for the agenda and lead timelines.

use serde::{Deserialize, Serialize};

/// Kind of follow-up recorded against a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[cfg_attr(feature = "server", sqlx(type_name = "activity_type", rename_all = "lowercase"))]
pub enum ActivityType {
    Ligacao,
    Email,
    Reuniao,
    Outro,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Ligacao,
        ActivityType::Email,
        ActivityType::Reuniao,
        ActivityType::Outro,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ActivityType::Ligacao => "Ligação",
            ActivityType::Email => "Email",
            ActivityType::Reuniao => "Reunião",
            ActivityType::Outro => "Outro",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Ligacao => "ligacao",
            ActivityType::Email => "email",
            ActivityType::Reuniao => "reuniao",
            ActivityType::Outro => "outro",
        }
    }
}

/// Activity information safe to send to the client. `lead_nome` is joined in
/// by the list queries so the agenda can render without a second fetch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityInfo {
    pub id: String,
    pub lead_id: String,
    pub lead_nome: String,
    pub assigned_to_id: String,
    pub created_by_id: String,
    pub tipo: ActivityType,
    pub due_date: String,
    pub notes: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<String>,
}

/// Payload for creating an activity against a lead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityDraft {
    pub lead_id: String,
    pub assigned_to_id: String,
    pub tipo: ActivityType,
    /// RFC 3339 due date.
    pub due_date: String,
    pub notes: Option<String>,
}
