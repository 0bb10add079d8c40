//! # Lead model and pipeline enumerations
//!
//! Defines the two representations of a lead:
//!
//! ## [`Lead`] (server only)
//!
//! The complete database row from the `leads` table. It derives
//! [`sqlx::FromRow`] so it can be loaded directly from queries. The
//! [`Lead::to_info`] method projects it into a [`LeadInfo`].
//!
//! ## [`LeadInfo`]
//!
//! A client-safe projection that is `Serialize + Deserialize + PartialEq` and
//! can cross the server/client boundary via Dioxus server functions. `Uuid`
//! columns become `String`s and timestamps become RFC 3339 strings so the
//! type works in WASM without pulling uuid/chrono into the client build.
//!
//! The enumerations ([`LeadStatus`], [`LeadOrigin`]) keep their Portuguese
//! wire values and map onto the Postgres enum types of the same name.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Pipeline stages. Declaration order is board column order, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[cfg_attr(feature = "server", sqlx(type_name = "lead_status"))]
pub enum LeadStatus {
    Novo,
    Atendimento,
    Ganho,
    Perdido,
}

impl LeadStatus {
    /// Every stage, in column order. Grouping and rendering iterate this so
    /// no stage is ever silently dropped from the board.
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::Novo,
        LeadStatus::Atendimento,
        LeadStatus::Ganho,
        LeadStatus::Perdido,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Novo => "Novo",
            LeadStatus::Atendimento => "Atendimento",
            LeadStatus::Ganho => "Ganho",
            LeadStatus::Perdido => "Perdido",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Acquisition channel for a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[cfg_attr(feature = "server", sqlx(type_name = "lead_origin", rename_all = "snake_case"))]
pub enum LeadOrigin {
    Formulario,
    Whatsapp,
    RedesSociais,
    Indicacao,
    Outros,
}

impl LeadOrigin {
    pub const ALL: [LeadOrigin; 5] = [
        LeadOrigin::Formulario,
        LeadOrigin::Whatsapp,
        LeadOrigin::RedesSociais,
        LeadOrigin::Indicacao,
        LeadOrigin::Outros,
    ];

    /// Wire value, as stored in the database and in import files.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadOrigin::Formulario => "formulario",
            LeadOrigin::Whatsapp => "whatsapp",
            LeadOrigin::RedesSociais => "redes_sociais",
            LeadOrigin::Indicacao => "indicacao",
            LeadOrigin::Outros => "outros",
        }
    }

    /// Human-readable label for badges and dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            LeadOrigin::Formulario => "Formulário",
            LeadOrigin::Whatsapp => "WhatsApp",
            LeadOrigin::RedesSociais => "Redes Sociais",
            LeadOrigin::Indicacao => "Indicação",
            LeadOrigin::Outros => "Outros",
        }
    }

    /// Parse a wire value, falling back to [`LeadOrigin::Outros`] for blank
    /// or unrecognized input. Import rows tolerate bad origins instead of
    /// failing the batch.
    pub fn parse_or_default(value: &str) -> LeadOrigin {
        match value.trim() {
            "formulario" => LeadOrigin::Formulario,
            "whatsapp" => LeadOrigin::Whatsapp,
            "redes_sociais" => LeadOrigin::RedesSociais,
            "indicacao" => LeadOrigin::Indicacao,
            _ => LeadOrigin::Outros,
        }
    }
}

impl std::fmt::Display for LeadOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full lead record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct Lead {
    pub id: Uuid,
    pub nome: String,
    pub empresa: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub origem: LeadOrigin,
    pub valor: f64,
    pub status: LeadStatus,
    pub responsavel_id: Option<Uuid>,
    pub created_by: Uuid,
    pub observacoes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(feature = "server")]
impl Lead {
    /// Convert to LeadInfo for client consumption.
    pub fn to_info(&self) -> LeadInfo {
        LeadInfo {
            id: self.id.to_string(),
            nome: self.nome.clone(),
            empresa: self.empresa.clone(),
            email: self.email.clone(),
            telefone: self.telefone.clone(),
            origem: self.origem,
            valor: self.valor,
            status: self.status,
            responsavel_id: self.responsavel_id.map(|id| id.to_string()),
            created_by: self.created_by.to_string(),
            observacoes: self.observacoes.clone(),
            created_at: self.created_at.to_rfc3339(),
        }
    }
}

/// Lead information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadInfo {
    pub id: String,
    pub nome: String,
    pub empresa: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub origem: LeadOrigin,
    pub valor: f64,
    pub status: LeadStatus,
    pub responsavel_id: Option<String>,
    pub created_by: String,
    pub observacoes: Option<String>,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Insert/update payload for a lead, built by forms and the CSV importer.
/// `created_by` is never part of the payload; the server fills it from the
/// session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LeadDraft {
    pub nome: String,
    pub empresa: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub valor: f64,
    pub origem: LeadOrigin,
    pub status: LeadStatus,
    pub responsavel_id: Option<String>,
    pub observacoes: Option<String>,
}

/// Strip a phone number down to its digits. Used both when storing lead
/// phones from the webhook and when building wa.me links, so the same
/// contact always normalizes to the same key.
pub fn clean_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_columns_cover_every_stage_in_order() {
        let names: Vec<&str> = LeadStatus::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["Novo", "Atendimento", "Ganho", "Perdido"]);
    }

    #[test]
    fn origin_parse_falls_back_to_outros() {
        assert_eq!(LeadOrigin::parse_or_default("whatsapp"), LeadOrigin::Whatsapp);
        assert_eq!(LeadOrigin::parse_or_default(" indicacao "), LeadOrigin::Indicacao);
        assert_eq!(LeadOrigin::parse_or_default(""), LeadOrigin::Outros);
        assert_eq!(LeadOrigin::parse_or_default("carrier-pigeon"), LeadOrigin::Outros);
    }

    #[test]
    fn clean_phone_strips_formatting() {
        assert_eq!(clean_phone("+55 (11) 99999-9999"), "5511999999999");
        assert_eq!(clean_phone("5511999999999"), "5511999999999");
        assert_eq!(clean_phone(""), "");
    }
}
