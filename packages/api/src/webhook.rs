//! # WhatsApp inbound webhook ingestion
//!
//! Automation (e.g. an n8n flow) POSTs every WhatsApp message here. The HTTP
//! route itself lives in the web server; this module owns the logic:
//!
//! 1. validate the payload (all fields required) and normalize the phone;
//! 2. find the lead with that phone, or create one assigned to the first
//!    admin (origem `whatsapp`, status `Novo`, valor 0);
//! 3. insert the message, treating a `message_id` unique violation as an
//!    already-delivered duplicate rather than an error.
//!
//! Retried deliveries are therefore idempotent: same message, same outcome.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{clean_phone, MessageDirection};

/// Raw webhook payload, exactly as the automation sends it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessage {
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_phone: String,
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub direction: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Payload after validation: phone normalized, direction and timestamp typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMessage {
    pub contact_name: String,
    pub telefone: String,
    pub message_id: String,
    pub content: String,
    pub direction: MessageDirection,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("dados incompletos: o payload deve conter {0}")]
    MissingFields(String),
    #[error("direção inválida: {0:?} (esperado inbound ou outbound)")]
    InvalidDirection(String),
    #[error("timestamp inválido: {0:?} (esperado RFC 3339)")]
    InvalidTimestamp(String),
    #[error("nenhum usuário administrador encontrado para atribuir o novo lead")]
    NoAdmin,
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

impl WebhookError {
    /// HTTP status the web route should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            WebhookError::MissingFields(_)
            | WebhookError::InvalidDirection(_)
            | WebhookError::InvalidTimestamp(_) => 400,
            WebhookError::NoAdmin | WebhookError::Db(_) => 500,
        }
    }
}

/// What happened to a delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Message stored; `created_lead` is true when a new lead was opened.
    Stored { lead_id: Uuid, created_lead: bool },
    /// Message with this `message_id` was already stored earlier.
    Duplicate { lead_id: Uuid },
}

/// Check required fields and parse the typed ones. Pure; no database access.
pub fn validate(msg: &InboundMessage) -> Result<ValidatedMessage, WebhookError> {
    let mut missing = Vec::new();
    for (name, value) in [
        ("contactName", &msg.contact_name),
        ("contactPhone", &msg.contact_phone),
        ("messageId", &msg.message_id),
        ("content", &msg.content),
        ("direction", &msg.direction),
        ("timestamp", &msg.timestamp),
    ] {
        if value.trim().is_empty() {
            missing.push(name);
        }
    }
    if !missing.is_empty() {
        return Err(WebhookError::MissingFields(missing.join(", ")));
    }

    let direction = match msg.direction.trim() {
        "inbound" => MessageDirection::Inbound,
        "outbound" => MessageDirection::Outbound,
        other => return Err(WebhookError::InvalidDirection(other.to_string())),
    };

    let timestamp = DateTime::parse_from_rfc3339(msg.timestamp.trim())
        .map_err(|_| WebhookError::InvalidTimestamp(msg.timestamp.clone()))?
        .with_timezone(&Utc);

    Ok(ValidatedMessage {
        contact_name: msg.contact_name.trim().to_string(),
        telefone: clean_phone(&msg.contact_phone),
        message_id: msg.message_id.trim().to_string(),
        content: msg.content.clone(),
        direction,
        timestamp,
    })
}

/// Ingest one delivery: upsert the lead by phone, insert the message.
pub async fn ingest(pool: &PgPool, msg: InboundMessage) -> Result<WebhookOutcome, WebhookError> {
    let v = validate(&msg)?;

    let existing: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM leads WHERE telefone = $1")
        .bind(&v.telefone)
        .fetch_optional(pool)
        .await?;

    let (lead_id, created_lead) = match existing {
        Some((id,)) => (id, false),
        None => {
            let admin: Option<(Uuid,)> = sqlx::query_as(
                "SELECT id FROM app_users WHERE papel = 'admin' ORDER BY created_at LIMIT 1",
            )
            .fetch_optional(pool)
            .await?;
            let Some((admin_id,)) = admin else {
                return Err(WebhookError::NoAdmin);
            };

            let (id,): (Uuid,) = sqlx::query_as(
                "INSERT INTO leads (nome, telefone, origem, status, valor, responsavel_id, created_by)
                 VALUES ($1, $2, 'whatsapp', 'Novo', 0, $3, $3)
                 RETURNING id",
            )
            .bind(&v.contact_name)
            .bind(&v.telefone)
            .bind(admin_id)
            .fetch_one(pool)
            .await?;

            tracing::info!(lead_id = %id, telefone = %v.telefone, "webhook opened a new lead");
            (id, true)
        }
    };

    let inserted = sqlx::query(
        "INSERT INTO whatsapp_messages (lead_id, message_id, content, direction, \"timestamp\")
         VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(lead_id)
    .bind(&v.message_id)
    .bind(&v.content)
    .bind(v.direction)
    .bind(v.timestamp)
    .execute(pool)
    .await;

    match inserted {
        Ok(_) => Ok(WebhookOutcome::Stored { lead_id, created_lead }),
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
            tracing::warn!(message_id = %v.message_id, "duplicate webhook message ignored");
            Ok(WebhookOutcome::Duplicate { lead_id })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> InboundMessage {
        InboundMessage {
            contact_name: "Carlos".to_string(),
            contact_phone: "+55 (11) 99999-9999".to_string(),
            message_id: "wamid.abc123".to_string(),
            content: "Olá, quero um orçamento".to_string(),
            direction: "inbound".to_string(),
            timestamp: "2026-08-05T13:45:00Z".to_string(),
        }
    }

    #[test]
    fn valid_payload_normalizes_phone() {
        let v = validate(&full_payload()).unwrap();
        assert_eq!(v.telefone, "5511999999999");
        assert_eq!(v.direction, MessageDirection::Inbound);
    }

    #[test]
    fn missing_fields_are_all_named() {
        let msg = InboundMessage {
            contact_name: String::new(),
            timestamp: String::new(),
            ..full_payload()
        };
        match validate(&msg) {
            Err(WebhookError::MissingFields(fields)) => {
                assert_eq!(fields, "contactName, timestamp");
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let msg = InboundMessage { direction: "sideways".to_string(), ..full_payload() };
        assert!(matches!(validate(&msg), Err(WebhookError::InvalidDirection(_))));
    }

    #[test]
    fn bad_timestamp_is_rejected() {
        let msg = InboundMessage { timestamp: "ontem".to_string(), ..full_payload() };
        assert!(matches!(validate(&msg), Err(WebhookError::InvalidTimestamp(_))));
    }

    #[test]
    fn validation_errors_map_to_client_errors() {
        let err = validate(&InboundMessage { content: String::new(), ..full_payload() }).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(WebhookError::NoAdmin.status_code(), 500);
    }
}
