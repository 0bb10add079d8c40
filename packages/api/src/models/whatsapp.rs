//! WhatsApp message and conversation models.
//!
//! Messages arrive through the inbound webhook and are only ever read by the
//! client (the conversations view); there is no send path in this system.

use serde::{Deserialize, Serialize};

#[cfg(feature = "server")]
use chrono::{DateTime, Utc};
#[cfg(feature = "server")]
use sqlx::FromRow;
#[cfg(feature = "server")]
use uuid::Uuid;

/// Which way a message travelled, from the lead's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "server", derive(sqlx::Type))]
#[cfg_attr(feature = "server", sqlx(type_name = "message_direction", rename_all = "lowercase"))]
pub enum MessageDirection {
    Inbound,
    Outbound,
}

/// Full message record from the database.
#[cfg(feature = "server")]
#[derive(Debug, Clone, FromRow)]
pub struct WhatsappMessage {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub message_id: String,
    pub content: String,
    pub direction: MessageDirection,
    pub timestamp: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[cfg(feature = "server")]
impl WhatsappMessage {
    pub fn to_info(&self) -> WhatsappMessageInfo {
        WhatsappMessageInfo {
            id: self.id.to_string(),
            lead_id: self.lead_id.to_string(),
            message_id: self.message_id.clone(),
            content: self.content.clone(),
            direction: self.direction,
            timestamp: self.timestamp.to_rfc3339(),
        }
    }
}

/// Message information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhatsappMessageInfo {
    pub id: String,
    pub lead_id: String,
    pub message_id: String,
    pub content: String,
    pub direction: MessageDirection,
    pub timestamp: String,
}

/// One row per lead with messages: the lead plus its latest message, for the
/// conversation list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationInfo {
    pub lead_id: String,
    pub lead_nome: String,
    pub last_message: String,
    pub last_timestamp: String,
}
