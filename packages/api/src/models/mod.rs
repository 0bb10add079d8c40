//! Database models and their client-safe projections.

mod activity;
mod lead;
mod user;
mod whatsapp;

pub use activity::{ActivityDraft, ActivityInfo, ActivityType};
pub use lead::{clean_phone, LeadDraft, LeadInfo, LeadOrigin, LeadStatus};
pub use user::{AppRole, AppUserInfo, Capability};
pub use whatsapp::{ConversationInfo, MessageDirection, WhatsappMessageInfo};

#[cfg(feature = "server")]
pub use lead::Lead;
#[cfg(feature = "server")]
pub use user::AppUser;
#[cfg(feature = "server")]
pub use whatsapp::WhatsappMessage;
