//! WhatsApp conversation widgets.

mod chat;
mod chat_panel;
mod conversation_list;

pub use chat::WhatsappChat;
pub use chat_panel::ChatPanel;
pub use conversation_list::ConversationList;
