use dioxus::prelude::*;

use super::WhatsappChat;

/// Right-hand side of the conversations page: the selected lead's chat, or
/// a hint to pick one.
#[component]
pub fn ChatPanel(lead_id: Option<String>, lead_nome: Option<String>) -> Element {
    let Some(lead_id) = lead_id else {
        return rsx! {
            div {
                class: "chat-placeholder",
                h3 { "Selecione uma conversa" }
                p { "Escolha uma conversa na lista à esquerda para ver as mensagens." }
            }
        };
    };

    rsx! {
        div {
            class: "chat-panel",
            header {
                class: "chat-panel-header",
                h3 { {lead_nome.unwrap_or_default()} }
            }
            WhatsappChat { key: "{lead_id}", lead_id: lead_id.clone() }
        }
    }
}
