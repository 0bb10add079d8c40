use api::ConversationInfo;
use dioxus::prelude::*;

use crate::format::format_datetime;

/// Left-hand list on the conversations page: one row per lead with
/// messages, newest conversation first (the API already orders them).
#[component]
pub fn ConversationList(
    conversations: Vec<ConversationInfo>,
    selected_lead_id: Option<String>,
    on_select: EventHandler<String>,
    #[props(default = false)] loading: bool,
) -> Element {
    rsx! {
        div {
            class: "conversation-list",
            if loading {
                p { class: "conversation-empty", "Carregando conversas..." }
            } else if conversations.is_empty() {
                p { class: "conversation-empty", "Nenhuma conversa ainda." }
            } else {
                for conversation in conversations {
                    div {
                        key: "{conversation.lead_id}",
                        class: if selected_lead_id.as_ref() == Some(&conversation.lead_id) {
                            "conversation-item active"
                        } else {
                            "conversation-item"
                        },
                        onclick: {
                            let id = conversation.lead_id.clone();
                            move |_| on_select.call(id.clone())
                        },
                        div {
                            class: "conversation-item-header",
                            span { class: "conversation-name", "{conversation.lead_nome}" }
                            span {
                                class: "conversation-time",
                                "{format_datetime(&conversation.last_timestamp)}"
                            }
                        }
                        p { class: "conversation-preview", "{conversation.last_message}" }
                    }
                }
            }
        }
    }
}
