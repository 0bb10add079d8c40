//! WhatsApp conversations view: list on the left, chat on the right.

use dioxus::prelude::*;

use ui::whatsapp::{ChatPanel, ConversationList};
use ui::{MainLayout, PageHeader};

use super::navigate;

#[component]
pub fn Conversations() -> Element {
    let nav = use_navigator();
    let mut selected_lead_id = use_signal(|| Option::<String>::None);

    let conversations = use_resource(|| async move {
        api::list_conversations().await.unwrap_or_default()
    });

    let list = conversations().unwrap_or_default();
    let selected_nome = selected_lead_id().and_then(|id| {
        list.iter()
            .find(|c| c.lead_id == id)
            .map(|c| c.lead_nome.clone())
    });

    rsx! {
        MainLayout {
            active_path: "/conversas",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Conversas",
                description: "Visualize e gerencie suas conversas do WhatsApp.",
            }

            div {
                class: "conversations-layout",
                ConversationList {
                    conversations: list.clone(),
                    selected_lead_id: selected_lead_id(),
                    on_select: move |id| selected_lead_id.set(Some(id)),
                    loading: conversations().is_none(),
                }
                ChatPanel {
                    lead_id: selected_lead_id(),
                    lead_nome: selected_nome,
                }
            }
        }
    }
}
