use api::MessageDirection;
use dioxus::prelude::*;

use crate::format::format_datetime;

/// Message history for one lead, rendered as chat bubbles. Inbound messages
/// sit left, outbound right.
#[component]
pub fn WhatsappChat(lead_id: String) -> Element {
    let messages = use_resource(move || {
        let id = lead_id.clone();
        async move { api::list_messages(id).await }
    });

    rsx! {
        div {
            class: "chat-messages",
            match messages() {
                None => rsx! {
                    p { class: "chat-empty", "Carregando mensagens..." }
                },
                Some(Err(_)) => rsx! {
                    p { class: "chat-empty", "Não foi possível carregar as mensagens." }
                },
                Some(Ok(messages)) if messages.is_empty() => rsx! {
                    p { class: "chat-empty", "Nenhuma mensagem ainda." }
                },
                Some(Ok(messages)) => rsx! {
                    for message in messages {
                        div {
                            key: "{message.id}",
                            class: match message.direction {
                                MessageDirection::Inbound => "chat-bubble inbound",
                                MessageDirection::Outbound => "chat-bubble outbound",
                            },
                            p { class: "chat-content", "{message.content}" }
                            span { class: "chat-time", "{format_datetime(&message.timestamp)}" }
                        }
                    }
                },
            }
        }
    }
}
