use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::toast::{use_toast, ToastOptions};

/// Confirmation dialog for deleting a lead. Messages and activities go with
/// it (the schema cascades).
#[component]
pub fn DeleteLeadDialog(
    lead_id: String,
    lead_nome: String,
    on_deleted: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let toast = use_toast();
    let mut pending = use_signal(|| false);

    let handle_delete = move |_| {
        let id = lead_id.clone();
        spawn(async move {
            pending.set(true);
            match api::delete_lead(id).await {
                Ok(()) => {
                    toast.success("Lead excluído".to_string(), ToastOptions::new());
                    on_deleted.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao excluir lead: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Excluir Lead" }
            p {
                class: "modal-text",
                "Excluir o lead "
                strong { "{lead_nome}" }
                "? As conversas e atividades associadas também serão removidas."
            }
            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Destructive,
                    disabled: pending(),
                    onclick: handle_delete,
                    "Excluir"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: pending(),
                    onclick: move |_| on_cancel.call(()),
                    "Cancelar"
                }
            }
        }
    }
}
