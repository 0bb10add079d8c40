use api::AppUserInfo;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant};
use crate::toast::{use_toast, ToastOptions};

/// Confirmation dialog for removing an account.
#[component]
pub fn DeleteUserDialog(
    user: AppUserInfo,
    on_deleted: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let toast = use_toast();
    let mut pending = use_signal(|| false);

    let user_id = user.id.clone();
    let handle_delete = move |_| {
        let id = user_id.clone();
        spawn(async move {
            pending.set(true);
            match api::delete_user(id).await {
                Ok(()) => {
                    toast.success("Usuário excluído".to_string(), ToastOptions::new());
                    on_deleted.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao excluir usuário: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Excluir Usuário" }
            p {
                class: "modal-text",
                "Excluir a conta de "
                strong { "{user.nome}" }
                " ({user.email})? Os leads atribuídos a ela ficarão sem responsável."
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
