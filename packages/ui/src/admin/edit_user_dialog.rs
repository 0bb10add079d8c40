use api::{AppRole, AppUserInfo};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::toast::{use_toast, ToastOptions};

/// Admin dialog for renaming an account or changing its role. Setting a
/// role on a `nenhum` account is how pending registrations get approved.
#[component]
pub fn EditUserDialog(
    user: AppUserInfo,
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let toast = use_toast();
    let mut nome = use_signal({
        let v = user.nome.clone();
        move || v.clone()
    });
    let mut papel = use_signal({
        let v = user.papel.as_str().to_string();
        move || v.clone()
    });
    let mut error = use_signal(|| Option::<String>::None);
    let mut pending = use_signal(|| false);

    let user_id = user.id.clone();
    let handle_submit = move |_| {
        error.set(None);

        let nome_v = nome().trim().to_string();
        if nome_v.is_empty() {
            error.set(Some("Nome é obrigatório".to_string()));
            return;
        }
        let papel_v = match papel().as_str() {
            "admin" => AppRole::Admin,
            "vendedor" => AppRole::Vendedor,
            _ => AppRole::Nenhum,
        };

        let id = user_id.clone();
        spawn(async move {
            pending.set(true);
            match api::update_user(id, nome_v, papel_v).await {
                Ok(_) => {
                    toast.success("Usuário atualizado".to_string(), ToastOptions::new());
                    on_saved.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao atualizar usuário: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Editar Usuário" }
            p { class: "modal-text", "{user.email}" }

            if let Some(ref message) = error() {
                p { class: "form-error", "{message}" }
            }

            div {
                class: "modal-field",
                Label { html_for: "edit-user-nome", "Nome" }
                Input {
                    id: "edit-user-nome",
                    value: nome(),
                    oninput: move |evt: FormEvent| nome.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                Label { html_for: "edit-user-papel", "Papel" }
                select {
                    id: "edit-user-papel",
                    class: "field-select",
                    value: papel(),
                    onchange: move |evt| papel.set(evt.value()),
                    option { value: "admin", "admin" }
                    option { value: "vendedor", "vendedor" }
                    option { value: "nenhum", "nenhum (sem acesso)" }
                }
            }

            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: pending(),
                    onclick: handle_submit,
                    "Salvar"
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
