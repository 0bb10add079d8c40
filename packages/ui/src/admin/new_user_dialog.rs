use api::AppRole;
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};
use crate::toast::{use_toast, ToastOptions};

/// Admin dialog for creating an account with a role already assigned.
#[component]
pub fn NewUserDialog(on_saved: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut nome = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut papel = use_signal(|| AppRole::Vendedor.as_str().to_string());
    let mut error = use_signal(|| Option::<String>::None);
    let mut pending = use_signal(|| false);

    let handle_submit = move |_| {
        error.set(None);

        let nome_v = nome().trim().to_string();
        let email_v = email().trim().to_string();
        if nome_v.is_empty() {
            error.set(Some("Nome é obrigatório".to_string()));
            return;
        }
        if email_v.is_empty() || !email_v.contains('@') {
            error.set(Some("Email inválido".to_string()));
            return;
        }
        if password().len() < 8 {
            error.set(Some("A senha deve ter pelo menos 8 caracteres".to_string()));
            return;
        }
        let papel_v = if papel() == "admin" { AppRole::Admin } else { AppRole::Vendedor };

        spawn(async move {
            pending.set(true);
            match api::create_user(nome_v, email_v, password(), papel_v).await {
                Ok(_) => {
                    toast.success("Usuário criado com sucesso".to_string(), ToastOptions::new());
                    on_saved.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao criar usuário: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Novo Usuário" }

            if let Some(ref message) = error() {
                p { class: "form-error", "{message}" }
            }

            div {
                class: "modal-field",
                Label { html_for: "user-nome", "Nome" }
                Input {
                    id: "user-nome",
                    value: nome(),
                    oninput: move |evt: FormEvent| nome.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                Label { html_for: "user-email", "Email" }
                Input {
                    id: "user-email",
                    r#type: "email",
                    value: email(),
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                Label { html_for: "user-password", "Senha" }
                Input {
                    id: "user-password",
                    r#type: "password",
                    value: password(),
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
            }
            div {
                class: "modal-field",
                Label { html_for: "user-papel", "Papel" }
                select {
                    id: "user-papel",
                    class: "field-select",
                    value: papel(),
                    onchange: move |evt| papel.set(evt.value()),
                    for role in AppRole::ASSIGNABLE {
                        option { key: "{role.as_str()}", value: "{role.as_str()}", "{role.as_str()}" }
                    }
                }
            }

            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: pending(),
                    onclick: handle_submit,
                    "Criar Usuário"
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
