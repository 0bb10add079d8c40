//! Profile view: account details and display-name update.

use dioxus::prelude::*;

use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, Input, Label};
use ui::{use_auth, use_toast, AuthState, MainLayout, PageHeader, ToastOptions};

use super::navigate;

#[component]
pub fn Profile() -> Element {
    let nav = use_navigator();
    let mut auth = use_auth();
    let toast = use_toast();
    let mut nome = use_signal(|| auth().user.map(|u| u.nome).unwrap_or_default());
    let mut pending = use_signal(|| false);

    let handle_save = move |_| {
        let nome_v = nome().trim().to_string();
        if nome_v.is_empty() {
            toast.warning("Nome é obrigatório".to_string(), ToastOptions::new());
            return;
        }
        spawn(async move {
            pending.set(true);
            match api::update_profile(nome_v).await {
                Ok(user) => {
                    auth.set(AuthState { user: Some(user), loading: false });
                    toast.success("Perfil atualizado".to_string(), ToastOptions::new());
                }
                Err(e) => {
                    toast.error(format!("Erro ao atualizar perfil: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    rsx! {
        MainLayout {
            active_path: "/perfil",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Perfil",
                description: "Dados da sua conta",
            }

            if let Some(user) = auth().user {
                div {
                    class: "auth-card",
                    div {
                        class: "modal-field",
                        Label { html_for: "profile-nome", "Nome" }
                        Input {
                            id: "profile-nome",
                            value: nome(),
                            oninput: move |evt: FormEvent| nome.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "profile-email", "Email" }
                        Input {
                            id: "profile-email",
                            value: user.email.clone(),
                            disabled: true,
                            oninput: move |_| {},
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "profile-papel", "Papel" }
                        div {
                            Badge { variant: BadgeVariant::Default, "{user.papel}" }
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: pending(),
                        onclick: handle_save,
                        "Salvar"
                    }
                }
            }
        }
    }
}
