//! Registration page view with email/password form.
//!
//! New accounts start with the `nenhum` role; after submitting, the user
//! lands on the pending-approval screen until an admin assigns a role.

use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Input, Label};
use ui::{use_auth, AuthState};

use crate::Route;

/// Register page component.
#[component]
pub fn Register() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut nome = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm_password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the dashboard
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let n = nome().trim().to_string();
            let e = email().trim().to_string();
            let p = password();
            let cp = confirm_password();

            if n.is_empty() {
                error.set(Some("Nome é obrigatório".to_string()));
                return;
            }
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Informe um email válido".to_string()));
                return;
            }
            if p.len() < 8 {
                error.set(Some("A senha deve ter pelo menos 8 caracteres".to_string()));
                return;
            }
            if p != cp {
                error.set(Some("As senhas não coincidem".to_string()));
                return;
            }

            loading.set(true);
            match api::register(n, e, p).await {
                Ok(user) => {
                    auth.set(AuthState { user: Some(user), loading: false });
                    nav.replace(Route::Dashboard {});
                }
                Err(e) => {
                    loading.set(false);
                    error.set(Some(e.to_string()));
                }
            }
        });
    };

    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "leadflow" }
                p { class: "auth-subtitle", "Crie sua conta" }

                if let Some(ref message) = error() {
                    p { class: "form-error", "{message}" }
                }

                form {
                    onsubmit: handle_register,
                    div {
                        class: "modal-field",
                        Label { html_for: "register-nome", "Nome" }
                        Input {
                            id: "register-nome",
                            value: nome(),
                            oninput: move |evt: FormEvent| nome.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "register-email", "Email" }
                        Input {
                            id: "register-email",
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "register-password", "Senha" }
                        Input {
                            id: "register-password",
                            r#type: "password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "register-confirm", "Confirme a senha" }
                        Input {
                            id: "register-confirm",
                            r#type: "password",
                            value: confirm_password(),
                            oninput: move |evt: FormEvent| confirm_password.set(evt.value()),
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: loading(),
                        if loading() { "Criando conta..." } else { "Criar conta" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Já tem uma conta? "
                    Link { to: Route::Login {}, "Entrar" }
                }
            }
        }
    }
}
