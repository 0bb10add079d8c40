//! Login page view with email/password form.

use dioxus::prelude::*;

use ui::components::{Button, ButtonVariant, Input, Label};
use ui::{use_auth, AuthState};

use crate::Route;

/// Login page component.
#[component]
pub fn Login() -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut loading = use_signal(|| false);

    // If already logged in, go straight to the dashboard
    if !auth().loading && auth().user.is_some() {
        nav.replace(Route::Dashboard {});
    }

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        spawn(async move {
            error.set(None);

            let e = email().trim().to_string();
            if e.is_empty() || !e.contains('@') {
                error.set(Some("Informe um email válido".to_string()));
                return;
            }
            if password().is_empty() {
                error.set(Some("Informe a senha".to_string()));
                return;
            }

            loading.set(true);
            match api::login(e, password()).await {
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
                p { class: "auth-subtitle", "Entre com sua conta para acessar o CRM" }

                if let Some(ref message) = error() {
                    p { class: "form-error", "{message}" }
                }

                form {
                    onsubmit: handle_login,
                    div {
                        class: "modal-field",
                        Label { html_for: "login-email", "Email" }
                        Input {
                            id: "login-email",
                            r#type: "email",
                            value: email(),
                            oninput: move |evt: FormEvent| email.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "login-password", "Senha" }
                        Input {
                            id: "login-password",
                            r#type: "password",
                            value: password(),
                            oninput: move |evt: FormEvent| password.set(evt.value()),
                        }
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        disabled: loading(),
                        if loading() { "Entrando..." } else { "Entrar" }
                    }
                }

                p {
                    class: "auth-switch",
                    "Não tem uma conta? "
                    Link { to: Route::Register {}, "Cadastre-se" }
                }
            }
        }
    }
}
