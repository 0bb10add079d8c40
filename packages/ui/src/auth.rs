//! Authentication context and hooks for the UI.

use api::{AppRole, AppUserInfo};
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<AppUserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
///
/// Wrap the app with this component. Accounts whose role is still `nenhum`
/// are held on a pending-approval screen instead of the app content.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => {
                auth_state.set(AuthState { user, loading: false });
            }
            Err(e) => {
                tracing::debug!("could not load current user: {e}");
                auth_state.set(AuthState { user: None, loading: false });
            }
        }
    });

    use_context_provider(|| auth_state);

    let pending = auth_state()
        .user
        .map(|u| u.papel == AppRole::Nenhum)
        .unwrap_or(false);

    rsx! {
        if pending {
            PendingApproval {}
        } else {
            {children}
        }
    }
}

/// Full-screen block shown to accounts awaiting admin approval.
#[component]
fn PendingApproval() -> Element {
    rsx! {
        div {
            class: "pending-approval",
            div {
                class: "pending-approval-card",
                h2 { "Conta pendente de aprovação" }
                p {
                    "Sua conta foi criada com sucesso, mas ainda está pendente de \
                     aprovação por um administrador."
                }
                p {
                    class: "pending-approval-hint",
                    "Entre em contato com o administrador do sistema para liberar \
                     seu acesso. Enquanto isso, você não poderá acessar o CRM."
                }
                LogoutButton { label: "Sair", class: "btn btn-outline" }
            }
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sair".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();

    let onclick = move |_| async move {
        if let Ok(()) = api::logout().await {
            auth_state.set(AuthState { user: None, loading: false });
            // Redirect to login
            #[cfg(target_arch = "wasm32")]
            {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href("/login");
                }
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
