//! Application shell: sidebar navigation, page header, modal overlay.

use api::Capability;
use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};

struct NavEntry {
    label: &'static str,
    path: &'static str,
    /// Entry only renders when the role holds this capability.
    required: Option<Capability>,
}

const NAV_ENTRIES: [NavEntry; 6] = [
    NavEntry { label: "Dashboard", path: "/dashboard", required: None },
    NavEntry { label: "Pipeline", path: "/pipeline", required: None },
    NavEntry { label: "Leads", path: "/leads", required: None },
    NavEntry { label: "Agenda", path: "/agenda", required: None },
    NavEntry { label: "Conversas", path: "/conversas", required: None },
    NavEntry { label: "Admin", path: "/admin", required: Some(Capability::ManageUsers) },
];

/// Page frame: sidebar plus scrolling content. Views pass their own path so
/// the matching nav entry highlights; navigation goes back through the
/// router via `on_navigate`.
#[component]
pub fn MainLayout(
    active_path: String,
    on_navigate: EventHandler<String>,
    children: Element,
) -> Element {
    let auth = use_auth();

    // Not logged in: send to the login page.
    if !auth().loading && auth().user.is_none() {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    }

    rsx! {
        div {
            class: "app-shell",
            Sidebar {
                active_path: active_path,
                on_navigate: on_navigate,
            }
            main {
                class: "app-main",
                {children}
            }
        }
    }
}

#[component]
fn Sidebar(active_path: String, on_navigate: EventHandler<String>) -> Element {
    let auth = use_auth();
    let papel = auth().user.map(|u| u.papel);

    let entries: Vec<&NavEntry> = NAV_ENTRIES
        .iter()
        .filter(|entry| match (entry.required, papel) {
            (None, _) => true,
            (Some(cap), Some(papel)) => papel.can(cap),
            (Some(_), None) => false,
        })
        .collect();

    rsx! {
        aside {
            class: "sidebar",
            div {
                class: "sidebar-brand",
                h1 { "leadflow" }
            }

            nav {
                class: "sidebar-nav",
                for entry in entries {
                    button {
                        key: "{entry.path}",
                        class: if active_path == entry.path { "sidebar-link active" } else { "sidebar-link" },
                        onclick: {
                            let path = entry.path;
                            move |_| on_navigate.call(path.to_string())
                        },
                        "{entry.label}"
                    }
                }
            }

            div {
                class: "sidebar-bottom",
                if let Some(user) = auth().user {
                    button {
                        class: if active_path == "/perfil" { "sidebar-link active" } else { "sidebar-link" },
                        onclick: move |_| on_navigate.call("/perfil".to_string()),
                        "{user.nome}"
                    }
                }
                LogoutButton { label: "Sair", class: "sidebar-link" }
            }
        }
    }
}

/// Title row at the top of each page, with an optional action area.
#[component]
pub fn PageHeader(
    title: String,
    description: String,
    #[props(default)] actions: Option<Element>,
) -> Element {
    rsx! {
        header {
            class: "page-header",
            div {
                h2 { class: "page-title", "{title}" }
                p { class: "page-description", "{description}" }
            }
            div {
                class: "page-actions",
                {actions}
            }
        }
    }
}

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}
