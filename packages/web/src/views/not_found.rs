//! Catch-all view for unknown routes.

use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "auth-page",
            div {
                class: "auth-card",
                h1 { "404" }
                p { class: "auth-subtitle", "Página não encontrada: /{path}" }
                Link { to: Route::Dashboard {}, "Voltar ao dashboard" }
            }
        }
    }
}
