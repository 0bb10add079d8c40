//! # Toast notifications
//!
//! `use_toast()` hands out a [`Toasts`] handle with `success` / `error` /
//! `info` / `warning` methods. Toasts stack bottom-right and dismiss
//! themselves after [`ToastOptions::duration_ms`] (or on click).

use dioxus::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
    Warning,
}

impl ToastLevel {
    fn class(&self) -> &'static str {
        match self {
            ToastLevel::Success => "toast toast-success",
            ToastLevel::Error => "toast toast-error",
            ToastLevel::Info => "toast toast-info",
            ToastLevel::Warning => "toast toast-warning",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToastOptions {
    pub description: Option<String>,
    pub duration_ms: u64,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self { description: None, duration_ms: 4000 }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ToastItem {
    id: u64,
    level: ToastLevel,
    title: String,
    description: Option<String>,
}

/// Handle for pushing toasts. `Copy`, so closures can capture it freely.
#[derive(Clone, Copy)]
pub struct Toasts {
    items: Signal<Vec<ToastItem>>,
    next_id: Signal<u64>,
}

impl Toasts {
    pub fn success(&self, title: String, options: ToastOptions) {
        self.push(ToastLevel::Success, title, options);
    }

    pub fn error(&self, title: String, options: ToastOptions) {
        self.push(ToastLevel::Error, title, options);
    }

    pub fn info(&self, title: String, options: ToastOptions) {
        self.push(ToastLevel::Info, title, options);
    }

    pub fn warning(&self, title: String, options: ToastOptions) {
        self.push(ToastLevel::Warning, title, options);
    }

    /// Push at an explicit level, e.g. from [`crate::board::move_toast`].
    pub fn show(&self, level: ToastLevel, title: String, options: ToastOptions) {
        self.push(level, title, options);
    }

    fn push(&self, level: ToastLevel, title: String, options: ToastOptions) {
        let mut items = self.items;
        let mut next_id = self.next_id;

        let id = next_id();
        next_id.set(id + 1);

        items.write().push(ToastItem {
            id,
            level,
            title,
            description: options.description,
        });

        let duration = options.duration_ms;
        spawn(async move {
            sleep_ms(duration).await;
            items.write().retain(|t| t.id != id);
        });
    }
}

async fn sleep_ms(ms: u64) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(std::time::Duration::from_millis(ms)).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Get the toast handle. Panics outside a [`ToastProvider`].
pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provider component that owns the toast stack and renders it.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let items = use_signal(Vec::<ToastItem>::new);
    let next_id = use_signal(|| 0u64);
    use_context_provider(|| Toasts { items, next_id });

    let mut items_for_render = items;

    rsx! {
        {children}

        div {
            class: "toast-stack",
            for toast in items() {
                div {
                    key: "{toast.id}",
                    class: "{toast.level.class()}",
                    onclick: move |_| {
                        items_for_render.write().retain(|t| t.id != toast.id);
                    },
                    p { class: "toast-title", "{toast.title}" }
                    if let Some(ref description) = toast.description {
                        p { class: "toast-description", "{description}" }
                    }
                }
            }
        }
    }
}
