//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

pub mod components;

pub mod admin;
pub mod leads;
pub mod pipeline;
pub mod whatsapp;

mod auth;
pub use auth::{use_auth, AuthProvider, AuthState, LogoutButton};

mod app_state;
pub use app_state::{patch_ui_state, use_ui_state, AppStateProvider, UiState, UiStatePatch};

mod toast;
pub use toast::{use_toast, ToastLevel, ToastOptions, ToastProvider, Toasts};

mod dnd;
pub use dnd::{provide_drag_context, use_drag, DragState};

pub mod board;
pub use board::{group_by_status, move_toast, resolve_drop, with_pending, DropVerdict, PendingMove};

pub mod format;

mod download;
pub use download::trigger_download;

mod layout;
pub use layout::{MainLayout, ModalOverlay, PageHeader};

pub const CRM_CSS: Asset = asset!("/assets/crm.css");
