//! User administration view. Requires the ManageUsers capability.

use dioxus::prelude::*;

use api::{AppUserInfo, Capability};
use ui::admin::{DeleteUserDialog, EditUserDialog, NewUserDialog};
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant};
use ui::{use_auth, MainLayout, ModalOverlay, PageHeader};

use super::navigate;
use crate::Route;

#[component]
pub fn Admin() -> Element {
    let nav = use_navigator();
    let auth = use_auth();

    // Capability gate: anyone without ManageUsers goes back to the dashboard.
    if let Some(user) = auth().user {
        if !user.can(Capability::ManageUsers) {
            nav.replace(Route::Dashboard {});
            return rsx! {};
        }
    }

    let mut refresh = use_signal(|| 0u32);
    let users = use_resource(move || {
        let _ = refresh();
        async move { api::list_users().await }
    });

    let mut show_new_user = use_signal(|| false);
    let mut edit_user = use_signal(|| Option::<AppUserInfo>::None);
    let mut delete_user = use_signal(|| Option::<AppUserInfo>::None);

    let reload = move |_| {
        show_new_user.set(false);
        edit_user.set(None);
        delete_user.set(None);
        refresh.set(refresh() + 1);
    };

    let current_id = auth().user.map(|u| u.id).unwrap_or_default();

    rsx! {
        MainLayout {
            active_path: "/admin",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Administração",
                description: "Gestão de usuários e configurações",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_new_user.set(true),
                        "Novo Usuário"
                    }
                },
            }

            match users() {
                None => rsx! {
                    div { class: "loading-state", "Carregando..." }
                },
                Some(Err(e)) => rsx! {
                    div { class: "error-state", "Erro ao carregar usuários: {e}" }
                },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "data-table-wrap",
                        table {
                            class: "data-table",
                            thead {
                                tr {
                                    th { "Nome" }
                                    th { "Email" }
                                    th { "Papel" }
                                    th { "Ações" }
                                }
                            }
                            tbody {
                                for user in list {
                                    tr {
                                        key: "{user.id}",
                                        td { "{user.nome}" }
                                        td { "{user.email}" }
                                        td {
                                            Badge {
                                                variant: if user.papel == api::AppRole::Admin {
                                                    BadgeVariant::Default
                                                } else {
                                                    BadgeVariant::Secondary
                                                },
                                                "{user.papel}"
                                            }
                                        }
                                        td {
                                            div {
                                                class: "page-actions",
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    onclick: {
                                                        let user = user.clone();
                                                        move |_| edit_user.set(Some(user.clone()))
                                                    },
                                                    "Editar"
                                                }
                                                Button {
                                                    variant: ButtonVariant::Ghost,
                                                    disabled: user.id == current_id,
                                                    onclick: {
                                                        let user = user.clone();
                                                        move |_| delete_user.set(Some(user.clone()))
                                                    },
                                                    "Excluir"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }

        if show_new_user() {
            ModalOverlay {
                on_close: move |_| show_new_user.set(false),
                NewUserDialog {
                    on_saved: reload,
                    on_cancel: move |_| show_new_user.set(false),
                }
            }
        }

        if let Some(user) = edit_user() {
            ModalOverlay {
                on_close: move |_| edit_user.set(None),
                EditUserDialog {
                    user: user,
                    on_saved: reload,
                    on_cancel: move |_| edit_user.set(None),
                }
            }
        }

        if let Some(user) = delete_user() {
            ModalOverlay {
                on_close: move |_| delete_user.set(None),
                DeleteUserDialog {
                    user: user,
                    on_deleted: reload,
                    on_cancel: move |_| delete_user.set(None),
                }
            }
        }
    }
}
