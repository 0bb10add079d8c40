//! Kanban pipeline view: columns per stage, drag a card to move a lead.

use dioxus::prelude::*;

use api::{LeadInfo, LeadStatus};
use ui::components::{Button, ButtonVariant};
use ui::leads::{DeleteLeadDialog, EditLeadDialog, LeadDetailSheet, NewLeadDialog};
use ui::pipeline::{DraggableLeadCard, DroppableColumn};
use ui::{
    group_by_status, move_toast, provide_drag_context, resolve_drop, use_auth, use_toast,
    with_pending, DropVerdict, MainLayout, ModalOverlay, PageHeader, PendingMove, ToastOptions,
};

use super::navigate;

#[component]
pub fn Pipeline() -> Element {
    let nav = use_navigator();
    let auth = use_auth();
    let toast = use_toast();
    let mut drag = provide_drag_context();

    // Remote truth, refetched after every mutation.
    let mut leads = use_signal(|| Option::<Result<Vec<LeadInfo>, String>>::None);
    // Speculative overlay while a status change is being persisted; cleared
    // whenever an authoritative fetch lands.
    let mut pending_move = use_signal(|| Option::<PendingMove>::None);

    let mut selected_lead = use_signal(|| Option::<String>::None);
    let mut show_new_lead = use_signal(|| false);
    let mut edit_lead = use_signal(|| Option::<LeadInfo>::None);
    let mut delete_lead = use_signal(|| Option::<LeadInfo>::None);

    let load = move || async move {
        match api::list_leads().await {
            Ok(list) => leads.set(Some(Ok(list))),
            Err(e) => leads.set(Some(Err(e.to_string()))),
        }
        // The refetch result is authoritative; the overlay is done either way.
        pending_move.set(None);
    };

    let _loader = use_resource(move || load());

    let users = use_resource(|| async move { api::list_assignable_users().await.unwrap_or_default() });

    // Starting a drag closes the detail sheet so it never shows a lead
    // that is mid-move.
    let on_drag_start = move |_lead_id: String| {
        selected_lead.set(None);
    };

    // Released outside every column: the session just ends.
    let on_drag_end = move |_lead_id: String| {
        let _ = drag.write().take_active();
    };

    let on_drop_lead = move |(lead_id, target): (String, LeadStatus)| {
        let Some(Ok(list)) = leads() else {
            return;
        };
        let Some(user) = auth().user else {
            return;
        };

        match resolve_drop(&list, &user, &lead_id, Some(target)) {
            DropVerdict::NoOp => {}
            DropVerdict::Denied => {
                toast.error(
                    "Você só pode mover seus próprios leads".to_string(),
                    ToastOptions::new(),
                );
            }
            DropVerdict::Move { lead_id, to, .. } => {
                let moved = list.iter().find(|l| l.id == lead_id).cloned();
                pending_move.set(Some(PendingMove { lead_id: lead_id.clone(), target: to }));

                spawn(async move {
                    match api::update_lead_status(lead_id, to).await {
                        Ok(()) => {
                            if let Some(ref lead) = moved {
                                let (level, title, description) = move_toast(lead, to);
                                let mut options = ToastOptions::new();
                                if let Some(description) = description {
                                    options = options.with_description(description);
                                }
                                toast.show(level, title, options);
                            }
                        }
                        Err(e) => {
                            toast.error(format!("Erro ao mover lead: {e}"), ToastOptions::new());
                        }
                    }
                    // Success or failure, resync with the store.
                    load().await;
                });
            }
        }
    };

    let reload = move |_| {
        show_new_lead.set(false);
        edit_lead.set(None);
        delete_lead.set(None);
        selected_lead.set(None);
        spawn(async move {
            load().await;
        });
    };

    let board = match leads() {
        None => rsx! {
            div { class: "loading-state", "Carregando..." }
        },
        Some(Err(message)) => rsx! {
            div { class: "error-state", "Erro ao carregar leads: {message}" }
        },
        Some(Ok(list)) => {
            let visible = with_pending(&list, pending_move().as_ref());
            let groups = group_by_status(&visible);
            rsx! {
                div {
                    class: "board",
                    for (status, column) in groups {
                        DroppableColumn {
                            key: "{status}",
                            status: status,
                            count: column.len(),
                            on_drop_lead: on_drop_lead,
                            for lead in column {
                                DraggableLeadCard {
                                    key: "{lead.id}",
                                    lead: lead.clone(),
                                    on_click: move |id| selected_lead.set(Some(id)),
                                    on_drag_start: on_drag_start,
                                    on_drag_end: on_drag_end,
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        MainLayout {
            active_path: "/pipeline",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Pipeline",
                description: "Gestão visual do funil de vendas",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_new_lead.set(true),
                        "Novo Lead"
                    }
                },
            }

            {board}
        }

        if show_new_lead() {
            ModalOverlay {
                on_close: move |_| show_new_lead.set(false),
                NewLeadDialog {
                    on_saved: reload,
                    on_cancel: move |_| show_new_lead.set(false),
                }
            }
        }

        if let Some(lead) = edit_lead() {
            ModalOverlay {
                on_close: move |_| edit_lead.set(None),
                EditLeadDialog {
                    lead: lead,
                    on_saved: reload,
                    on_cancel: move |_| edit_lead.set(None),
                }
            }
        }

        if let Some(lead) = delete_lead() {
            ModalOverlay {
                on_close: move |_| delete_lead.set(None),
                DeleteLeadDialog {
                    lead_id: lead.id.clone(),
                    lead_nome: lead.nome.clone(),
                    on_deleted: reload,
                    on_cancel: move |_| delete_lead.set(None),
                }
            }
        }

        if let Some(lead_id) = selected_lead() {
            LeadDetailSheet {
                key: "{lead_id}",
                lead_id: lead_id.clone(),
                users: users().unwrap_or_default(),
                on_close: move |_| selected_lead.set(None),
                on_edit: move |lead| {
                    selected_lead.set(None);
                    edit_lead.set(Some(lead));
                },
                on_delete: move |lead| {
                    selected_lead.set(None);
                    delete_lead.set(Some(lead));
                },
            }
        }
    }
}
