//! Agenda view: every scheduled follow-up across leads, due first.

use dioxus::prelude::*;

use ui::format::format_datetime;
use ui::{use_toast, MainLayout, PageHeader, ToastOptions};

use super::navigate;

#[component]
pub fn Agenda() -> Element {
    let nav = use_navigator();
    let toast = use_toast();
    let mut refresh = use_signal(|| 0u32);

    let activities = use_resource(move || {
        let _ = refresh();
        async move { api::list_activities(None).await }
    });

    let toggle_completed = move |(id, completed): (String, bool)| {
        spawn(async move {
            if let Err(e) = api::set_activity_completed(id, completed).await {
                toast.error(format!("Erro ao atualizar atividade: {e}"), ToastOptions::new());
            }
            refresh.set(refresh() + 1);
        });
    };

    rsx! {
        MainLayout {
            active_path: "/agenda",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Agenda",
                description: "Atividades agendadas com seus leads",
            }

            match activities() {
                None => rsx! {
                    div { class: "loading-state", "Carregando..." }
                },
                Some(Err(e)) => rsx! {
                    div { class: "error-state", "Erro ao carregar atividades: {e}" }
                },
                Some(Ok(items)) => rsx! {
                    div {
                        class: "data-table-wrap",
                        table {
                            class: "data-table",
                            thead {
                                tr {
                                    th { "" }
                                    th { "Lead" }
                                    th { "Tipo" }
                                    th { "Data" }
                                    th { "Notas" }
                                }
                            }
                            tbody {
                                if items.is_empty() {
                                    tr {
                                        td {
                                            colspan: 5,
                                            class: "table-empty",
                                            "Nenhuma atividade agendada"
                                        }
                                    }
                                }
                                for activity in items {
                                    tr {
                                        key: "{activity.id}",
                                        class: if activity.is_completed { "done" } else { "" },
                                        td {
                                            input {
                                                r#type: "checkbox",
                                                checked: activity.is_completed,
                                                onchange: {
                                                    let id = activity.id.clone();
                                                    let completed = activity.is_completed;
                                                    move |_| toggle_completed((id.clone(), !completed))
                                                },
                                            }
                                        }
                                        td { "{activity.lead_nome}" }
                                        td { "{activity.tipo.label()}" }
                                        td { "{format_datetime(&activity.due_date)}" }
                                        td { {activity.notes.clone().unwrap_or_default()} }
                                    }
                                }
                            }
                        }
                    }
                },
            }
        }
    }
}
