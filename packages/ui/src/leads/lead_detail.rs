use api::{ActivityDraft, ActivityType, AppUserInfo, LeadInfo};
use dioxus::prelude::*;

use crate::components::{Badge, BadgeVariant, Button, ButtonVariant, Label};
use crate::format::{format_currency, format_date, format_datetime, format_phone, whatsapp_link};
use crate::toast::{use_toast, ToastOptions};
use crate::whatsapp::WhatsappChat;

/// Slide-over with the full lead record: details, follow-up activities and
/// the WhatsApp history. Edit and delete hand the loaded lead back to the
/// parent, which owns those dialogs.
#[component]
pub fn LeadDetailSheet(
    lead_id: String,
    users: Vec<AppUserInfo>,
    on_close: EventHandler<()>,
    on_edit: EventHandler<LeadInfo>,
    on_delete: EventHandler<LeadInfo>,
) -> Element {
    let lead = use_resource({
        let id = lead_id.clone();
        move || {
            let id = id.clone();
            async move { api::get_lead(id).await.ok().flatten() }
        }
    });

    let responsavel_nome = |lead: &LeadInfo| -> String {
        lead.responsavel_id
            .as_ref()
            .and_then(|id| users.iter().find(|u| &u.id == id))
            .map(|u| u.nome.clone())
            .unwrap_or_else(|| "—".to_string())
    };

    rsx! {
        div {
            class: "sheet-overlay",
            onclick: move |_| on_close.call(()),
            aside {
                class: "detail-sheet",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),

                match lead() {
                    None => rsx! {
                        p { class: "sheet-loading", "Carregando..." }
                    },
                    Some(None) => rsx! {
                        p { class: "sheet-loading", "Lead não encontrado." }
                    },
                    Some(Some(lead)) => rsx! {
                        header {
                            class: "sheet-header",
                            div {
                                h2 { "{lead.nome}" }
                                Badge { variant: BadgeVariant::Default, "{lead.status}" }
                            }
                            button {
                                class: "sheet-close",
                                onclick: move |_| on_close.call(()),
                                "×"
                            }
                        }

                        section {
                            class: "sheet-section",
                            dl {
                                class: "sheet-details",
                                dt { "Empresa" }
                                dd { {lead.empresa.clone().unwrap_or_else(|| "—".to_string())} }
                                dt { "Email" }
                                dd { {lead.email.clone().unwrap_or_else(|| "—".to_string())} }
                                dt { "Telefone" }
                                dd { {lead.telefone.as_deref().map(format_phone).unwrap_or_else(|| "—".to_string())} }
                                dt { "Origem" }
                                dd { "{lead.origem.label()}" }
                                dt { "Valor" }
                                dd { class: "sheet-value", "{format_currency(lead.valor)}" }
                                dt { "Responsável" }
                                dd { {responsavel_nome(&lead)} }
                                dt { "Criado em" }
                                dd { "{format_date(&lead.created_at)}" }
                            }
                            if let Some(ref observacoes) = lead.observacoes {
                                p { class: "sheet-notes", "{observacoes}" }
                            }
                        }

                        div {
                            class: "sheet-actions",
                            if let Some(ref telefone) = lead.telefone {
                                a {
                                    class: "btn btn-primary",
                                    target: "_blank",
                                    href: whatsapp_link(
                                        telefone,
                                        "Olá {nome}, aqui é {vendedor}. Podemos conversar?",
                                        &responsavel_nome(&lead),
                                        &lead.nome,
                                    ),
                                    "Falar no WhatsApp"
                                }
                            }
                            Button {
                                variant: ButtonVariant::Outline,
                                onclick: {
                                    let lead = lead.clone();
                                    move |_| on_edit.call(lead.clone())
                                },
                                "Editar"
                            }
                            Button {
                                variant: ButtonVariant::Destructive,
                                onclick: {
                                    let lead = lead.clone();
                                    move |_| on_delete.call(lead.clone())
                                },
                                "Excluir"
                            }
                        }

                        section {
                            class: "sheet-section",
                            h3 { "Atividades" }
                            ActivityTimeline {
                                lead_id: lead.id.clone(),
                                users: users.clone(),
                            }
                        }

                        section {
                            class: "sheet-section",
                            h3 { "Conversa" }
                            WhatsappChat { lead_id: lead.id.clone() }
                        }
                    },
                }
            }
        }
    }
}

/// Follow-up list plus the inline creation form.
#[component]
fn ActivityTimeline(lead_id: String, users: Vec<AppUserInfo>) -> Element {
    let toast = use_toast();
    let mut refresh = use_signal(|| 0u32);

    let activities = use_resource({
        let id = lead_id.clone();
        move || {
            let id = id.clone();
            let _ = refresh();
            async move { api::list_activities(Some(id)).await.unwrap_or_default() }
        }
    });

    let mut show_form = use_signal(|| false);
    let mut tipo = use_signal(|| ActivityType::Ligacao.as_str().to_string());
    let mut due_date = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut assigned = use_signal(String::new);

    let handle_create = move |_| {
        let due = due_date();
        if due.is_empty() || assigned().is_empty() {
            toast.warning(
                "Data e responsável são obrigatórios".to_string(),
                ToastOptions::new(),
            );
            return;
        }
        let tipo_v = ActivityType::ALL
            .iter()
            .find(|t| t.as_str() == tipo())
            .copied()
            .unwrap_or(ActivityType::Outro);
        let draft = ActivityDraft {
            lead_id: lead_id.clone(),
            assigned_to_id: assigned(),
            tipo: tipo_v,
            // datetime-local inputs omit the offset.
            due_date: format!("{due}:00+00:00"),
            notes: if notes().is_empty() { None } else { Some(notes()) },
        };
        spawn(async move {
            match api::create_activity(draft).await {
                Ok(()) => {
                    toast.success("Atividade criada".to_string(), ToastOptions::new());
                    show_form.set(false);
                    due_date.set(String::new());
                    notes.set(String::new());
                    refresh.set(refresh() + 1);
                }
                Err(e) => {
                    toast.error(format!("Erro ao criar atividade: {e}"), ToastOptions::new());
                }
            }
        });
    };

    let toggle_completed = move |(id, completed): (String, bool)| {
        spawn(async move {
            if let Err(e) = api::set_activity_completed(id, completed).await {
                toast.error(format!("Erro ao atualizar atividade: {e}"), ToastOptions::new());
            }
            refresh.set(refresh() + 1);
        });
    };

    rsx! {
        div {
            class: "timeline",
            for activity in activities().unwrap_or_default() {
                div {
                    key: "{activity.id}",
                    class: if activity.is_completed { "timeline-item done" } else { "timeline-item" },
                    input {
                        r#type: "checkbox",
                        checked: activity.is_completed,
                        onchange: {
                            let id = activity.id.clone();
                            let completed = activity.is_completed;
                            move |_| toggle_completed((id.clone(), !completed))
                        },
                    }
                    div {
                        class: "timeline-body",
                        span { class: "timeline-type", "{activity.tipo.label()}" }
                        span { class: "timeline-due", "{format_datetime(&activity.due_date)}" }
                        if let Some(ref notes) = activity.notes {
                            p { class: "timeline-notes", "{notes}" }
                        }
                    }
                }
            }

            if show_form() {
                div {
                    class: "timeline-form",
                    div {
                        class: "modal-field",
                        Label { html_for: "activity-tipo", "Tipo" }
                        select {
                            id: "activity-tipo",
                            class: "field-select",
                            value: tipo(),
                            onchange: move |evt| tipo.set(evt.value()),
                            for t in ActivityType::ALL {
                                option { key: "{t.as_str()}", value: "{t.as_str()}", "{t.label()}" }
                            }
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "activity-due", "Data" }
                        input {
                            id: "activity-due",
                            class: "field-input",
                            r#type: "datetime-local",
                            value: due_date(),
                            oninput: move |evt| due_date.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "activity-assigned", "Responsável" }
                        select {
                            id: "activity-assigned",
                            class: "field-select",
                            value: assigned(),
                            onchange: move |evt| assigned.set(evt.value()),
                            option { value: "", "Selecione" }
                            for user in &users {
                                option { key: "{user.id}", value: "{user.id}", "{user.nome}" }
                            }
                        }
                    }
                    div {
                        class: "modal-field",
                        Label { html_for: "activity-notes", "Notas" }
                        textarea {
                            id: "activity-notes",
                            class: "field-textarea",
                            value: "{notes()}",
                            oninput: move |evt| notes.set(evt.value()),
                        }
                    }
                    div {
                        class: "modal-actions",
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: handle_create,
                            "Salvar atividade"
                        }
                        Button {
                            variant: ButtonVariant::Outline,
                            onclick: move |_| show_form.set(false),
                            "Cancelar"
                        }
                    }
                }
            } else {
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| show_form.set(true),
                    "+ Nova atividade"
                }
            }
        }
    }
}
