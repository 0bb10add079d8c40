//! Lead table view: search, CSV export/import, create/edit/delete.

use dioxus::prelude::*;

use api::{AppUserInfo, LeadInfo};
use ui::components::{Badge, BadgeVariant, Button, ButtonVariant, Input};
use ui::format::{format_currency, format_date, to_csv};
use ui::leads::{DeleteLeadDialog, EditLeadDialog, ImportLeadsDialog, LeadDetailSheet, NewLeadDialog};
use ui::{
    patch_ui_state, trigger_download, use_toast, use_ui_state, MainLayout, ModalOverlay,
    PageHeader, ToastOptions, UiStatePatch,
};

use super::navigate;

/// Case-insensitive substring match over the searchable lead fields.
fn matches_search(lead: &LeadInfo, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let query = query.to_lowercase();
    let haystacks = [
        Some(lead.nome.as_str()),
        lead.empresa.as_deref(),
        lead.email.as_deref(),
        lead.telefone.as_deref(),
    ];
    haystacks
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&query))
}

fn status_badge_class(lead: &LeadInfo) -> String {
    format!("badge status-badge status-{}", lead.status.as_str().to_lowercase())
}

#[component]
pub fn Leads() -> Element {
    let nav = use_navigator();
    let toast = use_toast();
    let mut ui_state = use_ui_state();

    let mut refresh = use_signal(|| 0u32);
    let leads = use_resource(move || {
        let _ = refresh();
        async move { api::list_leads().await }
    });
    let users = use_resource(|| async move { api::list_assignable_users().await.unwrap_or_default() });

    let mut show_new_lead = use_signal(|| false);
    let mut show_import = use_signal(|| false);
    let mut selected_lead = use_signal(|| Option::<String>::None);
    let mut edit_lead = use_signal(|| Option::<LeadInfo>::None);
    let mut delete_lead = use_signal(|| Option::<LeadInfo>::None);

    let user_nome = |users: &[AppUserInfo], id: Option<&str>| -> String {
        id.and_then(|id| users.iter().find(|u| u.id == id))
            .map(|u| u.nome.clone())
            .unwrap_or_default()
    };

    let filtered: Vec<LeadInfo> = leads()
        .and_then(|r| r.ok())
        .unwrap_or_default()
        .into_iter()
        .filter(|lead| matches_search(lead, ui_state().busca_leads.trim()))
        .collect();

    let handle_export = {
        let filtered = filtered.clone();
        move |_| {
            let user_list = users().unwrap_or_default();
            let rows: Vec<Vec<String>> = filtered
                .iter()
                .map(|lead| {
                    vec![
                        lead.nome.clone(),
                        lead.empresa.clone().unwrap_or_default(),
                        lead.email.clone().unwrap_or_default(),
                        lead.telefone.clone().unwrap_or_default(),
                        lead.origem.as_str().to_string(),
                        lead.status.as_str().to_string(),
                        user_nome(&user_list, lead.responsavel_id.as_deref()),
                        format!("{}", lead.valor),
                        format_date(&lead.created_at),
                    ]
                })
                .collect();
            let csv = to_csv(
                &["Nome", "Empresa", "Email", "Telefone", "Origem", "Status", "Responsavel", "Valor", "Criado Em"],
                &rows,
            );
            trigger_download("leads_export.csv", &csv);
            toast.success("Dados exportados com sucesso!".to_string(), ToastOptions::new());
        }
    };

    let reload = move |_| {
        show_new_lead.set(false);
        show_import.set(false);
        edit_lead.set(None);
        delete_lead.set(None);
        selected_lead.set(None);
        refresh.set(refresh() + 1);
    };

    rsx! {
        MainLayout {
            active_path: "/leads",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Leads",
                description: "Gestão completa de leads",
                actions: rsx! {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            let densa = !ui_state().tabela_densa;
                            patch_ui_state(&mut ui_state, UiStatePatch::tabela_densa(densa));
                        },
                        if ui_state().tabela_densa { "Tabela normal" } else { "Tabela densa" }
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: move |_| show_import.set(true),
                        "Importar CSV"
                    }
                    Button {
                        variant: ButtonVariant::Outline,
                        onclick: handle_export,
                        "Exportar CSV"
                    }
                    Button {
                        variant: ButtonVariant::Primary,
                        onclick: move |_| show_new_lead.set(true),
                        "Novo Lead"
                    }
                },
            }

            div {
                class: "search-box",
                Input {
                    r#type: "search",
                    placeholder: "Buscar por nome, empresa, email ou telefone",
                    value: ui_state().busca_leads,
                    oninput: move |evt: FormEvent| {
                        patch_ui_state(&mut ui_state, UiStatePatch::busca_leads(evt.value()));
                    },
                }
            }

            div {
                class: "data-table-wrap",
                table {
                    class: if ui_state().tabela_densa { "data-table dense" } else { "data-table" },
                    thead {
                        tr {
                            th { "Nome" }
                            th { "Empresa" }
                            th { "Email" }
                            th { "Telefone" }
                            th { "Origem" }
                            th { "Status" }
                            th { "Responsável" }
                            th { "Valor" }
                            th { "Criado em" }
                        }
                    }
                    tbody {
                        if filtered.is_empty() {
                            tr {
                                td {
                                    colspan: 9,
                                    class: "table-empty",
                                    "Nenhum lead corresponde à sua busca"
                                }
                            }
                        } else {
                            for lead in filtered.clone() {
                                tr {
                                    key: "{lead.id}",
                                    onclick: {
                                        let id = lead.id.clone();
                                        move |_| selected_lead.set(Some(id.clone()))
                                    },
                                    td { "{lead.nome}" }
                                    td { {lead.empresa.clone().unwrap_or_default()} }
                                    td { {lead.email.clone().unwrap_or_default()} }
                                    td { {lead.telefone.clone().unwrap_or_default()} }
                                    td {
                                        Badge { variant: BadgeVariant::Outline, "{lead.origem.label()}" }
                                    }
                                    td {
                                        span { class: "{status_badge_class(&lead)}", "{lead.status}" }
                                    }
                                    td { {user_nome(&users().unwrap_or_default(), lead.responsavel_id.as_deref())} }
                                    td { "{format_currency(lead.valor)}" }
                                    td { "{format_date(&lead.created_at)}" }
                                }
                            }
                        }
                    }
                }
            }
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

        if show_import() {
            ModalOverlay {
                on_close: move |_| show_import.set(false),
                ImportLeadsDialog {
                    on_imported: reload,
                    on_cancel: move |_| show_import.set(false),
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

#[cfg(test)]
mod tests {
    use api::{LeadOrigin, LeadStatus};

    use super::*;

    fn lead(nome: &str, empresa: Option<&str>, email: Option<&str>) -> LeadInfo {
        LeadInfo {
            id: "1".to_string(),
            nome: nome.to_string(),
            empresa: empresa.map(str::to_string),
            email: email.map(str::to_string),
            telefone: None,
            origem: LeadOrigin::Outros,
            valor: 0.0,
            status: LeadStatus::Novo,
            responsavel_id: None,
            created_by: "x".to_string(),
            observacoes: None,
            created_at: "2026-08-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn search_matches_across_fields_case_insensitively() {
        let l = lead("Ana Paula", Some("AcmeCo"), Some("ana@x.com"));
        assert!(matches_search(&l, ""));
        assert!(matches_search(&l, "ana"));
        assert!(matches_search(&l, "ACME"));
        assert!(matches_search(&l, "@x.com"));
        assert!(!matches_search(&l, "telefone"));
    }
}
