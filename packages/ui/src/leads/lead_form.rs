use api::{AppUserInfo, LeadDraft, LeadOrigin, LeadStatus};
use dioxus::prelude::*;

use crate::components::{Button, ButtonVariant, Input, Label};

/// Shared create/edit lead form. Validates inline and hands a clean
/// [`LeadDraft`] to `on_submit`; the dialogs own the actual mutation.
#[component]
pub fn LeadForm(
    initial: LeadDraft,
    users: Vec<AppUserInfo>,
    submit_label: String,
    #[props(default = false)] pending: bool,
    on_submit: EventHandler<LeadDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let mut nome = use_signal({
        let v = initial.nome.clone();
        move || v.clone()
    });
    let mut empresa = use_signal({
        let v = initial.empresa.clone().unwrap_or_default();
        move || v.clone()
    });
    let mut email = use_signal({
        let v = initial.email.clone().unwrap_or_default();
        move || v.clone()
    });
    let mut telefone = use_signal({
        let v = initial.telefone.clone().unwrap_or_default();
        move || v.clone()
    });
    let mut valor = use_signal({
        let v = format!("{}", initial.valor);
        move || v.clone()
    });
    let mut origem = use_signal({
        let v = initial.origem.as_str().to_string();
        move || v.clone()
    });
    let mut status = use_signal({
        let v = initial.status.as_str().to_string();
        move || v.clone()
    });
    let mut responsavel = use_signal({
        let v = initial.responsavel_id.clone().unwrap_or_default();
        move || v.clone()
    });
    let mut observacoes = use_signal({
        let v = initial.observacoes.clone().unwrap_or_default();
        move || v.clone()
    });
    let mut error = use_signal(|| Option::<String>::None);

    let handle_submit = move |_| {
        error.set(None);

        let nome_v = nome().trim().to_string();
        if nome_v.is_empty() {
            error.set(Some("Nome é obrigatório".to_string()));
            return;
        }

        let email_v = email().trim().to_string();
        if !email_v.is_empty() && !email_v.contains('@') {
            error.set(Some("Email inválido".to_string()));
            return;
        }

        // Accept both decimal separators.
        let valor_text = valor().trim().replace(',', ".");
        let valor_v = if valor_text.is_empty() {
            0.0
        } else {
            match valor_text.parse::<f64>() {
                Ok(v) => v,
                Err(_) => {
                    error.set(Some("Valor inválido".to_string()));
                    return;
                }
            }
        };
        if valor_v < 0.0 {
            error.set(Some("Valor não pode ser negativo".to_string()));
            return;
        }

        if responsavel().is_empty() {
            error.set(Some("Responsável é obrigatório".to_string()));
            return;
        }

        let status_v = LeadStatus::ALL
            .iter()
            .find(|s| s.as_str() == status())
            .copied()
            .unwrap_or(LeadStatus::Novo);

        let optional = |v: String| if v.trim().is_empty() { None } else { Some(v.trim().to_string()) };

        on_submit.call(LeadDraft {
            nome: nome_v,
            empresa: optional(empresa()),
            email: optional(email_v),
            telefone: optional(telefone()),
            valor: valor_v,
            origem: LeadOrigin::parse_or_default(&origem()),
            status: status_v,
            responsavel_id: Some(responsavel()),
            observacoes: optional(observacoes()),
        });
    };

    rsx! {
        div {
            class: "modal-body",

            if let Some(ref message) = error() {
                p { class: "form-error", "{message}" }
            }

            div {
                class: "form-grid",
                div {
                    class: "modal-field",
                    Label { html_for: "lead-nome", "Nome" }
                    Input {
                        id: "lead-nome",
                        value: nome(),
                        oninput: move |evt: FormEvent| nome.set(evt.value()),
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-empresa", "Empresa" }
                    Input {
                        id: "lead-empresa",
                        value: empresa(),
                        oninput: move |evt: FormEvent| empresa.set(evt.value()),
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-email", "Email" }
                    Input {
                        id: "lead-email",
                        r#type: "email",
                        value: email(),
                        oninput: move |evt: FormEvent| email.set(evt.value()),
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-telefone", "Telefone" }
                    Input {
                        id: "lead-telefone",
                        value: telefone(),
                        oninput: move |evt: FormEvent| telefone.set(evt.value()),
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-valor", "Valor (R$)" }
                    Input {
                        id: "lead-valor",
                        r#type: "number",
                        value: valor(),
                        oninput: move |evt: FormEvent| valor.set(evt.value()),
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-responsavel", "Responsável" }
                    select {
                        id: "lead-responsavel",
                        class: "field-select",
                        value: responsavel(),
                        onchange: move |evt| responsavel.set(evt.value()),
                        option { value: "", "Selecione um responsável" }
                        for user in &users {
                            option {
                                key: "{user.id}",
                                value: "{user.id}",
                                "{user.nome}"
                            }
                        }
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-origem", "Origem" }
                    select {
                        id: "lead-origem",
                        class: "field-select",
                        value: origem(),
                        onchange: move |evt| origem.set(evt.value()),
                        for o in LeadOrigin::ALL {
                            option {
                                key: "{o.as_str()}",
                                value: "{o.as_str()}",
                                "{o.label()}"
                            }
                        }
                    }
                }
                div {
                    class: "modal-field",
                    Label { html_for: "lead-status", "Status" }
                    select {
                        id: "lead-status",
                        class: "field-select",
                        value: status(),
                        onchange: move |evt| status.set(evt.value()),
                        for s in LeadStatus::ALL {
                            option {
                                key: "{s.as_str()}",
                                value: "{s.as_str()}",
                                "{s.as_str()}"
                            }
                        }
                    }
                }
            }

            div {
                class: "modal-field",
                Label { html_for: "lead-observacoes", "Observações" }
                textarea {
                    id: "lead-observacoes",
                    class: "field-textarea",
                    value: "{observacoes()}",
                    oninput: move |evt| observacoes.set(evt.value()),
                }
            }

            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: pending,
                    onclick: handle_submit,
                    "{submit_label}"
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: pending,
                    onclick: move |_| on_cancel.call(()),
                    "Cancelar"
                }
            }
        }
    }
}
