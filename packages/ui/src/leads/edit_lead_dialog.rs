use api::{LeadDraft, LeadInfo};
use dioxus::prelude::*;

use crate::leads::LeadForm;
use crate::toast::{use_toast, ToastOptions};

/// Dialog for editing every field of an existing lead.
#[component]
pub fn EditLeadDialog(
    lead: LeadInfo,
    on_saved: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let toast = use_toast();
    let mut pending = use_signal(|| false);

    let users = use_resource(|| async move {
        api::list_assignable_users().await.unwrap_or_default()
    });

    let lead_id = lead.id.clone();
    let handle_submit = move |draft: LeadDraft| {
        let id = lead_id.clone();
        spawn(async move {
            pending.set(true);
            match api::update_lead(id, draft).await {
                Ok(_) => {
                    toast.success("Lead atualizado!".to_string(), ToastOptions::new());
                    on_saved.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao atualizar lead: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    let initial = LeadDraft {
        nome: lead.nome.clone(),
        empresa: lead.empresa.clone(),
        email: lead.email.clone(),
        telefone: lead.telefone.clone(),
        valor: lead.valor,
        origem: lead.origem,
        status: lead.status,
        responsavel_id: lead.responsavel_id.clone(),
        observacoes: lead.observacoes.clone(),
    };

    rsx! {
        h2 { class: "modal-title", "Editar Lead" }
        LeadForm {
            initial: initial,
            users: users().unwrap_or_default(),
            submit_label: "Salvar",
            pending: pending(),
            on_submit: handle_submit,
            on_cancel: on_cancel,
        }
    }
}
