use api::{LeadDraft, LeadOrigin, LeadStatus};
use dioxus::prelude::*;

use crate::leads::LeadForm;
use crate::toast::{use_toast, ToastOptions};

/// Dialog for creating a lead. Owns the mutation; `on_saved` fires after a
/// successful insert so the parent can refetch.
#[component]
pub fn NewLeadDialog(on_saved: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let toast = use_toast();
    let mut pending = use_signal(|| false);

    let users = use_resource(|| async move {
        api::list_assignable_users().await.unwrap_or_default()
    });

    let handle_submit = move |draft: LeadDraft| {
        spawn(async move {
            pending.set(true);
            match api::create_lead(draft).await {
                Ok(_) => {
                    toast.success("Lead criado com sucesso!".to_string(), ToastOptions::new());
                    on_saved.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao criar lead: {e}"), ToastOptions::new());
                }
            }
            pending.set(false);
        });
    };

    let initial = LeadDraft {
        nome: String::new(),
        empresa: None,
        email: None,
        telefone: None,
        valor: 0.0,
        origem: LeadOrigin::Outros,
        status: LeadStatus::Novo,
        responsavel_id: None,
        observacoes: None,
    };

    rsx! {
        h2 { class: "modal-title", "Criar Novo Lead" }
        p { class: "modal-text", "Preencha as informações do novo lead." }
        LeadForm {
            initial: initial,
            users: users().unwrap_or_default(),
            submit_label: "Criar Lead",
            pending: pending(),
            on_submit: handle_submit,
            on_cancel: on_cancel,
        }
    }
}
