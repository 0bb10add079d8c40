use api::import::{parse_leads_csv, TEMPLATE_HEADER, TEMPLATE_ROW};
use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::components::{Button, ButtonVariant, Label};
use crate::download::trigger_download;
use crate::toast::{use_toast, ToastOptions};

/// CSV import dialog: pick a file, parse it locally, bulk-insert the valid
/// rows. Skipped rows surface as warnings without aborting the batch.
///
/// The parser splits on every comma — values with embedded commas are not
/// supported, which is what the instructions and template say.
#[component]
pub fn ImportLeadsDialog(on_imported: EventHandler<()>, on_cancel: EventHandler<()>) -> Element {
    let auth = use_auth();
    let toast = use_toast();
    let mut csv_text = use_signal(|| Option::<String>::None);
    let mut file_name = use_signal(|| Option::<String>::None);
    let mut importing = use_signal(|| false);

    let handle_file = move |evt: FormEvent| async move {
        if let Some(file_engine) = evt.files() {
            let files = file_engine.files();
            if let Some(name) = files.first() {
                if let Some(content) = file_engine.read_file_to_string(name).await {
                    csv_text.set(Some(content));
                    file_name.set(Some(name.clone()));
                }
            }
        }
    };

    let handle_template = move |_| {
        trigger_download("modelo_leads.csv", &format!("{TEMPLATE_HEADER}\n{TEMPLATE_ROW}"));
    };

    let handle_import = move |_| {
        let Some(text) = csv_text() else {
            return;
        };
        let Some(user) = auth().user else {
            return;
        };

        let parsed = match parse_leads_csv(&text, &user.id) {
            Ok(parsed) => parsed,
            Err(e) => {
                toast.error(
                    e.to_string(),
                    ToastOptions::new()
                        .with_description("Baixe o modelo para ver o formato correto."),
                );
                return;
            }
        };

        for skip in &parsed.skipped {
            toast.warning(
                format!("Linha {} ignorada: {}", skip.line, skip.reason),
                ToastOptions::new(),
            );
        }

        if parsed.rows.is_empty() {
            toast.warning(
                "Nenhum lead válido encontrado para importar.".to_string(),
                ToastOptions::new(),
            );
            return;
        }

        spawn(async move {
            importing.set(true);
            match api::import_leads(parsed.rows).await {
                Ok(count) => {
                    toast.success(
                        "Leads importados com sucesso!".to_string(),
                        ToastOptions::new().with_description(format!("{count} lead(s) criados")),
                    );
                    on_imported.call(());
                }
                Err(e) => {
                    toast.error(format!("Erro ao importar: {e}"), ToastOptions::new());
                }
            }
            importing.set(false);
            csv_text.set(None);
            file_name.set(None);
        });
    };

    rsx! {
        div {
            class: "modal-body",
            h2 { class: "modal-title", "Importar Leads" }
            p {
                class: "modal-text",
                "Importe múltiplos leads de uma vez usando um arquivo CSV."
            }

            div {
                class: "import-instructions",
                h4 { "Instruções" }
                p { "Seu arquivo CSV deve conter as seguintes colunas:" }
                ul {
                    li { code { "nome" } " (obrigatório)" }
                    li { code { "empresa" } }
                    li { code { "email" } }
                    li { code { "telefone" } }
                    li { code { "valor" } " (use ponto como separador decimal, ex: 1500.50)" }
                    li { code { "origem" } " (ex: formulario, whatsapp, indicacao)" }
                }
                p {
                    class: "import-note",
                    "Valores não podem conter vírgulas; campos entre aspas não são suportados."
                }
                Button {
                    variant: ButtonVariant::Outline,
                    onclick: handle_template,
                    "Baixar Modelo CSV"
                }
            }

            div {
                class: "modal-field",
                Label { html_for: "csv-file", "Selecione o arquivo CSV" }
                input {
                    id: "csv-file",
                    class: "field-input",
                    r#type: "file",
                    accept: ".csv",
                    disabled: importing(),
                    onchange: handle_file,
                }
                if let Some(ref name) = file_name() {
                    p { class: "import-file-name", "{name}" }
                }
            }

            div {
                class: "modal-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: csv_text().is_none() || importing(),
                    onclick: handle_import,
                    if importing() { "Importando..." } else { "Importar" }
                }
                Button {
                    variant: ButtonVariant::Outline,
                    disabled: importing(),
                    onclick: move |_| on_cancel.call(()),
                    "Cancelar"
                }
            }
        }
    }
}
