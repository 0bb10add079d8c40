//! Lead dialogs and the detail slide-over.

mod delete_lead_dialog;
mod edit_lead_dialog;
mod import_dialog;
mod lead_detail;
mod lead_form;
mod new_lead_dialog;

pub use delete_lead_dialog::DeleteLeadDialog;
pub use edit_lead_dialog::EditLeadDialog;
pub use import_dialog::ImportLeadsDialog;
pub use lead_detail::LeadDetailSheet;
pub use lead_form::LeadForm;
pub use new_lead_dialog::NewLeadDialog;
