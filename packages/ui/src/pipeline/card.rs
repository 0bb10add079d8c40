use api::LeadInfo;
use dioxus::prelude::*;

use crate::components::{Badge, BadgeVariant};
use crate::dnd::use_drag;
use crate::format::{format_currency, format_date_short};

/// One lead on the board. Dragging registers the lead in the drag context;
/// the drop itself is handled by the column under the pointer.
#[component]
pub fn DraggableLeadCard(
    lead: LeadInfo,
    on_click: EventHandler<String>,
    on_drag_start: EventHandler<String>,
    /// Fired when the drag ends without a column consuming it.
    on_drag_end: EventHandler<String>,
) -> Element {
    let mut drag = use_drag();

    rsx! {
        div {
            class: if drag().is_dragging(&lead.id) { "lead-card dragging" } else { "lead-card" },
            draggable: "true",
            ondragstart: {
                let id = lead.id.clone();
                move |_| {
                    if drag.write().begin(&id) {
                        on_drag_start.call(id.clone());
                    }
                }
            },
            ondragend: {
                let id = lead.id.clone();
                move |_| on_drag_end.call(id.clone())
            },
            onclick: {
                let id = lead.id.clone();
                move |_| on_click.call(id.clone())
            },

            p { class: "lead-card-name", "{lead.nome}" }
            p { class: "lead-card-value", "{format_currency(lead.valor)}" }
            div {
                class: "lead-card-meta",
                span { class: "lead-card-date", "{format_date_short(&lead.created_at)}" }
                Badge { variant: BadgeVariant::Outline, "{lead.origem.label()}" }
            }
        }
    }
}
