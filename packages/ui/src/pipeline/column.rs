use api::LeadStatus;
use dioxus::prelude::*;

use crate::components::{Badge, BadgeVariant};
use crate::dnd::use_drag;

/// One board column, a drop target for lead cards. Highlights while a card
/// hovers over it; on drop it takes the active drag and reports
/// `(lead_id, status)` upward.
#[component]
pub fn DroppableColumn(
    status: LeadStatus,
    count: usize,
    on_drop_lead: EventHandler<(String, LeadStatus)>,
    children: Element,
) -> Element {
    let mut drag = use_drag();
    let key = status.as_str();

    rsx! {
        div {
            class: if drag().is_hovered(key) { "board-column hovered" } else { "board-column" },
            ondragover: move |evt| {
                evt.prevent_default();
                if !drag.peek().is_hovered(key) {
                    drag.write().set_hover(key);
                }
            },
            ondragleave: move |_| drag.write().clear_hover(key),
            ondrop: move |evt| {
                evt.prevent_default();
                if let Some(lead_id) = drag.write().take_active() {
                    on_drop_lead.call((lead_id, status));
                }
            },

            div {
                class: "board-column-header",
                h3 { "{status}" }
                Badge { variant: BadgeVariant::Secondary, "{count}" }
            }
            div {
                class: "board-column-cards",
                {children}
            }
        }
    }
}
