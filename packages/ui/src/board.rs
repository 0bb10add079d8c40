//! # Pipeline board logic
//!
//! The decision half of the kanban board, kept free of rendering so it can
//! be tested directly:
//!
//! - [`group_by_status`] — the rendering contract: every stage appears, in
//!   column order, and every lead lands in exactly one column without
//!   reordering.
//! - [`resolve_drop`] — what happens when a card is released: silent no-ops
//!   for missed drops, stale leads and same-column drops; a permission
//!   denial for salespeople moving someone else's lead; otherwise a move.
//! - [`PendingMove`] / [`with_pending`] — the speculative overlay applied to
//!   the grouping between the persist call and the authoritative refetch.
//!   The overlay is discarded when the refetch lands, so a failed persist
//!   rolls the board back to remote truth.
//! - [`move_toast`] — which notification a completed move produces.

use api::{AppUserInfo, Capability, LeadInfo, LeadStatus};

use crate::format::format_currency;
use crate::toast::ToastLevel;

/// Group leads into board columns. Every status in [`LeadStatus::ALL`] is
/// present (possibly empty) and leads keep their input order within each
/// column.
pub fn group_by_status(leads: &[LeadInfo]) -> Vec<(LeadStatus, Vec<LeadInfo>)> {
    LeadStatus::ALL
        .iter()
        .map(|status| {
            let column: Vec<LeadInfo> =
                leads.iter().filter(|l| l.status == *status).cloned().collect();
            (*status, column)
        })
        .collect()
}

/// A status change that was sent to the server but not yet confirmed by a
/// refetch of the lead list.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMove {
    pub lead_id: String,
    pub target: LeadStatus,
}

/// Apply the speculative overlay: the pending lead is shown in its target
/// column while the persist + refetch are in flight.
pub fn with_pending(leads: &[LeadInfo], pending: Option<&PendingMove>) -> Vec<LeadInfo> {
    leads
        .iter()
        .map(|lead| {
            let mut lead = lead.clone();
            if let Some(p) = pending {
                if p.lead_id == lead.id {
                    lead.status = p.target;
                }
            }
            lead
        })
        .collect()
}

/// Outcome of releasing a dragged card.
#[derive(Debug, Clone, PartialEq)]
pub enum DropVerdict {
    /// Nothing to do: missed drop, stale lead, or same column.
    NoOp,
    /// The acting user may not move this lead. No persist call.
    Denied,
    /// Persist `lead_id` into the `to` column.
    Move {
        lead_id: String,
        from: LeadStatus,
        to: LeadStatus,
    },
}

/// Decide what a drop does. Pure; the caller owns the persist call and the
/// notifications.
pub fn resolve_drop(
    leads: &[LeadInfo],
    user: &AppUserInfo,
    lead_id: &str,
    target: Option<LeadStatus>,
) -> DropVerdict {
    // Released outside every column.
    let Some(target) = target else {
        return DropVerdict::NoOp;
    };

    // Stale id (concurrent deletion): silently ignore.
    let Some(lead) = leads.iter().find(|l| l.id == lead_id) else {
        return DropVerdict::NoOp;
    };

    // Dropping onto the current column is idempotent.
    if lead.status == target {
        return DropVerdict::NoOp;
    }

    // Salespeople may only move their own leads.
    if !user.can(Capability::MoveAnyLead) && lead.responsavel_id.as_deref() != Some(user.id.as_str())
    {
        return DropVerdict::Denied;
    }

    DropVerdict::Move {
        lead_id: lead.id.clone(),
        from: lead.status,
        to: target,
    }
}

/// Notification for a persisted move: celebratory for `Ganho` (with the
/// deal value), negative for `Perdido`, neutral otherwise.
pub fn move_toast(lead: &LeadInfo, to: LeadStatus) -> (ToastLevel, String, Option<String>) {
    match to {
        LeadStatus::Ganho => (
            ToastLevel::Success,
            format!("Lead {} marcado como ganho!", lead.nome),
            Some(format!("Valor: {}", format_currency(lead.valor))),
        ),
        LeadStatus::Perdido => (
            ToastLevel::Error,
            format!("Lead {} marcado como perdido", lead.nome),
            None,
        ),
        other => (
            ToastLevel::Info,
            format!("Lead {} movido para {}", lead.nome, other),
            None,
        ),
    }
}

#[cfg(test)]
mod tests {
    use api::{AppRole, LeadOrigin};

    use super::*;

    fn lead(id: &str, nome: &str, status: LeadStatus, responsavel: Option<&str>) -> LeadInfo {
        LeadInfo {
            id: id.to_string(),
            nome: nome.to_string(),
            empresa: None,
            email: None,
            telefone: None,
            origem: LeadOrigin::Outros,
            valor: 0.0,
            status,
            responsavel_id: responsavel.map(str::to_string),
            created_by: "creator".to_string(),
            observacoes: None,
            created_at: "2026-08-01T12:00:00+00:00".to_string(),
        }
    }

    fn user(id: &str, papel: AppRole) -> AppUserInfo {
        AppUserInfo {
            id: id.to_string(),
            nome: "Alguém".to_string(),
            email: "a@x.com".to_string(),
            papel,
            created_at: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn grouping_is_total_and_order_preserving() {
        let leads = vec![
            lead("1", "A", LeadStatus::Novo, None),
            lead("2", "B", LeadStatus::Ganho, None),
            lead("3", "C", LeadStatus::Novo, None),
        ];
        let groups = group_by_status(&leads);

        // Every status key is present, in column order.
        let statuses: Vec<LeadStatus> = groups.iter().map(|(s, _)| *s).collect();
        assert_eq!(statuses, LeadStatus::ALL.to_vec());

        // Each lead appears exactly once, in its own column, input order kept.
        let novo = &groups[0].1;
        assert_eq!(novo.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["1", "3"]);
        assert_eq!(groups[2].1[0].id, "2");
        assert!(groups[1].1.is_empty());
        assert!(groups[3].1.is_empty());
        let total: usize = groups.iter().map(|(_, c)| c.len()).sum();
        assert_eq!(total, leads.len());
    }

    #[test]
    fn drop_outside_any_column_is_a_noop() {
        let leads = vec![lead("1", "A", LeadStatus::Novo, None)];
        let admin = user("u1", AppRole::Admin);
        assert_eq!(resolve_drop(&leads, &admin, "1", None), DropVerdict::NoOp);
    }

    #[test]
    fn stale_lead_is_a_silent_noop() {
        let leads = vec![lead("1", "A", LeadStatus::Novo, None)];
        let admin = user("u1", AppRole::Admin);
        assert_eq!(
            resolve_drop(&leads, &admin, "gone", Some(LeadStatus::Ganho)),
            DropVerdict::NoOp
        );
    }

    #[test]
    fn same_column_drop_never_moves() {
        let leads = vec![lead("1", "A", LeadStatus::Atendimento, None)];
        let admin = user("u1", AppRole::Admin);
        assert_eq!(
            resolve_drop(&leads, &admin, "1", Some(LeadStatus::Atendimento)),
            DropVerdict::NoOp
        );
    }

    #[test]
    fn vendedor_cannot_move_someone_elses_lead() {
        let leads = vec![lead("1", "A", LeadStatus::Novo, Some("other"))];
        let vendedor = user("u1", AppRole::Vendedor);
        for target in LeadStatus::ALL {
            if target == LeadStatus::Novo {
                continue;
            }
            assert_eq!(
                resolve_drop(&leads, &vendedor, "1", Some(target)),
                DropVerdict::Denied
            );
        }
    }

    #[test]
    fn vendedor_moves_their_own_lead() {
        let leads = vec![lead("1", "A", LeadStatus::Novo, Some("u1"))];
        let vendedor = user("u1", AppRole::Vendedor);
        assert_eq!(
            resolve_drop(&leads, &vendedor, "1", Some(LeadStatus::Ganho)),
            DropVerdict::Move {
                lead_id: "1".to_string(),
                from: LeadStatus::Novo,
                to: LeadStatus::Ganho,
            }
        );
    }

    #[test]
    fn admin_moves_any_lead_to_any_other_column() {
        let leads = vec![lead("1", "A", LeadStatus::Novo, Some("someone"))];
        let admin = user("u1", AppRole::Admin);
        for target in [LeadStatus::Atendimento, LeadStatus::Ganho, LeadStatus::Perdido] {
            match resolve_drop(&leads, &admin, "1", Some(target)) {
                DropVerdict::Move { to, .. } => assert_eq!(to, target),
                other => panic!("expected Move, got {:?}", other),
            }
        }
    }

    #[test]
    fn pending_overlay_moves_the_lead_until_discarded() {
        let leads = vec![
            lead("1", "A", LeadStatus::Novo, None),
            lead("2", "B", LeadStatus::Novo, None),
        ];
        let pending = PendingMove { lead_id: "1".to_string(), target: LeadStatus::Ganho };

        let overlaid = with_pending(&leads, Some(&pending));
        let groups = group_by_status(&overlaid);
        assert_eq!(groups[0].1.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["2"]);
        assert_eq!(groups[2].1.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["1"]);

        // Refetch landed (e.g. the persist failed): overlay discarded, the
        // board shows remote truth again.
        let rolled_back = with_pending(&leads, None);
        assert_eq!(rolled_back, leads);
    }

    #[test]
    fn won_toast_carries_the_formatted_value() {
        let mut l = lead("1", "Carlos", LeadStatus::Novo, None);
        l.valor = 3500.0;
        let (level, title, description) = move_toast(&l, LeadStatus::Ganho);
        assert_eq!(level, ToastLevel::Success);
        assert!(title.contains("Carlos"));
        assert_eq!(description.as_deref(), Some("Valor: R$ 3.500,00"));
    }

    #[test]
    fn lost_and_neutral_toasts() {
        let l = lead("1", "Ana", LeadStatus::Novo, None);
        let (level, title, desc) = move_toast(&l, LeadStatus::Perdido);
        assert_eq!(level, ToastLevel::Error);
        assert!(title.contains("perdido"));
        assert!(desc.is_none());

        let (level, title, _) = move_toast(&l, LeadStatus::Atendimento);
        assert_eq!(level, ToastLevel::Info);
        assert!(title.contains("movido para Atendimento"));
    }
}
