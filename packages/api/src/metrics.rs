//! # Dashboard metrics
//!
//! Aggregation runs server-side (`dashboard_metrics` server function) so all
//! date arithmetic stays on chrono; the client only renders the numbers. The
//! computation itself is a pure function over in-memory rows, kept separate
//! from the SQL so it can be unit-tested.

use serde::{Deserialize, Serialize};

use crate::models::LeadOrigin;

/// Reporting window selected on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Periodo {
    #[serde(rename = "hoje")]
    Hoje,
    #[serde(rename = "7d")]
    Ultimos7Dias,
    #[serde(rename = "30d")]
    Ultimos30Dias,
    #[serde(rename = "total")]
    Total,
}

impl Periodo {
    pub const ALL: [Periodo; 4] = [
        Periodo::Hoje,
        Periodo::Ultimos7Dias,
        Periodo::Ultimos30Dias,
        Periodo::Total,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Periodo::Hoje => "Hoje",
            Periodo::Ultimos7Dias => "Últimos 7 dias",
            Periodo::Ultimos30Dias => "Últimos 30 dias",
            Periodo::Total => "Total",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Periodo::Hoje => "hoje",
            Periodo::Ultimos7Dias => "7d",
            Periodo::Ultimos30Dias => "30d",
            Periodo::Total => "total",
        }
    }

    pub fn parse_or_default(value: &str) -> Periodo {
        match value {
            "hoje" => Periodo::Hoje,
            "30d" => Periodo::Ultimos30Dias,
            "total" => Periodo::Total,
            _ => Periodo::Ultimos7Dias,
        }
    }
}

/// Headline numbers for the selected period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Kpis {
    pub total_leads: u32,
    pub negocios_ganhos: u32,
    pub valor_ganho: f64,
    /// Won deals over total leads, in percent.
    pub taxa_conversao: f64,
}

/// Leads created and value won on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPoint {
    /// Day label, `dd/mm`.
    pub dia: String,
    pub leads: u32,
    pub valor_ganho: f64,
}

/// Totals for one acquisition channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginPoint {
    pub origem: LeadOrigin,
    pub total: u32,
    pub valor_ganho: f64,
}

/// Per-salesperson performance row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerPerformance {
    pub vendedor: String,
    pub leads: u32,
    pub ganhos: u32,
    /// Conversion rate in percent.
    pub conversao: f64,
    pub valor_ganho: f64,
}

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardData {
    pub kpis: Kpis,
    pub por_dia: Vec<DailyPoint>,
    pub por_origem: Vec<OriginPoint>,
    pub por_vendedor: Vec<SellerPerformance>,
}

#[cfg(feature = "server")]
pub use server::{compute_dashboard, periodo_start, LeadFacts};

#[cfg(feature = "server")]
mod server {
    use std::collections::BTreeMap;

    use chrono::{DateTime, Datelike, Days, Utc};
    use uuid::Uuid;

    use super::*;
    use crate::models::LeadStatus;

    /// The slice of a lead the dashboard cares about.
    #[derive(Debug, Clone)]
    pub struct LeadFacts {
        pub created_at: DateTime<Utc>,
        pub status: LeadStatus,
        pub origem: LeadOrigin,
        pub valor: f64,
        pub responsavel_id: Option<Uuid>,
    }

    /// Inclusive lower bound of the reporting window, `None` for all time.
    /// Windows start at midnight UTC so "today" covers the whole current day.
    pub fn periodo_start(periodo: Periodo, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let midnight = |d: DateTime<Utc>| {
            d.date_naive()
                .and_hms_opt(0, 0, 0)
                .expect("midnight exists")
                .and_utc()
        };
        match periodo {
            Periodo::Hoje => Some(midnight(now)),
            Periodo::Ultimos7Dias => Some(midnight(now - Days::new(7))),
            Periodo::Ultimos30Dias => Some(midnight(now - Days::new(30))),
            Periodo::Total => None,
        }
    }

    /// Aggregate leads into the dashboard payload. `vendedores` is the
    /// (id, nome) list of salesperson accounts; sellers without leads still
    /// get a row so the table shows the whole team.
    pub fn compute_dashboard(facts: &[LeadFacts], vendedores: &[(Uuid, String)]) -> DashboardData {
        let total_leads = facts.len() as u32;
        let ganhos: Vec<&LeadFacts> =
            facts.iter().filter(|f| f.status == LeadStatus::Ganho).collect();
        let valor_ganho: f64 = ganhos.iter().map(|f| f.valor).sum();
        let taxa_conversao = if total_leads > 0 {
            ganhos.len() as f64 / total_leads as f64 * 100.0
        } else {
            0.0
        };

        let kpis = Kpis {
            total_leads,
            negocios_ganhos: ganhos.len() as u32,
            valor_ganho,
            taxa_conversao,
        };

        // Per day, keyed on the calendar date so the series sorts itself.
        let mut by_day: BTreeMap<chrono::NaiveDate, (u32, f64)> = BTreeMap::new();
        for f in facts {
            let entry = by_day.entry(f.created_at.date_naive()).or_default();
            entry.0 += 1;
            if f.status == LeadStatus::Ganho {
                entry.1 += f.valor;
            }
        }
        let por_dia = by_day
            .into_iter()
            .map(|(date, (leads, valor_ganho))| DailyPoint {
                dia: format!("{:02}/{:02}", date.day(), date.month()),
                leads,
                valor_ganho,
            })
            .collect();

        let por_origem = LeadOrigin::ALL
            .iter()
            .filter_map(|origem| {
                let of: Vec<&LeadFacts> = facts.iter().filter(|f| f.origem == *origem).collect();
                if of.is_empty() {
                    return None;
                }
                Some(OriginPoint {
                    origem: *origem,
                    total: of.len() as u32,
                    valor_ganho: of
                        .iter()
                        .filter(|f| f.status == LeadStatus::Ganho)
                        .map(|f| f.valor)
                        .sum(),
                })
            })
            .collect();

        let mut por_vendedor: Vec<SellerPerformance> = vendedores
            .iter()
            .map(|(id, nome)| {
                let mine: Vec<&LeadFacts> =
                    facts.iter().filter(|f| f.responsavel_id == Some(*id)).collect();
                let mine_ganhos =
                    mine.iter().filter(|f| f.status == LeadStatus::Ganho).count() as u32;
                SellerPerformance {
                    vendedor: nome.clone(),
                    leads: mine.len() as u32,
                    ganhos: mine_ganhos,
                    conversao: if mine.is_empty() {
                        0.0
                    } else {
                        mine_ganhos as f64 / mine.len() as f64 * 100.0
                    },
                    valor_ganho: mine
                        .iter()
                        .filter(|f| f.status == LeadStatus::Ganho)
                        .map(|f| f.valor)
                        .sum(),
                }
            })
            .collect();
        por_vendedor.sort_by(|a, b| {
            b.valor_ganho
                .partial_cmp(&a.valor_ganho)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        DashboardData { kpis, por_dia, por_origem, por_vendedor }
    }

    #[cfg(test)]
    mod tests {
        use chrono::TimeZone;

        use super::*;

        fn at(s: &str) -> DateTime<Utc> {
            DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
        }

        fn fact(created: &str, status: LeadStatus, origem: LeadOrigin, valor: f64, resp: Option<Uuid>) -> LeadFacts {
            LeadFacts { created_at: at(created), status, origem, valor, responsavel_id: resp }
        }

        #[test]
        fn periodo_windows_start_at_midnight() {
            let now = Utc.with_ymd_and_hms(2026, 8, 5, 15, 30, 0).unwrap();
            assert_eq!(
                periodo_start(Periodo::Hoje, now),
                Some(Utc.with_ymd_and_hms(2026, 8, 5, 0, 0, 0).unwrap())
            );
            assert_eq!(
                periodo_start(Periodo::Ultimos7Dias, now),
                Some(Utc.with_ymd_and_hms(2026, 7, 29, 0, 0, 0).unwrap())
            );
            assert_eq!(periodo_start(Periodo::Total, now), None);
        }

        #[test]
        fn kpis_count_wins_and_conversion() {
            let v = Uuid::new_v4();
            let facts = vec![
                fact("2026-08-01T10:00:00Z", LeadStatus::Ganho, LeadOrigin::Formulario, 1000.0, Some(v)),
                fact("2026-08-01T11:00:00Z", LeadStatus::Novo, LeadOrigin::Whatsapp, 500.0, Some(v)),
                fact("2026-08-02T09:00:00Z", LeadStatus::Ganho, LeadOrigin::Whatsapp, 2500.0, None),
                fact("2026-08-03T09:00:00Z", LeadStatus::Perdido, LeadOrigin::Outros, 800.0, None),
            ];
            let data = compute_dashboard(&facts, &[(v, "Vera".to_string())]);

            assert_eq!(data.kpis.total_leads, 4);
            assert_eq!(data.kpis.negocios_ganhos, 2);
            assert_eq!(data.kpis.valor_ganho, 3500.0);
            assert!((data.kpis.taxa_conversao - 50.0).abs() < 1e-9);
        }

        #[test]
        fn daily_series_is_ordered_and_labelled() {
            let facts = vec![
                fact("2026-08-02T09:00:00Z", LeadStatus::Ganho, LeadOrigin::Outros, 100.0, None),
                fact("2026-08-01T10:00:00Z", LeadStatus::Novo, LeadOrigin::Outros, 0.0, None),
                fact("2026-08-01T18:00:00Z", LeadStatus::Novo, LeadOrigin::Outros, 0.0, None),
            ];
            let data = compute_dashboard(&facts, &[]);
            let days: Vec<(&str, u32)> =
                data.por_dia.iter().map(|p| (p.dia.as_str(), p.leads)).collect();
            assert_eq!(days, vec![("01/08", 2), ("02/08", 1)]);
            assert_eq!(data.por_dia[1].valor_ganho, 100.0);
        }

        #[test]
        fn origins_without_leads_are_omitted() {
            let facts = vec![
                fact("2026-08-01T10:00:00Z", LeadStatus::Novo, LeadOrigin::Indicacao, 0.0, None),
            ];
            let data = compute_dashboard(&facts, &[]);
            assert_eq!(data.por_origem.len(), 1);
            assert_eq!(data.por_origem[0].origem, LeadOrigin::Indicacao);
        }

        #[test]
        fn sellers_sort_by_value_won_and_idle_sellers_stay() {
            let a = Uuid::new_v4();
            let b = Uuid::new_v4();
            let c = Uuid::new_v4();
            let facts = vec![
                fact("2026-08-01T10:00:00Z", LeadStatus::Ganho, LeadOrigin::Outros, 100.0, Some(a)),
                fact("2026-08-01T11:00:00Z", LeadStatus::Ganho, LeadOrigin::Outros, 900.0, Some(b)),
                fact("2026-08-01T12:00:00Z", LeadStatus::Perdido, LeadOrigin::Outros, 50.0, Some(a)),
            ];
            let sellers = vec![
                (a, "Ana".to_string()),
                (b, "Bruno".to_string()),
                (c, "Caio".to_string()),
            ];
            let data = compute_dashboard(&facts, &sellers);

            assert_eq!(data.por_vendedor[0].vendedor, "Bruno");
            assert_eq!(data.por_vendedor[0].conversao, 100.0);
            assert_eq!(data.por_vendedor[1].vendedor, "Ana");
            assert_eq!(data.por_vendedor[1].ganhos, 1);
            let caio = data.por_vendedor.iter().find(|p| p.vendedor == "Caio").unwrap();
            assert_eq!(caio.leads, 0);
            assert_eq!(caio.conversao, 0.0);
        }
    }
}
