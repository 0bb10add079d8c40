//! Dashboard view: KPI cards, per-day and per-origin breakdowns, and the
//! per-salesperson performance table, all for the selected period.

use dioxus::prelude::*;

use api::{DashboardData, Periodo};
use ui::format::format_currency;
use ui::{patch_ui_state, use_ui_state, MainLayout, PageHeader, UiStatePatch};

use super::navigate;

#[component]
pub fn Dashboard() -> Element {
    let nav = use_navigator();
    let mut ui_state = use_ui_state();

    let metrics = use_resource(move || {
        let periodo = ui_state().periodo;
        async move { api::dashboard_metrics(periodo).await }
    });

    rsx! {
        MainLayout {
            active_path: "/dashboard",
            on_navigate: move |path| navigate(nav, path),

            PageHeader {
                title: "Dashboard",
                description: "Visão geral do desempenho comercial",
                actions: rsx! {
                    select {
                        class: "field-select",
                        value: ui_state().periodo.as_str(),
                        onchange: move |evt| {
                            let periodo = Periodo::parse_or_default(&evt.value());
                            patch_ui_state(&mut ui_state, UiStatePatch::periodo(periodo));
                        },
                        for periodo in Periodo::ALL {
                            option {
                                key: "{periodo.as_str()}",
                                value: "{periodo.as_str()}",
                                "{periodo.label()}"
                            }
                        }
                    }
                },
            }

            match metrics() {
                None => rsx! {
                    div { class: "loading-state", "Carregando..." }
                },
                Some(Err(e)) => rsx! {
                    div { class: "error-state", "Erro ao carregar métricas: {e}" }
                },
                Some(Ok(data)) => rsx! {
                    DashboardContent { data: data }
                },
            }
        }
    }
}

#[component]
fn DashboardContent(data: DashboardData) -> Element {
    let max_day_leads = data.por_dia.iter().map(|p| p.leads).max().unwrap_or(0).max(1);
    let max_origin_total = data.por_origem.iter().map(|p| p.total).max().unwrap_or(0).max(1);

    rsx! {
        div {
            class: "kpi-grid",
            div {
                class: "kpi-card",
                p { class: "kpi-label", "Leads" }
                p { class: "kpi-value", "{data.kpis.total_leads}" }
                p { class: "kpi-hint", "Total de leads no período" }
            }
            div {
                class: "kpi-card",
                p { class: "kpi-label", "Taxa de Conversão" }
                p { class: "kpi-value", {format!("{:.1}%", data.kpis.taxa_conversao)} }
                p { class: "kpi-hint", "Negócios ganhos / total" }
            }
            div {
                class: "kpi-card",
                p { class: "kpi-label", "Negócios Ganhos" }
                p { class: "kpi-value", "{data.kpis.negocios_ganhos}" }
                p { class: "kpi-hint", "Leads com status Ganho" }
            }
            div {
                class: "kpi-card",
                p { class: "kpi-label", "Valor Ganho" }
                p { class: "kpi-value", "{format_currency(data.kpis.valor_ganho)}" }
                p { class: "kpi-hint", "Soma dos valores ganhos" }
            }
        }

        div {
            class: "chart-grid",
            div {
                class: "chart-card",
                h3 { "Leads e Ganhos por Dia" }
                if data.por_dia.is_empty() {
                    p { class: "table-empty", "Sem leads no período" }
                }
                for point in &data.por_dia {
                    div {
                        key: "{point.dia}",
                        class: "bar-row",
                        span { class: "bar-label", "{point.dia}" }
                        div {
                            class: "bar-track",
                            div {
                                class: "bar-fill",
                                style: "width: {point.leads * 100 / max_day_leads}%",
                            }
                        }
                        span {
                            class: "bar-value",
                            "{point.leads} · {format_currency(point.valor_ganho)}"
                        }
                    }
                }
            }
            div {
                class: "chart-card",
                h3 { "Leads e Ganhos por Origem" }
                if data.por_origem.is_empty() {
                    p { class: "table-empty", "Sem leads no período" }
                }
                for point in &data.por_origem {
                    div {
                        key: "{point.origem.as_str()}",
                        class: "bar-row",
                        span { class: "bar-label", "{point.origem.label()}" }
                        div {
                            class: "bar-track",
                            div {
                                class: "bar-fill won",
                                style: "width: {point.total * 100 / max_origin_total}%",
                            }
                        }
                        span {
                            class: "bar-value",
                            "{point.total} · {format_currency(point.valor_ganho)}"
                        }
                    }
                }
            }
        }

        div {
            class: "data-table-wrap",
            div {
                class: "chart-card",
                h3 { "Performance por Vendedor" }
            }
            table {
                class: "data-table",
                thead {
                    tr {
                        th { "Vendedor" }
                        th { "Leads" }
                        th { "Ganhos" }
                        th { "Conversão" }
                        th { "Valor Ganho" }
                    }
                }
                tbody {
                    if data.por_vendedor.is_empty() {
                        tr {
                            td {
                                colspan: 5,
                                class: "table-empty",
                                "Nenhum vendedor cadastrado"
                            }
                        }
                    }
                    for perf in &data.por_vendedor {
                        tr {
                            key: "{perf.vendedor}",
                            td { "{perf.vendedor}" }
                            td { "{perf.leads}" }
                            td { "{perf.ganhos}" }
                            td { {format!("{:.1}%", perf.conversao)} }
                            td { "{format_currency(perf.valor_ganho)}" }
                        }
                    }
                }
            }
        }
    }
}
