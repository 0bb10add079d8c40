//! # Injected UI state
//!
//! Cross-view UI state (reporting period, lead search text, table density)
//! lives in one context object provided at the app root and patched
//! explicitly — views never reach for ambient globals.

use api::Periodo;
use dioxus::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub periodo: Periodo,
    pub busca_leads: String,
    pub tabela_densa: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            periodo: Periodo::Ultimos7Dias,
            busca_leads: String::new(),
            tabela_densa: false,
        }
    }
}

/// A partial update; unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiStatePatch {
    pub periodo: Option<Periodo>,
    pub busca_leads: Option<String>,
    pub tabela_densa: Option<bool>,
}

impl UiStatePatch {
    pub fn periodo(periodo: Periodo) -> Self {
        Self { periodo: Some(periodo), ..Self::default() }
    }

    pub fn busca_leads(busca: impl Into<String>) -> Self {
        Self { busca_leads: Some(busca.into()), ..Self::default() }
    }

    pub fn tabela_densa(densa: bool) -> Self {
        Self { tabela_densa: Some(densa), ..Self::default() }
    }
}

impl UiState {
    pub fn apply(&mut self, patch: UiStatePatch) {
        if let Some(periodo) = patch.periodo {
            self.periodo = periodo;
        }
        if let Some(busca) = patch.busca_leads {
            self.busca_leads = busca;
        }
        if let Some(densa) = patch.tabela_densa {
            self.tabela_densa = densa;
        }
    }
}

/// Consume the UI-state signal from context.
pub fn use_ui_state() -> Signal<UiState> {
    use_context::<Signal<UiState>>()
}

/// Patch the shared state in place.
pub fn patch_ui_state(state: &mut Signal<UiState>, patch: UiStatePatch) {
    state.write().apply(patch);
}

/// Provider component. Wrap the app root once.
#[component]
pub fn AppStateProvider(children: Element) -> Element {
    let state = use_signal(UiState::default);
    use_context_provider(|| state);

    rsx! {
        {children}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_set_fields() {
        let mut state = UiState::default();
        state.apply(UiStatePatch::busca_leads("acme"));
        assert_eq!(state.busca_leads, "acme");
        assert_eq!(state.periodo, Periodo::Ultimos7Dias);

        state.apply(UiStatePatch::periodo(Periodo::Total));
        assert_eq!(state.periodo, Periodo::Total);
        assert_eq!(state.busca_leads, "acme");
        assert!(!state.tabela_densa);

        state.apply(UiStatePatch::tabela_densa(true));
        assert!(state.tabela_densa);
        assert_eq!(state.periodo, Periodo::Total);
    }
}
