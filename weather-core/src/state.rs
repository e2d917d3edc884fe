//! Search state owned by the presentation layer.
//!
//! ```text
//! idle ──trigger──▶ loading ──ok──▶ success
//!                     │  ▲            │
//!                    err └──trigger───┤
//!                     ▼               │
//!                   error ──trigger───┘
//! ```
//!
//! Every accepted trigger bumps a generation counter. A completion carries
//! the generation it was issued for and is dropped if a newer search has
//! started since, so an out-of-order response never overwrites a newer one.

use crate::{Feedback, QueryError, WeatherProvider, WeatherReading};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for one in-flight search, returned by [`SearchState::begin_search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    city: String,
}

impl SearchTicket {
    /// The trimmed city name to query.
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    city_input: String,
    loading: bool,
    error: Option<String>,
    reading: Option<WeatherReading>,
    feedback: Option<Feedback>,
    generation: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn city_input(&self) -> &str {
        &self.city_input
    }

    pub fn set_city_input(&mut self, text: impl Into<String>) {
        self.city_input = text.into();
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last successful reading, kept while a new search is loading.
    pub fn reading(&self) -> Option<&WeatherReading> {
        self.reading.as_ref()
    }

    /// The reading to show: none while loading or after an error.
    pub fn displayed_reading(&self) -> Option<&WeatherReading> {
        if self.loading || self.error.is_some() {
            return None;
        }
        self.reading.as_ref()
    }

    pub fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    pub fn status(&self) -> SearchStatus {
        if self.loading {
            SearchStatus::Loading
        } else if self.error.is_some() {
            SearchStatus::Error
        } else if self.reading.is_some() {
            SearchStatus::Success
        } else {
            SearchStatus::Idle
        }
    }

    /// Start a search for the current input. Blank input leaves the state
    /// untouched and returns `None`.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        let city = self.city_input.trim();
        if city.is_empty() {
            tracing::debug!("ignoring search trigger with blank input");
            return None;
        }

        let ticket = SearchTicket {
            generation: self.generation + 1,
            city: city.to_string(),
        };

        self.generation = ticket.generation;
        self.feedback = None;
        self.error = None;
        self.loading = true;

        tracing::debug!(city = %ticket.city, generation = ticket.generation, "search started");
        Some(ticket)
    }

    /// Apply the outcome of `ticket`'s query. Returns `false` when the ticket
    /// is stale and nothing changed.
    pub fn complete_search(
        &mut self,
        ticket: &SearchTicket,
        result: Result<WeatherReading, QueryError>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                city = %ticket.city,
                stale = ticket.generation,
                current = self.generation,
                "dropping result of superseded search"
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(reading) => {
                self.error = None;
                self.reading = Some(reading);
            }
            Err(err) => {
                tracing::warn!(city = %ticket.city, error = %err, "search failed");
                self.error = Some(err.user_message().to_string());
                self.reading = None;
            }
        }
        true
    }

    /// Trigger a search and wait for it. Returns `false` when the input was
    /// blank and no query was made.
    pub async fn on_search_triggered(&mut self, provider: &dyn WeatherProvider) -> bool {
        let Some(ticket) = self.begin_search() else {
            return false;
        };

        let result = provider.fetch_reading(ticket.city()).await;
        self.complete_search(&ticket, result)
    }

    pub fn on_feedback_selected(&mut self, value: Feedback) {
        self.feedback = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UNAVAILABLE_MESSAGE;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn london() -> WeatherReading {
        WeatherReading {
            location_name: "London".into(),
            temperature_c: 15.6,
            condition_main: "Rain".into(),
            condition_description: "light rain".into(),
            is_night: false,
            observed_at: None,
        }
    }

    fn unavailable() -> QueryError {
        QueryError::ProviderUnavailable {
            status: StatusCode::BAD_GATEWAY,
            message: "upstream".into(),
        }
    }

    #[derive(Debug, Default)]
    struct StubProvider {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl WeatherProvider for StubProvider {
        async fn fetch_reading(&self, city: &str) -> Result<WeatherReading, QueryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(unavailable());
            }
            Ok(WeatherReading { location_name: city.to_string(), ..london() })
        }
    }

    #[test]
    fn starts_idle() {
        let state = SearchState::new();

        assert_eq!(state.status(), SearchStatus::Idle);
        assert!(state.displayed_reading().is_none());
        assert!(state.feedback().is_none());
    }

    #[test]
    fn blank_input_does_not_start_search() {
        for input in ["", "   ", "\t\n"] {
            let mut state = SearchState::new();
            state.set_city_input(input);

            assert!(state.begin_search().is_none());
            assert_eq!(state.status(), SearchStatus::Idle);
            assert!(!state.is_loading());
        }
    }

    #[test]
    fn blank_input_keeps_previous_result_and_feedback() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let ticket = state.begin_search().unwrap();
        state.complete_search(&ticket, Ok(london()));
        state.on_feedback_selected(Feedback::Like);

        state.set_city_input("  ");
        assert!(state.begin_search().is_none());

        assert_eq!(state.status(), SearchStatus::Success);
        assert_eq!(state.feedback(), Some(Feedback::Like));
    }

    #[test]
    fn trigger_moves_to_loading_and_clears_feedback_and_error() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let first = state.begin_search().unwrap();
        state.complete_search(&first, Err(unavailable()));
        state.on_feedback_selected(Feedback::Dislike);

        let ticket = state.begin_search().unwrap();

        assert_eq!(ticket.city(), "London");
        assert_eq!(state.status(), SearchStatus::Loading);
        assert!(state.error().is_none());
        assert!(state.feedback().is_none());
    }

    #[test]
    fn loading_keeps_previous_reading_but_hides_it() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let ticket = state.begin_search().unwrap();
        state.complete_search(&ticket, Ok(london()));

        state.set_city_input("Paris");
        state.begin_search().unwrap();

        assert_eq!(state.reading().map(|r| r.location_name.as_str()), Some("London"));
        assert!(state.displayed_reading().is_none());
    }

    #[test]
    fn ticket_city_is_trimmed() {
        let mut state = SearchState::new();
        state.set_city_input("  New York  ");

        let ticket = state.begin_search().unwrap();
        assert_eq!(ticket.city(), "New York");
        assert_eq!(state.city_input(), "  New York  ");
    }

    #[test]
    fn success_sets_reading() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let ticket = state.begin_search().unwrap();

        assert!(state.complete_search(&ticket, Ok(london())));

        assert_eq!(state.status(), SearchStatus::Success);
        let shown = state.displayed_reading().unwrap();
        assert_eq!(shown.display_temperature(), "16°C");
    }

    #[test]
    fn failure_sets_single_message_and_clears_reading() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let ticket = state.begin_search().unwrap();
        state.complete_search(&ticket, Ok(london()));

        let ticket = state.begin_search().unwrap();
        state.complete_search(&ticket, Err(unavailable()));

        assert_eq!(state.status(), SearchStatus::Error);
        assert_eq!(state.error(), Some(UNAVAILABLE_MESSAGE));
        assert!(!state.is_loading());
        assert!(state.reading().is_none());
        assert!(state.displayed_reading().is_none());
    }

    #[test]
    fn stale_completion_is_dropped() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let older = state.begin_search().unwrap();
        state.set_city_input("Paris");
        let newer = state.begin_search().unwrap();

        let paris = WeatherReading { location_name: "Paris".into(), ..london() };
        assert!(state.complete_search(&newer, Ok(paris)));
        assert!(!state.complete_search(&older, Err(unavailable())));

        assert_eq!(state.status(), SearchStatus::Success);
        assert_eq!(state.displayed_reading().unwrap().location_name, "Paris");
    }

    #[test]
    fn stale_completion_does_not_end_newer_loading() {
        let mut state = SearchState::new();
        state.set_city_input("London");
        let older = state.begin_search().unwrap();
        let _newer = state.begin_search().unwrap();

        assert!(!state.complete_search(&older, Ok(london())));
        assert_eq!(state.status(), SearchStatus::Loading);
    }

    #[test]
    fn feedback_is_idempotent_and_exclusive() {
        let mut state = SearchState::new();

        state.on_feedback_selected(Feedback::Like);
        state.on_feedback_selected(Feedback::Like);
        assert_eq!(state.feedback(), Some(Feedback::Like));

        state.on_feedback_selected(Feedback::Dislike);
        assert_eq!(state.feedback(), Some(Feedback::Dislike));
    }

    #[tokio::test]
    async fn triggered_search_reaches_success() {
        let provider = StubProvider::default();
        let mut state = SearchState::new();
        state.set_city_input(" London ");

        assert!(state.on_search_triggered(&provider).await);

        assert_eq!(state.status(), SearchStatus::Success);
        assert_eq!(state.displayed_reading().unwrap().location_name, "London");
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn triggered_search_reaches_error() {
        let provider = StubProvider { fail: true, ..Default::default() };
        let mut state = SearchState::new();
        state.set_city_input("London");

        assert!(state.on_search_triggered(&provider).await);

        assert_eq!(state.status(), SearchStatus::Error);
        assert!(!state.is_loading());
    }

    #[tokio::test]
    async fn blank_trigger_dispatches_no_query() {
        let provider = StubProvider::default();
        let mut state = SearchState::new();

        assert!(!state.on_search_triggered(&provider).await);

        assert_eq!(state.status(), SearchStatus::Idle);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }
}
