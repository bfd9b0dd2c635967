//! Launch gate.
//!
//! Picks the first screen once per cold start and owns the onboarding
//! carousel while it is shown.
//!
//! ## State Transitions
//!
//! ```text
//! cold start -> RemoteRedirect            (valid redirect, terminal)
//!            -> Onboarding -> MainApp     (pages finished or skipped)
//!            -> MainApp                   (terminal)
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::events::Event;
use crate::onboarding::{OnboardingCarousel, OnboardingPage};
use crate::remote_config::{
    ConfigFetchState, RemoteConfigResolver, Resolution, ResolverOutcome,
};
use crate::storage::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Onboarding,
    RemoteRedirect { destination: String },
    MainApp,
}

/// Redirect beats onboarding, onboarding beats the main app.
pub fn decide(resolution: &Resolution, onboarding_completed: bool) -> Screen {
    match resolution {
        Resolution::Redirect { destination } => Screen::RemoteRedirect {
            destination: destination.clone(),
        },
        _ if !onboarding_completed => Screen::Onboarding,
        _ => Screen::MainApp,
    }
}

pub struct Gate {
    store: Store,
    clock: Arc<dyn Clock>,
    screen: Screen,
    carousel: Option<OnboardingCarousel>,
}

impl Gate {
    /// Resolve the first screen for this launch.
    pub async fn cold_start(
        resolver: &RemoteConfigResolver,
        pages: Vec<OnboardingPage>,
    ) -> (Self, Event) {
        let outcome = resolver.resolve().await;
        Self::from_outcome(
            resolver.store().clone(),
            Arc::clone(resolver.clock()),
            &outcome,
            pages,
        )
    }

    pub fn from_outcome(
        store: Store,
        clock: Arc<dyn Clock>,
        outcome: &ResolverOutcome,
        pages: Vec<OnboardingPage>,
    ) -> (Self, Event) {
        let completed = ConfigFetchState::load(&store).onboarding_completed;
        let mut screen = decide(&outcome.resolution, completed);
        if screen == Screen::Onboarding && pages.is_empty() {
            screen = Screen::MainApp;
        }

        let carousel = (screen == Screen::Onboarding)
            .then(|| OnboardingCarousel::new(pages, Arc::clone(&clock)));
        let event = Event::LaunchResolved {
            screen: screen.clone(),
            source: outcome.source,
            fetched: outcome.fetched,
            at: clock.now(),
        };
        tracing::info!(?screen, source = ?outcome.source, "launch screen resolved");

        (
            Self {
                store,
                clock,
                screen,
                carousel,
            },
            event,
        )
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn carousel(&self) -> Option<&OnboardingCarousel> {
        self.carousel.as_ref()
    }

    pub fn next_page(&mut self) -> Option<Event> {
        let event = self.carousel.as_mut()?.next_page()?;
        self.after_carousel(&event);
        Some(event)
    }

    pub fn previous_page(&mut self) -> Option<Event> {
        self.carousel.as_mut()?.previous_page()
    }

    pub fn skip(&mut self) -> Option<Event> {
        let event = self.carousel.as_mut()?.skip()?;
        self.after_carousel(&event);
        Some(event)
    }

    /// Leave onboarding for the main app. No-op on any other screen.
    pub fn complete_onboarding(&mut self) -> Option<Event> {
        if self.screen != Screen::Onboarding {
            return None;
        }
        self.finish_onboarding();
        Some(Event::OnboardingCompleted {
            skipped: false,
            at: self.clock.now(),
        })
    }

    fn after_carousel(&mut self, event: &Event) {
        if matches!(event, Event::OnboardingCompleted { .. }) {
            self.finish_onboarding();
        }
    }

    fn finish_onboarding(&mut self) {
        if let Err(e) = ConfigFetchState::store_onboarding_completed(&self.store) {
            tracing::warn!(error = %e, "failed to persist onboarding completion");
        }
        self.carousel = None;
        self.screen = Screen::MainApp;
        tracing::debug!("onboarding completed");
    }
}
