//! First-launch carousel.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::events::Event;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnboardingPage {
    pub title: String,
    pub description: String,
    pub media_ref: String,
}

impl OnboardingPage {
    fn new(title: &str, description: &str, media_ref: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            media_ref: media_ref.to_string(),
        }
    }
}

pub fn default_pages() -> Vec<OnboardingPage> {
    vec![
        OnboardingPage::new(
            "Welcome",
            "Test your sports knowledge and train with guided workouts",
            "onboarding_welcome",
        ),
        OnboardingPage::new(
            "Choose Your Workouts",
            "Cardio, strength, flexibility and more, planned for your level",
            "onboarding_workouts",
        ),
        OnboardingPage::new(
            "Meditate & Recover",
            "Balance training with recovery sessions and breathing",
            "onboarding_recover",
        ),
    ]
}

/// Page cursor over a fixed list of pages.
///
/// Moving past the last page, or skipping, finishes the carousel. Once
/// finished every command is a no-op.
pub struct OnboardingCarousel {
    pages: Vec<OnboardingPage>,
    current: usize,
    finished: bool,
    clock: Arc<dyn Clock>,
}

impl OnboardingCarousel {
    pub fn new(pages: Vec<OnboardingPage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            pages,
            current: 0,
            finished: false,
            clock,
        }
    }

    pub fn pages(&self) -> &[OnboardingPage] {
        &self.pages
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_page(&self) -> Option<&OnboardingPage> {
        self.pages.get(self.current)
    }

    pub fn total(&self) -> usize {
        self.pages.len()
    }

    pub fn is_last_page(&self) -> bool {
        self.current + 1 >= self.pages.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn progress(&self) -> f64 {
        if self.pages.is_empty() {
            return 0.0;
        }
        self.current as f64 / self.pages.len() as f64
    }

    /// Forward one page; on the last page this finishes the carousel.
    pub fn next_page(&mut self) -> Option<Event> {
        if self.finished {
            return None;
        }
        if self.is_last_page() {
            return Some(self.finish(false));
        }
        self.current += 1;
        Some(self.page_changed())
    }

    pub fn previous_page(&mut self) -> Option<Event> {
        if self.finished || self.current == 0 {
            return None;
        }
        self.current -= 1;
        Some(self.page_changed())
    }

    pub fn skip(&mut self) -> Option<Event> {
        if self.finished {
            return None;
        }
        Some(self.finish(true))
    }

    fn finish(&mut self, skipped: bool) -> Event {
        self.finished = true;
        Event::OnboardingCompleted {
            skipped,
            at: self.clock.now(),
        }
    }

    fn page_changed(&self) -> Event {
        Event::OnboardingPageChanged {
            page: self.current,
            total: self.pages.len(),
            at: self.clock.now(),
        }
    }
}
