//! # SportIQ Core Library
//!
//! This library provides the core logic for SportIQ, a sports quiz and
//! workout tracker. Everything runs from the `sportiq-cli` binary, which is a
//! thin layer over the same engines a mobile front end would drive.
//!
//! ## Architecture
//!
//! - **Launch Gate**: On each cold start decides between local onboarding,
//!   a remotely supplied destination and the main app
//! - **Remote Config**: Time-gated fetch with an ordered fallback chain
//! - **Quiz / Workout Engines**: State machines that require the caller to
//!   invoke `tick()` once per second while they run
//! - **Storage**: SQLite-backed key-value store and TOML configuration
//!
//! ## Key Components
//!
//! - [`Gate`]: Cold-start screen selection and onboarding
//! - [`RemoteConfigResolver`]: Remote config fetch and fallback
//! - [`QuizSession`]: Timed quiz scoring
//! - [`WorkoutSession`]: Exercise progression and countdowns
//! - [`Store`]: Persistent key-value storage
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod clock;
pub mod error;
pub mod events;
pub mod gate;
pub mod onboarding;
pub mod profile;
pub mod quiz;
pub mod remote_config;
pub mod storage;
pub mod ticker;
pub mod workout;

pub use analytics::{AnalyticsSink, RecordingSink, TracingSink};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{CatalogError, ConfigError, CoreError, FetchError, StoreError};
pub use events::Event;
pub use gate::{Gate, Screen};
pub use onboarding::{default_pages, OnboardingCarousel, OnboardingPage};
pub use profile::{ProfileService, User};
pub use quiz::{QuizCatalog, QuizResult, QuizSession, SportCategory};
pub use remote_config::{RemoteConfigResolver, Resolution, ResolutionSource};
pub use storage::{Config, Store};
pub use ticker::{drive, DriveOutcome, Tickable, Ticker};
pub use workout::{WorkoutCatalog, WorkoutRecord, WorkoutSession, WorkoutType};
