use clap::Subcommand;
use sportiq_core::remote_config::{fallback, ConfigFetchState, ResolverOutcome};
use sportiq_core::{default_pages, Gate, ResolutionSource};

use super::{clock, emit, open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum OnboardingAction {
    /// List onboarding pages as JSON
    Pages,
    /// Mark onboarding as completed
    Complete,
}

pub fn run(action: OnboardingAction) -> CmdResult {
    match action {
        OnboardingAction::Pages => print_json(&default_pages()),
        OnboardingAction::Complete => complete(),
    }
}

fn complete() -> CmdResult {
    let store = open_store()?;
    let (_, resolution) = fallback(&ConfigFetchState::load(&store));
    let outcome = ResolverOutcome {
        resolution,
        source: ResolutionSource::Local,
        fetched: false,
    };

    let (mut gate, _) = Gate::from_outcome(store, clock(), &outcome, default_pages());
    match gate.complete_onboarding() {
        Some(event) => emit(&event),
        None => eprintln!("onboarding is not pending"),
    }
    Ok(())
}
