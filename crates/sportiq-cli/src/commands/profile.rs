use clap::Subcommand;
use sportiq_core::ProfileService;

use super::{clock, open_store, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile, statistics and achievements as JSON
    Show,
}

pub fn run(action: ProfileAction) -> CmdResult {
    match action {
        ProfileAction::Show => {
            let profile = ProfileService::new(open_store()?, clock());
            print_json(&profile.load_or_default())
        }
    }
}
