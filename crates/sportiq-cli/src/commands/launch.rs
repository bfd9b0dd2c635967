use clap::Args;
use sportiq_core::remote_config::RemoteConfigResolver;
use sportiq_core::{default_pages, Config, Gate, Screen};

use super::{clock, emit, open_store, runtime, CmdResult};

#[derive(Args)]
pub struct LaunchArgs {
    /// Skip the remote fetch and decide from local state only
    #[arg(long)]
    pub offline: bool,
}

pub fn run(args: LaunchArgs) -> CmdResult {
    let config = Config::load_or_default();
    let store = open_store()?;

    let mut remote = config.remote.clone();
    if args.offline {
        remote.endpoint = None;
    }
    let resolver = RemoteConfigResolver::from_config(store, clock(), &remote);

    let (gate, event) = runtime()?.block_on(Gate::cold_start(&resolver, default_pages()));
    emit(&event);

    match gate.screen() {
        Screen::Onboarding => {
            if let Some(page) = gate.carousel().and_then(|c| c.current_page()) {
                eprintln!("{}: {}", page.title, page.description);
            }
            eprintln!("run `sportiq-cli onboarding complete` to finish onboarding");
        }
        Screen::RemoteRedirect { destination } => eprintln!("open {destination}"),
        Screen::MainApp => {}
    }
    Ok(())
}
