use clap::{Parser, Subcommand};
use sportiq_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "sportiq-cli", version, about = "SportIQ CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decide the launch screen for this cold start
    Launch(commands::launch::LaunchArgs),
    /// Onboarding pages and completion
    Onboarding {
        #[command(subcommand)]
        action: commands::onboarding::OnboardingAction,
    },
    /// Sports quizzes
    Quiz {
        #[command(subcommand)]
        action: commands::quiz::QuizAction,
    },
    /// Workout plans and runs
    Workout {
        #[command(subcommand)]
        action: commands::workout::WorkoutAction,
    },
    /// User profile and achievements
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(Config::load_or_default().logging.filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let result = match cli.command {
        Commands::Launch(args) => commands::launch::run(args),
        Commands::Onboarding { action } => commands::onboarding::run(action),
        Commands::Quiz { action } => commands::quiz::run(action),
        Commands::Workout { action } => commands::workout::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
