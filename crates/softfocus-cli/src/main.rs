use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use softfocus_core::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "softfocus", version, about = "SoftFocus Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer session
    Run,
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Mode durations
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Session statistics
    Stats(commands::stats::StatsArgs),
    /// Session history and reward jar
    History(commands::stats::HistoryArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
    {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn main() {
    let cli = Cli::parse();

    // Completions need no data directory; don't create one for them.
    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "softfocus", &mut std::io::stdout());
        return;
    }

    let config = match Config::load() {
        Ok(config) => {
            init_logging(&config.log.level);
            config
        }
        Err(e) => {
            let config = Config::default();
            init_logging(&config.log.level);
            tracing::warn!(error = %e, "failed to load config, using defaults");
            config
        }
    };

    let result = match cli.command {
        Commands::Run => commands::session::run(&config),
        Commands::Task { action } => commands::task::run(&config, action),
        Commands::Settings { action } => commands::settings::run(&config, action),
        Commands::Stats(args) => commands::stats::run(&config, args),
        Commands::History(args) => commands::stats::history(&config, args),
        Commands::Config { action } => commands::config::run(config, action),
        Commands::Completions { .. } => Ok(()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
