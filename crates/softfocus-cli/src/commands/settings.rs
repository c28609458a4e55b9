use clap::Subcommand;
use softfocus_core::{Config, ManualTicker, Mode};

use crate::common::{self, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show the duration of each mode
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change one duration (whole minutes, 1-120)
    Set {
        /// focus | short | long
        mode: Mode,
        /// Minutes
        minutes: String,
    },
}

pub fn run(config: &Config, action: SettingsAction) -> CliResult {
    let mut ctl = common::open_controller(config, ManualTicker::new())?;

    match action {
        SettingsAction::Show { json: true } => {
            println!("{}", serde_json::to_string_pretty(ctl.state().settings())?);
            return Ok(());
        }
        SettingsAction::Show { json: false } => {}
        SettingsAction::Set { mode, minutes } => {
            if ctl.update_setting(mode, &minutes).is_empty() {
                eprintln!(
                    "ignored '{minutes}': {mode} stays at {} minutes",
                    ctl.state().settings().minutes(mode)
                );
            }
        }
    }

    let settings = ctl.state().settings();
    for mode in Mode::ALL {
        println!("{:<11} {:>3} min", mode.label(), settings.minutes(mode));
    }
    Ok(())
}
