use chrono::Local;
use clap::Args;
use softfocus_core::{Config, ManualTicker, Outcome};

use crate::common::{self, CliResult};

#[derive(Args)]
pub struct StatsArgs {
    /// Print as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct HistoryArgs {
    /// Print the raw records as JSON
    #[arg(long)]
    pub json: bool,
    /// Tokens per row in the reward jar
    #[arg(long, default_value = "10")]
    pub per_row: usize,
}

pub fn run(config: &Config, args: StatsArgs) -> CliResult {
    let ctl = common::open_controller(config, ManualTicker::new())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&ctl.state().stats())?);
    } else {
        println!("{}", common::render_stats(ctl.state()));
    }
    Ok(())
}

pub fn history(config: &Config, args: HistoryArgs) -> CliResult {
    let ctl = common::open_controller(config, ManualTicker::new())?;
    let history = ctl.state().history();

    if args.json {
        println!("{}", serde_json::to_string_pretty(history.records())?);
        return Ok(());
    }

    for record in history.records() {
        let label = match record.outcome {
            Outcome::Success => "completed",
            Outcome::Failure => "gave up",
        };
        println!(
            "{}  {:<9}  {}",
            record.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M"),
            label,
            common::short_id(&record.id),
        );
    }
    if !history.is_empty() {
        println!();
    }
    println!("{}", ctl.state().reward_jar().render(args.per_row));
    Ok(())
}
