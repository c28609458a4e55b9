//! Task management commands for CLI.

use clap::Subcommand;
use softfocus_core::{Config, ManualTicker};

use crate::common::{self, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task (the first task becomes the current focus)
    Add {
        /// Task text
        text: Vec<String>,
    },
    /// List tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task's completion
    Toggle {
        /// List number, id, or id prefix
        task: String,
    },
    /// Delete a task
    Delete {
        /// List number, id, or id prefix
        task: String,
    },
    /// Make a task the current focus
    Select {
        /// List number, id, or id prefix
        task: String,
    },
}

pub fn run(config: &Config, action: TaskAction) -> CliResult {
    let mut ctl = common::open_controller(config, ManualTicker::new())?;

    match action {
        TaskAction::Add { text } => {
            let events = ctl.add_task(&text.join(" "));
            if events.is_empty() {
                eprintln!("task text is empty, nothing added");
            }
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ctl.state().tasks())?);
                return Ok(());
            }
        }
        TaskAction::Toggle { task } => {
            let id = common::resolve_task(ctl.state().tasks(), &task);
            if ctl.toggle_task(&id).is_empty() {
                eprintln!("no task matches '{task}'");
            }
        }
        TaskAction::Delete { task } => {
            let id = common::resolve_task(ctl.state().tasks(), &task);
            if ctl.delete_task(&id).is_empty() {
                eprintln!("no task matches '{task}'");
            }
        }
        TaskAction::Select { task } => {
            let id = common::resolve_task(ctl.state().tasks(), &task);
            ctl.select_task(&id);
            if ctl.state().task_registry().active().is_none() {
                eprintln!("no task matches '{task}', selection cleared");
            }
        }
    }

    println!("{}", common::render_tasks(ctl.state().tasks()));
    Ok(())
}
