//! Interactive timer session.
//!
//! Reads one command per line from stdin while the clock ticks. The tick
//! source is armed only while the timer runs, so an idle session just waits
//! for input.

use std::io::Write;

use softfocus_core::{Config, Controller, Database, Event, IntervalTicker, Mode, Outcome};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::common::{self, CliResult};

const HELP: &str = "\
commands:
  s, toggle            start or pause the timer
  r, reset             reset the timer (giving up a running focus session counts)
  m, mode <mode>       switch to focus | short | long
  add <text>           add a task
  done <task>          toggle a task's completion
  rm <task>            delete a task
  select <task>        make a task the current focus
  set <mode> <min>     change a duration (1-120 minutes)
  tasks | stats | jar  show tasks, statistics, reward jar
  help                 this text
  q, quit              leave
<task> is a list number, an id, or an id prefix.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Toggle,
    Reset,
    Mode(Mode),
    Add(String),
    Done(String),
    Remove(String),
    Select(String),
    Set(Mode, String),
    Tasks,
    Stats,
    Jar,
    Status,
    Help,
    Quit,
}

/// Parse one input line. An empty line asks for the status.
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    let need_arg = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("{word}: missing {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    match word.to_ascii_lowercase().as_str() {
        "" | "status" => Ok(SessionCommand::Status),
        "s" | "toggle" | "start" | "pause" => Ok(SessionCommand::Toggle),
        "r" | "reset" => Ok(SessionCommand::Reset),
        "m" | "mode" => need_arg("mode")?
            .parse::<Mode>()
            .map(SessionCommand::Mode)
            .map_err(|e| e.to_string()),
        "add" => Ok(SessionCommand::Add(rest.to_string())),
        "done" => need_arg("task").map(SessionCommand::Done),
        "rm" | "delete" => need_arg("task").map(SessionCommand::Remove),
        "select" => need_arg("task").map(SessionCommand::Select),
        "set" => {
            let args = need_arg("mode and minutes")?;
            let (mode, value) = args
                .split_once(char::is_whitespace)
                .ok_or_else(|| "set: usage: set <mode> <minutes>".to_string())?;
            let mode = mode.parse::<Mode>().map_err(|e| e.to_string())?;
            Ok(SessionCommand::Set(mode, value.trim().to_string()))
        }
        "tasks" => Ok(SessionCommand::Tasks),
        "stats" => Ok(SessionCommand::Stats),
        "jar" => Ok(SessionCommand::Jar),
        "help" | "?" => Ok(SessionCommand::Help),
        "q" | "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

/// Human-readable line for events worth announcing.
pub fn describe(event: &Event) -> Option<String> {
    match event {
        Event::TimerCompleted { mode, .. } if mode.is_focus() => {
            Some("Focus session complete.".into())
        }
        Event::TimerCompleted { mode, .. } => Some(format!("{mode} over.")),
        Event::SessionRecorded { record } if record.outcome == Outcome::Failure => {
            Some("Focus session abandoned.".into())
        }
        Event::ModeChanged { to, .. } => Some(format!("Switched to {to}.")),
        Event::SettingsApplied { settings, .. } => Some(format!(
            "Durations: focus {}m, short break {}m, long break {}m.",
            settings.minutes(Mode::Focus),
            settings.minutes(Mode::ShortBreak),
            settings.minutes(Mode::LongBreak),
        )),
        Event::TaskAdded { task } => Some(format!("Added: {}", task.text)),
        Event::TaskDeleted { id } => Some(format!("Deleted {}", common::short_id(id))),
        Event::TaskSelected { id: None } => Some("No task selected.".into()),
        _ => None,
    }
}

type Session = Controller<Database, IntervalTicker>;

/// Apply a command. Returns `false` when the session should end.
fn apply(ctl: &mut Session, command: SessionCommand) -> bool {
    let events = match command {
        SessionCommand::Toggle => ctl.start_or_pause(),
        SessionCommand::Reset => ctl.reset(),
        SessionCommand::Mode(mode) => ctl.change_mode(mode),
        SessionCommand::Add(text) => {
            let events = ctl.add_task(&text);
            if events.is_empty() {
                println!("Task text is empty, nothing added.");
            }
            events
        }
        SessionCommand::Done(task) => {
            let id = common::resolve_task(ctl.state().tasks(), &task);
            ctl.toggle_task(&id)
        }
        SessionCommand::Remove(task) => {
            let id = common::resolve_task(ctl.state().tasks(), &task);
            ctl.delete_task(&id)
        }
        SessionCommand::Select(task) => {
            let id = common::resolve_task(ctl.state().tasks(), &task);
            ctl.select_task(&id)
        }
        SessionCommand::Set(mode, value) => {
            let events = ctl.update_setting(mode, &value);
            if events.is_empty() {
                println!(
                    "Ignored: {mode} stays at {} minutes.",
                    ctl.state().settings().minutes(mode)
                );
            }
            events
        }
        SessionCommand::Tasks => {
            println!("{}", common::render_tasks(ctl.state().tasks()));
            Vec::new()
        }
        SessionCommand::Stats => {
            println!("{}", common::render_stats(ctl.state()));
            Vec::new()
        }
        SessionCommand::Jar => {
            println!("{}", ctl.state().reward_jar().render(10));
            Vec::new()
        }
        SessionCommand::Help => {
            println!("{HELP}");
            Vec::new()
        }
        SessionCommand::Status => Vec::new(),
        SessionCommand::Quit => return false,
    };
    announce(&events);
    println!("{}", common::render_timer(ctl.state()));
    true
}

fn announce(events: &[Event]) {
    for line in events.iter().filter_map(describe) {
        println!("{line}");
    }
}

pub fn run(config: &Config) -> CliResult {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let result = runtime.block_on(session(config));
    // A pending stdin read cannot be cancelled; don't wait for it.
    runtime.shutdown_background();
    result
}

async fn session(config: &Config) -> CliResult {
    let mut ctl = common::open_controller(config, IntervalTicker::new(config.tick_period()))?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    println!("{}", common::render_timer(ctl.state()));

    loop {
        tokio::select! {
            _ = ctl.ticker_mut().wait() => {
                let events = ctl.tick();
                if events.is_empty() {
                    print!("\r{}", common::render_timer(ctl.state()));
                    std::io::stdout().flush()?;
                } else {
                    println!();
                    announce(&events);
                    println!("{}", common::render_timer(ctl.state()));
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_command(&line) {
                    Ok(command) => {
                        if !apply(&mut ctl, command) {
                            break;
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
        }
    }

    tracing::debug!("session closed");
    Ok(())
}
