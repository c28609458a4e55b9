//! Helpers shared by the CLI commands.

use softfocus_core::{
    AppState, Config, Controller, Database, PersistenceGateway, Task, TickSource,
};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Open the configured database and load the stored snapshot.
pub fn open_controller<T: TickSource>(
    config: &Config,
    ticker: T,
) -> CliResult<Controller<Database, T>> {
    let db = Database::open(&config.storage.database_file)?;
    let gateway = PersistenceGateway::with_key(db, config.storage.slot_key.clone());
    Ok(Controller::open(gateway, ticker))
}

/// Map a user-supplied task reference to a task id.
///
/// Accepts a full id, a 1-based list position, or an unambiguous id prefix.
/// Anything else is passed through unchanged, so the core treats it as an
/// unknown id.
pub fn resolve_task(tasks: &[Task], reference: &str) -> String {
    let reference = reference.trim();
    if reference.is_empty() || tasks.iter().any(|t| t.id == reference) {
        return reference.to_string();
    }
    if let Ok(n) = reference.parse::<usize>() {
        if (1..=tasks.len()).contains(&n) {
            return tasks[n - 1].id.clone();
        }
    }
    let mut matches = tasks.iter().filter(|t| t.id.starts_with(reference));
    match (matches.next(), matches.next()) {
        (Some(only), None) => only.id.clone(),
        _ => reference.to_string(),
    }
}

pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet.".to_string();
    }
    tasks
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "{:>2}. [{}] {} {}  ({})",
                i + 1,
                if t.is_completed { "x" } else { " " },
                if t.is_active { ">" } else { " " },
                t.text,
                short_id(&t.id),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

const BAR_WIDTH: usize = 20;

/// One-line timer readout, e.g. `Focus       24:59 [###################-] running`.
pub fn render_timer<T: TickSource>(state: &AppState<T>) -> String {
    let engine = state.engine();
    let filled = (engine.progress() * BAR_WIDTH as f64).round() as usize;
    let bar: String = (0..BAR_WIDTH)
        .map(|i| if i < filled { '#' } else { '-' })
        .collect();
    let focus_on = state
        .task_registry()
        .active()
        .map(|t| format!("  on: {}", t.text))
        .unwrap_or_default();
    format!(
        "{:<11} {} [{}] {}{}",
        engine.mode().label(),
        state.formatted_time(),
        bar,
        if engine.is_active() { "running" } else { "paused" },
        focus_on,
    )
}

pub fn render_stats<T: TickSource>(state: &AppState<T>) -> String {
    let stats = state.stats();
    format!(
        "Focus sessions: {}\nGave up:        {}\nHours focused:  {}",
        stats.successful,
        stats.failed,
        stats.total_focus_hours_display(),
    )
}
