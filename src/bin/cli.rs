use tally::{Ledger, LedgerSnapshot, LedgerConfig,
    Intent, LedgerView, OperationError, Session,
    backend::{JsonStore, DEFAULT_STORAGE_KEY},
    expense::Amount};

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use colored::Colorize;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, propagate_version = true)]
struct Cli {
    /// Path to the store file to operate on
    #[arg(value_parser)]
    path: PathBuf,

    /// Key the expense list is kept under
    #[arg(short, long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// Artificial delay before input is validated, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Action to perform
    #[command(subcommand)]
    action: Subcommands,
}

#[derive(Debug, Subcommand)]
enum Subcommands {
    /// List all expenses and their total
    List,
    /// Add a new expense
    Add {
        /// What the money was spent on
        name: String,
        /// How much was spent
        #[arg(allow_negative_numbers = true)]
        amount: Amount,
    },
    /// Remove every expense
    Clear,
    /// Print only the total
    Total,
}

/// Lays the ledger out as a table followed by its total.
fn render_table(snapshot: &LedgerSnapshot) -> String {
    if snapshot.expenses.is_empty() {
        return "No expenses recorded".dimmed().to_string();
    }

    let name_width = snapshot.expenses.iter()
        .map(|expense| expense.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut lines = Vec::with_capacity(snapshot.expenses.len() + 2);
    let header = format!("{:<15} {:<name_width$} {:>10}", "ID", "NAME", "AMOUNT");
    lines.push(header.bold().to_string());
    for expense in &snapshot.expenses {
        lines.push(format!("{:<15} {:<name_width$} {:>10}", expense.id, expense.name, expense.amount));
    }

    let total = if snapshot.total.is_nan() {
        "NaN".bright_red()
    } else {
        snapshot.total.to_string().green()
    };
    lines.push(format!("{}: {}", "Total".bold(), total));
    return lines.join("\n");
}

/// Draws the ledger on stdout, failures on stderr.
struct TerminalView;

impl LedgerView for TerminalView {
    fn render(&mut self, snapshot: &LedgerSnapshot) {
        println!("{}", render_table(snapshot));
    }

    fn notify_failure(&mut self, intent: &Intent, error: &OperationError) {
        eprintln!("{} failed to {}: {}", "error:".bright_red().bold(), intent, error);
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Cli::parse();

    let config = LedgerConfig {
        store_path: args.path,
        storage_key: args.key,
        validation_delay: Duration::from_millis(args.delay_ms),
    };
    let ledger = Ledger::from_config(JsonStore::new(&config.store_path), &config);

    let intent = match args.action {
        Subcommands::List => Intent::Refresh,
        Subcommands::Add { name, amount } => Intent::Add { name, amount },
        Subcommands::Clear => Intent::Clear,
        Subcommands::Total => {
            println!("{}", Ledger::<JsonStore>::total(&ledger.load().await));
            return ExitCode::SUCCESS;
        }
    };

    let mut session = Session::new(&ledger, TerminalView);
    match session.dispatch(intent).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}


#[cfg(test)]
mod tests {
    use colored;
    use tally::{Expense, LedgerSnapshot};

    use super::render_table;

    #[test]
    fn empty_ledger_message() {
        colored::control::set_override(false);
        let snapshot = LedgerSnapshot { expenses: vec![], total: 0.0 };
        assert_eq!(render_table(&snapshot), "No expenses recorded");
    }

    #[test]
    fn table_with_total() {
        colored::control::set_override(false);
        let snapshot = LedgerSnapshot {
            expenses: vec![Expense::new("1", "Coffee", 4.5), Expense::new("2", "Cake", 3.0)],
            total: 7.5,
        };

        let table = render_table(&snapshot);
        let lines: Vec<_> = table.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], format!("{:<15} {:<6} {:>10}", "ID", "NAME", "AMOUNT"));
        assert_eq!(lines[1], format!("{:<15} {:<6} {:>10}", "1", "Coffee", "4.5"));
        assert_eq!(lines[2], format!("{:<15} {:<6} {:>10}", "2", "Cake", "3"));
        assert_eq!(lines[3], "Total: 7.5");
    }

    #[test]
    fn nan_total_is_shown() {
        colored::control::set_override(false);
        let snapshot = LedgerSnapshot {
            expenses: vec![Expense::new("1", "Tea", f64::NAN)],
            total: f64::NAN,
        };

        let table = render_table(&snapshot);
        assert_eq!(table.lines().last(), Some("Total: NaN"));
    }
}
