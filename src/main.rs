use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use expense_tracker::audit::AuditLogger;
use expense_tracker::cli::{handle_expense_command, handle_history_command, ExpenseCommands};
use expense_tracker::config::{paths::ExpensePaths, settings::Settings};
use expense_tracker::models::ExpenseId;
use expense_tracker::services::ExpenseStore;
use expense_tracker::storage::FileBackend;

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "EXPENSE_TRACKER_LOG";

#[derive(Parser)]
#[command(
    name = "expense-tracker",
    version,
    about = "Track personal expenses from the terminal",
    long_about = "expense-tracker records expenses in a local JSON file and reports \
                  monthly totals, category listings and budget warnings."
)]
struct Cli {
    /// Expense document to use instead of the one in the data directory
    #[arg(long, global = true, env = "EXPENSE_TRACKER_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Expense(ExpenseCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Only show changes to this expense
        #[arg(short, long)]
        id: Option<ExpenseId>,
    },

    /// Create the settings file and an empty expense document
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();

    let mut paths = ExpensePaths::new()?;
    if let Some(file) = cli.file {
        paths = paths.with_expenses_file(file);
    }
    let settings = Settings::load_or_create(&paths)?;

    let mut store = ExpenseStore::new(
        FileBackend::new(paths.expenses_file()),
        settings.store_options(),
    );
    if settings.audit_enabled {
        store = store.with_audit(AuditLogger::new(paths.audit_log()));
    }

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            store.initialize()?;
            handle_expense_command(&store, &settings, cmd)?;
        }
        Some(Commands::History { limit, id }) => {
            handle_history_command(&AuditLogger::new(paths.audit_log()), limit, id)?;
        }
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            paths.ensure_directories()?;
            settings.save(&paths)?;
            store.initialize()?;
            println!("Expense document: {}", paths.expenses_file().display());
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Expense document: {}", paths.expenses_file().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Record shape:     {:?}", settings.record_shape);
            println!("  Id strategy:      {:?}", settings.id_strategy);
            println!("  Update placement: {:?}", settings.update_placement);
            println!("  Audit enabled:    {}", settings.audit_enabled);
        }
        None => {
            println!("expense-tracker - personal expense tracking");
            println!();
            println!("Run 'expense-tracker --help' for usage information.");
            println!("Run 'expense-tracker add --description Lunch --amount 1250' to record an expense.");
        }
    }

    Ok(())
}

/// Install a stderr subscriber filtered by `EXPENSE_TRACKER_LOG` (default: warn)
fn setup_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
