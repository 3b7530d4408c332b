use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moneyup::cli::{
    handle_categories_command, handle_dashboard_command, handle_pay_command,
    handle_reset_command, handle_status_command, handle_transaction_command, TransactionCommands,
};
use moneyup::config::{paths::DATA_DIR_ENV, MoneyUpPaths};
use moneyup::models::Money;
use moneyup::setup::SetupWizard;
use moneyup::MoneyUp;

/// Environment variable holding the log filter
const LOG_ENV: &str = "MONEYUP_LOG";

#[derive(Parser)]
#[command(
    name = "moneyup",
    version,
    about = "Personal finance tracking from the command line",
    long_about = "MoneyUP records your income and expenses, estimates your monthly \
                  fixed costs through a short onboarding survey and shows how much \
                  of your income is left to save."
)]
struct Cli {
    /// Directory holding settings and data
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which screen is next: onboarding, payment or dashboard
    Status,

    /// Run the onboarding survey
    Onboard {
        /// Continue from saved progress
        #[arg(long)]
        resume: bool,
    },

    /// Unlock premium with the one-time payment
    Pay {
        /// Name on the payment
        #[arg(long)]
        name: String,
        /// E-mail address for the receipt
        #[arg(long)]
        email: String,
    },

    /// Show this month's budget metrics
    Dashboard,

    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// List transaction categories
    Categories {
        /// Only income or expense categories
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Remove all stored data
    Reset {
        /// Skip confirmation
        #[arg(short, long)]
        force: bool,
    },

    /// Show current configuration and paths
    Config {
        /// Write the settings file, filling in defaults for missing fields
        #[arg(long)]
        init: bool,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => MoneyUpPaths::with_base_dir(dir),
        None => MoneyUpPaths::new()?,
    };
    let app = MoneyUp::open(&paths)?;

    match cli.command {
        Some(Commands::Status) => handle_status_command(&app)?,
        Some(Commands::Onboard { resume }) => {
            let stdin = io::stdin();
            SetupWizard::new(stdin.lock(), io::stdout()).run(app.store(), resume)?;
        }
        Some(Commands::Pay { name, email }) => handle_pay_command(&app, name, email)?,
        Some(Commands::Dashboard) => handle_dashboard_command(&app)?,
        Some(Commands::Txn(cmd)) => handle_transaction_command(&app, cmd)?,
        Some(Commands::Categories { kind }) => handle_categories_command(kind)?,
        Some(Commands::Reset { force }) => handle_reset_command(&app, force)?,
        Some(Commands::Config { init }) => {
            let settings = app.settings();
            if init {
                settings.save(&paths)?;
                println!("Settings written to {}", paths.settings_file().display());
                println!();
            }
            println!("MoneyUP Configuration");
            println!("=====================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Currency:         {} ({})", settings.currency_symbol, settings.currency_code);
            println!("  Date format:      {}", settings.date_format);
            println!("  Seed sample data: {}", settings.seed_sample_data);
            println!(
                "  Premium price:    {}",
                Money::from_cents(settings.premium_price_cents)
                    .format_with_symbol(&settings.currency_symbol)
            );
            println!("  Payment delay:    {} ms", settings.payment_delay_ms);
        }
        None => {
            println!("MoneyUP - personal finance tracking");
            println!();
            handle_status_command(&app)?;
            println!();
            println!("Run 'moneyup --help' for usage information.");
        }
    }

    Ok(())
}
