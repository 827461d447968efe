use clap::{Parser, Subcommand};
use split_ledger::config::Config;
use split_ledger::error::{Error, Result};
use split_ledger::Ledger;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "split-ledger")]
#[command(about = "Split Ledger CLI - pairwise debt netting for shared expenses")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: "human" or "json"
    #[arg(short, long, default_value = "human")]
    pub format: String,

    /// Data directory path
    #[arg(short, long)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the data directory with an empty ledger
    Init,

    /// Record an expense: debtor owes creditor the given amount
    Add {
        #[arg(long)]
        creditor: String,

        #[arg(long)]
        debtor: String,

        /// Positive amount in minor units
        #[arg(long)]
        amount: i64,

        /// Fresh expense identifier
        #[arg(long)]
        expense_id: u64,
    },

    /// Show netted balances (whole ledger, or one creditor)
    Balances {
        /// Creditor to restrict the listing to
        creditor: Option<String>,
    },

    /// Show the per-expense audit trail for one pair
    History {
        creditor: String,
        debtor: String,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.data_dir {
        Some(dir) => Config::with_data_dir(PathBuf::from(dir)),
        None => Config::from_env(),
    };
    config.set_output_format(cli.format.clone());
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Init => cmd_init(&config),
        Commands::Add {
            creditor,
            debtor,
            amount,
            expense_id,
        } => cmd_add(&config, &creditor, &debtor, amount, expense_id),
        Commands::Balances { creditor } => cmd_balances(&config, creditor.as_deref()),
        Commands::History { creditor, debtor } => cmd_history(&config, &creditor, &debtor),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    // try_init: tests may run several commands in one process.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init();
}

fn load_ledger(config: &Config) -> Result<Ledger> {
    let path = config.ledger_path();
    if !path.exists() {
        debug!(path = %path.display(), "no ledger file, starting empty");
        return Ok(Ledger::new());
    }
    let text = fs::read_to_string(&path)
        .map_err(|e| Error::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    Ledger::from_text(&text)
}

fn save_ledger(config: &Config, ledger: &Ledger) -> Result<()> {
    fs::create_dir_all(&config.data_dir)
        .map_err(|e| Error::Io(format!("Failed to create data directory: {}", e)))?;
    let path = config.ledger_path();
    fs::write(&path, ledger.to_text()?)
        .map_err(|e| Error::Io(format!("Failed to write {}: {}", path.display(), e)))
}

fn cmd_init(config: &Config) -> Result<()> {
    let path = config.ledger_path();
    if path.exists() {
        println!("Already initialized: {}", path.display());
        return Ok(());
    }
    save_ledger(config, &Ledger::new())?;
    info!(dir = %config.data_dir.display(), "initialized empty ledger");
    println!("Initialized {}", path.display());
    Ok(())
}

fn cmd_add(
    config: &Config,
    creditor: &str,
    debtor: &str,
    amount: i64,
    expense_id: u64,
) -> Result<()> {
    let mut ledger = load_ledger(config)?;
    debug!(creditor, debtor, amount, expense_id, "recording expense");
    ledger.add(creditor, debtor, amount, expense_id)?;
    save_ledger(config, &ledger)?;

    let owed = ledger
        .record(creditor, debtor)?
        .map(|record| record.owes)
        .unwrap_or(0);
    let counter_owed = ledger
        .record(debtor, creditor)?
        .map(|record| record.owes)
        .unwrap_or(0);
    info!(owed, counter_owed, "pair netted");

    match config.output_format.as_str() {
        "json" => println!(
            "{}",
            serde_json::json!({
                "creditor": creditor,
                "debtor": debtor,
                "owes": owed,
                "counter_owes": counter_owed,
            })
        ),
        _ => {
            println!("{} owes {}: {}", debtor, creditor, owed);
            println!("{} owes {}: {}", creditor, debtor, counter_owed);
        }
    }
    Ok(())
}

fn cmd_balances(config: &Config, creditor: Option<&str>) -> Result<()> {
    let ledger = load_ledger(config)?;

    if config.output_format == "json" {
        let mut doc = serde_json::Map::new();
        for (c, debtors) in ledger.creditors() {
            if creditor.is_some_and(|only| only != c) {
                continue;
            }
            let entries: serde_json::Map<String, serde_json::Value> = debtors
                .iter()
                .map(|(d, record)| (d.clone(), record.owes.into()))
                .collect();
            doc.insert(c.clone(), entries.into());
        }
        println!("{}", serde_json::Value::Object(doc));
        return Ok(());
    }

    let mut printed = false;
    for (c, debtors) in ledger.creditors() {
        if creditor.is_some_and(|only| only != c) {
            continue;
        }
        for (d, record) in debtors {
            if record.owes > 0 {
                println!("{} owes {}: {}", d, c, record.owes);
                printed = true;
            }
        }
    }
    if !printed {
        println!("All settled up.");
    }
    Ok(())
}

fn cmd_history(config: &Config, creditor: &str, debtor: &str) -> Result<()> {
    let ledger = load_ledger(config)?;
    if !ledger.has_creditor(creditor) {
        return Err(Error::MissingCreditor(creditor.to_string()));
    }
    let record = ledger.record(creditor, debtor)?.ok_or_else(|| Error::MissingDebtor {
        creditor: creditor.to_string(),
        debtor: debtor.to_string(),
    })?;

    if config.output_format == "json" {
        println!(
            "{}",
            serde_json::to_string_pretty(record).map_err(|e| Error::Serialize(e.to_string()))?
        );
        return Ok(());
    }

    println!("{} owes {}: {}", debtor, creditor, record.owes);
    for debt in &record.debts {
        println!("expense {} (outstanding {}):", debt.expense_id, debt.current_amount());
        for entry in &debt.history {
            println!(
                "  {:+} via expense {} -> {}",
                entry.grants, entry.expense_id, entry.amount
            );
        }
    }
    Ok(())
}
