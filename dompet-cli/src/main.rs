use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::PathBuf;
use tracing::info;

use dompet_core::{Assistant, Ledger, TransactionKind, rupiah};
use dompet_ledger::{JsonLedger, MemoryLedger};

mod chat;
mod config;
mod logging;
mod state;

use config::{Backend, Config};

#[derive(Parser, Debug)]
#[command(name = "dompet", version, about = "Bilingual personal finance assistant")]
struct Cli {
    /// Ledger user id (default: config user.id)
    #[arg(long, global = true)]
    user: Option<String>,

    /// Display name recorded with transactions (default: config user.name)
    #[arg(long, global = true)]
    name: Option<String>,

    /// Ledger JSON file (default: ~/.dompet/ledger.json)
    #[arg(long, global = true)]
    ledger: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive chat on stdin; `exit` to leave
    Chat,

    /// Send one message and print the reply
    Say {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// List known categories
    Categories {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
    },

    /// Show the latest transactions
    Recent {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Totals and transaction count
    Stats,

    /// Manage ~/.dompet/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Resolved identity for this invocation
struct Session {
    user_id: String,
    username: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init(&cfg.log.level);

    let session = Session {
        user_id: cli.user.clone().unwrap_or_else(|| cfg.user.id.clone()),
        username: cli.name.clone().unwrap_or_else(|| cfg.user.name.clone()),
    };

    // config commands must work even when the ledger cannot be opened
    if let Command::Config { command } = &cli.command {
        return run_config(command);
    }

    match cfg.ledger.backend()? {
        Backend::Json => {
            let path = match cli.ledger.clone().or_else(|| cfg.ledger.path.clone()) {
                Some(p) => p,
                None => state::default_ledger_path()?,
            };
            let ledger = JsonLedger::open(&path)
                .with_context(|| format!("open ledger {}", path.display()))?;
            run(cli.command, &cfg, &session, ledger)
        }
        Backend::Memory => {
            if cli.ledger.is_some() {
                bail!("--ledger needs the json backend (config ledger.backend = \"json\")");
            }
            run(cli.command, &cfg, &session, MemoryLedger::new())
        }
    }
}

fn run<L: Ledger>(command: Command, cfg: &Config, session: &Session, ledger: L) -> Result<()> {
    let assistant = Assistant::new(ledger);

    match command {
        Command::Chat => {
            let mut log = if cfg.chat.transcript {
                Some(chat::ChatLog::open_today(&state::ensure_dompet_home()?)?)
            } else {
                None
            };
            if let Some(log) = &log {
                info!(path = %log.path().display(), "chat transcript");
            }
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            chat::chat_loop(stdin.lock(), &mut stdout, log.as_mut(), |text| {
                assistant.handle(&session.user_id, &session.username, text)
            })?;
        }

        Command::Say { text } => {
            let message = text.join(" ");
            println!(
                "{}",
                assistant.handle(&session.user_id, &session.username, &message)
            );
        }

        Command::Categories { kind } => {
            for name in assistant.ledger().available_categories(kind.map(Into::into))? {
                println!("{name}");
            }
        }

        Command::Recent { limit } => {
            let rows = assistant
                .ledger()
                .recent_transactions(&session.user_id, limit)?;
            if rows.is_empty() {
                println!("(no transactions)");
            }
            for tx in rows {
                println!(
                    "#{:<5} {} {:<7} {:>16}  {:<12} {}",
                    tx.id,
                    tx.timestamp.format("%Y-%m-%d %H:%M"),
                    tx.kind.as_str(),
                    rupiah(tx.amount),
                    tx.category,
                    tx.description
                );
            }
        }

        Command::Stats => {
            let ledger = assistant.ledger();
            let summary = ledger.balance(&session.user_id)?;
            let count = ledger.transaction_count(&session.user_id)?;
            println!("user:         {} ({})", session.user_id, session.username);
            println!("transactions: {count}");
            println!("income:       {}", rupiah(summary.income));
            println!("expense:      {}", rupiah(summary.expense));
            println!("balance:      {}", rupiah(summary.balance));
        }

        Command::Config { .. } => unreachable!("config commands return before a ledger is opened"),
    }

    Ok(())
}

fn run_config(command: &ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Init => config::init_config(),
        ConfigCommand::Show => config::show_config(),
    }
}
