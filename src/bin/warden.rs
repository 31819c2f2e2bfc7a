//! Warden CLI
//!
//! One-shot subcommands and an interactive shell over a local store.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};
use warden::command::{Command, CommandHandler, CommandType};
use warden::config::DEFAULT_BLOCK_SIZE;
use warden::{Config, Engine, SyncMode, WardenError};

/// Warden
#[derive(Parser, Debug)]
#[command(name = "warden")]
#[command(about = "Local credential vault")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./warden_data")]
    data_dir: PathBuf,

    /// Block size in bytes (must match the existing store)
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    block_size: usize,

    /// Skip fsync on writes
    #[arg(long)]
    no_sync: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Store a new credential
    Add {
        service: String,
        username: String,
        secret: String,
    },

    /// Show a credential
    Get { service: String },

    /// Replace an existing credential
    Update {
        service: String,
        username: String,
        secret: String,
    },

    /// Remove a credential
    Delete { service: String },

    /// List stored services
    List,

    /// Generate a random secret
    Generate {
        /// Length (8-128, default 16)
        length: Option<usize>,
    },

    /// Report orphaned blocks and dangling keys
    Scan,

    /// Interactive prompt
    Shell,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let sync_mode = if args.no_sync {
        SyncMode::None
    } else {
        SyncMode::Full
    };

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .block_size(args.block_size)
        .sync_mode(sync_mode)
        .build();

    // Open engine
    let engine = match Engine::open(config) {
        Ok(e) => e,
        Err(e) => {
            tracing::error!("Failed to open store: {}", e);
            std::process::exit(1);
        }
    };

    let mut handler = CommandHandler::new(engine);

    let command = match args.command {
        Commands::Add {
            service,
            username,
            secret,
        } => Command::Add {
            service,
            username,
            secret,
        },
        Commands::Get { service } => Command::Get { service },
        Commands::Update {
            service,
            username,
            secret,
        } => Command::Update {
            service,
            username,
            secret,
        },
        Commands::Delete { service } => Command::Delete { service },
        Commands::List => Command::List,
        Commands::Generate { length } => Command::Generate { length },
        Commands::Scan => {
            std::process::exit(run_scan(&handler));
        }
        Commands::Shell => {
            if let Err(e) = run_shell(&mut handler) {
                tracing::error!("Shell error: {}", e);
                std::process::exit(1);
            }
            return;
        }
    };

    match handler.execute(command) {
        Ok(reply) => println!("{}", reply),
        Err(e) => {
            eprintln!("{}", describe_error(&e));
            std::process::exit(1);
        }
    }
}

/// Print a consistency report, returning the process exit code
fn run_scan(handler: &CommandHandler) -> i32 {
    match handler.engine().scan() {
        Ok(report) if report.is_clean() => {
            println!("Store is consistent");
            0
        }
        Ok(report) => {
            for id in &report.orphaned_blocks {
                println!("orphaned block: {}", id);
            }
            for key in &report.dangling_keys {
                println!("dangling key: {}", key);
            }
            1
        }
        Err(e) => {
            eprintln!("{}", describe_error(&e));
            1
        }
    }
}

/// Read commands from stdin until `exit` or end of input
fn run_shell(handler: &mut CommandHandler) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("Welcome to Warden Password Manager. Type help or ? to list commands.");

    loop {
        print!("warden> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            println!();
            break;
        }

        match line.trim() {
            "exit" | "quit" => {
                println!("Goodbye!");
                break;
            }
            "help" | "?" => {
                print_help();
                continue;
            }
            _ => {}
        }

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", describe_error(&e));
                continue;
            }
        };

        match handler.execute(command) {
            Ok(reply) => println!("{}", reply),
            Err(e) => println!("{}", describe_error(&e)),
        }
    }

    Ok(())
}

fn print_help() {
    let commands = [
        CommandType::Add,
        CommandType::Get,
        CommandType::Update,
        CommandType::Delete,
        CommandType::List,
        CommandType::Generate,
    ];
    println!("Commands:");
    for command in commands {
        println!("  {}", command.usage());
    }
    println!("  exit");
}

/// Turn an error into the message shown to the user
fn describe_error(error: &WardenError) -> String {
    match error {
        WardenError::DuplicateKey(service) => format!("Service {} already exists", service),
        WardenError::KeyNotFound(service) => format!("No entry found for service: {}", service),
        WardenError::CapacityExceeded { size, capacity } => format!(
            "Entry too large: {} bytes, a block holds {}. Shorten the input.",
            size, capacity
        ),
        WardenError::InvalidInput(reason) => reason.clone(),
        other => format!("Error: {}", other),
    }
}
