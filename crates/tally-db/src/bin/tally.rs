//! # tally: Invoice Command Line
//!
//! Thin calling layer over tally-core and tally-db.
//!
//! ## Usage
//! ```bash
//! # Create an invoice from a JSON request, prints {invoice_number, created_at}
//! cargo run -p tally-db --bin tally -- create ./request.json
//!
//! # Show a stored invoice, prints the rendered invoice as JSON
//! cargo run -p tally-db --bin tally -- show 42
//!
//! # Database location and limits come from the environment
//! TALLY_DATABASE_PATH=./data/tally.db RUST_LOG=debug cargo run -p tally-db --bin tally -- show 42
//! ```
//!
//! ## Exit Codes
//! | Code | Meaning                                   |
//! |------|-------------------------------------------|
//! | 0    | Success                                   |
//! | 1    | Storage unavailable / configuration error |
//! | 2    | Invalid request or usage                  |
//! | 3    | Constraint violation                      |
//! | 4    | Invoice not found                         |

use std::env;
use std::fs;
use std::process::ExitCode;

use tally_core::view::InvoiceView;
use tally_core::{CoreError, CreateInvoiceRequest, CreatedInvoice, NewInvoice};
use tally_db::{ConfigError, Database, DbConfig, DbError, ErrorKind};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: tally <COMMAND>

Commands:
  create <request.json>   Create an invoice from a JSON request
  show <invoice_number>   Print a stored invoice

Environment:
  TALLY_DATABASE_PATH              SQLite file (default: tally.db)
  TALLY_DB_MAX_CONNECTIONS         Pool size (default: 5)
  TALLY_DB_CONNECT_TIMEOUT_SECS    Pool acquire timeout (default: 30)
  TALLY_DB_OPERATION_TIMEOUT_SECS  Per-operation deadline (default: 10)
  RUST_LOG                         Log filter (default: info)";

#[derive(Debug)]
enum Command {
    Create { request_path: String },
    Show { invoice_number: i64 },
    Help,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("Invalid request: {0}")]
    Request(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Usage(_) | CliError::Request(_) | CliError::Core(_) => 2,
            CliError::Config(_) => 1,
            CliError::Db(err) => match err.kind() {
                ErrorKind::NotFound => 4,
                ErrorKind::ConstraintViolation => 3,
                ErrorKind::StorageUnavailable => 1,
            },
        }
    }
}

fn parse_args(args: &[String]) -> Result<Command, CliError> {
    match args {
        [cmd, path] if cmd == "create" => Ok(Command::Create {
            request_path: path.clone(),
        }),
        [cmd, number] if cmd == "show" => {
            let invoice_number = number
                .parse()
                .map_err(|_| CliError::Usage(format!("'{}' is not an invoice number", number)))?;
            Ok(Command::Show { invoice_number })
        }
        [cmd] if cmd == "--help" || cmd == "-h" => Ok(Command::Help),
        [] => Err(CliError::Usage("Missing command".to_string())),
        _ => Err(CliError::Usage(format!("Unrecognized arguments: {}", args.join(" ")))),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn create(db: &Database, request_path: &str) -> Result<String, CliError> {
    let raw = fs::read_to_string(request_path)
        .map_err(|e| CliError::Request(format!("{}: {}", request_path, e)))?;
    let request: CreateInvoiceRequest =
        serde_json::from_str(&raw).map_err(|e| CliError::Request(e.to_string()))?;

    let new_invoice = NewInvoice::from_request(&request)?;
    let aggregate = db.invoice_writer().create_invoice(&new_invoice).await?;

    let created = CreatedInvoice::from(&aggregate);
    serde_json::to_string_pretty(&created).map_err(|e| CliError::Request(e.to_string()))
}

async fn show(db: &Database, invoice_number: i64) -> Result<String, CliError> {
    let aggregate = db.invoice_reader().get_invoice(invoice_number).await?;
    let view = InvoiceView::from(&aggregate);
    serde_json::to_string_pretty(&view).map_err(|e| CliError::Request(e.to_string()))
}

async fn run(command: Command) -> Result<(), CliError> {
    let db = Database::new(DbConfig::from_env()?).await?;

    let output = match command {
        Command::Create { request_path } => create(&db, &request_path).await,
        Command::Show { invoice_number } => show(&db, invoice_number).await,
        Command::Help => Ok(USAGE.to_string()),
    };

    db.close().await;
    println!("{}", output?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let result = match parse_args(&args) {
        Ok(Command::Help) => {
            println!("{}", USAGE);
            Ok(())
        }
        Ok(command) => run(command).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(()) => {
            info!("Done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("{}", err);
            if matches!(err, CliError::Usage(_)) {
                eprintln!("\n{}", USAGE);
            }
            ExitCode::from(err.exit_code())
        }
    }
}
