//! Voltix: billing back-office CLI
//!
//! ```sh
//! # Register a customer
//! voltix customer register --name Ana --address "Main St 1" --email ana@x.com --phone 555-0001
//!
//! # Bill a consumption period
//! voltix invoice generate --customer-id 1 --kwh 250 --start 2024-01-01 --end 2024-01-31
//!
//! # List everything as JSON
//! voltix --json invoice list
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use serde::Serialize;
use tracing::{error, info, warn};

use voltix_billing::config::AppConfig;
use voltix_billing::domain::{
    Customer, DomainError, Invoice, NewCustomer, RepositoryProvider, TariffCalculator,
};
use voltix_billing::infrastructure::database::migrator::Migrator;
use voltix_billing::{
    default_config_path, init_database, CustomerService, InvoiceService, SeaOrmRepositoryProvider,
};

/// Electricity billing: customers, consumption periods and tiered invoices.
#[derive(Parser, Debug)]
#[command(name = "voltix", version)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "VOLTIX_CONFIG")]
    config: Option<PathBuf>,

    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Customer registry
    #[command(subcommand)]
    Customer(CustomerCommand),
    /// Invoices
    #[command(subcommand)]
    Invoice(InvoiceCommand),
    /// Tariff schedule
    #[command(subcommand)]
    Tariff(TariffCommand),
}

#[derive(Subcommand, Debug)]
enum CustomerCommand {
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
    },
    List,
    Show {
        id: i32,
    },
}

#[derive(Subcommand, Debug)]
enum InvoiceCommand {
    Generate {
        #[arg(long)]
        customer_id: i32,
        #[arg(long)]
        kwh: f64,
        /// First day of the period (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last day of the period (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
    },
    List,
}

#[derive(Subcommand, Debug)]
enum TariffCommand {
    /// Price a volume without recording anything
    Quote {
        #[arg(long)]
        kwh: f64,
    },
}

fn init_tracing(cfg: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cfg.logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig::default();
            init_tracing(&cfg);
            error!("Failed to load config: {}. Using defaults.", e);
            cfg
        }
    };

    // Quotes need no database
    if let Command::Tariff(TariffCommand::Quote { kwh }) = cli.command {
        let quote = TariffCalculator::quote(kwh);
        if cli.json {
            println!("{}", serde_json::to_string_pretty(&quote)?);
        } else {
            println!(
                "{} kWh -> {} tier, rate {:.2}/kWh, total {:.2}",
                quote.kwh, quote.tier, quote.rate, quote.total
            );
        }
        return Ok(ExitCode::SUCCESS);
    }

    // ── Database ───────────────────────────────────────────────
    let db_config = app_cfg.database_config();
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }

    // ── Services ───────────────────────────────────────────────
    let repos: Arc<dyn RepositoryProvider> = Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
    let customers = CustomerService::new(repos.clone());
    let invoices = InvoiceService::new(repos);

    let outcome = run(cli.command, cli.json, &customers, &invoices).await;

    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    }

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(CliError::Domain(e)) => {
            error!(error = %e, "Command failed");
            eprintln!("{}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
        Err(CliError::Output(e)) => Err(e.into()),
    }
}

enum CliError {
    Domain(DomainError),
    Output(serde_json::Error),
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Domain(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Output(e)
    }
}

async fn run(
    command: Command,
    json: bool,
    customers: &CustomerService,
    invoices: &InvoiceService,
) -> Result<(), CliError> {
    match command {
        Command::Customer(CustomerCommand::Register {
            name,
            address,
            email,
            phone,
        }) => {
            let customer = customers
                .register_customer(NewCustomer::new(name, address, email, phone))
                .await?;
            render(json, &customer, print_customers(std::slice::from_ref(&customer)))?;
        }
        Command::Customer(CustomerCommand::List) => {
            let all = customers.list_customers().await?;
            render(json, &all, print_customers(&all))?;
        }
        Command::Customer(CustomerCommand::Show { id }) => {
            let customer = customers.get_customer(id).await?;
            render(json, &customer, print_customers(std::slice::from_ref(&customer)))?;
        }
        Command::Invoice(InvoiceCommand::Generate {
            customer_id,
            kwh,
            start,
            end,
        }) => {
            let customer = customers.get_customer(customer_id).await?;
            let invoice = invoices
                .generate_invoice_for_period(&customer, kwh, start, end)
                .await?;
            render(json, &invoice, print_invoices(std::slice::from_ref(&invoice)))?;
        }
        Command::Invoice(InvoiceCommand::List) => {
            let all = invoices.list_invoices().await?;
            render(json, &all, print_invoices(&all))?;
        }
        Command::Tariff(TariffCommand::Quote { .. }) => {}
    }
    Ok(())
}

fn render<T: Serialize>(json: bool, value: &T, text: String) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text);
    }
    Ok(())
}

fn print_customers(customers: &[Customer]) -> String {
    customers
        .iter()
        .map(|c| format!("#{:<4} {:<20} {:<24} {:<24} {}\n", c.id, c.name, c.address, c.email, c.phone))
        .collect()
}

fn print_invoices(invoices: &[Invoice]) -> String {
    invoices
        .iter()
        .map(|i| {
            let c = i.consumption();
            format!(
                "#{:<4} {:<20} {} .. {} {:>10.2} kWh @ {:.2} = {:.2}\n",
                i.id(),
                i.customer().name,
                c.start_date,
                c.end_date,
                c.kwh,
                i.applied_rate(),
                i.total_to_pay()
            )
        })
        .collect()
}
