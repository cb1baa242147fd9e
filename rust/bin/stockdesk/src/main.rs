//! `stockdesk`: the StockDesk inventory CLI.
//!
//! Every screen of the web front end has a subcommand here. Commands
//! drive the same Flux handlers a UI would: emit a request, read the
//! resulting state, print it.

mod commands;
mod config;
mod render;
mod shell;

use std::path::PathBuf;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use stockdesk_core::{Company, Customer, DueRecord, PaymentMode, Product, Purchase, Sale, TransactionKind, User, Vendor};

use commands::bills::{BillFile, BillKind};
use commands::records::{self, Record};
use config::ClientConfig;
use render::Output;
use shell::Shell;

/// StockDesk CLI tool.
#[derive(Parser, Debug)]
#[command(name = "stockdesk", about = "StockDesk inventory CLI client")]
struct Cli {
    /// Path to client config file (default: ~/.stockdesk/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format.
    #[arg(long = "output", short = 'o', global = true, value_enum, default_value = "table")]
    output: Output,

    /// Rows per page for list commands (default: the context's, or 10).
    #[arg(long = "page-size", global = true)]
    page_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage contexts (one per backend).
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Switch the current context.
    #[command(name = "use")]
    Use {
        #[command(subcommand)]
        what: UseWhat,
    },

    /// Login to the current context's server.
    Login {
        #[arg(long)]
        email: Option<String>,
        /// Password (not recommended; prompts when omitted).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout and clear the saved session.
    Logout,

    /// Show the current context and session.
    Status,

    /// Show version.
    Version,

    Customers {
        #[command(subcommand)]
        action: RecordAction,
    },

    Vendors {
        #[command(subcommand)]
        action: RecordAction,
    },

    Products {
        #[command(subcommand)]
        action: ProductAction,
    },

    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    Sales {
        #[command(subcommand)]
        action: BillAction,
    },

    Purchases {
        #[command(subcommand)]
        action: BillAction,
    },

    /// Work out bill totals offline.
    Bill {
        #[command(subcommand)]
        action: QuoteAction,
    },

    Dues {
        #[command(subcommand)]
        action: DueAction,
    },

    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        name: String,
        /// API base URL, e.g. http://localhost:8080/api.
        #[arg(long)]
        server: String,
    },
    /// List all contexts.
    List,
    /// Set properties on a context (`--page-size` sets its default).
    Set {
        name: String,
        #[arg(long)]
        server: Option<String>,
    },
    /// Delete a context.
    Delete { name: String },
}

#[derive(Subcommand, Debug)]
enum UseWhat {
    /// Switch to a context.
    Context { name: String },
}

#[derive(Subcommand, Debug)]
enum RecordAction {
    /// List records, one page at a time.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<usize>,
    },
    /// Show one record.
    Show { id: String },
    /// Create a record from JSON.
    Add {
        #[arg(long = "json")]
        json_body: Option<String>,
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
    /// Change fields of a record. Unlisted fields are kept.
    Edit {
        id: String,
        #[arg(long = "json")]
        json_body: Option<String>,
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
    /// Delete a record.
    Delete {
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum ProductAction {
    #[command(flatten)]
    Record(RecordAction),
    /// Show pricing and stock.
    Info { id: String },
}

#[derive(Subcommand, Debug)]
enum UserAction {
    #[command(flatten)]
    Record(RecordAction),
    Block { id: String },
    Unblock { id: String },
    /// Change a user's role (1-5 or a role name).
    Role { id: String, role: String },
}

#[derive(Subcommand, Debug)]
enum BillAction {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<usize>,
    },
    Show { id: String },
    /// Record a bill from a JSON bill file.
    Create {
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
        /// Price the bill and print it without saving.
        #[arg(long)]
        dry_run: bool,
    },
    /// Apply a bill file over an existing bill and save it.
    Edit {
        id: String,
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
    },
    Delete {
        id: String,
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum QuoteAction {
    /// Totals for a bill file. Every row must carry its unit_cost.
    Quote {
        #[arg(short = 'f', long = "file")]
        file: PathBuf,
        #[arg(long, value_enum, default_value = "sale")]
        kind: BillKind,
    },
}

#[derive(Subcommand, Debug)]
enum DueAction {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        page: Option<usize>,
    },
    /// Record a payment against a due.
    Pay {
        id: String,
        #[arg(long)]
        amount: f64,
        /// Payment mode: code (1-6) or name.
        #[arg(long, default_value = "cash")]
        mode: PaymentMode,
        /// Payment date (default: today).
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileAction {
    Show,
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        mobile: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },
    /// Change your password (prompts).
    Password,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config_path = cli
        .config
        .map(PathBuf::from)
        .unwrap_or_else(ClientConfig::default_path);
    let output = cli.output;

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, &server, cli.page_size, &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(output, &config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), cli.page_size, &config_path)?;
            }
            ContextAction::Delete { name } => {
                commands::context::delete(&name, &config_path)?;
            }
        },

        Commands::Use { what } => match what {
            UseWhat::Context { name } => {
                commands::context::use_context(&name, &config_path)?;
            }
        },

        Commands::Version => {
            println!("stockdesk cli v{}", env!("CARGO_PKG_VERSION"));
        }

        Commands::Bill { action } => match action {
            QuoteAction::Quote { file, kind } => {
                let bill = BillFile::read(&file)?;
                let draft = commands::bills::quote(kind.into(), &bill)?;
                // Quotes work offline; the saved company only picks the currency.
                let company: Option<Company> = ClientConfig::load(&config_path)?
                    .current()
                    .and_then(|ctx| serde_json::from_str(&ctx.selected_company).ok());
                let banner = stockdesk_bff::state::CompanyBanner::from_company(company.as_ref());
                commands::bills::print_draft(&draft, &banner, output)?;
            }
        },

        command => {
            let shell = Shell::open(&config_path, output, cli.page_size).await?;
            run(&shell, command, &config_path).await?;
        }
    }

    Ok(())
}

/// Commands that talk to the current context's server.
async fn run(shell: &Shell, command: Commands, config_path: &std::path::Path) -> anyhow::Result<()> {
    match command {
        Commands::Login { email, password } => {
            let email = match email {
                Some(email) => email,
                None => commands::prompt("Email")?,
            };
            let password = match password {
                Some(password) => password,
                None => rpassword::prompt_password("Password: ")?,
            };
            commands::login::login(shell, email, password).await
        }

        Commands::Logout => commands::login::logout(shell).await,

        Commands::Status => {
            let config = ClientConfig::load(config_path)?;
            let ctx = config.current().ok_or_else(|| anyhow!("No current context."))?;
            commands::login::status(shell, &ctx.name, &ctx.server).await
        }

        Commands::Customers { action } => run_records::<Customer>(shell, action).await,
        Commands::Vendors { action } => run_records::<Vendor>(shell, action).await,

        Commands::Products { action } => match action {
            ProductAction::Record(action) => run_records::<Product>(shell, action).await,
            ProductAction::Info { id } => records::product_info(shell, &id).await,
        },

        Commands::Users { action } => match action {
            UserAction::Record(action) => run_records::<User>(shell, action).await,
            UserAction::Block { id } => commands::users::set_blocked(shell, &id, true).await,
            UserAction::Unblock { id } => commands::users::set_blocked(shell, &id, false).await,
            UserAction::Role { id, role } => {
                let role = commands::users::parse_role(&role)?;
                commands::users::set_role(shell, &id, role).await
            }
        },

        Commands::Sales { action } => run_bills::<Sale>(shell, TransactionKind::Sale, action).await,
        Commands::Purchases { action } => run_bills::<Purchase>(shell, TransactionKind::Purchase, action).await,

        Commands::Dues { action } => match action {
            DueAction::List { search, page } => records::list::<DueRecord>(shell, search, page).await,
            DueAction::Pay { id, amount, mode, date, note } => {
                commands::dues::pay(shell, &id, amount, mode, date, note).await
            }
        },

        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(shell).await,
            ProfileAction::Update { name, email, mobile, country } => {
                let changes = commands::profile::ProfileChanges { name, email, mobile, country };
                commands::profile::update(shell, changes).await
            }
            ProfileAction::Password => {
                let current = rpassword::prompt_password("Current password: ")?;
                let new = rpassword::prompt_password("New password: ")?;
                let confirm = rpassword::prompt_password("Confirm new password: ")?;
                commands::profile::change_password(shell, current, new, confirm).await
            }
        },

        Commands::Context { .. } | Commands::Use { .. } | Commands::Version | Commands::Bill { .. } => Ok(()),
    }
}

async fn run_records<T: Record>(shell: &Shell, action: RecordAction) -> anyhow::Result<()> {
    match action {
        RecordAction::List { search, page } => records::list::<T>(shell, search, page).await,
        RecordAction::Show { id } => records::show::<T>(shell, &id).await,
        RecordAction::Add { json_body, file } => {
            let body = records::read_body(json_body, file)?;
            records::add::<T>(shell, body).await
        }
        RecordAction::Edit { id, json_body, file } => {
            let body = records::read_body(json_body, file)?;
            records::edit::<T>(shell, &id, body).await
        }
        RecordAction::Delete { id, yes } => {
            if !yes && !commands::confirm(&format!("Delete {} {}?", T::LABEL.to_lowercase(), id))? {
                println!("Cancelled.");
                return Ok(());
            }
            records::delete::<T>(shell, &id).await
        }
    }
}

async fn run_bills<T: Record>(shell: &Shell, kind: TransactionKind, action: BillAction) -> anyhow::Result<()> {
    match action {
        BillAction::List { search, page } => records::list::<T>(shell, search, page).await,
        BillAction::Show { id } => commands::bills::show(shell, kind, &id).await,
        BillAction::Create { file, dry_run } => {
            let bill = BillFile::read(&file)?;
            commands::bills::create(shell, kind, &bill, dry_run).await
        }
        BillAction::Edit { id, file } => {
            let bill = BillFile::read(&file)?;
            commands::bills::edit(shell, kind, &id, &bill).await
        }
        BillAction::Delete { id, yes } => {
            if !yes && !commands::confirm(&format!("Delete {} {}?", T::LABEL.to_lowercase(), id))? {
                println!("Cancelled.");
                return Ok(());
            }
            records::delete::<T>(shell, &id).await
        }
    }
}
