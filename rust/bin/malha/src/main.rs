//! `malha`: admin client for the malha ERP API.
//!
//! Manages contexts and sessions, and lists, searches and edits every
//! ERP collection from the terminal.

mod commands;
mod config;
mod views;

use std::io::Write;

use clap::{Parser, Subcommand};

/// malha ERP CLI.
#[derive(Parser, Debug)]
#[command(name = "malha", about = "malha ERP admin client")]
struct Cli {
    /// Path to client config file (default: ~/.malha/config.toml).
    #[arg(long = "config", global = true)]
    config: Option<String>,

    /// Output format: table or json.
    #[arg(long = "output", short = 'o', global = true, default_value = "table")]
    output: String,

    /// Log requests and store updates to stderr.
    #[arg(long = "verbose", short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Manage contexts (one per ERP server).
    #[command(name = "context")]
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
        /// Username.
        #[arg(long)]
        user: Option<String>,
        /// Password (prefer the interactive prompt).
        #[arg(long)]
        password: Option<String>,
    },

    /// Logout: clear the session of the current context.
    Logout,

    /// List resources, or get one by ID.
    Get {
        /// Resource type (e.g. customers, colors, sales).
        resource: String,
        /// Optional resource ID for single get.
        id: Option<String>,
        /// Only show rows matching this text.
        #[arg(long, short = 's')]
        search: Option<String>,
    },

    /// Create a resource.
    Create {
        /// Resource type.
        resource: String,
        /// JSON body.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read JSON from file.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },

    /// Update a resource (PUT).
    Update {
        /// Resource type.
        resource: String,
        /// Resource ID.
        id: String,
        /// JSON body.
        #[arg(long = "json")]
        json_body: Option<String>,
        /// Read JSON from file.
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },

    /// Delete a resource.
    Delete {
        /// Resource type.
        resource: String,
        /// Resource ID.
        id: String,
        /// Skip confirmation.
        #[arg(long = "yes", short = 'y')]
        yes: bool,
    },

    /// Sales totals and the latest sales.
    Dashboard,

    /// Check server status.
    Status,

    /// Show version.
    Version,
}

#[derive(Subcommand, Debug)]
enum ContextAction {
    /// Create a new context.
    Create {
        /// Context name.
        name: String,
        /// API base URL.
        #[arg(long)]
        server: String,
    },
    /// List all contexts.
    List,
    /// Set properties on a context.
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

/// JSON from `--json` or `-f <file>`.
fn read_body(json_body: Option<String>, file: Option<String>) -> anyhow::Result<String> {
    if let Some(path) = file {
        Ok(std::fs::read_to_string(&path)?)
    } else if let Some(json) = json_body {
        Ok(json)
    } else {
        anyhow::bail!("Provide --json or -f <file>.");
    }
}

fn prompt(label: &str) -> anyhow::Result<String> {
    eprint!("{}", label);
    std::io::stderr().flush()?;
    let mut s = String::new();
    std::io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .map(std::path::PathBuf::from)
        .unwrap_or_else(config::ClientConfig::default_path);
    let output_json = match cli.output.as_str() {
        "json" => true,
        "table" => false,
        other => anyhow::bail!("Unknown output format: {} (use table or json).", other),
    };

    match cli.command {
        Commands::Context { action } => match action {
            ContextAction::Create { name, server } => {
                commands::context::create(&name, &server, &config_path)?;
            }
            ContextAction::List => {
                commands::context::list(&config_path)?;
            }
            ContextAction::Set { name, server } => {
                commands::context::set(&name, server.as_deref(), &config_path)?;
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

        Commands::Login { user, password } => {
            let username = match user {
                Some(u) => u,
                None => prompt("Username: ")?,
            };
            let password = match password {
                Some(p) => p,
                None => rpassword::prompt_password("Password: ")?,
            };
            if username.is_empty() || password.is_empty() {
                anyhow::bail!("Username and password are required.");
            }
            commands::login::login(&username, &password, &config_path).await?;
        }

        Commands::Logout => {
            commands::login::logout(&config_path).await?;
        }

        Commands::Get { resource, id, search } => {
            commands::resource::get(
                &resource,
                id.as_deref(),
                search.as_deref(),
                output_json,
                &config_path,
            )
            .await?;
        }

        Commands::Create {
            resource,
            json_body,
            file,
        } => {
            let body = read_body(json_body, file)?;
            commands::resource::create(&resource, &body, &config_path).await?;
        }

        Commands::Update {
            resource,
            id,
            json_body,
            file,
        } => {
            let body = read_body(json_body, file)?;
            commands::resource::update(&resource, &id, &body, &config_path).await?;
        }

        Commands::Delete { resource, id, yes } => {
            if !yes {
                let answer = prompt(&format!("Delete {} {}? [y/N]: ", resource, id))?;
                if !answer.eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
            commands::resource::delete(&resource, &id, &config_path).await?;
        }

        Commands::Dashboard => {
            commands::dashboard::show(output_json, &config_path).await?;
        }

        Commands::Status => {
            commands::resource::status(&config_path).await?;
        }

        Commands::Version => {
            println!("malha cli v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
