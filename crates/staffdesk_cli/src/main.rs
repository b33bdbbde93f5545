//! Command-line probe for `staffdesk_core`.
//!
//! # Responsibility
//! - Wire configuration, logging and a record store the way a console
//!   front end would.
//! - Print records, dashboard statistics and CSV exports.

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use log::info;
use staffdesk_core::{
    csv_file_name, init_logging, load_catalogs, register, ConsoleConfig, EmployeeFields,
    EmployeeService, EmployeeStore, HttpContentApi, HttpNotifier, LocalEmployeeStore,
    RegistrationForm, RemoteEmployeeStore, StorageMode,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "staffdesk", about = "Employee console probe", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the employee list.
    List,
    /// Print dashboard counts as JSON-like lines.
    Stats,
    /// Write the employee list as CSV.
    Export {
        /// Output path; defaults to `employees_<date>.csv`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Create one basic-profile record and print it.
    Add {
        name: String,
        email: String,
        department: String,
        position: String,
    },
    /// Print remote department and position catalogs.
    Catalogs,
    /// Register a new console account.
    Register {
        username: String,
        email: String,
        password: String,
    },
    /// Print the core version.
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConsoleConfig::from_env().context("invalid staffdesk environment")?;

    if let Some(dir) = &config.log_dir {
        init_logging(&config.log_level, dir).map_err(anyhow::Error::msg)?;
    }

    match cli.command {
        Commands::Version => {
            println!("staffdesk_core version={}", staffdesk_core::core_version());
            Ok(())
        }
        Commands::Register {
            username,
            email,
            password,
        } => {
            let api = remote_api(&config)?;
            register(&api, &RegistrationForm::new(username, email, password))
                .await
                .map_err(|err| anyhow::anyhow!(err.message()))?;
            println!("registered");
            Ok(())
        }
        Commands::Catalogs => {
            let api = remote_api(&config)?;
            let catalogs = load_catalogs(&api).await?;
            for entry in &catalogs.departments {
                println!("department\t{}\t{}", entry.id, entry.name);
            }
            for entry in &catalogs.positions {
                println!("position\t{}\t{}", entry.id, entry.name);
            }
            Ok(())
        }
        command => match &config.mode {
            StorageMode::Local => {
                let store = LocalEmployeeStore::new(config.profile);
                run(build_service(store, &config)?, command).await
            }
            StorageMode::Remote(remote) => {
                let api = HttpContentApi::new(remote)?;
                let store = RemoteEmployeeStore::new(api, config.profile)
                    .with_page_size(remote.page_size);
                run(build_service(store, &config)?, command).await
            }
        },
    }
}

fn remote_api(config: &ConsoleConfig) -> Result<HttpContentApi> {
    match &config.mode {
        StorageMode::Remote(remote) => Ok(HttpContentApi::new(remote)?),
        StorageMode::Local => bail!("this command needs STAFFDESK_MODE=remote"),
    }
}

fn build_service<S: EmployeeStore>(store: S, config: &ConsoleConfig) -> Result<EmployeeService<S>> {
    let service = EmployeeService::new(store);
    Ok(match &config.notify_url {
        Some(url) => service.with_notifier(Arc::new(HttpNotifier::new(url.clone())?)),
        None => service,
    })
}

async fn run<S: EmployeeStore>(mut service: EmployeeService<S>, command: Commands) -> Result<()> {
    info!(
        "event=cli_run module=cli status=start mode={}",
        service.store().mode()
    );
    match command {
        Commands::List => {
            for employee in service.list().await? {
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    employee.id,
                    employee.name,
                    employee.email,
                    employee.department_label().unwrap_or("-"),
                    employee.position_label().unwrap_or("-"),
                );
            }
        }
        Commands::Stats => {
            service.list().await?;
            let stats = service.stats();
            println!("total={}", stats.total);
            for (label, count) in &stats.by_department {
                println!("department\t{label}\t{count}");
            }
            for (label, count) in &stats.by_position {
                println!("position\t{label}\t{count}");
            }
        }
        Commands::Export { out } => {
            service.list().await?;
            let path =
                out.unwrap_or_else(|| PathBuf::from(csv_file_name(Local::now().date_naive())));
            std::fs::write(&path, service.export_table().to_csv())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("wrote {}", path.display());
        }
        Commands::Add {
            name,
            email,
            department,
            position,
        } => {
            let employee = service
                .create(EmployeeFields::basic(name, email, department, position))
                .await?;
            let notification = service.notify_welcome(&employee).await;
            println!("created id={} notification={notification:?}", employee.id);
        }
        Commands::Version | Commands::Register { .. } | Commands::Catalogs => {
            bail!("command is handled before store setup")
        }
    }
    Ok(())
}
