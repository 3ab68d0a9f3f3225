mod config;
mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use admin_attributes::{
    AdminAttributesClient, Collaborators, LocalClient, Service, TenantId,
    TenantReconciliationReport,
};
use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use static_realm_plugin::StaticRealmPlugin;

use crate::config::AppConfig;

/// Admin attributes migration - provisions SCIM ids and admin groups
#[derive(Parser)]
#[command(name = "admin-attributes-migrate")]
#[command(about = "Admin attributes migration - provisions SCIM ids and admin groups")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Tenant to reconcile; repeat for several (default: every configured tenant)
    #[arg(short, long = "tenant", value_name = "ID", allow_negative_numbers = true)]
    tenants: Vec<TenantId>,

    /// Write a fresh SCIM id even when the admin already has one
    #[arg(long)]
    no_validate: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile admin attributes of the selected tenants
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::init_logging(&config.logging, cli.verbose)?;

    match cli.command.take().unwrap_or(Commands::Run) {
        Commands::Run => run(config, &cli).await,
        Commands::Check => check_config(&config),
    }
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.validate()?;
    println!("Configuration is valid");
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

async fn run(config: AppConfig, cli: &Cli) -> Result<()> {
    config.validate()?;

    let plugin = Arc::new(StaticRealmPlugin::from_config(&config.static_realm));
    let service = Service::new(
        config.admin_attributes,
        Collaborators {
            realm: plugin.clone(),
            claims: plugin.clone(),
            groups: plugin.clone(),
            primary_domain: plugin,
        },
    )?;
    let client: Arc<dyn AdminAttributesClient> = Arc::new(LocalClient::new(Arc::new(service)));

    let tenant_ids = if cli.tenants.is_empty() {
        config.static_realm.tenant_ids()
    } else {
        cli.tenants.clone()
    };
    if tenant_ids.is_empty() {
        tracing::warn!("No tenants configured, nothing to reconcile");
    }

    tracing::info!(tenants = tenant_ids.len(), "Reconciling admin attributes");
    let validate = !cli.no_validate;
    let reports = client.reconcile_tenants(&tenant_ids, validate).await;

    if cli.json {
        let rendered: Vec<Value> = reports.iter().map(report_json).collect();
        println!("{}", serde_json::to_string_pretty(&rendered)?);
    } else {
        for report in &reports {
            println!("{}", report_line(report));
        }
    }

    let failed = reports.iter().filter(|r| !r.is_success()).count();
    let writes: usize = reports
        .iter()
        .map(TenantReconciliationReport::writes_issued)
        .sum();
    if !cli.json {
        println!(
            "{} tenant(s) reconciled, {writes} write(s), {failed} failure(s)",
            reports.len()
        );
    }
    if failed > 0 {
        bail!("{failed} of {} tenant(s) failed to reconcile", reports.len());
    }
    Ok(())
}

fn stage_json<T: serde::Serialize, E: std::fmt::Display>(result: &Result<T, E>) -> Value {
    match result {
        Ok(outcome) => serde_json::to_value(outcome).unwrap_or(Value::Null),
        Err(e) => json!({ "outcome": "failed", "error": e.to_string() }),
    }
}

fn report_json(report: &TenantReconciliationReport) -> Value {
    json!({
        "tenant_id": report.tenant_id,
        "user": stage_json(&report.user),
        "group": stage_json(&report.group),
        "writes": report.writes_issued(),
    })
}

fn stage_label<T, E: std::fmt::Display>(
    result: &Result<T, E>,
    label: impl Fn(&T) -> &'static str,
) -> String {
    match result {
        Ok(outcome) => label(outcome).to_owned(),
        Err(e) => format!("failed ({e})"),
    }
}

fn report_line(report: &TenantReconciliationReport) -> String {
    use admin_attributes::{GroupReconciliation, UserReconciliation};

    let user = stage_label(&report.user, |u| match u {
        UserReconciliation::Written { .. } => "written",
        UserReconciliation::ProvisioningDisabled => "provisioning disabled",
        UserReconciliation::AlreadyValid { .. } => "already valid",
        UserReconciliation::Skipped { .. } => "skipped",
    });
    let group = stage_label(&report.group, |g| match g {
        GroupReconciliation::ProvisioningDisabled => "provisioning disabled",
        GroupReconciliation::Reconciled { .. } => "reconciled",
    });
    format!(
        "tenant {}: user {user}, group {group}, {} write(s)",
        report.tenant_id,
        report.writes_issued()
    )
}
