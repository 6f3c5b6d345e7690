use anyhow::{anyhow, bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dengue_client::{timeout_from_env_value, ClientConfig, NotificationClient};
use dengue_core::choices::choices_for;
use dengue_core::constants::DEFAULT_API_BASE_URL;
use dengue_core::{FieldKind, NotificationRecord, Section, Severity, TransientNotice, FIELDS};
use dengue_form::{Draft, FormController, NoticeSink, SubmitOutcome};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dengue")]
#[command(about = "Dengue notification intake CLI")]
struct Cli {
    /// API base URL (overrides DENGUE_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the API is reachable
    Health,
    /// Fill a notification form and submit it
    Submit {
        /// Text value, e.g. `--field cs_sexo=M`
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
        /// Date value, e.g. `--date dt_notific=2025-01-01`
        #[arg(long = "date", value_name = "NAME=YYYY-MM-DD")]
        dates: Vec<String>,
    },
    /// List stored notifications
    List,
    /// Show one notification
    Get {
        /// Notification id
        id: i64,
    },
    /// Change fields of a stored notification
    Update {
        /// Notification id
        id: i64,
        /// New text value, e.g. `--field febre=1`
        #[arg(long = "field", value_name = "NAME=VALUE")]
        fields: Vec<String>,
    },
    /// Delete a notification
    Delete {
        /// Notification id
        id: i64,
    },
    /// Print the field catalog
    Fields,
}

/// Default log filter; the target is the binary name.
const LOG_DIRECTIVE: &str = "dengue=warn";

/// Prints notices to the terminal as they arrive.
struct PrintNotices;

impl NoticeSink for PrintNotices {
    fn show(&self, notice: TransientNotice) {
        match notice.severity {
            Severity::Success => println!("[{}] {}", notice.severity, notice.message),
            Severity::Warning | Severity::Error => {
                eprintln!("[{}] {}", notice.severity, notice.message)
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'dengue --help' for commands");
        return Ok(());
    };

    match command {
        Commands::Fields => print_fields(),
        Commands::Health => {
            let notices: Arc<dyn NoticeSink> = Arc::new(PrintNotices);
            let (_form, probe) = FormController::initialize(build_client(cli.api_url)?, notices);
            if !probe.await? {
                bail!("API is unreachable");
            }
        }
        Commands::Submit { fields, dates } => {
            submit(build_client(cli.api_url)?, &fields, &dates).await?
        }
        Commands::List => {
            let envelope = build_client(cli.api_url)?.list().await?;
            let records = envelope.data.unwrap_or_default();
            if records.is_empty() {
                println!("No notifications found.");
            }
            for record in records {
                println!("{}", summary(&record));
            }
        }
        Commands::Get { id } => {
            let envelope = build_client(cli.api_url)?.get_by_id(id).await?;
            let record = envelope
                .data
                .ok_or_else(|| anyhow!("response carried no notification"))?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Update { id, fields } => {
            let client = build_client(cli.api_url)?;
            let current = client
                .get_by_id(id)
                .await?
                .data
                .ok_or_else(|| anyhow!("response carried no notification"))?;
            let mut draft = Draft::from_record(&current);
            for assignment in &fields {
                let (name, value) = split_assignment(assignment)?;
                draft.set(name, value)?;
            }
            let envelope = client.update(id, &draft.to_record()).await?;
            println!(
                "{}",
                envelope.message.as_deref().unwrap_or("Notificação atualizada")
            );
        }
        Commands::Delete { id } => {
            let envelope = build_client(cli.api_url)?.delete(id).await?;
            println!(
                "{}",
                envelope.message.as_deref().unwrap_or("Notificação removida")
            );
        }
    }

    Ok(())
}

fn build_client(api_url: Option<String>) -> anyhow::Result<NotificationClient> {
    let base_url = api_url
        .or_else(|| std::env::var("DENGUE_API_URL").ok())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.into());
    let timeout = timeout_from_env_value(std::env::var("DENGUE_API_TIMEOUT_SECS").ok())?;

    let config = ClientConfig::new(&base_url, timeout)?;
    tracing::debug!("using API at {}", config.base_url());
    NotificationClient::new(config).context("failed to build HTTP client")
}

async fn submit(
    client: NotificationClient,
    fields: &[String],
    dates: &[String],
) -> anyhow::Result<()> {
    let notices: Arc<dyn NoticeSink> = Arc::new(PrintNotices);
    let (mut form, probe) = FormController::initialize(client, notices);

    for assignment in fields {
        let (name, value) = split_assignment(assignment)?;
        form.draft_mut().set(name, value)?;
    }
    for assignment in dates {
        let (name, value) = split_assignment(assignment)?;
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .with_context(|| format!("'{value}' is not a YYYY-MM-DD date"))?;
        form.draft_mut().set(name, date)?;
    }

    // Let the probe's notice print first; its result does not gate the submit.
    probe.await?;

    match form.submit().await {
        SubmitOutcome::Created(envelope) => {
            if let Some(id) = envelope.data.and_then(|record| record.id) {
                println!("id: {id}");
            }
            Ok(())
        }
        SubmitOutcome::Rejected(reason) => Err(reason.into()),
        SubmitOutcome::Failed(err) => Err(err.into()),
    }
}

/// Split `name=value`; the value may itself contain `=`.
fn split_assignment(assignment: &str) -> anyhow::Result<(&str, &str)> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value)),
        _ => bail!("expected NAME=VALUE, got '{assignment}'"),
    }
}

fn summary(record: &NotificationRecord) -> String {
    let id = record
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".into());
    format!(
        "ID: {}, Notificado: {}, UF: {}, Sexo: {}",
        id,
        record.dt_notific.as_deref().unwrap_or("-"),
        record.sg_uf_not.as_deref().unwrap_or("-"),
        record.cs_sexo.as_deref().unwrap_or("-"),
    )
}

fn print_fields() {
    for section in Section::ALL {
        println!("{}", section.title());
        for spec in FIELDS.iter().filter(|spec| spec.section == section) {
            let mut flags = Vec::new();
            if spec.required {
                flags.push("obrigatório");
            }
            if spec.kind == FieldKind::Date {
                flags.push("data");
            }
            let flags = if flags.is_empty() {
                String::new()
            } else {
                format!(" ({})", flags.join(", "))
            };
            println!("  {:<12} {}{}", spec.name, spec.label, flags);

            if let Some(options) = choices_for(spec.name) {
                let options: Vec<String> = options
                    .iter()
                    .map(|option| format!("{}={}", option.value, option.label))
                    .collect();
                println!("  {:<12}   {}", "", options.join("; "));
            }
        }
    }
}
