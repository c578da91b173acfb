//! Outreach dashboard command line.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use n8n_client::{N8nClient, SearchParams};
use outreach_dashboard::models::{Lead, LeadStatus};
use outreach_dashboard::transform::{EnrichmentRow, LeadRow};
use outreach_dashboard::{
    export, templates, AppConfig, AppState, Dashboard, DashboardStats, LeadFilter, ScoreTier,
    SearchReport,
};

#[derive(Parser)]
#[command(name = "outreach")]
#[command(version, about = "Lead outreach dashboard for n8n pipelines", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// n8n base URL (overrides N8N_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// n8n API key (overrides N8N_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Workflow id (overrides N8N_WORKFLOW_ID)
    #[arg(long, global = true)]
    workflow_id: Option<String>,

    /// Skip the connection check and use demo data
    #[arg(long, global = true)]
    demo: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the connection to n8n
    Status,

    /// Show the pipeline stages of the workflow
    Workflow,

    /// Run a lead search and follow it to completion
    Search {
        /// Job titles, comma separated
        #[arg(long)]
        titles: Option<String>,

        /// Companies, comma separated
        #[arg(long)]
        companies: Option<String>,

        #[arg(long)]
        keywords: Option<String>,

        #[arg(long)]
        location: Option<String>,

        #[arg(long)]
        industry: Option<String>,

        /// Company size bands, e.g. 51-200
        #[arg(long = "size", value_name = "BAND")]
        sizes: Vec<String>,

        /// Number of leads to fetch
        #[arg(short, long, default_value_t = 25)]
        count: u32,

        /// Trigger through this webhook path instead of the REST API
        #[arg(long, value_name = "PATH")]
        webhook: Option<String>,

        /// Stop polling after this many status checks
        #[arg(long)]
        max_attempts: Option<u32>,

        /// Stop polling after this many seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// List recent executions
    Executions {
        #[arg(short, long, default_value_t = 10)]
        limit: u32,
    },

    /// List, import or export leads
    Leads {
        /// Only leads with this status
        #[arg(long)]
        status: Option<LeadStatus>,

        /// Only leads in this score tier (high, medium, low)
        #[arg(long)]
        score: Option<ScoreTier>,

        /// Replace the lead list with sheet rows from a JSON file
        #[arg(long, value_name = "FILE")]
        import: Option<PathBuf>,

        /// Enrichment rows (JSON) joined to imported leads
        #[arg(long, value_name = "FILE", requires = "import")]
        enrichment: Option<PathBuf>,

        /// Write the filtered list as CSV into this directory
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Send an outreach message to a lead
    Send {
        lead_id: String,

        /// Message text
        #[arg(short, long, conflicts_with = "template", required_unless_present = "template")]
        message: Option<String>,

        /// Template id or name
        #[arg(short, long)]
        template: Option<String>,
    },

    /// List message templates
    Templates,

    /// Show headline statistics
    Stats,

    /// Show the activity feed
    Activity {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,outreach_dashboard=debug,n8n_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if let Some(url) = cli.base_url {
        config.n8n.base_url = url;
    }
    if let Some(key) = cli.api_key {
        config.n8n.api_key = key;
    }
    if let Some(id) = cli.workflow_id {
        config.n8n.workflow_id = id;
    }
    tracing::debug!(n8n = ?config.n8n, "Configuration loaded");

    let client = N8nClient::new(&config.n8n);
    let mut dashboard = Dashboard::new(client, config.dashboard.settings());

    if cli.demo {
        dashboard.use_demo_data();
    } else {
        dashboard.check_connection().await;
        if let Err(e) = dashboard.fetch_workflow().await {
            tracing::warn!(error = %e, "Could not load workflow");
        }
    }

    match cli.command {
        Commands::Status => {
            let state = dashboard.state();
            println!("n8n:       {}", config.n8n.base_url);
            println!("status:    {}", state.connection_status());
            println!(
                "data:      {}",
                if state.use_mock_data { "demo" } else { "live" }
            );
        }

        Commands::Workflow => {
            let state = dashboard.state();
            if let Some(workflow) = &state.workflow {
                println!("{} ({})", workflow.name, workflow.id);
            }
            print_nodes(state);
        }

        Commands::Search {
            titles,
            companies,
            keywords,
            location,
            industry,
            sizes,
            count,
            webhook,
            max_attempts,
            timeout_secs,
        } => {
            let settings = dashboard.settings_mut();
            if webhook.is_some() {
                settings.webhook_path = webhook;
            }
            if let Some(max) = max_attempts {
                settings.poll = settings.poll.clone().with_max_attempts(max);
            }
            if let Some(secs) = timeout_secs {
                settings.poll = settings.poll.clone().with_timeout(Duration::from_secs(secs));
            }

            let params = SearchParams {
                keywords,
                current_titles: titles,
                current_companies: companies,
                location,
                industry,
                company_sizes: (!sizes.is_empty()).then_some(sizes),
                count,
            };

            let cancel = dashboard.cancel_handle();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Interrupt received, cancelling search");
                    cancel.cancel();
                }
            });

            let report = dashboard.trigger_search(params).await;
            print_nodes(dashboard.state());

            match report? {
                SearchReport::Demo { leads_found } => {
                    println!("Demo search complete: {leads_found} leads");
                }
                SearchReport::Finished(execution) => {
                    println!(
                        "Execution {} finished with status {}",
                        execution.id, execution.status
                    );
                }
                SearchReport::Webhook(response) => {
                    println!("Webhook answered {}", response.status);
                    println!("{}", serde_json::to_string_pretty(&response.body)?);
                }
            }
        }

        Commands::Executions { limit } => {
            let executions = dashboard.recent_executions(Some(limit)).await?;
            if executions.is_empty() {
                println!("No executions");
            }
            for execution in executions {
                println!(
                    "{:<12} {:<8} {:<8} {}",
                    execution.id,
                    execution.status.to_string(),
                    execution.mode,
                    execution
                        .started_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default()
                );
            }
        }

        Commands::Leads {
            status,
            score,
            import,
            enrichment,
            export: export_dir,
            json,
        } => {
            if let Some(path) = import {
                let rows: Vec<LeadRow> = read_json(&path)?;
                let content: Vec<EnrichmentRow> = match enrichment {
                    Some(path) => read_json(&path)?,
                    None => Vec::new(),
                };
                dashboard.import_leads(&rows, &content);
            } else {
                dashboard.refresh_leads().await;
            }

            let filter = LeadFilter {
                status,
                tier: score,
            };
            let leads = filter.apply(&dashboard.state().leads);

            if let Some(dir) = export_dir {
                let today = export::today();
                let path = export::write_csv(&dir, today, leads.iter().copied())?;
                println!("Exported {} leads to {}", leads.len(), path.display());
            } else if json {
                println!("{}", serde_json::to_string_pretty(&leads)?);
            } else {
                print_leads(&leads);
            }
        }

        Commands::Send {
            lead_id,
            message,
            template,
        } => {
            let content = match (message, template) {
                (Some(message), _) => message,
                (None, Some(key)) => {
                    let Some(template) = templates::find(&key) else {
                        bail!("Unknown template: {key}");
                    };
                    let lead = dashboard
                        .state()
                        .lead(&lead_id)
                        .with_context(|| format!("Lead not found: {lead_id}"))?;
                    template.render(lead)
                }
                (None, None) => bail!("Either --message or --template is required"),
            };

            let message = dashboard.send_message(&lead_id, &content)?;
            println!("Sent message {} to {}", message.id, message.lead_name);
        }

        Commands::Templates => {
            for template in &templates::TEMPLATES {
                println!("[{}] {}", template.id, template.name);
                for line in template.content.lines() {
                    println!("    {line}");
                }
                println!();
            }
        }

        Commands::Stats => {
            let stats = DashboardStats::from_state(dashboard.state());
            println!("Total leads:    {}", stats.total_leads);
            println!("Messages sent:  {}", stats.messages_sent);
            println!("Response rate:  {}%", stats.response_rate);
            println!("Conversions:    {}", stats.conversions);
        }

        Commands::Activity { limit } => {
            for activity in dashboard.state().activities.iter().take(limit) {
                println!(
                    "{}  {:<18} {}: {}",
                    activity.timestamp.format("%Y-%m-%d %H:%M"),
                    format!("{:?}", activity.kind),
                    activity.title,
                    activity.description
                );
            }
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid JSON in {}", path.display()))
}

fn print_nodes(state: &AppState) {
    for (index, node) in state.workflow_nodes.iter().enumerate() {
        let progress = node
            .progress
            .map(|p| format!(" {p}%"))
            .unwrap_or_default();
        println!(
            "{:>2}. [{:<9}] {:<20} {:<16} {}/{}{}",
            index + 1,
            node.status.to_string(),
            node.name,
            node.icon.as_str(),
            node.processed_count,
            node.total_count,
            progress
        );
    }
}

fn print_leads(leads: &[&Lead]) {
    println!(
        "{:<4} {:<22} {:<18} {:>5}  {}",
        "ID", "NAME", "COMPANY", "SCORE", "STATUS"
    );
    for lead in leads {
        println!(
            "{:<4} {:<22} {:<18} {:>5}  {}",
            lead.id, lead.name, lead.company_name, lead.score, lead.status
        );
    }
}
