//! # conngroups
//!
//! Command-line front end for per-owner connection groups.

mod bootstrap;
mod di;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use conngroups_application::use_cases::UpdateGroupRequest;
use conngroups_domain::{
    CliOverrides, GroupOutcome, PageRequest, SortDirection, SortField, TimeWindow,
    GROUP_EXISTS_MESSAGE, NAME_IN_USE_MESSAGE,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use bootstrap::{init_database, init_logging, load_config};
use di::{Repositories, UseCases};

#[derive(Parser)]
#[command(name = "conngroups")]
#[command(version)]
#[command(about = "Manage per-owner connection groups")]
struct Cli {
    /// Path to a TOML config file
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,

    /// SQLite database path, overrides the config file
    #[arg(long, global = true)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a group
    Create {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        name: String,
        #[arg(long = "member")]
        members: Vec<String>,
        /// Base64 image, optionally as a data URL
        #[arg(long)]
        picture: Option<String>,
    },
    /// Fetch a group by id
    Get {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        id: String,
    },
    /// Fetch a group by exact name
    GetByName {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        name: String,
    },
    /// List one page of an owner's groups
    List(ListArgs),
    /// Change fields of a group
    Update(UpdateArgs),
    /// Delete a group
    Delete {
        #[arg(long)]
        owner: String,
        #[arg(long)]
        id: String,
    },
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    owner: String,
    /// Exact group name
    #[arg(long)]
    name: Option<String>,
    /// Only groups interacted with strictly after this RFC3339 instant
    #[arg(long, value_parser = parse_time, requires = "before")]
    after: Option<DateTime<Utc>>,
    /// Only groups interacted with strictly before this RFC3339 instant
    #[arg(long, value_parser = parse_time, requires = "after")]
    before: Option<DateTime<Utc>>,
    #[arg(long, default_value_t = 0)]
    offset: u64,
    #[arg(long)]
    limit: Option<u32>,
    /// group_name or last_interaction_time
    #[arg(long)]
    order_by: Option<SortField>,
    /// asc or desc; anything else leaves the stored order
    #[arg(long)]
    order: Option<String>,
}

#[derive(Args)]
struct UpdateArgs {
    #[arg(long)]
    owner: String,
    #[arg(long)]
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    add_member: Option<String>,
    #[arg(long)]
    remove_member: Option<String>,
    #[arg(long)]
    picture: Option<String>,
    /// Stamp the last interaction time with the current instant
    #[arg(long)]
    touch: bool,
}

fn parse_time(s: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| format!("expected an RFC3339 timestamp: {}", e))
}

/// Outcome plus the message shown to users for soft failures.
#[derive(Serialize)]
struct OutcomeReport<'a> {
    #[serde(flatten)]
    outcome: &'a GroupOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'a str>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome(outcome: &GroupOutcome, conflict_message: &str) -> anyhow::Result<()> {
    print_json(&OutcomeReport {
        outcome,
        message: outcome.message(conflict_message),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = load_config(cli.config.as_deref(), cli_overrides)?;
    init_logging(&config);

    let pool = init_database(&config.database).await?;
    let repos = Repositories::new(pool.clone());
    let use_cases = UseCases::new(&repos, &config);

    let result = run(cli.command, &use_cases).await;

    pool.close().await;
    result
}

async fn run(command: Command, use_cases: &UseCases) -> anyhow::Result<()> {
    match command {
        Command::Create {
            owner,
            name,
            members,
            picture,
        } => {
            let outcome = use_cases
                .create_group
                .execute(&owner, name, members, picture)
                .await?;
            print_outcome(&outcome, GROUP_EXISTS_MESSAGE)
        }
        Command::Get { owner, id } => {
            let group = use_cases.get_groups.get_by_id(&owner, &id).await?;
            print_json(&group)
        }
        Command::GetByName { owner, name } => {
            let group = use_cases.get_groups.get_by_name(&owner, &name).await?;
            print_json(&group)
        }
        Command::List(args) => {
            let request = PageRequest {
                owner_id: Arc::from(args.owner.as_str()),
                group_name: args.name.as_deref().map(Arc::from),
                window: TimeWindow {
                    after: args.after,
                    before: args.before,
                },
                offset: args.offset,
                limit: args.limit,
                order_by: args.order_by,
                order: args.order.as_deref().and_then(SortDirection::parse),
            };

            let page = use_cases.list_groups.execute(&request).await?;
            info!(
                result_count = page.metadata.result_count,
                current_page = page.metadata.current_page,
                "Page listed"
            );
            print_json(&page)
        }
        Command::Update(args) => {
            let request = UpdateGroupRequest {
                name: args.name,
                member_to_add: args.add_member,
                member_to_remove: args.remove_member,
                picture: args.picture,
                last_interaction_time: args.touch.then(Utc::now),
            };

            let outcome = use_cases
                .update_group
                .execute(&args.owner, &args.id, request)
                .await?;
            print_outcome(&outcome, NAME_IN_USE_MESSAGE)
        }
        Command::Delete { owner, id } => {
            use_cases.delete_group.execute(&owner, &id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
    }
}
