//! Uplify CLI - daily goal and streak tracker.

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uplify_core::{parse_date, Goal, GoalId, GoalPatch, NewGoal, Priority};
use uplify_progress::{CompletionEstimator, GoalTracker, PendingChanges};
use uplify_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "uplify")]
#[command(about = "Track daily goals and streaks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding goal data
    #[arg(short, long, default_value = ".uplify", global = true)]
    storage: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Apply changes in memory without saving them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new goal
    Add {
        /// Goal title
        title: String,
        /// Completed days needed to finish
        #[arg(long)]
        target_days: u32,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
        /// Category
        #[arg(long, default_value = "")]
        category: String,
        /// Priority (low, medium, high)
        #[arg(long, default_value = "medium")]
        priority: Priority,
    },
    /// List goals
    List {
        /// Only goals in this category
        #[arg(long)]
        category: Option<String>,
        /// Only goals with this priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Only goals still in progress
        #[arg(long, conflicts_with = "completed")]
        active: bool,
        /// Only goals that reached their target
        #[arg(long)]
        completed: bool,
    },
    /// Show goal details and progress
    Show {
        /// Goal ID
        id: GoalId,
    },
    /// Record a day for a goal
    Mark {
        /// Goal ID
        id: GoalId,
        /// Day to record (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        /// Record the day as not completed
        #[arg(long)]
        undo: bool,
        /// Note for the day
        #[arg(long)]
        note: Option<String>,
    },
    /// Update goal fields
    Update {
        /// Goal ID
        id: GoalId,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// New target days
        #[arg(long)]
        target_days: Option<u32>,
        /// New priority
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Delete a goal and its history
    Delete {
        /// Goal ID
        id: GoalId,
    },
    /// Show statistics across all goals
    Stats,
}

/// Runtime settings taken from global flags.
#[derive(Debug, Clone)]
struct Config {
    storage: PathBuf,
    log_level: String,
    dry_run: bool,
    json: bool,
}

impl From<&Cli> for Config {
    fn from(cli: &Cli) -> Self {
        Self {
            storage: cli.storage.clone(),
            log_level: cli.log_level.clone(),
            dry_run: cli.dry_run,
            json: cli.json,
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from(&cli);
    init_logging(&config.log_level);
    debug!(?config, "starting");

    execute(cli.command, &config).await
}

/// Load goals, apply one command, and save if anything changed.
async fn execute(command: Commands, config: &Config) -> Result<()> {
    let mut storage = JsonStorage::new(&config.storage);
    let goals = storage.load_goals().await?;

    let pending = PendingChanges::new();
    let mut tracker = GoalTracker::new(goals).with_observer(Box::new(pending.clone()));

    run(command, &mut tracker, config)?;

    if pending.is_pending() {
        if config.dry_run {
            info!(changes = pending.count(), "dry run, changes not saved");
        } else {
            storage.save_goals(tracker.goals()).await?;
            info!(changes = pending.count(), path = %storage.goals_path().display(), "saved");
        }
        pending.clear();
    }

    Ok(())
}

fn run(command: Commands, tracker: &mut GoalTracker, config: &Config) -> Result<()> {
    match command {
        Commands::Add { title, target_days, description, category, priority } => {
            let goal = tracker.add_goal(NewGoal {
                title,
                description,
                category,
                target_days,
                priority,
            })?;
            if config.json {
                println!("{}", serde_json::to_string_pretty(&goal)?);
            } else {
                println!("Added goal: {} - {}", goal.id, goal.title);
            }
        }
        Commands::List { category, priority, active, completed } => {
            let goals: Vec<&Goal> = tracker
                .goals()
                .iter()
                .filter(|g| category.as_deref().map_or(true, |c| g.category == c))
                .filter(|g| priority.map_or(true, |p| g.priority == p))
                .filter(|g| !active || !g.is_completed())
                .filter(|g| !completed || g.is_completed())
                .collect();

            if config.json {
                println!("{}", serde_json::to_string_pretty(&goals)?);
                return Ok(());
            }

            println!("Goals ({})", goals.len());
            for goal in goals {
                println!("  {} | {} | {:>6} | {}/{} - {}",
                    goal.id,
                    format_status(goal),
                    goal.priority.as_str(),
                    goal.completed_days(),
                    goal.target_days,
                    goal.title,
                );
            }
        }
        Commands::Show { id } => {
            let (Some(goal), Some(summary)) = (tracker.goal(id), tracker.goal_progress(id)) else {
                println!("Goal not found");
                return Ok(());
            };
            let estimate = CompletionEstimator.estimate_goal(goal, tracker.today());

            if config.json {
                let value = serde_json::json!({
                    "goal": goal,
                    "progress": summary,
                    "estimatedCompletion": estimate,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
                return Ok(());
            }

            println!("Goal: {}", goal.id);
            println!("  Title: {}", goal.title);
            if !goal.description.is_empty() {
                println!("  Description: {}", goal.description);
            }
            if !goal.category.is_empty() {
                println!("  Category: {}", goal.category);
            }
            println!("  Priority: {}", goal.priority);
            println!("  Status: {}", format_status(goal));
            println!("  Progress: {}/{} ({:.0}%)",
                summary.completed_days, summary.total_days, summary.progress_percentage);
            println!("  Current streak: {}", summary.current_streak);
            println!("  Longest streak: {}", summary.longest_streak);
            println!("  Done today: {}", if summary.is_completed_today { "yes" } else { "no" });
            if let Some(date) = estimate.filter(|_| !goal.is_completed()) {
                println!("  Earliest completion: {}", date);
            }
            println!("  Created: {}", goal.created_at);

            let mut entries: Vec<_> = goal.progress.iter().collect();
            entries.sort_by(|a, b| b.date.cmp(&a.date));
            for entry in entries.into_iter().take(7) {
                let mark = if entry.completed { "x" } else { " " };
                match &entry.note {
                    Some(note) => println!("    [{}] {} - {}", mark, entry.date, note),
                    None => println!("    [{}] {}", mark, entry.date),
                }
            }
        }
        Commands::Mark { id, date, undo, note } => {
            let date = date.unwrap_or_else(|| tracker.today());
            if !tracker.mark_day_complete(id, date, !undo, note) {
                println!("Goal not found");
                return Ok(());
            }
            if let Some(summary) = tracker.goal_progress(id) {
                println!("Marked {} as {} ({}/{}, streak {})",
                    date,
                    if undo { "not done" } else { "done" },
                    summary.completed_days,
                    summary.total_days,
                    summary.current_streak,
                );
            }
        }
        Commands::Update { id, title, description, category, target_days, priority } => {
            let patch = GoalPatch { title, description, category, target_days, priority };
            if patch.is_empty() {
                println!("Nothing to update");
                return Ok(());
            }
            if tracker.update_goal(id, patch)? {
                println!("Updated goal: {}", id);
            } else {
                println!("Goal not found");
            }
        }
        Commands::Delete { id } => {
            if tracker.delete_goal(id) {
                println!("Deleted goal: {}", id);
            } else {
                println!("Goal not found");
            }
        }
        Commands::Stats => {
            let stats = tracker.stats();
            if config.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("Uplify Stats");
            println!("  Goals: {} ({} active, {} completed)",
                stats.total_goals, stats.active_goals, stats.completed_goals);
            println!("  Days tracked: {}", stats.total_days_tracked);
            println!("  Current streak: {}", stats.current_streak);
            println!("  Longest streak: {}", stats.longest_streak);
            println!("  Completion rate: {:.1}%", stats.completion_rate);
        }
    }

    Ok(())
}

fn format_status(goal: &Goal) -> &'static str {
    if goal.is_completed() {
        "DONE"
    } else {
        "ACTIVE"
    }
}
