//! Command-line interface: text rendering of the list, detail and
//! favourites views.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{validate_page_size, ClientConfig};
use crate::error::{JobBoardError, Result};
use crate::format::{
    format_city, format_detail_wage, format_period, format_requirements, format_wage,
};
use crate::list::{JobList, ListView};
use crate::state::AppState;
use crate::types::Job;

/// Width used to wrap long job texts.
const TEXT_WRAP_WIDTH: usize = 76;

/// Jobboard - Browse a paginated public job feed and keep local favourites.
#[derive(Parser)]
#[command(name = "jobboard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory for persisted favourites (default: $JOBBOARD_DATA_DIR or .jobboard)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Job feed base URL (default: $JOBBOARD_API_BASE_URL or the public feed)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List jobs, loading one or more pages.
    List {
        /// Number of pages to load
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Jobs per page
        #[arg(short = 's', long)]
        page_size: Option<u32>,
    },

    /// Show details of a single job.
    Show {
        /// Job id (workAssignmentId)
        id: String,
    },

    /// Mark or unmark a job as favourite.
    Toggle {
        /// Job id (workAssignmentId)
        id: String,
    },

    /// Show favourite jobs found in the loaded pages.
    Favourites {
        /// Number of pages to load before collecting favourites
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Fetch favourites missing from the loaded pages by id
        #[arg(long)]
        fetch_missing: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ClientConfig::from_env()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::List { pages, page_size } => {
            if let Some(size) = page_size {
                validate_page_size(size)?;
                config.page_size = size;
            }
            let state = AppState::new(&config)?;
            runtime.block_on(list_command(&state, pages))
        }
        Commands::Show { id } => {
            let state = AppState::new(&config)?;
            runtime.block_on(show_command(&state, &id))
        }
        Commands::Toggle { id } => {
            let state = AppState::new(&config)?;
            toggle_command(&state, &id)
        }
        Commands::Favourites {
            pages,
            fetch_missing,
        } => {
            let state = AppState::new(&config)?;
            runtime.block_on(favourites_command(&state, pages, fetch_missing))
        }
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Load page 0 and then up to `pages - 1` more pages.
async fn load_pages(list: &mut JobList, pages: u32) {
    let pb = spinner("Loading jobs…");
    list.load_initial().await;
    for _ in 1..pages {
        if list.load_more().await.is_none() || list.aggregator().error().is_some() {
            break;
        }
    }
    pb.finish_and_clear();
}

async fn list_command(state: &AppState, pages: u32) -> Result<()> {
    let mut list = state.job_list();
    load_pages(&mut list, pages).await;

    match list.view() {
        ListView::Offline => Err(JobBoardError::Offline),
        ListView::Failed { message } => Err(JobBoardError::Query(message.to_string())),
        ListView::Loading => Ok(()),
        ListView::Empty => {
            println!("{}", style(JobBoardError::EmptyResult { page: 0 }).dim());
            Ok(())
        }
        ListView::Jobs { jobs, error, .. } => {
            for job in jobs {
                print_card(job, state.is_favourite(job.id()));
            }
            println!(
                "{} jobs on {} page(s)",
                style(jobs.len()).bold(),
                list.aggregator().page() + 1
            );
            if let Some(message) = error {
                println!("{} {message}", style("Error loading more jobs:").red().bold());
            }
            Ok(())
        }
    }
}

async fn show_command(state: &AppState, id: &str) -> Result<()> {
    let pb = spinner("Loading job…");
    let result = state.api.get_job(id).await;
    pb.finish_and_clear();
    let job = result?.data;

    println!("{}", style(&job.work_assignment_name).bold());
    println!();
    println!("  {} {}", style("City:").bold(), format_city(&job));
    println!("  {} {}", style("Wage:").bold(), style(format_detail_wage(&job)).magenta());
    println!("  {}", style("Requirements:").bold());
    for line in textwrap::wrap(format_requirements(&job), TEXT_WRAP_WIDTH) {
        println!("    {line}");
    }
    println!(
        "  {} {}",
        style("Period:").bold(),
        format_period(job.period_from, job.period_to)
    );
    if let Some(link) = &job.branch_link {
        println!("  {} {}", style("More about this job:").bold(), style(link).underlined());
    }
    if state.is_favourite(job.id()) {
        println!();
        println!("  {}", style("★ Favourite").magenta());
    }
    Ok(())
}

fn toggle_command(state: &AppState, id: &str) -> Result<()> {
    if state.toggle_favourite(id)? {
        println!("{} {}", style("★ Added to favourites:").magenta().bold(), id);
    } else {
        println!("{} {}", style("☆ Removed from favourites:").bold(), id);
    }
    Ok(())
}

async fn favourites_command(state: &AppState, pages: u32, fetch_missing: bool) -> Result<()> {
    if !state.favourites.is_empty() {
        let mut list = state.job_list();
        load_pages(&mut list, pages).await;
        if state.connectivity().is_offline() {
            eprintln!(
                "{} showing only favourites already loaded",
                style("No internet connection:").yellow().bold()
            );
        }
    }

    let jobs = if fetch_missing {
        state.resolve_favourite_jobs().await
    } else {
        state.favourite_jobs()
    };

    if jobs.is_empty() {
        println!("{}", style("No favourite jobs yet").dim());
        return Ok(());
    }
    for job in &jobs {
        print_card(job, true);
    }
    Ok(())
}

fn print_card(job: &Job, favourite: bool) {
    let star = if favourite {
        style("★").magenta().to_string()
    } else {
        style("☆").dim().to_string()
    };
    println!("{star} {}", style(&job.work_assignment_name).bold());
    println!("    {}", format_city(job));
    println!("    {}", style(format_wage(job)).magenta());
    println!("    {}", style(job.id()).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_list_defaults() {
        let cli = Cli::parse_from(["jobboard", "list"]);
        let Commands::List { pages, page_size } = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(pages, 1);
        assert!(page_size.is_none());
        assert!(cli.data_dir.is_none());
    }

    #[test]
    fn test_cli_parse_list_with_options() {
        let cli = Cli::parse_from([
            "jobboard",
            "--data-dir",
            "/tmp/jb",
            "list",
            "--pages",
            "3",
            "-s",
            "10",
        ]);
        let Commands::List { pages, page_size } = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(pages, 3);
        assert_eq!(page_size, Some(10));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/jb")));
    }

    #[test]
    fn test_cli_parse_favourites() {
        let cli = Cli::parse_from(["jobboard", "favourites", "--fetch-missing", "--base-url", "http://x"]);
        let Commands::Favourites {
            pages,
            fetch_missing,
        } = cli.command
        else {
            panic!("expected favourites command");
        };
        assert_eq!(pages, 1);
        assert!(fetch_missing);
        assert_eq!(cli.base_url.as_deref(), Some("http://x"));
    }

    #[test]
    fn test_cli_parse_toggle_and_show() {
        let cli = Cli::parse_from(["jobboard", "toggle", "wa-1"]);
        assert!(matches!(cli.command, Commands::Toggle { ref id } if id == "wa-1"));

        let cli = Cli::parse_from(["jobboard", "show", "wa-2"]);
        assert!(matches!(cli.command, Commands::Show { ref id } if id == "wa-2"));
    }
}
