use clap::{Parser, Subcommand};
use cwhistory::challenge::{DefaultChallengeRepository, GetChallengeDetails};
use cwhistory::codewars::CodewarsApi;
use cwhistory::network::ApiClient;
use cwhistory::present::{
    ChallengeDetailsError, ChallengeDetailsScreen, ChallengeDetailsUiMapper,
    CompletedChallengeUiMapper,
};
use cwhistory::user::{GetUserCompletedChallenges, InMemoryUserDataSource, PagedUserRepository};
use cwhistory::{AppError, Settings};
use futures::StreamExt;
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const KATA_URL: &str = "https://www.codewars.com/kata/";

#[derive(Parser)]
#[command(
    name = "cwhistory",
    version,
    about = "Browse completed Codewars challenges and their details"
)]
pub struct Args {
    /// Codewars API base URL (overrides settings and CODEWARS_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List a user's completed challenges
    Completed {
        /// Codewars username (overrides settings and CODEWARS_USER)
        #[arg(long, short)]
        user: Option<String>,

        /// Zero-based page to start from
        #[arg(long, short, default_value_t = 0, conflicts_with = "all")]
        page: u32,

        /// Keep loading pages until the last one
        #[arg(long, short)]
        all: bool,

        /// Stop after this many challenges
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Show one challenge's details
    Details {
        /// Challenge id or slug
        id: String,

        /// Open the challenge in the browser afterwards
        #[arg(long)]
        open: bool,

        /// Retries after a network error
        #[arg(long, default_value_t = 2)]
        retries: u32,
    },
}

pub async fn run(args: Args) -> ExitCode {
    let mut settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }

    init_logging(&settings.log_level, args.verbose);
    debug!(?settings, "Settings loaded");

    let client = match ApiClient::new(&settings.base_url, settings.timeout()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let api = match CodewarsApi::new(client) {
        Ok(api) => Arc::new(api),
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match args.command {
        Command::Completed {
            user,
            page,
            all,
            limit,
        } => {
            let username = user.unwrap_or_else(|| settings.username.clone());
            let repository =
                PagedUserRepository::new(api, Arc::new(InMemoryUserDataSource::new(username)));
            let use_case = GetUserCompletedChallenges::new(Arc::new(repository));
            list_completed(&use_case, page, all, limit).await
        }
        Command::Details { id, open, retries } => {
            let repository = DefaultChallengeRepository::new(api);
            let use_case = GetChallengeDetails::new(Arc::new(repository));
            show_details(use_case, id, open, retries).await
        }
    }
}

fn init_logging(log_level: &str, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn list_completed(
    use_case: &GetUserCompletedChallenges,
    from_page: u32,
    all: bool,
    limit: Option<usize>,
) -> ExitCode {
    let mapper = CompletedChallengeUiMapper::local();
    let mut pages = use_case.run(from_page);
    let mut printed = 0usize;

    while let Some(page) = pages.next().await {
        let page = match page {
            Ok(page) => page,
            Err(AppError::NotFound) => {
                eprintln!("User not found");
                return ExitCode::FAILURE;
            }
            Err(e) => {
                eprintln!("Failed to load completed challenges: {}", e);
                return ExitCode::FAILURE;
            }
        };

        for challenge in page.data {
            if limit.is_some_and(|limit| printed >= limit) {
                return ExitCode::SUCCESS;
            }
            println!("{}", mapper.to_ui(challenge));
            printed += 1;
        }

        if !all {
            if let Some(next) = page.next_key {
                info!("More challenges available from page {}", next);
            }
            break;
        }
    }

    if printed == 0 {
        println!("No completed challenges.");
    }
    ExitCode::SUCCESS
}

async fn show_details(
    use_case: GetChallengeDetails,
    id: String,
    open: bool,
    retries: u32,
) -> ExitCode {
    let mut screen = ChallengeDetailsScreen::new(
        id.clone(),
        "",
        use_case,
        ChallengeDetailsUiMapper::local(),
    );

    let mut state = screen.load().await;
    let mut attempt = 0;
    while state.error == ChallengeDetailsError::NetworkError && attempt < retries {
        attempt += 1;
        eprintln!("Network error, retrying ({}/{})...", attempt, retries);
        tokio::time::sleep(Duration::from_secs(1)).await;
        state = screen.retry().await;
    }

    match (&state.error, &state.details) {
        (ChallengeDetailsError::None, Some(details)) => {
            print!("{}", details.render(std::io::stdout().is_terminal()));
            if open {
                let url = details
                    .url
                    .clone()
                    .unwrap_or_else(|| format!("{}{}", KATA_URL, details.id));
                if let Err(e) = open::that(&url) {
                    eprintln!("Failed to open {}: {}", url, e);
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        (ChallengeDetailsError::NotFound, _) => {
            eprintln!("Challenge '{}' not found", id);
            ExitCode::FAILURE
        }
        _ => {
            eprintln!("Failed to load challenge '{}': network error", id);
            ExitCode::FAILURE
        }
    }
}
