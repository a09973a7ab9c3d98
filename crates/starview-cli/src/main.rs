use std::sync::Arc;

use clap::Parser;
use starview_api::GitHubClient;
use starview_core::{providers::GitHubFetcher, Config, Language, RepoFetcher};
use starview_tui::ui::format_count;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "starview")]
#[command(version, about = "Browse GitHub's most-starred repositories by language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the ranked list for one language filter and exit
    List {
        /// Language filter (all, javascript, ruby, java, css, python)
        #[arg(default_value = "all")]
        language: Language,

        /// How many repositories to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "starview=info,starview_core=info,starview_api=info,starview_tui=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let client = GitHubClient::with_base_url(config.api.base_url.clone());
    let fetcher: Arc<dyn RepoFetcher> =
        Arc::new(GitHubFetcher::new(client, config.api.per_page));

    match cli.command {
        Some(Commands::List { language, limit }) => {
            tracing::info!("listing most-starred repositories for {}", language);
            let repos = fetcher.fetch_popular(language).await?;

            for (rank, repo) in repos.iter().take(limit).enumerate() {
                println!(
                    "#{:<3} {:<45} ★ {:>10}  ⑂ {:>9}  ! {:>7}",
                    rank + 1,
                    format!("{}/{}", repo.owner.login, repo.name),
                    format_count(repo.stars),
                    format_count(repo.forks),
                    format_count(repo.open_issues),
                );
            }
        }
        None => {
            starview_tui::runner::run_tui(&config, fetcher).await?;
        }
    }

    Ok(())
}
