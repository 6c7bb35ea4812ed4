use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use tweetcloud::cloud::TweetCloud;
use tweetcloud::config::Config;
use tweetcloud::render::raster::RasterRenderer;
use tweetcloud::render::spec::{default_output_path, Color, WordCloudSpec};
use tweetcloud::source::TextSource;
use tweetcloud::text::SelectionOrder;
use tweetcloud::twitter::client::TwitterClient;

/// Tweetcloud: word clouds from your Twitter posts and sent direct messages.
///
/// Credentials come from a keys.json file (--keys) or TWITTER_* variables in
/// your .env file.
#[derive(Parser)]
#[command(name = "tweetcloud", version, about)]
struct Cli {
    /// JSON file with CONSUMER_KEY, CONSUMER_SECRET, ACCESS_TOKEN, ACCESS_SECRET
    #[arg(long, global = true)]
    keys: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// What to fetch before scoring.
#[derive(clap::Args)]
struct FetchArgs {
    /// Which texts to use
    #[arg(long, value_enum, default_value_t = TextSource::Both)]
    source: TextSource,

    /// Read posts from this account instead of your own
    #[arg(long)]
    screen_name: Option<String>,

    /// Max posts to fetch, at most 200 per run (default: 20)
    #[arg(long, default_value = "20")]
    max_posts: usize,

    /// Max sent messages to fetch (default: 20)
    #[arg(long, default_value = "20")]
    max_messages: usize,

    /// Print the fetched texts
    #[arg(long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check your credentials and show who you are authenticated as
    Auth,

    /// Print the weighted word table
    Words {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Number of words to keep (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,

        /// Which end of the ranking to keep: lowest or highest
        #[arg(long, default_value = "lowest")]
        order: SelectionOrder,
    },

    /// Render a word cloud image
    Cloud {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Max words in the cloud (default: 50)
        #[arg(long, default_value = "50")]
        max_words: usize,

        /// Output image path (default: plot-<timestamp>.png)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Open the image after saving it
        #[arg(long)]
        show: bool,

        /// Canvas width in pixels
        #[arg(long, default_value = "800")]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value = "800")]
        height: u32,

        /// Background color, a name or #rrggbb
        #[arg(long, default_value = "white")]
        background: Color,

        /// Seed for word colors
        #[arg(long, default_value = "42")]
        seed: u64,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("tweetcloud=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.keys)?;

    match cli.command {
        Commands::Auth => {
            let credentials = config.credentials()?;
            let client = TwitterClient::authenticate(&credentials, &config.api_url).await?;
            println!(
                "Authenticated as {}",
                format!("@{}", client.user().screen_name).bold()
            );
        }

        Commands::Words { fetch, top, order } => {
            let mut cloud = connect(&config).await?;
            fetch_sources(&mut cloud, &fetch).await?;

            let counts = cloud.count_words(fetch.source, top, order);
            tweetcloud::output::terminal::display_word_table(&counts.selected, counts.all.len());

            if order == SelectionOrder::LowestFirst && counts.all.len() > top {
                println!(
                    "{}",
                    "Showing the lowest-scoring words. Use --order highest for the most prominent."
                        .dimmed()
                );
            }
        }

        Commands::Cloud {
            fetch,
            max_words,
            output,
            show,
            width,
            height,
            background,
            seed,
        } => {
            // Fail on a missing font before spending API calls
            config.require_font()?;

            let spec = WordCloudSpec {
                width,
                height,
                background: background.0,
                max_words,
                font_path: config.font_path.clone(),
                seed,
                ..WordCloudSpec::default()
            };
            spec.validate()?;

            // The default name is stamped now, not when the binary started
            let output = output.unwrap_or_else(|| default_output_path(Local::now().naive_local()));

            let mut cloud = connect(&config).await?;
            fetch_sources(&mut cloud, &fetch).await?;

            println!("Rendering word cloud...");
            cloud.generate_word_cloud(&RasterRenderer, fetch.source, &spec, &output, show)?;

            println!(
                "\n{}",
                format!("Word cloud saved to: {}", output.display()).bold()
            );
        }
    }

    Ok(())
}

/// Authenticate and build the cloud with the configured stop words.
async fn connect(config: &Config) -> Result<TweetCloud<TwitterClient>> {
    let credentials = config.credentials()?;
    let cloud = TweetCloud::connect(&credentials, &config.api_url, config.stopwords()).await?;
    info!(screen_name = %cloud.screen_name(), "Connected");
    Ok(cloud)
}

/// Fetch whichever collections `args.source` needs.
async fn fetch_sources(cloud: &mut TweetCloud<TwitterClient>, args: &FetchArgs) -> Result<()> {
    if matches!(args.source, TextSource::Posts | TextSource::Both) {
        let spinner = spinner("Fetching posts...");
        let result = cloud
            .get_posts(args.screen_name.as_deref(), args.max_posts, true)
            .await;
        spinner.finish_and_clear();
        let posts = result?;
        println!("  Posts: {}", posts.len());
        if args.verbose {
            tweetcloud::output::terminal::display_texts("Posts", &posts);
        }
    }

    if matches!(args.source, TextSource::Messages | TextSource::Both) {
        let spinner = spinner("Fetching sent messages...");
        let result = cloud.get_messages(args.max_messages, true).await;
        spinner.finish_and_clear();
        let messages = result?;
        println!("  Sent messages: {}", messages.len());
        if args.verbose {
            tweetcloud::output::terminal::display_texts("Sent messages", &messages);
        }
    }

    Ok(())
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
