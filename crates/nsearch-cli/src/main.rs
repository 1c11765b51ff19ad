mod search;

use clap::{CommandFactory, Parser, Subcommand};
use nsearch_client::{Genre, Medium, Platform, Tag};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nsearch-cli")]
#[command(about = "Nintendo title search command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search titles by keyword and filters
    Search(search::SearchArgs),
    /// List accepted platform, medium and genre tags
    Tags,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = nsearch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search(args)) => search::run_search(&config, &args).await?,
        Some(Commands::Tags) => print_tags(),
        None => Cli::command().print_help()?,
    }

    Ok(())
}

fn print_tags() {
    println!("platforms: {}", tag_list::<Platform>());
    println!("media:     {}", tag_list::<Medium>());
    println!("genres:    {}", tag_list::<Genre>());
}

fn tag_list<T: Tag>() -> String {
    T::ALL.iter().map(|t| t.tag()).collect::<Vec<_>>().join(", ")
}
