//! `search` command: builds criteria from flags, walks the result pages and
//! prints each title.

use clap::Args;
use nsearch_client::{SearchClient, SearchCriteria, TitleRecord, ValidationError};
use nsearch_core::AppConfig;

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Free-text keyword
    pub(crate) query: String,

    /// Platforms to include (wiiu, wii, 3ds, ds), comma separated
    #[arg(long = "platform", value_delimiter = ',')]
    pub(crate) platforms: Vec<String>,

    /// Media to include (pkg, download, vc), comma separated
    #[arg(long = "medium", value_delimiter = ',')]
    pub(crate) media: Vec<String>,

    /// Genres to include, comma separated (see `tags`)
    #[arg(long = "genre", value_delimiter = ',')]
    pub(crate) genres: Vec<String>,

    /// Price ceiling in yen; above 1000 means no price filter
    #[arg(long)]
    pub(crate) price: Option<i64>,

    /// Only titles with a trial version
    #[arg(long)]
    pub(crate) trial: bool,

    /// Only titles in a running campaign
    #[arg(long)]
    pub(crate) campaign: bool,

    /// Only titles published by Nintendo
    #[arg(long)]
    pub(crate) nintendo: bool,

    /// Earliest release window, YYYY-MM (month 01, 06, 07 or 12)
    #[arg(long)]
    pub(crate) start: Option<String>,

    /// Latest release window, YYYY-MM (month 01, 06, 07 or 12)
    #[arg(long)]
    pub(crate) end: Option<String>,

    /// Stop after this many titles
    #[arg(long)]
    pub(crate) limit: Option<usize>,

    /// Page cap; defaults to NSEARCH_MAX_PAGES
    #[arg(long)]
    pub(crate) max_pages: Option<usize>,

    /// Print one JSON object per title instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

/// Builds search criteria from command-line flags.
///
/// Empty tag lists mean "no filter".
pub(crate) fn build_criteria(args: &SearchArgs) -> Result<SearchCriteria, ValidationError> {
    let mut criteria = SearchCriteria::new(args.query.clone())
        .with_trial_available(args.trial)
        .with_in_campaign(args.campaign)
        .with_publisher_is_vendor(args.nintendo)
        .with_release_range(args.start.as_deref(), args.end.as_deref());

    if !args.platforms.is_empty() {
        criteria = criteria.with_platforms(&args.platforms)?;
    }
    if !args.media.is_empty() {
        criteria = criteria.with_media(&args.media)?;
    }
    if !args.genres.is_empty() {
        criteria = criteria.with_genres(&args.genres)?;
    }
    if let Some(price) = args.price {
        criteria = criteria.with_price_ceiling(price);
    }

    Ok(criteria)
}

pub(crate) async fn run_search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let criteria = build_criteria(args)?;
    let client = SearchClient::new(config)?;
    let max_pages = args.max_pages.unwrap_or(config.max_pages);
    let limit = args.limit.unwrap_or(usize::MAX);

    let mut session = client.session(criteria);
    let mut printed = 0usize;
    let mut pages = 0usize;

    'pages: while !session.is_exhausted() {
        if pages >= max_pages {
            tracing::warn!(
                max_pages,
                total = session.total_count(),
                "page cap reached; results truncated"
            );
            break;
        }
        pages += 1;

        for title in session.fetch_next_page().await? {
            if printed >= limit {
                break 'pages;
            }
            if args.json {
                println!("{}", serde_json::to_string(&title)?);
            } else {
                println!("{}", format_row(&title));
            }
            printed += 1;
        }
    }

    tracing::info!(
        printed,
        pages,
        total = session.total_count(),
        "search finished"
    );
    Ok(())
}

/// One table line: row, name, hardware, release date, price, publisher.
pub(crate) fn format_row(title: &TitleRecord) -> String {
    let dash = "-";
    format!(
        "{:>5}  {}  [{}] {} / {} / {}",
        title
            .row_number()
            .map_or_else(|| dash.to_string(), |n| n.to_string()),
        title.title_name().unwrap_or(dash),
        title.hardware_label().unwrap_or(dash),
        title.release_date.as_deref().unwrap_or(dash),
        title.price.as_deref().unwrap_or(dash),
        title.publisher.as_deref().unwrap_or(dash),
    )
}
