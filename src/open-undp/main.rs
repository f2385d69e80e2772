use core::time::Duration;

use unscr::{harvest, resolve, scrape};

#[derive(clap::Parser)]
struct Args {
    /// Project listing page to scrape.
    #[arg(long, default_value = "https://open.undp.org/projects")]
    url: String,

    /// Maximum number of project ids to harvest.
    #[arg(short, long, default_value_t = 5)]
    limit: usize,

    /// Seconds to wait for the listing's dynamic content to render.
    #[arg(long, default_value_t = 5)]
    wait: u64,

    /// Per-request timeout for the details API, in seconds.
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Base URL of the project-details API.
    #[arg(long, default_value = "https://api.open.undp.org/api/v1/project/details")]
    api: String,

    /// Run with a visible browser window instead of headless Chrome.
    #[arg(long)]
    headed: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::init_timed();

    let args = Args::parse();
    let client = scrape::basic()?;

    // Chrome is killed when `browser` drops, fatal harvest errors included.
    let browser = scrape::browser::launch(!args.headed)?;
    let tab = scrape::browser::first_tab(&browser)?;

    let ctx = harvest::Context {
        url: args.url,
        limit: args.limit,
        wait: Duration::from_secs(args.wait),
    };
    let project_ids = harvest::work(&tab, &ctx).await?;
    println!("Project IDs found: {project_ids:?}");

    let ctx = resolve::Context {
        client,
        api_base: args.api,
        timeout: Duration::from_secs(args.timeout),
    };
    for project_id in &project_ids {
        let country = resolve::country_of(project_id, &ctx).await;
        println!("Project ID: {project_id} → Country: {country}");
    }

    Ok(())
}
