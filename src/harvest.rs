use core::time::Duration;
use std::sync::Arc;

use compact_str::CompactString;
use headless_chrome::Tab;
use scraper::{Html, Selector};
use tokio::time::sleep;

use crate::scrape::browser;

/// Path marker separating a project link from its identifier.
pub const PROJECT_MARKER: &str = "/projects/";

pub struct Context {
    pub url: String,
    pub limit: usize,
    pub wait: Duration,
}

/// Scrapes the listing page and returns at most `limit` unique project ids,
/// in first-seen order.
pub async fn work(tab: &Arc<Tab>, ctx: &Context) -> anyhow::Result<Vec<CompactString>> {
    tracing::info!(target: "harvester", "start fetching {} ...", ctx.url);
    browser::navigate_to(tab, ctx.url.clone().into()).await?;

    // The listing is rendered client-side; give the scripts a fixed window to
    // finish before pulling the DOM.
    sleep(ctx.wait).await;

    let html = browser::page_html(tab).await?;
    tracing::info!(target: "harvester", "fetching finished: {} bytes", html.len());

    let ids = project_ids_in_page(&html, ctx.limit);
    tracing::info!(target: "harvester", "parsing finished: {} project ids", ids.len());
    Ok(ids)
}

pub fn project_ids_in_page(html: &str, limit: usize) -> Vec<CompactString> {
    let html = Html::parse_document(html);
    let sel_href = Selector::parse("a[href]").unwrap();

    collect_project_ids(
        html.select(&sel_href).filter_map(|a| a.attr("href")),
        limit,
    )
}

pub fn collect_project_ids<'a, I>(hrefs: I, limit: usize) -> Vec<CompactString>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut ids = Vec::new();
    for href in hrefs {
        if ids.len() >= limit {
            break;
        }
        if let Some(id) = project_id(href)
            && !ids.iter().any(|x: &CompactString| x.as_str() == id)
        {
            ids.push(CompactString::new(id));
        }
    }
    ids
}

/// Suffix after the last occurrence of [`PROJECT_MARKER`], if any.
fn project_id(href: &str) -> Option<&str> {
    href.rsplit_once(PROJECT_MARKER).map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_is_suffix_after_last_marker() {
        assert_eq!(
            project_id("https://open.undp.org/projects/01234567"),
            Some("01234567")
        );
        assert_eq!(project_id("/projects/a/projects/b"), Some("b"));
        assert_eq!(project_id("https://open.undp.org/about-us"), None);
    }

    #[test]
    fn extraction_round_trips() {
        let id = "00112233";
        let href = format!("https://open.undp.org{PROJECT_MARKER}{id}");
        assert_eq!(project_id(&href), Some(id));
    }

    #[test]
    fn dedup_keeps_first_seen_order() {
        let hrefs = [
            "/projects/A",
            "/projects/B",
            "/projects/B",
            "/projects/C",
        ];
        assert_eq!(collect_project_ids(hrefs, 5), ["A", "B", "C"]);
    }

    #[test]
    fn repeated_hrefs_still_fill_the_limit() {
        let hrefs = [
            "/projects/A",
            "/projects/A",
            "/projects/B",
            "/projects/C",
            "/projects/D",
            "/projects/E",
        ];
        assert_eq!(collect_project_ids(hrefs, 3), ["A", "B", "C"]);
    }

    #[test]
    fn stops_scanning_at_limit() {
        let hrefs: Vec<String> = (0..20)
            .map(|i| format!("https://open.undp.org/projects/{i:08}"))
            .collect();
        let ids = collect_project_ids(hrefs.iter().map(String::as_str), 5);
        assert_eq!(ids.len(), 5);
        assert_eq!(ids[0], "00000000");
        assert_eq!(ids[4], "00000004");
    }

    #[test]
    fn short_page_returns_all_without_padding() {
        let hrefs = ["/projects/A", "/about", "/projects/B"];
        assert_eq!(collect_project_ids(hrefs, 5), ["A", "B"]);
    }

    #[test]
    fn page_parse_filters_and_dedups() {
        let html = r##"<html><body>
            <nav><a href="/about-us">About</a><a href="#top">Top</a></nav>
            <a href="https://open.undp.org/projects/00112233">First</a>
            <a href="/projects/00112233">First again, relative</a>
            <a href="/projects/00445566">Second</a>
            <a name="anchor-without-href">skip</a>
        </body></html>"##;
        assert_eq!(project_ids_in_page(html, 5), ["00112233", "00445566"]);
    }
}
