use std::{borrow::Cow, ffi::OsStr, sync::Arc};

use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::task::spawn_blocking;

pub fn launch(headless: bool) -> anyhow::Result<Browser> {
    Browser::new(LaunchOptions {
        args: vec![OsStr::new("--disable-gpu")],
        headless,
        sandbox: false,
        ..LaunchOptions::default()
    })
}

/// The tab Chrome opened at launch, with any stray extra tabs closed.
pub fn first_tab(browser: &Browser) -> anyhow::Result<Arc<Tab>> {
    let tabs_guard = browser
        .get_tabs()
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let (first, remains) = tabs_guard
        .split_first()
        .ok_or_else(|| anyhow::anyhow!("no tabs found"))?;

    for remain in remains {
        remain.close(true)?;
    }

    Ok(Arc::clone(first))
}

pub async fn navigate_to(tab: &Arc<Tab>, url: Cow<'static, str>) -> anyhow::Result<()> {
    let tab = Arc::clone(tab);

    spawn_blocking(move || tab.navigate_to(&url)?.wait_until_navigated().map(|_| ())).await?
}

/// Full HTML of the rendered document, dynamic content included.
pub async fn page_html(tab: &Arc<Tab>) -> anyhow::Result<String> {
    let tab = Arc::clone(tab);

    spawn_blocking(move || tab.get_content()).await?
}
