use std::collections::HashMap;
use std::time::Duration;

use anyhow::Context;
use thirtyfour::extensions::query::ElementQueryable;
use thirtyfour::{By, Key, WebDriver};

use crate::configuration::SearchSettings;
use crate::domain::rank::{mean_ranks, RankScan};

const SEARCH_ENGINE_URL: &str = "https://www.google.co.uk";
const SEARCH_BOX_SELECTOR: &str = ".gLFyf";
const CITATION_SELECTOR: &str = "cite";
const NEXT_PAGE_SELECTOR: &str = "#pnnext";
const PAGE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Mean search ranking per tracked domain across all configured queries.
pub async fn mean_search_ranks(
    driver: &WebDriver,
    settings: &SearchSettings,
    domains: &[String],
) -> anyhow::Result<HashMap<String, f64>> {
    let mut per_query = Vec::with_capacity(settings.queries.len());

    for query in &settings.queries {
        log::info!("Searching for query: {}", query);

        driver.goto(SEARCH_ENGINE_URL).await?;
        let search_box = driver.find(By::Css(SEARCH_BOX_SELECTOR)).await?;
        search_box.send_keys(query).await?;
        search_box.send_keys(Key::Enter + "").await?;

        per_query.push(collect_query_ranks(driver, settings, domains).await?);
    }

    Ok(mean_ranks(domains, &per_query))
}

/// Walk the paginated results for the query currently on screen, recording
/// the first citation position of each tracked domain.
async fn collect_query_ranks(
    driver: &WebDriver,
    settings: &SearchSettings,
    domains: &[String],
) -> anyhow::Result<HashMap<String, u32>> {
    let mut scan = RankScan::new(domains, settings.max_rank_depth);

    while !scan.is_complete() {
        // Bounded wait for this results page to finish loading.
        driver
            .query(By::Css(CITATION_SELECTOR))
            .wait(
                Duration::from_secs(settings.page_load_timeout_secs),
                PAGE_POLL_INTERVAL,
            )
            .first()
            .await
            .context("Timed out waiting for a search results page to load")?;

        let mut citations = Vec::new();
        for cite in driver.find_all(By::Css(CITATION_SELECTOR)).await? {
            citations.push(cite.text().await?);
        }
        log::info!("Scanning {} citations on this results page", citations.len());
        scan.scan_page(&citations);

        if scan.is_complete() {
            break;
        }

        // Results can run out before every domain is found; a missing
        // next-page control ends the scan and unfound domains fall back to
        // the last counter value.
        match driver.find(By::Css(NEXT_PAGE_SELECTOR)).await {
            Ok(next_page) => next_page.click().await?,
            Err(_) => {
                log::info!("No next-page control on this results page, ending scan");
                break;
            }
        }
    }

    Ok(scan.finish())
}
