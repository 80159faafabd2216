use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use thirtyfour::WebDriver;
use url::Url;

use crate::configuration::Settings;
use crate::domain::report::ReportRow;
use crate::services::{mean_search_ranks, read_score, scrape, Droid};

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    validate(&settings)?;

    let droid = Droid::new(&settings.webdriver).await?;
    let outcome = generate_report(&droid.driver, &settings).await;

    // The session is released whether the report succeeded or not.
    if let Err(e) = droid.quit().await {
        log::error!("Failed to release the webdriver session: {:?}", e);
    }

    outcome
}

fn validate(settings: &Settings) -> anyhow::Result<()> {
    if settings.report.targets.is_empty() {
        bail!("Configuration lists no target sites");
    }
    if settings.search.queries.is_empty() {
        bail!("Configuration lists no search queries");
    }
    for target in &settings.report.targets {
        Url::parse(&target.url)
            .with_context(|| format!("Invalid url for target {}: {}", target.domain, target.url))?;
    }

    Ok(())
}

/// Orchestrate the whole report: one mean-rank table first, then per site a
/// scrape, a readability score, and exactly one CSV row. A failed site aborts
/// the run; only fully completed rows ever reach the file.
async fn generate_report(driver: &WebDriver, settings: &Settings) -> anyhow::Result<()> {
    // Fresh report per run, never appended across runs.
    let mut report = File::create(&settings.report.output_path).with_context(|| {
        format!(
            "Failed to create report file {}",
            settings.report.output_path
        )
    })?;

    let domains: Vec<String> = settings
        .report
        .targets
        .iter()
        .map(|target| target.domain.clone())
        .collect();
    let ranks = mean_search_ranks(driver, &settings.search, &domains).await?;

    for target in &settings.report.targets {
        let artifact = target.artifact_filename();
        let word_count = scrape(driver, &target.url, Path::new(&artifact)).await?;
        let score = read_score(driver, Path::new(&artifact), &settings.readability).await?;
        let mean_rank = ranks
            .get(&target.domain)
            .copied()
            .with_context(|| format!("No mean rank collected for {}", target.domain))?;

        let row = ReportRow {
            domain: target.domain.clone(),
            word_count,
            score,
            mean_rank,
        };
        report
            .write_all(row.to_csv_line().as_bytes())
            .context("Failed to append a report row")?;

        log::info!(
            "Reported {}: {} words, score {}, mean rank {}",
            row.domain,
            row.word_count,
            row.score,
            row.mean_rank
        );
    }

    Ok(())
}
