use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use thirtyfour::extensions::query::ElementQueryable;
use thirtyfour::{By, WebDriver};

use crate::configuration::ReadabilitySettings;

const SCORING_TOOL_URL: &str = "https://app.readable.com/text/";
const TEXT_INPUT_SELECTOR: &str = "#text_to_score";
const SCORE_OUTPUT_SELECTOR: &str = "#fave-flesch_reading_ease";
const SCORE_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Feed a scraped artifact into the external readability tool and read back
/// the score it renders. The score is returned verbatim as an opaque string,
/// no numeric parsing.
pub async fn read_score(
    driver: &WebDriver,
    artifact_path: &Path,
    settings: &ReadabilitySettings,
) -> anyhow::Result<String> {
    // The tool initialises its editor client-side; give it a moment.
    tokio::time::sleep(Duration::from_secs(settings.startup_delay_secs)).await;
    driver.goto(SCORING_TOOL_URL).await?;

    let text_input = driver.find(By::Css(TEXT_INPUT_SELECTOR)).await?;

    let artifact = fs::read_to_string(artifact_path)
        .with_context(|| format!("Failed to read artifact {}", artifact_path.display()))?;
    for line in artifact.lines() {
        // One keystroke entry per artifact line, newline included.
        text_input.send_keys(format!("{}\n", line)).await?;
    }

    let score = driver
        .query(By::Css(SCORE_OUTPUT_SELECTOR))
        .wait(
            Duration::from_secs(settings.score_timeout_secs),
            SCORE_POLL_INTERVAL,
        )
        .first()
        .await
        .context("Timed out waiting for the readability score")?;

    Ok(score.text().await?)
}
