use std::fs;
use std::path::Path;

use anyhow::Context;
use scraper::{Html, Selector};
use thirtyfour::WebDriver;

const CONTENT_SELECTOR: &str = "h1, h2, h3, h4, h5, h6, p";

/// Scrape the heading and paragraph text of a page into the named artifact
/// file, one block per line with a blank separator line, and return the total
/// whitespace-delimited word count.
pub async fn scrape(driver: &WebDriver, url: &str, artifact_path: &Path) -> anyhow::Result<usize> {
    driver.goto(url).await?;
    let page_source = driver.source().await?;

    let blocks = extract_text_blocks(&page_source);
    let words = word_count(&blocks);

    fs::write(artifact_path, render_artifact(&blocks))
        .with_context(|| format!("Failed to write artifact {}", artifact_path.display()))?;

    log::info!(
        "Scraped {} text blocks with {} words from {}",
        blocks.len(),
        words,
        url
    );

    Ok(words)
}

/// Text of every heading and paragraph element, in document order. Empty
/// elements are kept: they still produce a blank artifact line and count
/// zero words.
pub fn extract_text_blocks(page_source: &str) -> Vec<String> {
    let content_selector = Selector::parse(CONTENT_SELECTOR).unwrap();
    let document = Html::parse_document(page_source);

    document
        .select(&content_selector)
        .map(|element| element.text().collect())
        .collect()
}

/// One artifact line per block, each followed by a blank separator line.
pub fn render_artifact(blocks: &[String]) -> String {
    let mut artifact = String::new();
    for block in blocks {
        artifact.push_str(block);
        artifact.push_str("\n\n");
    }
    artifact
}

pub fn word_count(blocks: &[String]) -> usize {
    blocks
        .iter()
        .map(|block| block.split_whitespace().count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::{extract_text_blocks, render_artifact, word_count};

    #[test]
    fn blocks_follow_document_order() {
        let page = "<html><body>\
            <h1>Welcome</h1>\
            <div><p>About us, established 2010</p></div>\
            <h2>Contact</h2>\
            </body></html>";

        let blocks = extract_text_blocks(page);
        assert_eq!(blocks, vec!["Welcome", "About us, established 2010", "Contact"]);
    }

    #[test]
    fn empty_elements_are_kept_and_count_nothing() {
        let page = "<html><body><h1>Hello world</h1><p></p><p>Foo</p></body></html>";

        let blocks = extract_text_blocks(page);
        assert_eq!(blocks, vec!["Hello world", "", "Foo"]);
        assert_eq!(word_count(&blocks), 3);
    }

    #[test]
    fn artifact_lines_are_separated_by_blank_lines() {
        let blocks = vec!["Welcome".to_string(), String::new(), "Foo".to_string()];
        assert_eq!(render_artifact(&blocks), "Welcome\n\n\n\nFoo\n\n");
    }

    #[test]
    fn word_count_sums_whitespace_split_tokens() {
        let blocks = vec![
            "Welcome".to_string(),
            "About us, established 2010".to_string(),
        ];
        assert_eq!(word_count(&blocks), 5);
    }
}
