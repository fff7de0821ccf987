//! Blog extraction: fetch a page, pull out its title and main text.

use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Candidate containers for the post body, most specific first.
static CONTENT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "main", "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("static selector is valid"))
        .collect()
});

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static selector is valid"));

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPage {
    pub title: String,
    pub main: String,
}

/// Fetches `url` and extracts its title and body text.
pub async fn fetch_and_extract(client: &Client, url: &str) -> Result<ExtractedPage, ExtractError> {
    let fetch_err = |source| ExtractError::Fetch {
        url: url.to_string(),
        source,
    };

    let response = client.get(url).send().await.map_err(fetch_err)?;
    let status = response.status();
    if !status.is_success() {
        return Err(ExtractError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let html = response.text().await.map_err(fetch_err)?;

    let page = extract_page(&html);
    info!(
        "Extracted '{}' from {url} ({} chars)",
        page.title,
        page.main.chars().count()
    );
    Ok(page)
}

/// Title from `<title>`; body from the first of `<article>`, `<main>`, `<body>`
/// whose text is non-empty.
pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let title = collect_text(&document, &TITLE_SELECTOR);
    let main = CONTENT_SELECTORS
        .iter()
        .map(|selector| collect_text(&document, selector))
        .find(|text| !text.is_empty())
        .unwrap_or_default();

    ExtractedPage { title, main }
}

fn collect_text(document: &Html, selector: &Selector) -> String {
    document
        .select(selector)
        .flat_map(|element| element.text())
        .collect::<String>()
        .trim()
        .to_string()
}
