use log::{error, info};

use crate::fetch::{self, FetchError};
use crate::parsing::{DocumentWalker, parse_html_with};
use crate::settings::Settings;
use crate::types::{LinkIndex, Page};

/// Everything the interactive view needs about the loaded document.
#[derive(Debug, Clone)]
pub struct Session {
    pub url: String,
    pub page: Page,
    pub links: LinkIndex,
}

impl Session {
    pub fn new(url: impl Into<String>, page: Page) -> Self {
        let links = LinkIndex::from_page(&page);
        Self {
            url: url.into(),
            page,
            links,
        }
    }

    pub fn from_html(url: impl Into<String>, html: &[u8], settings: &Settings) -> Self {
        let walker = DocumentWalker::new(settings.title_class.clone());
        Self::new(url, parse_html_with(&walker, html))
    }

    /// Fetch and transform `url`.
    ///
    /// A failed fetch yields an empty page unless `fail_fast` is set, in which
    /// case the error is returned.
    pub fn load(url: &str, settings: &Settings) -> Result<Self, FetchError> {
        let fetched = fetch::normalize_url(url)
            .and_then(|parsed| fetch::fetch_document(&parsed, &settings.fetch_options()));

        match fetched {
            Ok(body) => {
                let session = Self::from_html(url, &body, settings);
                info!(
                    "Loaded {url}: {} blocks, {} links",
                    session.page.blocks.len(),
                    session.links.len()
                );
                Ok(session)
            }
            Err(e) if settings.fail_fast => Err(e),
            Err(e) => {
                error!("Error fetching URL: {e}");
                eprintln!("Error fetching URL: {e}");
                Ok(Self::new(url, Page::empty()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_html_uses_configured_title_class() {
        let settings = Settings {
            title_class: "headline".to_string(),
            ..Settings::default()
        };
        let html = br#"<h1 class="headline">Custom</h1><p>see <a href="/x">x</a></p>"#;
        let session = Session::from_html("https://example.com", html, &settings);

        assert_eq!(session.page.title, "Custom");
        assert_eq!(session.links.len(), 1);
        assert_eq!(session.url, "https://example.com");
    }

    #[test]
    fn test_invalid_url_gives_empty_page() {
        let session = Session::load("http://", &Settings::default()).unwrap();
        assert!(session.page.is_empty());
        assert!(session.links.is_empty());
    }

    #[test]
    fn test_invalid_url_fails_fast() {
        let settings = Settings {
            fail_fast: true,
            ..Settings::default()
        };
        let err = Session::load("http://", &settings).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
    }
}
