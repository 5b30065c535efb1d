//! Document views over markup response bodies

use scraper::{ElementRef, Html, Selector};

use crate::exchange::Response;

/// Parsed, read-only view of a markup response body.
///
/// Built once per response and dropped after that response's extensions
/// and request-factory call have run; never retained by the runner.
pub struct DocumentView {
    html: Html,
}

impl DocumentView {
    /// Build a view when the response's `Content-Type` header contains the
    /// substring `"html"` or `"xml"`. Plain substring match, no case
    /// normalization.
    pub fn from_response(response: &Response) -> Option<Self> {
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())?;

        if !content_type.contains("html") && !content_type.contains("xml") {
            return None;
        }

        let body = String::from_utf8_lossy(response.body());
        Some(Self::parse(&body))
    }

    /// Parse markup directly.
    pub fn parse(markup: &str) -> Self {
        Self {
            html: Html::parse_document(markup),
        }
    }

    /// Elements matching a CSS selector. An invalid selector matches
    /// nothing.
    pub fn select(&self, css: &str) -> Vec<ElementRef<'_>> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn select_first(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(css).ok()?;
        self.html.select(&selector).next()
    }

    /// Concatenated text of the first element matching the selector.
    pub fn text_of(&self, css: &str) -> Option<String> {
        self.select_first(css)
            .map(|element| element.text().collect::<String>())
    }

    /// Attribute value of the first element matching the selector.
    pub fn attr_of(&self, css: &str, attr: &str) -> Option<String> {
        self.select_first(css)
            .and_then(|element| element.value().attr(attr))
            .map(|value| value.to_string())
    }

    /// Serialized form of the parsed document.
    pub fn html(&self) -> String {
        self.html.html()
    }
}
