//! Page fetching and fragment extraction.
//!
//! Sched puts the session details of an event page inside
//! `<div id="sched-content-inner">`. We keep the inner markup of that element
//! and nothing else.

use std::fmt;

use scraper::{Html, Selector};
use tracing::warn;

use crate::error::{FetchError, FetchResult};

pub const DEFAULT_TAG: &str = "div";
pub const DEFAULT_ATTRIBUTE: &str = "id";
pub const DEFAULT_VALUE: &str = "sched-content-inner";

/// Something that can return the body of a page given its URL.
pub trait PageSource {
    fn get(&self, url: &str) -> FetchResult<String>;
}

/// Plain HTTP GET with reqwest's blocking client, no extra headers.
///
/// The status code is not inspected: an error page is returned like any
/// other body.
pub struct HttpSource {
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new() -> FetchResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(FetchError::HttpClient)?;

        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    fn get(&self, url: &str) -> FetchResult<String> {
        let request_err = |source: reqwest::Error| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(request_err)?;
        response.text().map_err(request_err)
    }
}

/// Element lookup by tag name and attribute value, e.g. `div[id="..."]`.
#[derive(Debug, Clone)]
pub struct FragmentSelector {
    tag: String,
    attribute: String,
    value: String,
    compiled: Selector,
}

impl FragmentSelector {
    pub fn new(tag: &str, attribute: &str, value: &str) -> FetchResult<Self> {
        let css = to_css(tag, attribute, value);
        let compiled = Selector::parse(&css).map_err(|e| FetchError::Selector {
            selector: css.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            tag: tag.to_string(),
            attribute: attribute.to_string(),
            value: value.to_string(),
            compiled,
        })
    }

    /// `div[id="sched-content-inner"]`
    pub fn sched() -> FetchResult<Self> {
        Self::new(DEFAULT_TAG, DEFAULT_ATTRIBUTE, DEFAULT_VALUE)
    }
}

impl fmt::Display for FragmentSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_css(&self.tag, &self.attribute, &self.value))
    }
}

fn to_css(tag: &str, attribute: &str, value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("{tag}[{attribute}=\"{escaped}\"]")
}

/// Inner HTML of the first element matching `selector`, if any.
pub fn extract_fragment(html: &str, selector: &FragmentSelector) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&selector.compiled)
        .next()
        .map(|element| element.inner_html())
}

/// GET `url` and extract the fragment from the response.
///
/// A page without the fragment yields an empty string unless `strict` is set.
pub fn fetch_fragment(
    source: &impl PageSource,
    url: &str,
    selector: &FragmentSelector,
    strict: bool,
) -> FetchResult<String> {
    let body = source.get(url)?;

    match extract_fragment(&body, selector) {
        Some(fragment) => Ok(fragment),
        None if strict => Err(FetchError::FragmentNotFound {
            url: url.to_string(),
            selector: selector.to_string(),
        }),
        None => {
            warn!(%url, %selector, "fragment not found, writing empty file");
            Ok(String::new())
        }
    }
}
