// (C) Coralbits SL 2025
// This file is part of Techlabs Pages and is licensed under the
// GNU Affero General Public License v3.0.
// A commercial license on request is also available;
// contact info@coralbits.com for details.

use std::{fmt, sync::Arc};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::page::types::Page;

static SHORTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[/?[A-Za-z_][A-Za-z0-9_-]*(?:\s[^\]]*)?/?\]").expect("shortcode regex is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// A transformation applied to a page field before it is sanitized.
pub trait TextFilter: Send + Sync {
    fn name(&self) -> &str;
    fn apply(&self, text: &str, page: &Page) -> String;
}

/// Any `Fn(&str, &Page) -> String` can be registered as an anonymous filter.
impl<F> TextFilter for F
where
    F: Fn(&str, &Page) -> String + Send + Sync,
{
    fn name(&self) -> &str {
        "closure"
    }

    fn apply(&self, text: &str, page: &Page) -> String {
        self(text, page)
    }
}

pub struct Trim;

impl TextFilter for Trim {
    fn name(&self) -> &str {
        "trim"
    }

    fn apply(&self, text: &str, _page: &Page) -> String {
        text.trim().to_string()
    }
}

/// Drops `[shortcode attr="x"]` markers, keeping any enclosed text.
pub struct StripShortcodes;

impl TextFilter for StripShortcodes {
    fn name(&self) -> &str {
        "strip_shortcodes"
    }

    fn apply(&self, text: &str, _page: &Page) -> String {
        SHORTCODE.replace_all(text, "").into_owned()
    }
}

pub struct CollapseWhitespace;

impl TextFilter for CollapseWhitespace {
    fn name(&self) -> &str {
        "collapse_whitespace"
    }

    fn apply(&self, text: &str, _page: &Page) -> String {
        WHITESPACE.replace_all(text, " ").into_owned()
    }
}

pub fn builtin_filter(name: &str) -> Option<Arc<dyn TextFilter>> {
    match name {
        "trim" => Some(Arc::new(Trim)),
        "strip_shortcodes" => Some(Arc::new(StripShortcodes)),
        "collapse_whitespace" => Some(Arc::new(CollapseWhitespace)),
        _ => None,
    }
}

/// Ordered list of filters. Empty chains return the text unchanged.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn TextFilter>>,
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a chain out of builtin filter names, as listed in the config file.
    pub fn from_names(names: &[String]) -> anyhow::Result<Self> {
        let mut chain = Self::new();
        for name in names {
            let filter = builtin_filter(name)
                .ok_or_else(|| anyhow::anyhow!("Unknown text filter: {}", name))?;
            chain.filters.push(filter);
        }
        Ok(chain)
    }

    pub fn with_filter(mut self, filter: impl TextFilter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn apply(&self, text: &str, page: &Page) -> String {
        self.filters.iter().fold(text.to_string(), |acc, filter| {
            debug!("Applying filter={} page_id={}", filter.name(), page.id);
            filter.apply(&acc, page)
        })
    }
}

/// The two hook points of the page resource.
#[derive(Clone, Debug, Default)]
pub struct PageFilters {
    pub title: FilterChain,
    pub content: FilterChain,
}

impl PageFilters {
    pub fn from_config(config: &crate::config::ApiConfig) -> anyhow::Result<Self> {
        Ok(Self {
            title: FilterChain::from_names(&config.title_filters)?,
            content: FilterChain::from_names(&config.content_filters)?,
        })
    }
}
