//! Filter chain and built-in filters.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;

use crate::value::Value;

use super::Filter;

/// Runs filters in order, feeding each the previous output.
///
/// An empty chain returns its input unchanged.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    pub fn with(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Arc::new(filter));
        self
    }

    /// Number of filters in the chain.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Check if the chain has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

#[async_trait]
impl Filter for FilterChain {
    async fn filter(&self, value: Value) -> Value {
        let mut value = value;
        for filter in &self.filters {
            value = filter.filter(value).await;
        }
        value
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Strips leading and trailing whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct Trim;

#[async_trait]
impl Filter for Trim {
    async fn filter(&self, value: Value) -> Value {
        value.map_text(|text| text.trim().to_string())
    }
}

/// Converts to lowercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lowercase;

#[async_trait]
impl Filter for Lowercase {
    async fn filter(&self, value: Value) -> Value {
        value.map_text(|text| text.to_lowercase())
    }
}

/// Converts to uppercase.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uppercase;

#[async_trait]
impl Filter for Uppercase {
    async fn filter(&self, value: Value) -> Value {
        value.map_text(|text| text.to_uppercase())
    }
}

/// Collapses every run of whitespace into a single space.
#[derive(Debug, Clone, Copy, Default)]
pub struct CollapseWhitespace;

#[async_trait]
impl Filter for CollapseWhitespace {
    async fn filter(&self, value: Value) -> Value {
        value.map_text(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
    }
}

/// Replaces every match of a pattern.
#[derive(Debug, Clone)]
pub struct Replace {
    pattern: Regex,
    replacement: String,
}

impl Replace {
    /// Replace matches of `pattern` with `replacement` (`$1` style groups allowed).
    pub fn new(pattern: Regex, replacement: impl Into<String>) -> Self {
        Self {
            pattern,
            replacement: replacement.into(),
        }
    }
}

#[async_trait]
impl Filter for Replace {
    async fn filter(&self, value: Value) -> Value {
        value.map_text(|text| {
            self.pattern
                .replace_all(&text, self.replacement.as_str())
                .into_owned()
        })
    }
}

/// Filter from a synchronous closure. See [`filter_fn`].
pub struct FnFilter<F> {
    f: F,
}

/// Wrap a closure as a filter.
pub fn filter_fn<F>(f: F) -> FnFilter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    FnFilter { f }
}

#[async_trait]
impl<F> Filter for FnFilter<F>
where
    F: Fn(Value) -> Value + Send + Sync,
{
    async fn filter(&self, value: Value) -> Value {
        (self.f)(value)
    }
}
