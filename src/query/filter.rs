use serde::Serialize;

use crate::core::Toy;

/// Fixed number of toys per page.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    CreatedAt,
}

impl SortField {
    /// Unknown or empty names yield `None`, which disables sorting.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn from_multiplier(value: f64) -> Self {
        if value < 0.0 { Self::Desc } else { Self::Asc }
    }

    /// Anything that is not a negative number sorts ascending.
    pub fn parse(raw: &str) -> Self {
        raw.trim()
            .parse::<f64>()
            .map(Self::from_multiplier)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortBy {
    pub field: Option<SortField>,
    pub dir: SortDir,
}

impl SortBy {
    pub fn new(field: SortField, dir: SortDir) -> Self {
        Self {
            field: Some(field),
            dir,
        }
    }
}

/// Criteria for one catalogue query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToyFilter {
    pub txt: String,
    pub in_stock: Option<bool>,
    /// Every label listed here must be present on a toy.
    pub labels: Vec<String>,
    pub page_idx: usize,
    pub sort_by: SortBy,
}

impl ToyFilter {
    pub fn with_txt(mut self, txt: impl Into<String>) -> Self {
        self.txt = txt.into();
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = Some(in_stock);
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_page(mut self, page_idx: usize) -> Self {
        self.page_idx = page_idx;
        self
    }

    pub fn with_sort(mut self, field: SortField, dir: SortDir) -> Self {
        self.sort_by = SortBy::new(field, dir);
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToyPage {
    pub items: Vec<Toy>,
    pub max_page: usize,
}
