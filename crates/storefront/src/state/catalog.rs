//! Catalog state reducer: filtering and pagination.
//!
//! Holds the fetched product list plus the current [`FilterConfig`] and
//! [`Pagination`], and derives the filtered, paged view. Pagination always
//! operates over the FILTERED list: total pages are recomputed from the
//! filtered count and the current page is clamped whenever the filtered set
//! shrinks.

use serde::{Deserialize, Serialize};

use marigold_core::Price;

use crate::api::Product;

/// Default page size for product listings.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

// =============================================================================
// Filters
// =============================================================================

/// Catalog filter settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Search term; empty means no search filtering.
    pub search: String,
    /// Selected categories (set semantics); empty means all categories.
    pub categories: Vec<String>,
    /// Optional inclusive price range.
    pub price_range: Option<PriceRange>,
}

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl FilterConfig {
    /// Whether a product passes every active filter.
    ///
    /// A product matches if (the search term is empty OR it appears
    /// case-insensitively in the title or description) AND (no categories
    /// are selected OR the product's category is one of them) AND (no price
    /// range is set OR the price is within it, inclusive).
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product) && self.matches_category(product) && self.matches_price(product)
    }

    fn matches_search(&self, product: &Product) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        product.title.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.iter().any(|c| c == &product.category)
    }

    fn matches_price(&self, product: &Product) -> bool {
        self.price_range
            .is_none_or(|range| product.price >= range.min && product.price <= range.max)
    }
}

// =============================================================================
// Pagination
// =============================================================================

/// Pagination over the filtered product list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Current page, 1-based.
    pub page: u32,
    /// Items per page, always positive.
    pub page_size: u32,
    /// Total items in the filtered list.
    pub total_items: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total_items: 0,
        }
    }
}

impl Pagination {
    /// Total pages: `ceil(total_items / page_size)`, at least 1 so an empty
    /// result still renders page 1 of 1.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        let pages = self.total_items.div_ceil(self.page_size);
        if pages == 0 { 1 } else { pages }
    }

    /// Whether a further page exists.
    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Clamp the current page into `[1, total_pages]`.
    const fn clamp_page(&mut self) {
        let total = self.total_pages();
        if self.page > total {
            self.page = total;
        }
        if self.page == 0 {
            self.page = 1;
        }
    }
}

// =============================================================================
// Catalog State
// =============================================================================

/// State transitions the catalog understands.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    /// Replace the product list (a fresh fetch landed).
    SetProducts(Vec<Product>),
    /// Replace the filter settings; resets to page 1.
    SetFilters(FilterConfig),
    /// Jump to a page (clamped).
    SetPage(u32),
    /// Change the page size (0 is ignored); resets to page 1.
    SetPageSize(u32),
}

/// Product list plus derived filtered/paged view.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Vec<Product>,
    filters: FilterConfig,
    pagination: Pagination,
}

impl CatalogState {
    /// Create a catalog from a fetched product list.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let mut state = Self::default();
        state.apply(CatalogAction::SetProducts(products));
        state
    }

    /// The unfiltered product list.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The active filters.
    #[must_use]
    pub fn filters(&self) -> &FilterConfig {
        &self.filters
    }

    /// The current pagination (always reflects the filtered list).
    #[must_use]
    pub const fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Products passing the active filters, in catalog order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| self.filters.matches(product))
            .collect()
    }

    /// The current page slice of the filtered list.
    #[must_use]
    pub fn page_items(&self) -> Vec<&Product> {
        let start = (self.pagination.page - 1).saturating_mul(self.pagination.page_size) as usize;
        self.filtered()
            .into_iter()
            .skip(start)
            .take(self.pagination.page_size as usize)
            .collect()
    }

    /// Apply a state transition, then re-derive pagination from the
    /// filtered count.
    pub fn apply(&mut self, action: CatalogAction) {
        match action {
            CatalogAction::SetProducts(products) => {
                self.products = products;
            }
            CatalogAction::SetFilters(filters) => {
                self.filters = filters;
                self.pagination.page = 1;
            }
            CatalogAction::SetPage(page) => {
                self.pagination.page = page.max(1);
            }
            CatalogAction::SetPageSize(page_size) => {
                if page_size > 0 {
                    self.pagination.page_size = page_size;
                    self.pagination.page = 1;
                }
            }
        }
        self.reconcile();
    }

    /// Recompute totals and clamp the page after any transition; a shrinking
    /// filtered set must never leave the current page out of range.
    fn reconcile(&mut self) {
        self.pagination.total_items =
            u32::try_from(self.filtered().len()).unwrap_or(u32::MAX);
        self.pagination.clamp_page();
    }
}
