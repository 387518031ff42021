//! Favorites page: filter, sort and paginate tracked products.

use tracing::warn;

use crate::backend::Backend;
use crate::error::Result;
use crate::list_query::{FavoritesQuery, SortOption};
use crate::models::{FavoriteProduct, FavoritesPage};

use super::{LoadSequence, LoadState, LoadTicket};

// ---------------------------------------------------------------------------
// FavoritesComposer
// ---------------------------------------------------------------------------

/// Parse a price filter input. Blank or non-numeric input means "no filter";
/// `"0"` is a real bound.
pub fn parse_price_filter(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Filter, sort and page selections of the favorites listing.
///
/// Every setter reports whether anything changed. Changing a filter or the
/// sort resets the page to 1; changing the page keeps everything else.
#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesComposer {
    category: String,
    min_price: String,
    max_price: String,
    sort: SortOption,
    page: u32,
}

impl Default for FavoritesComposer {
    fn default() -> Self {
        Self {
            category: String::new(),
            min_price: String::new(),
            max_price: String::new(),
            sort: SortOption::default(),
            page: 1,
        }
    }
}

impl FavoritesComposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn min_price(&self) -> &str {
        &self.min_price
    }

    pub fn max_price(&self) -> &str {
        &self.max_price
    }

    pub fn sort(&self) -> SortOption {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn set_category(&mut self, category: &str) -> bool {
        update_filter(&mut self.category, category, &mut self.page)
    }

    pub fn set_min_price(&mut self, input: &str) -> bool {
        update_filter(&mut self.min_price, input, &mut self.page)
    }

    pub fn set_max_price(&mut self, input: &str) -> bool {
        update_filter(&mut self.max_price, input, &mut self.page)
    }

    pub fn set_sort(&mut self, sort: SortOption) -> bool {
        if self.sort == sort {
            return false;
        }
        self.sort = sort;
        self.page = 1;
        true
    }

    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    /// The request these selections describe.
    pub fn query(&self) -> FavoritesQuery {
        let mut query = FavoritesQuery::new();
        query.page(self.page).category(&self.category);
        query.sort = self.sort;
        query.min_price = parse_price_filter(&self.min_price);
        query.max_price = parse_price_filter(&self.max_price);
        query
    }
}

fn update_filter(field: &mut String, value: &str, page: &mut u32) -> bool {
    if field.as_str() == value {
        return false;
    }
    *field = value.to_string();
    *page = 1;
    true
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Page position as reported by the latest response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: u32,
    pub total: u64,
    pub pages: u32,
}

impl Pagination {
    pub fn show_controls(&self) -> bool {
        self.pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

// ---------------------------------------------------------------------------
// FavoritesView
// ---------------------------------------------------------------------------

pub struct FavoritesView<'a, B: Backend + ?Sized> {
    backend: &'a B,
    composer: FavoritesComposer,
    categories: Vec<String>,
    pagination: Pagination,
    state: LoadState<Vec<FavoriteProduct>>,
    sequence: LoadSequence,
}

impl<'a, B: Backend + ?Sized> FavoritesView<'a, B> {
    /// Open the page: load categories and the first page of favorites.
    pub fn open(backend: &'a B) -> Self {
        Self::open_with(backend, FavoritesComposer::new())
    }

    /// Open the page with selections already made, as when restoring them.
    pub fn open_with(backend: &'a B, composer: FavoritesComposer) -> Self {
        let page = composer.page();
        let mut view = Self {
            backend,
            composer,
            categories: Vec::new(),
            pagination: Pagination {
                page,
                ..Pagination::default()
            },
            state: LoadState::Loading,
            sequence: LoadSequence::default(),
        };
        view.load_categories();
        view.reload();
        view
    }

    pub fn composer(&self) -> &FavoritesComposer {
        &self.composer
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    pub fn state(&self) -> &LoadState<Vec<FavoriteProduct>> {
        &self.state
    }

    fn load_categories(&mut self) {
        match self.backend.categories() {
            Ok(categories) => self.categories = categories,
            Err(e) => warn!(error = %e, "could not load categories"),
        }
    }

    // -- Intents -----------------------------------------------------------

    pub fn set_category(&mut self, category: &str) {
        if self.composer.set_category(category) {
            self.reload();
        }
    }

    pub fn set_min_price(&mut self, input: &str) {
        if self.composer.set_min_price(input) {
            self.reload();
        }
    }

    pub fn set_max_price(&mut self, input: &str) {
        if self.composer.set_max_price(input) {
            self.reload();
        }
    }

    pub fn set_sort(&mut self, sort: SortOption) {
        if self.composer.set_sort(sort) {
            self.reload();
        }
    }

    pub fn set_page(&mut self, page: u32) {
        if self.composer.set_page(page) {
            self.reload();
        }
    }

    pub fn next_page(&mut self) {
        if self.pagination.has_next() {
            self.set_page(self.composer.page() + 1);
        }
    }

    pub fn previous_page(&mut self) {
        if self.pagination.has_previous() {
            self.set_page(self.composer.page() - 1);
        }
    }

    /// Stop tracking a product and refresh the current page.
    pub fn remove(&mut self, id: i64) -> bool {
        match self.backend.remove_favorite(id) {
            Ok(()) => {
                self.backend
                    .notifier()
                    .success("Product removed from favorites");
                self.reload();
                true
            }
            Err(e) => {
                warn!(id, error = %e, "remove favorite failed");
                self.backend.notifier().error("Could not remove favorite");
                false
            }
        }
    }

    // -- Loading -----------------------------------------------------------

    /// Issue the current query and apply its result.
    pub fn reload(&mut self) {
        let (ticket, query) = self.begin_load();
        let result = self.backend.list_favorites(&query);
        self.finish_load(ticket, result);
    }

    /// Stamp a new load and return the query to send. Pair with
    /// [`finish_load`](Self::finish_load) when the request runs elsewhere.
    pub fn begin_load(&mut self) -> (LoadTicket, FavoritesQuery) {
        self.state = LoadState::Loading;
        (self.sequence.issue(), self.composer.query())
    }

    /// Apply a finished load unless a newer one has been issued since.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<FavoritesPage>) {
        if !self.sequence.accept(ticket, "favorites") {
            return;
        }
        match result {
            Ok(page) => {
                self.pagination = Pagination {
                    page: self.composer.page(),
                    total: page.total,
                    pages: page.pages,
                };
                self.state = LoadState::from_items(page.items);
            }
            Err(e) => {
                warn!(error = %e, "favorites load failed");
                self.backend.notifier().error("Could not load favorites");
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }
}
