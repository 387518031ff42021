//! Home page: browse the catalog and start tracking products.

use tracing::warn;

use crate::backend::Backend;
use crate::error::Result;
use crate::models::ExternalProduct;
use crate::reconcile::{FavoritedSet, ProductActions, ProductRef};

use super::{LoadSequence, LoadState, LoadTicket};

pub struct HomeView<'a, B: Backend + ?Sized> {
    backend: &'a B,
    categories: Vec<String>,
    selected_category: String,
    products: LoadState<Vec<ProductRef>>,
    favorited: FavoritedSet,
    sequence: LoadSequence,
}

impl<'a, B: Backend + ?Sized> HomeView<'a, B> {
    /// Open the page: categories, the unfiltered catalog, and which of its
    /// products are already favorites.
    pub fn open(backend: &'a B) -> Self {
        let mut view = Self {
            backend,
            categories: Vec::new(),
            selected_category: String::new(),
            products: LoadState::Loading,
            favorited: FavoritedSet::default(),
            sequence: LoadSequence::default(),
        };
        match backend.categories() {
            Ok(categories) => view.categories = categories,
            Err(e) => warn!(error = %e, "could not load categories"),
        }
        view.reload();
        view
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn products(&self) -> &LoadState<Vec<ProductRef>> {
        &self.products
    }

    pub fn is_favorited(&self, external_id: i64) -> bool {
        self.favorited.contains(external_id)
    }

    pub fn actions(&self, product: &ProductRef) -> ProductActions {
        let favorited = product
            .external_id()
            .is_some_and(|id| self.favorited.contains(id));
        product.actions(favorited)
    }

    // -- Intents -----------------------------------------------------------

    /// Search the catalog within `category` (empty for all categories).
    pub fn search(&mut self, category: &str) {
        self.selected_category = category.to_string();
        self.reload();
    }

    /// Start tracking a catalog product. The favorited set only changes
    /// after the backend confirms.
    pub fn add_favorite(&mut self, external_id: i64) -> bool {
        match self.backend.add_favorite(external_id) {
            Ok(_) => {
                self.favorited.insert(external_id);
                self.backend
                    .notifier()
                    .success("Product added to favorites");
                self.refresh_favorited();
                true
            }
            Err(e) => {
                warn!(external_id, error = %e, "add favorite failed");
                self.backend.notifier().error("Could not add to favorites");
                false
            }
        }
    }

    // -- Loading -----------------------------------------------------------

    pub fn reload(&mut self) {
        let ticket = self.begin_load();
        let category = Some(self.selected_category.as_str()).filter(|c| !c.is_empty());
        let result = self.backend.search_products(category);
        self.finish_load(ticket, result);
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.products = LoadState::Loading;
        self.sequence.issue()
    }

    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<ExternalProduct>>) {
        if !self.sequence.accept(ticket, "home") {
            return;
        }
        match result {
            Ok(products) => {
                self.products =
                    LoadState::from_items(products.into_iter().map(ProductRef::Untracked).collect());
                self.refresh_favorited();
            }
            Err(e) => {
                warn!(error = %e, "product search failed");
                self.backend.notifier().error("Could not load products");
                self.products = LoadState::Failed(e.to_string());
            }
        }
    }

    fn refresh_favorited(&mut self) {
        match FavoritedSet::load(self.backend) {
            Ok(set) => self.favorited = set,
            Err(e) => warn!(error = %e, "could not refresh favorited products"),
        }
    }
}
