//! Page-level state for the comparison and product pages.
//!
//! Each page owns one [`ViewState`] per independent fetch. The blocking
//! helpers (`search`, `select`, `open`) start and complete a fetch in one
//! call; async callers use the `begin_*`/`finish_*` pairs and run the query
//! in between, letting the generation tokens drop late responses.

use crate::aggregate::{self, BestOffer};
use crate::models::{PriceOffer, Product, ProductDetail};
use crate::outcome::FetchOutcome;
use crate::sort::{SortField, SortState};
use crate::view::{Completion, Ticket, ViewState};
use crate::PriceCompareSdk;

// ---------------------------------------------------------------------------
// CompareSession
// ---------------------------------------------------------------------------

/// State of the price comparison page: product picker, selected product and
/// its sortable offer table.
#[derive(Debug)]
pub struct CompareSession {
    products: ViewState<Product>,
    offers: ViewState<PriceOffer>,
    selected: Option<Product>,
    sort: SortState,
}

impl Default for CompareSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareSession {
    pub fn new() -> Self {
        Self {
            products: ViewState::new("compare.products"),
            offers: ViewState::new("compare.offers"),
            selected: None,
            sort: SortState::default(),
        }
    }

    /// Load the full product picker.
    pub fn load_products(&mut self, sdk: &PriceCompareSdk) -> Completion {
        let ticket = self.products.begin();
        let outcome = FetchOutcome::from(sdk.products().list());
        self.products.complete(ticket, outcome)
    }

    /// Filter the picker by name. A blank query reloads the full listing.
    pub fn search(&mut self, sdk: &PriceCompareSdk, query: &str) -> Completion {
        let ticket = self.begin_search();
        let outcome = FetchOutcome::from(sdk.products().search(query));
        self.finish_search(ticket, outcome)
    }

    pub fn begin_search(&mut self) -> Ticket {
        self.products.begin()
    }

    pub fn finish_search(&mut self, ticket: Ticket, outcome: FetchOutcome<Product>) -> Completion {
        self.products.complete(ticket, outcome)
    }

    /// Select a product and load its offers.
    pub fn select(&mut self, sdk: &PriceCompareSdk, product: Product) -> Completion {
        let product_id = product.id.clone();
        let ticket = self.begin_select(product);
        let outcome = FetchOutcome::from(sdk.offers().for_product(&product_id));
        self.finish_select(ticket, outcome)
    }

    pub fn begin_select(&mut self, product: Product) -> Ticket {
        self.selected = Some(product);
        self.offers.begin()
    }

    pub fn finish_select(&mut self, ticket: Ticket, outcome: FetchOutcome<PriceOffer>) -> Completion {
        self.offers.complete(ticket, outcome)
    }

    /// Handle a click on a column header of the offer table.
    pub fn toggle_sort(&mut self, field: SortField) {
        self.sort.toggle(field);
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Offers of the selected product in table order.
    pub fn sorted_offers(&self) -> Vec<PriceOffer> {
        self.sort.apply(self.offers.data())
    }

    /// Cheapest offer of the selected product; `None` means "no price data".
    pub fn best_offer(&self) -> Option<BestOffer<'_>> {
        aggregate::best_offer(self.offers.data())
    }

    pub fn products(&self) -> &ViewState<Product> {
        &self.products
    }

    pub fn offers(&self) -> &ViewState<PriceOffer> {
        &self.offers
    }

    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }
}

// ---------------------------------------------------------------------------
// ProductPage
// ---------------------------------------------------------------------------

/// State of the product detail page.
#[derive(Debug)]
pub struct ProductPage {
    detail: ViewState<ProductDetail>,
}

impl Default for ProductPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductPage {
    pub fn new() -> Self {
        Self {
            detail: ViewState::new("product.detail"),
        }
    }

    /// Load the read model of `product_id`.
    pub fn open(&mut self, sdk: &PriceCompareSdk, product_id: &str) -> Completion {
        let ticket = self.begin_open();
        let outcome = FetchOutcome::from_single(sdk.detail().load(product_id));
        self.finish_open(ticket, outcome)
    }

    pub fn begin_open(&mut self) -> Ticket {
        self.detail.begin()
    }

    pub fn finish_open(&mut self, ticket: Ticket, outcome: FetchOutcome<ProductDetail>) -> Completion {
        self.detail.complete(ticket, outcome)
    }

    pub fn detail(&self) -> Option<&ProductDetail> {
        self.detail.data().first()
    }

    pub fn is_loading(&self) -> bool {
        self.detail.is_loading()
    }

    /// The product does not exist and the page should send the user home.
    ///
    /// A failed load does not redirect; it keeps whatever was shown.
    pub fn not_found(&self) -> bool {
        self.detail.is_loaded() && self.detail.is_empty() && self.detail.last_error().is_none()
    }

    pub fn state(&self) -> &ViewState<ProductDetail> {
        &self.detail
    }
}
