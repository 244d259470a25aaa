//! Read-model assembly for the product page.

use crate::error::Result;
use crate::models::ProductDetail;
use crate::outcome::FetchOutcome;
use crate::queries::{
    HistoryQuery, OfferQuery, ProductQuery, ReviewQuery, SpecificationQuery,
};

/// Builds [`ProductDetail`] read models.
///
/// Every view that needs a product with its related rows goes through
/// [`load`](Self::load), so the join is shaped in exactly one place.
pub struct DetailQuery<'a> {
    conn: &'a crate::connection::Connection,
}

impl<'a> DetailQuery<'a> {
    pub fn new(conn: &'a crate::connection::Connection) -> Self {
        Self { conn }
    }

    /// Load a product with its offers, history, reviews and spec sheet.
    ///
    /// Returns `None` when the product does not exist; related collections
    /// are not queried in that case. Only the product row is required: a
    /// related collection that fails to load is logged and left empty, so
    /// the page still renders.
    pub fn load(&self, product_id: &str) -> Result<Option<ProductDetail>> {
        let Some(product) = ProductQuery::new(self.conn).get(product_id)? else {
            return Ok(None);
        };
        let id = product.id.as_str();

        let offers = FetchOutcome::from(OfferQuery::new(self.conn).for_product(id)).into_rows();
        let history = FetchOutcome::from(HistoryQuery::new(self.conn).for_product(id)).into_rows();
        let reviews = FetchOutcome::from(ReviewQuery::new(self.conn).for_product(id)).into_rows();
        let specifications =
            FetchOutcome::from(SpecificationQuery::new(self.conn).for_product(id)).into_rows();

        Ok(Some(ProductDetail {
            product,
            offers,
            history,
            reviews,
            specifications,
        }))
    }
}
