use crate::error::Result;
use crate::model::{Product, ProductStatus};
use crate::store::{StorageBackend, StorageEngine};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Only products in this status. `None` means all.
    pub status: Option<ProductStatus>,
    /// At most this many products, taken after sorting.
    pub limit: Option<usize>,
}

impl ProductFilter {
    pub fn active() -> Self {
        Self {
            status: Some(ProductStatus::Active),
            ..Default::default()
        }
    }

    fn matches(&self, product: &Product) -> bool {
        self.status.map_or(true, |status| product.status == status)
    }
}

/// Products sorted by creation date, most recent first. Equal dates keep their
/// document order. Never modifies the document.
pub fn run<B: StorageBackend>(
    store: &StorageEngine<B>,
    filter: &ProductFilter,
) -> Result<Vec<Product>> {
    store.read(|doc| {
        let mut products: Vec<Product> = doc
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        products.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = filter.limit {
            products.truncate(limit);
        }
        products
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, ProductInput};
    use crate::store::memory::fixtures::{product, StoreFixture};
    use crate::store::memory::InMemoryStore;
    use chrono::{Duration, TimeZone, Utc};

    fn names(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn empty_store_lists_nothing() {
        let fixture = StoreFixture::new();
        let products = run(&fixture.store, &ProductFilter::default()).unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn sorts_by_date_regardless_of_document_order() {
        let store = InMemoryStore::empty().unwrap();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut doc = Document::empty().unwrap();
        for (name, days) in [("Middle", 5), ("Oldest", 0), ("Newest", 9)] {
            doc.products.push(Product::from_input(
                ProductInput::new(name, "₹100", 1),
                base + Duration::days(days),
            ));
        }
        store.save(&doc).unwrap();

        let products = run(&store, &ProductFilter::default()).unwrap();
        assert_eq!(names(&products), vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn seed_catalog_is_newest_first() {
        let fixture = StoreFixture::seeded();
        let products = run(&fixture.store, &ProductFilter::default()).unwrap();
        assert_eq!(products.len(), 10);
        assert_eq!(products[0].name, "Bidri-work Trinket Box");
        assert_eq!(products[9].name, "Pashmina Shawl with Sozni Embroidery");
        assert!(products.windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn listing_does_not_write() {
        let fixture = StoreFixture::new().with_products(&["Vase"]);
        let writes = fixture.store.backend().write_count();
        let raw = fixture.store.backend().raw();
        run(&fixture.store, &ProductFilter::default()).unwrap();
        assert_eq!(fixture.store.backend().write_count(), writes);
        assert_eq!(fixture.store.backend().raw(), raw);
    }

    #[test]
    fn filters_by_status() {
        let fixture = StoreFixture::new()
            .with_products(&["Vase"])
            .with_status("Turtle", ProductStatus::Draft)
            .with_status("Old Shawl", ProductStatus::Archived);

        let active = run(&fixture.store, &ProductFilter::active()).unwrap();
        assert_eq!(names(&active), vec!["Vase"]);

        let drafts = run(
            &fixture.store,
            &ProductFilter {
                status: Some(ProductStatus::Draft),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(names(&drafts), vec!["Turtle"]);
    }

    #[test]
    fn limit_applies_after_sorting() {
        let fixture = StoreFixture::seeded();
        let featured = run(
            &fixture.store,
            &ProductFilter {
                status: Some(ProductStatus::Active),
                limit: Some(6),
            },
        )
        .unwrap();
        assert_eq!(featured.len(), 6);
        assert!(featured.iter().all(|p| p.status == ProductStatus::Active));
        assert_eq!(featured[0].name, "Bidri-work Trinket Box");
    }

    #[test]
    fn fixture_product_is_valid() {
        assert!(product("Vase").validate().is_ok());
    }
}
