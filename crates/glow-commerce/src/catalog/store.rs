//! The persisted, per-category product store.

use std::sync::{Arc, Mutex};

use glow_store::{JsonStore, KvStore};
use rand::seq::SliceRandom;

use crate::catalog::export::CombinedExport;
use crate::catalog::{
    normalize, normalize_record, BundledFixtures, Category, CategorySelector, FixtureSource,
    ProductDraft, ProductRecord,
};
use crate::config::CatalogConfig;
use crate::error::CommerceError;
use crate::ids::IdGenerator;
use crate::notify::{ChangeEvent, ChangeNotifier, Subscription};

/// Product lists keyed by category, persisted as one JSON array per
/// category under `{category}Products`.
///
/// Writes replace the whole list. A failed write leaves the stored list
/// exactly as it was and publishes nothing.
pub struct CatalogStore<S> {
    store: JsonStore<S>,
    fixtures: Arc<dyn FixtureSource>,
    notifier: ChangeNotifier,
    ids: IdGenerator,
    all_limit: usize,
    write_lock: Mutex<()>,
}

impl<S> std::fmt::Debug for CatalogStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("all_limit", &self.all_limit)
            .field("subscribers", &self.notifier.subscriber_count())
            .finish_non_exhaustive()
    }
}

impl<S: KvStore> CatalogStore<S> {
    /// Create a store over `store` with the bundled fixtures.
    pub fn new(store: S) -> Self {
        Self {
            store: JsonStore::new(store),
            fixtures: Arc::new(BundledFixtures),
            notifier: ChangeNotifier::new(),
            ids: IdGenerator::new(),
            all_limit: CatalogConfig::default().all_limit,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store configured from `config`.
    pub fn from_config(store: S, config: &CatalogConfig) -> Self {
        Self::new(store).with_all_limit(config.all_limit)
    }

    /// Replace the fixture source.
    pub fn with_fixtures(mut self, fixtures: impl FixtureSource + 'static) -> Self {
        self.fixtures = Arc::new(fixtures);
        self
    }

    /// Limit the size of the "all" listing.
    pub fn with_all_limit(mut self, limit: usize) -> Self {
        self.all_limit = limit;
        self
    }

    /// Records to show for `selector`.
    ///
    /// For [`CategorySelector::All`] this is a random sample across the
    /// storefront categories. For a single category it is the persisted
    /// list, or the bundled fixture when nothing has been persisted yet, or
    /// the `fashion` fixture when that category has no fixture either.
    pub fn list_by_category(
        &self,
        selector: CategorySelector,
    ) -> Result<Vec<ProductRecord>, CommerceError> {
        match selector {
            CategorySelector::All => self.list_all(),
            CategorySelector::One(category) => self.list_one(category),
        }
    }

    fn list_all(&self) -> Result<Vec<ProductRecord>, CommerceError> {
        let mut records = Vec::new();
        for category in Category::STOREFRONT {
            if let Some(persisted) = self.persisted(category)? {
                records.extend(persisted);
            }
        }

        records.shuffle(&mut rand::thread_rng());
        records.truncate(self.all_limit);
        tracing::debug!(count = records.len(), "loaded products from all categories");
        Ok(records)
    }

    fn list_one(&self, category: Category) -> Result<Vec<ProductRecord>, CommerceError> {
        if let Some(records) = self.persisted(category)? {
            tracing::debug!(%category, count = records.len(), "loaded persisted products");
            return Ok(records);
        }

        match self.fixtures.load(category) {
            Ok(Some(records)) => {
                tracing::debug!(%category, count = records.len(), "loaded fixture products");
                return Ok(normalize_all(records, category));
            }
            Ok(None) => {
                tracing::debug!(%category, "no fixture, using fashion");
            }
            Err(e) => {
                tracing::warn!(%category, error = %e, "fixture unreadable, using fashion");
            }
        }

        let records = self.fixtures.load(Category::Fashion)?.unwrap_or_default();
        Ok(normalize_all(records, Category::Fashion))
    }

    /// The persisted list for `category`, `None` if it was never written.
    ///
    /// Loaded ids are fed to the id generator so later ids sort after them.
    pub fn persisted(&self, category: Category) -> Result<Option<Vec<ProductRecord>>, CommerceError> {
        let records: Option<Vec<ProductRecord>> = self.store.get(&category.storage_key())?;
        if let Some(max) = records.iter().flatten().map(|r| r.id).max() {
            self.ids.observe(max);
        }
        Ok(records)
    }

    /// Normalize `record` and append it to `category`'s list.
    pub fn append(
        &self,
        category: Category,
        record: ProductRecord,
    ) -> Result<ProductRecord, CommerceError> {
        let record = normalize_record(record, category);
        let key = category.storage_key();

        {
            let _guard = self
                .write_lock
                .lock()
                .map_err(|_| CommerceError::Serialization("catalog write lock poisoned".to_string()))?;

            let mut records = self.persisted(category)?.unwrap_or_default();
            records.push(record.clone());

            if let Err(e) = self.store.set(&key, &records) {
                tracing::error!(%category, error = %e, "failed to save product");
                return Err(CommerceError::Persistence(e));
            }
            tracing::info!(%category, id = %record.id, count = records.len(), "saved product");
        }

        self.ids.observe(record.id);
        self.notifier.notify(ChangeEvent::Appended {
            category,
            id: record.id,
        });
        Ok(record)
    }

    /// Validate an admin draft, assign it an id and append it to its category.
    pub fn create(&self, draft: &ProductDraft) -> Result<ProductRecord, CommerceError> {
        draft.validate()?;
        let record = normalize(draft, self.ids.next_id());
        self.append(draft.category, record)
    }

    /// Remove every storefront category's persisted list.
    pub fn clear_all(&self) -> Result<(), CommerceError> {
        {
            let _guard = self
                .write_lock
                .lock()
                .map_err(|_| CommerceError::Serialization("catalog write lock poisoned".to_string()))?;
            for category in Category::STOREFRONT {
                self.store
                    .delete(&category.storage_key())
                    .map_err(CommerceError::Persistence)?;
            }
        }
        tracing::info!("all products cleared");
        self.notifier.notify(ChangeEvent::Cleared);
        Ok(())
    }

    /// `category`'s persisted list as indented JSON.
    pub fn export_category(&self, category: Category) -> Result<Vec<u8>, CommerceError> {
        let records = self.persisted(category)?.unwrap_or_default();
        Ok(serde_json::to_vec_pretty(&records)?)
    }

    /// Every storefront category's persisted list as one indented JSON object.
    pub fn export_all(&self) -> Result<Vec<u8>, CommerceError> {
        let mut lists = Vec::with_capacity(Category::STOREFRONT.len());
        for category in Category::STOREFRONT {
            lists.push((category, self.persisted(category)?.unwrap_or_default()));
        }
        Ok(serde_json::to_vec_pretty(&CombinedExport(&lists))?)
    }

    /// Listen for changes.
    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    pub fn notifier(&self) -> &ChangeNotifier {
        &self.notifier
    }

    /// The typed key-value store underneath.
    pub fn kv(&self) -> &JsonStore<S> {
        &self.store
    }

    /// Close the underlying store.
    pub fn close(&self) -> Result<(), CommerceError> {
        self.store.close()?;
        Ok(())
    }
}

fn normalize_all(records: Vec<ProductRecord>, category: Category) -> Vec<ProductRecord> {
    records
        .into_iter()
        .map(|record| normalize_record(record, category))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use glow_store::MemoryStore;

    fn record(id: i64, title: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: title.to_string(),
            image: format!("https://img.example/{id}.jpg"),
            images: Vec::new(),
            price: 20.0,
            rating: 4.0,
            reviews: 3,
            review_snippet: "Nice".to_string(),
            affiliate_link: "https://shop.example".to_string(),
            category: None,
        }
    }

    #[test]
    fn test_append_preserves_insertion_order() {
        let catalog = CatalogStore::new(MemoryStore::new());
        catalog.append(Category::Girls, record(2, "B first")).unwrap();
        catalog.append(Category::Girls, record(1, "A second")).unwrap();

        let listed = catalog
            .list_by_category(CategorySelector::One(Category::Girls))
            .unwrap();
        let titles: Vec<&str> = listed.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B first", "A second"]);
    }

    #[test]
    fn test_append_normalizes() {
        let catalog = CatalogStore::new(MemoryStore::new());
        let stored = catalog.append(Category::Baby, record(1, "Lotion")).unwrap();
        assert_eq!(stored.images, vec![stored.image.clone()]);
        assert_eq!(stored.category, Some(Category::Baby));
    }

    #[test]
    fn test_fixture_then_fashion_fallback() {
        let catalog = CatalogStore::new(MemoryStore::new());

        let men = catalog.list_by_category(Category::Men.into()).unwrap();
        assert!(men.iter().all(|r| r.category == Some(Category::Men)));

        let girls = catalog.list_by_category(Category::Girls.into()).unwrap();
        let fashion = catalog.list_by_category(Category::Fashion.into()).unwrap();
        assert_eq!(girls, fashion);
        assert!(girls.iter().all(|r| !r.images.is_empty() && !r.image.is_empty()));
    }

    #[test]
    fn test_no_fixtures_lists_nothing() {
        let catalog = CatalogStore::new(MemoryStore::new()).with_fixtures(crate::catalog::NoFixtures);
        assert!(catalog.list_by_category(Category::Women.into()).unwrap().is_empty());
    }

    #[test]
    fn test_persisted_empty_list_is_not_replaced_by_fixture() {
        let catalog = CatalogStore::new(MemoryStore::new());
        catalog
            .kv()
            .set(&Category::Women.storage_key(), &Vec::<ProductRecord>::new())
            .unwrap();
        assert!(catalog.list_by_category(Category::Women.into()).unwrap().is_empty());
    }

    #[test]
    fn test_all_ignores_fixtures_and_caps() {
        let catalog = CatalogStore::new(MemoryStore::new());
        assert!(catalog.list_by_category(CategorySelector::All).unwrap().is_empty());

        for i in 0..20 {
            let category = Category::STOREFRONT[i % Category::STOREFRONT.len()];
            catalog.append(category, record(i as i64, "Item")).unwrap();
        }
        assert_eq!(catalog.list_by_category(CategorySelector::All).unwrap().len(), 12);
    }

    #[test]
    fn test_create_rejects_invalid_draft_without_writing() {
        let catalog = CatalogStore::new(MemoryStore::new());
        let err = catalog.create(&ProductDraft::default()).unwrap_err();
        assert!(err.is_validation());
        assert!(catalog.kv().keys().unwrap().is_empty());
    }

    #[test]
    fn test_new_ids_sort_after_loaded_ids() {
        let shared = Arc::new(MemoryStore::new());
        let future = 4_000_000_000_000;
        CatalogStore::new(Arc::clone(&shared))
            .append(Category::Skincare, record(future, "Serum"))
            .unwrap();

        let catalog = CatalogStore::new(Arc::clone(&shared));
        catalog
            .list_by_category(CategorySelector::One(Category::Skincare))
            .unwrap();
        let created = catalog
            .create(&ProductDraft {
                title: "Toner".to_string(),
                image: "https://img.example/t.jpg".to_string(),
                price: Some(12.0),
                rating: Some(4.5),
                reviews: Some(8),
                review_snippet: "Fresh".to_string(),
                affiliate_link: "https://shop.example/t".to_string(),
                category: Category::Skincare,
                ..Default::default()
            })
            .unwrap();
        assert!(created.id.get() > future);
    }

    #[test]
    fn test_clear_all_removes_storefront_lists() {
        let catalog = CatalogStore::new(MemoryStore::new());
        catalog.append(Category::Makeup, record(1, "Blush")).unwrap();
        catalog.clear_all().unwrap();
        assert!(catalog.persisted(Category::Makeup).unwrap().is_none());
    }

    #[test]
    fn test_export_category_is_two_space_json() {
        let catalog = CatalogStore::new(MemoryStore::new());
        catalog.append(Category::Skincare, record(9, "Toner")).unwrap();

        let text = String::from_utf8(catalog.export_category(Category::Skincare).unwrap()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": 9"));

        let empty = String::from_utf8(catalog.export_category(Category::Men).unwrap()).unwrap();
        assert_eq!(empty, "[]");
    }

    #[test]
    fn test_export_all_keys_in_navigation_order() {
        let catalog = CatalogStore::new(MemoryStore::new());
        let text = String::from_utf8(catalog.export_all().unwrap()).unwrap();

        let positions: Vec<usize> = Category::STOREFRONT
            .iter()
            .map(|c| text.find(&format!("\"{c}\"")).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
