//! # Product Repository
//!
//! Typed CRUD over the `"product"` collection.
//!
//! ## Id Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Document Id == product_id                            │
//! │                                                                         │
//! │  create(P)        P.product_id taken?  → DocumentAlreadyExists         │
//! │  update(id, P)    id unknown?          → DocumentNotFound              │
//! │                   P invalid?           → Validation                    │
//! │                   P.product_id != id?  → IdMismatch                    │
//! │  delete(id)       id unknown?          → Ok(false)                     │
//! │  find_by_id(id)   id unknown?          → DocumentNotFound(id)          │
//! │  find_all()       collection empty?    → DocumentNotFound              │
//! │                                                                         │
//! │  Every check runs before the single write, so a failed call            │
//! │  never leaves a partial change behind.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, warn};
use uuid::Uuid;

use super::{from_document, to_document, Repository};
use crate::error::{DbError, DbResult};
use crate::store::Store;
use shelf_core::Product;

/// Collection holding product documents.
pub const PRODUCT_COLLECTION: &str = "product";

/// Repository for product documents.
///
/// ## Usage
/// ```rust
/// use chrono::Utc;
/// use shelf_core::Product;
/// use shelf_db::{ProductRepository, Repository, Store};
///
/// let store = Store::in_memory();
/// store.start();
/// let repo = ProductRepository::new(store.clone());
///
/// let now = Utc::now();
/// repo.create(Product::new("1", "Test", "Test", 10.0, now, now)).unwrap();
/// assert_eq!(repo.find_by_id("1").unwrap().name, "Test");
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    store: Store,
}

impl ProductRepository {
    /// Creates a repository over a shared store handle.
    ///
    /// The store's lifecycle stays with its owner.
    pub fn new(store: Store) -> Self {
        ProductRepository { store }
    }

    /// Counts stored products (for diagnostics). Zero when empty.
    pub fn count(&self) -> DbResult<usize> {
        self.store.collection_len(PRODUCT_COLLECTION)
    }

    fn exists(&self, id: &str) -> DbResult<bool> {
        self.store.contains(PRODUCT_COLLECTION, id)
    }
}

impl Repository<Product> for ProductRepository {
    fn create(&self, entity: Product) -> DbResult<Product> {
        debug!(id = %entity.product_id, "Creating product");

        entity.validate()?;

        if self.exists(&entity.product_id)? {
            warn!(id = %entity.product_id, "Product already exists");
            return Err(DbError::duplicate(PRODUCT_COLLECTION, &entity.product_id));
        }

        let document = to_document(&entity)?;
        self.store.insert(PRODUCT_COLLECTION, &entity.product_id, document)?;

        Ok(entity)
    }

    fn update(&self, id: &str, entity: Product) -> DbResult<Product> {
        debug!(id = %id, "Updating product");

        if !self.exists(id)? {
            warn!(id = %id, "Product to update not found");
            return Err(DbError::not_found(PRODUCT_COLLECTION, id));
        }

        entity.validate()?;

        if entity.product_id != id {
            return Err(DbError::IdMismatch {
                id: id.to_string(),
                entity_id: entity.product_id,
            });
        }

        let document = to_document(&entity)?;
        self.store.insert(PRODUCT_COLLECTION, id, document)?;

        Ok(entity)
    }

    fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        if !self.exists(id)? {
            return Ok(false);
        }

        self.store.remove(PRODUCT_COLLECTION, id)
    }

    fn find_by_id(&self, id: &str) -> DbResult<Product> {
        let document = self
            .store
            .fetch_document(PRODUCT_COLLECTION, id)?
            .ok_or_else(|| DbError::not_found(PRODUCT_COLLECTION, id))?;

        from_document(document)
    }

    fn find_all(&self) -> DbResult<Vec<Product>> {
        let documents = self.store.fetch_collection(PRODUCT_COLLECTION)?;

        if documents.is_empty() {
            return Err(DbError::empty(PRODUCT_COLLECTION));
        }

        let products = documents
            .into_values()
            .map(from_document)
            .collect::<DbResult<Vec<Product>>>()?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }
}

/// Helper to generate a new product ID.
///
/// ## Usage
/// ```rust
/// let id = shelf_db::repository::product::generate_product_id();
/// assert_eq!(id.len(), 36);
/// ```
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rstest::{fixture, rstest};
    use shelf_core::ValidationError;
    use std::thread;

    fn t1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 15).unwrap()
            + Duration::nanoseconds(123_456_789)
    }

    fn product(id: &str) -> Product {
        Product::new(id, "Test", "Test", 10.0, t1(), t1())
    }

    #[fixture]
    fn store() -> Store {
        let store = Store::in_memory();
        store.start();
        store
    }

    #[fixture]
    fn repo(store: Store) -> ProductRepository {
        store.products()
    }

    #[rstest]
    fn test_find_all_returns_all_elements(repo: ProductRepository) {
        repo.create(product("1")).unwrap();

        let products = repo.find_all().unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].product_id, "1");
    }

    #[rstest]
    fn test_find_all_fails_when_empty(repo: ProductRepository) {
        assert!(matches!(
            repo.find_all(),
            Err(DbError::DocumentNotFound { id: None, .. })
        ));
    }

    #[rstest]
    fn test_round_trip_keeps_every_field(repo: ProductRepository) {
        let original = Product::new(
            "abc",
            "Mug",
            "Blue, 300ml",
            7.25,
            t1(),
            t1() + Duration::days(1),
        );

        let created = repo.create(original.clone()).unwrap();
        let found = repo.find_by_id("abc").unwrap();

        assert_eq!(created, original);
        assert_eq!(found, original);
    }

    #[rstest]
    fn test_empty_id_round_trips(repo: ProductRepository) {
        let original = product("");

        repo.create(original.clone()).unwrap();

        assert_eq!(repo.find_by_id("").unwrap(), original);
        assert_eq!(repo.find_all().unwrap(), vec![original]);
        assert!(repo.delete("").unwrap());
    }

    #[rstest]
    fn test_create_twice_keeps_first(repo: ProductRepository) {
        repo.create(product("1")).unwrap();

        let mut second = product("1");
        second.name = "Other".to_string();
        let result = repo.create(second);

        assert!(matches!(
            result,
            Err(DbError::DocumentAlreadyExists { ref id, .. }) if id == "1"
        ));
        assert_eq!(repo.find_by_id("1").unwrap().name, "Test");
    }

    #[rstest]
    fn test_find_by_id_return_single_element(repo: ProductRepository) {
        repo.create(product("1")).unwrap();
        repo.create(product("2")).unwrap();

        let found = repo.find_by_id("2").unwrap();

        assert_eq!(found.product_id, "2");
        assert_eq!(found.name, "Test");
        assert_eq!(found.description, "Test");
    }

    #[rstest]
    fn test_find_by_id_unknown_carries_id(repo: ProductRepository) {
        match repo.find_by_id("2") {
            Err(DbError::DocumentNotFound { collection, id }) => {
                assert_eq!(collection, PRODUCT_COLLECTION);
                assert_eq!(id.as_deref(), Some("2"));
            }
            other => panic!("expected DocumentNotFound, got {other:?}"),
        }
    }

    #[rstest]
    fn test_update_replaces_document(repo: ProductRepository) {
        repo.create(product("1")).unwrap();

        let mut changed = product("1");
        changed.price = 12.5;
        changed.touch(t1() + Duration::hours(1));
        let returned = repo.update("1", changed.clone()).unwrap();

        assert_eq!(returned, changed);
        assert_eq!(repo.find_by_id("1").unwrap(), changed);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[rstest]
    fn test_update_unknown_fails(repo: ProductRepository) {
        assert!(matches!(
            repo.update("1", product("1")),
            Err(DbError::DocumentNotFound { .. })
        ));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[rstest]
    fn test_update_unknown_reports_not_found_before_validation(repo: ProductRepository) {
        let mut invalid = product("x");
        invalid.price = f64::NAN;

        assert!(matches!(
            repo.update("x", invalid),
            Err(DbError::DocumentNotFound { ref id, .. }) if id.as_deref() == Some("x")
        ));
    }

    #[rstest]
    fn test_update_existing_with_invalid_price_is_not_written(repo: ProductRepository) {
        repo.create(product("1")).unwrap();

        let mut invalid = product("1");
        invalid.price = f64::INFINITY;

        assert!(matches!(
            repo.update("1", invalid),
            Err(DbError::Validation(ValidationError::NotFinite { .. }))
        ));
        assert_eq!(repo.find_by_id("1").unwrap().price, 10.0);
    }

    #[rstest]
    fn test_update_with_other_id_is_rejected(repo: ProductRepository) {
        repo.create(product("1")).unwrap();

        let result = repo.update("1", product("9"));

        assert!(matches!(result, Err(DbError::IdMismatch { .. })));
        assert_eq!(repo.count().unwrap(), 1);
        assert!(repo.find_by_id("9").is_err());
    }

    #[rstest]
    fn test_delete_correctly_remove_element(repo: ProductRepository) {
        repo.create(product("1")).unwrap();
        repo.create(product("2")).unwrap();

        assert!(repo.delete("2").unwrap());

        assert_eq!(repo.find_all().unwrap().len(), 1);
        assert!(repo.find_by_id("1").is_ok());
        assert!(matches!(
            repo.find_by_id("2"),
            Err(DbError::DocumentNotFound { .. })
        ));
    }

    #[rstest]
    fn test_delete_returns_false_if_no_document_is_found(repo: ProductRepository) {
        assert!(!repo.delete("2").unwrap());
        assert!(matches!(
            repo.find_by_id("2"),
            Err(DbError::DocumentNotFound { .. })
        ));
    }

    #[rstest]
    #[case(3, 0)]
    #[case(5, 2)]
    #[case(4, 4)]
    fn test_count_after_create_and_delete(
        repo: ProductRepository,
        #[case] created: usize,
        #[case] deleted: usize,
    ) {
        for i in 0..created {
            repo.create(product(&i.to_string())).unwrap();
        }
        for i in 0..deleted {
            assert!(repo.delete(&i.to_string()).unwrap());
        }

        match repo.find_all() {
            Ok(products) => assert_eq!(products.len(), created - deleted),
            Err(DbError::DocumentNotFound { .. }) => assert_eq!(created, deleted),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    fn test_invalid_product_is_not_written(repo: ProductRepository) {
        let mut bad = product("1");
        bad.price = f64::NAN;

        assert!(matches!(
            repo.create(bad),
            Err(DbError::Validation(ValidationError::NotFinite { .. }))
        ));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_store_not_started() {
        let repo = Store::in_memory().products();

        assert!(matches!(
            repo.create(product("1")),
            Err(DbError::NotConnected)
        ));
        assert!(matches!(repo.find_all(), Err(DbError::NotConnected)));
        assert!(matches!(repo.delete("1"), Err(DbError::NotConnected)));
    }

    #[rstest]
    fn test_stopping_store_disconnects_repository(store: Store) {
        let repo = ProductRepository::new(store.clone());
        repo.create(product("1")).unwrap();

        store.stop();

        assert!(matches!(repo.find_by_id("1"), Err(DbError::NotConnected)));
    }

    #[rstest]
    fn test_concurrent_creates(store: Store) {
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let repo = store.products();
                thread::spawn(move || {
                    for i in 0..25 {
                        repo.create(product(&format!("{worker}-{i}"))).unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.products().find_all().unwrap().len(), 100);
    }

    #[test]
    fn test_generate_product_id_is_unique() {
        assert_ne!(generate_product_id(), generate_product_id());
    }
}
