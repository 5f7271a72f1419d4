//! Product catalog operations and price reconciliation.
//!
//! Prices are always recomputed from `original_price`, which is fixed at
//! creation. Concurrent updates of the same product are last-writer-wins:
//! nothing serializes the LOOKUP → COMPUTE → PERSIST sequence across
//! requests.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::clients::discount::DiscountProvider;
use crate::domain::product::{PriceChange, Product, ProductListQuery, UpdateProduct};
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Upper bound for the `per_page` query parameter.
const MAX_ITEMS_PER_PAGE: usize = 500;

/// Query parameters accepted by the products list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub is_active: Option<bool>,
    pub search: Option<String>,
    /// Page requested by the client (1-based). Without `page` and
    /// `per_page` every product is returned.
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Creates a product whose original price is the supplied price.
pub fn create_product<R>(repo: &R, form: AddProductForm) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    let new_product = form
        .into_new_product()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_product(&new_product).map_err(ServiceError::from)
}

/// Loads a single product.
pub fn get_product<R>(repo: &R, product_id: i32) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    repo.get_product_by_id(product_id)
        .map_err(ServiceError::from)?
        .ok_or(ServiceError::NotFound)
}

/// Lists products, returning the total number of matches and the page.
pub fn list_products<R>(repo: &R, query: ProductsQuery) -> ServiceResult<(usize, Vec<Product>)>
where
    R: ProductReader + ?Sized,
{
    let ProductsQuery {
        is_active,
        search,
        page,
        per_page,
    } = query;

    let mut list_query = ProductListQuery::new();

    if let Some(is_active) = is_active {
        list_query = list_query.active(is_active);
    }

    if let Some(term) = search.filter(|term| !term.trim().is_empty()) {
        list_query = list_query.search(term.trim());
    }

    if page.is_some() || per_page.is_some() {
        let per_page = per_page
            .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
            .clamp(1, MAX_ITEMS_PER_PAGE);
        list_query = list_query.paginate(page.unwrap_or(1), per_page);
    }

    repo.list_products(list_query).map_err(ServiceError::from)
}

/// Deletes a product. Unknown ids yield [`ServiceError::NotFound`].
pub fn delete_product<R>(repo: &R, product_id: i32) -> ServiceResult<()>
where
    R: ProductWriter + ?Sized,
{
    repo.delete_product(product_id).map_err(ServiceError::from)
}

/// Updates a product and reconciles its price.
///
/// The existing record is loaded first; a missing product ends the request
/// with [`ServiceError::NotFound`] before anything is computed or written.
/// The new price is derived by [`reconcile_price`] and written together with
/// the name and activity flag in a single statement. `original_price` is
/// never rewritten.
pub async fn update_product<R, D>(
    repo: &R,
    discounts: &D,
    product_id: i32,
    form: EditProductForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ProductWriter + ?Sized,
    D: DiscountProvider + ?Sized,
{
    let changes = form
        .into_product_changes()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let existing = get_product(repo, product_id)?;

    let price = reconcile_price(&existing, &changes.price, discounts).await;

    let updates = UpdateProduct::new(changes.name, price, changes.is_active);
    repo.update_product(product_id, &updates)
        .map_err(ServiceError::from)
}

/// Compute the price an update should persist for `existing`.
pub async fn reconcile_price<D>(existing: &Product, change: &PriceChange, discounts: &D) -> Decimal
where
    D: DiscountProvider + ?Sized,
{
    match change {
        PriceChange::Manual(price) => *price,
        PriceChange::ClearDiscount => existing.original_price,
        PriceChange::Coupon(code) => {
            discounts
                .compute_price(existing.original_price, code)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    use chrono::{NaiveDate, NaiveDateTime};

    use crate::clients::mock::MockDiscountProvider;
    use crate::domain::product::NewProduct;
    use crate::forms::products::RawPrice;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::mock::{MockProductReader, MockProductWriter};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).unwrap()
    }

    fn sample_product(id: i32, price: &str, original_price: &str) -> Product {
        Product {
            id,
            name: "Phone".to_string(),
            price: dec(price),
            original_price: dec(original_price),
            is_active: true,
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn edit_form(price: &str, coupon_code: Option<&str>) -> EditProductForm {
        EditProductForm {
            name: Some("Phone".to_string()),
            price: Some(RawPrice::from(price)),
            is_active: None,
            coupon_code: coupon_code.map(str::to_string),
        }
    }

    /// Echo the persisted update back as the stored product.
    fn persisted(id: i32, original_price: &str, updates: &UpdateProduct) -> Product {
        Product {
            id,
            name: updates.name.clone(),
            price: updates.price,
            original_price: dec(original_price),
            is_active: updates.is_active,
            created_at: datetime(),
            updated_at: updates.updated_at,
        }
    }

    #[test]
    fn create_product_sets_original_price() {
        let mut repo = FakeRepo::new();
        repo.product_writer
            .expect_create_product()
            .times(1)
            .withf(|new_product| {
                assert_eq!(new_product.name, "Phone");
                assert_eq!(new_product.price, dec("300.00"));
                assert_eq!(new_product.original_price, new_product.price);
                true
            })
            .returning(|_| Ok(sample_product(1, "300.00", "300.00")));

        let form = AddProductForm {
            name: Some("Phone".to_string()),
            price: Some(RawPrice::from("300.00")),
            is_active: None,
        };

        let product = create_product(&repo, form).expect("expected success");

        assert_eq!(product.id, 1);
        assert_eq!(product.original_price, product.price);
    }

    #[test]
    fn create_product_rejects_invalid_price_without_writing() {
        let repo = FakeRepo::new();
        let form = AddProductForm {
            name: Some("Phone".to_string()),
            price: Some(RawPrice::from("-10.00")),
            is_active: None,
        };

        let result = create_product(&repo, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn get_product_reports_missing() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|_| Ok(None));

        assert!(matches!(get_product(&repo, 9999999), Err(ServiceError::NotFound)));
    }

    #[test]
    fn list_products_applies_filters() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_list_products()
            .times(1)
            .withf(|query| {
                assert_eq!(query.is_active, Some(true));
                assert_eq!(query.search.as_deref(), Some("phone"));
                match &query.pagination {
                    Some(pagination) => {
                        assert_eq!(pagination.page, 2);
                        assert_eq!(pagination.per_page, MAX_ITEMS_PER_PAGE);
                    }
                    None => panic!("expected pagination to be set"),
                }
                true
            })
            .returning(|_| Ok((1, vec![sample_product(1, "10", "10")])));

        let query = ProductsQuery {
            is_active: Some(true),
            search: Some(" phone ".to_string()),
            page: Some(2),
            per_page: Some(10_000),
        };

        let (total, items) = list_products(&repo, query).expect("expected success");
        assert_eq!(total, 1);
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn list_products_without_paging_returns_everything() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_list_products()
            .withf(|query| query.pagination.is_none() && query.is_active.is_none())
            .returning(|_| Ok((0, Vec::new())));

        let (total, items) = list_products(&repo, ProductsQuery::default()).unwrap();
        assert_eq!(total, 0);
        assert!(items.is_empty());
    }

    #[test]
    fn delete_product_passes_not_found_through() {
        let mut repo = FakeRepo::new();
        repo.product_writer
            .expect_delete_product()
            .returning(|_| Err(RepositoryError::NotFound));

        assert!(matches!(delete_product(&repo, 5), Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn update_with_coupon_prices_from_original_price() {
        let mut repo = FakeRepo::new();
        // Current price already discounted once.
        repo.product_reader
            .expect_get_product_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_product(id, "270.0000", "300.0000"))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|id, updates| {
                assert_eq!(*id, 7);
                assert_eq!(updates.price, dec("270"));
                true
            })
            .returning(|id, updates| Ok(persisted(id, "300.0000", updates)));

        let mut discounts = MockDiscountProvider::new();
        discounts
            .expect_compute_price()
            .times(1)
            .withf(|original_price, code| {
                *original_price == dec("300") && code.eq_ignore_ascii_case("SALE10")
            })
            .returning(|_, _| dec("270.0000"));

        // The raw price is ignored when a coupon is present.
        let form = edit_form("1.00", Some("SALE10"));
        let product = update_product(&repo, &discounts, 7, form)
            .await
            .expect("expected success");

        assert_eq!(product.price, dec("270"));
        assert_eq!(product.original_price, dec("300"));
    }

    #[actix_web::test]
    async fn update_with_empty_coupon_restores_original_price() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, "123.45", "300.00"))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|_, updates| updates.price == dec("300"))
            .returning(|id, updates| Ok(persisted(id, "300.00", updates)));

        let discounts = MockDiscountProvider::new();

        let product = update_product(&repo, &discounts, 1, edit_form("5.00", Some("")))
            .await
            .expect("expected success");

        assert_eq!(product.price, product.original_price);
    }

    #[actix_web::test]
    async fn update_without_coupon_takes_price_literally() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|id| Ok(Some(sample_product(id, "300.00", "300.00"))));
        repo.product_writer
            .expect_update_product()
            .times(1)
            .withf(|_, updates| updates.price == dec("249.99") && updates.is_active)
            .returning(|id, updates| Ok(persisted(id, "300.00", updates)));

        let discounts = MockDiscountProvider::new();

        let product = update_product(&repo, &discounts, 1, edit_form("249.99", None))
            .await
            .expect("expected success");

        assert_eq!(product.price, dec("249.99"));
        assert_eq!(product.original_price, dec("300.00"));
    }

    #[actix_web::test]
    async fn update_of_missing_product_has_no_effects() {
        let mut repo = FakeRepo::new();
        repo.product_reader
            .expect_get_product_by_id()
            .returning(|_| Ok(None));
        repo.product_writer.expect_update_product().never();

        let mut discounts = MockDiscountProvider::new();
        discounts.expect_compute_price().never();

        let result = update_product(&repo, &discounts, 42, edit_form("1.00", Some("SALE10"))).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn update_surfaces_store_outage() {
        let mut repo = FakeRepo::new();
        repo.product_reader.expect_get_product_by_id().returning(|_| {
            Err(RepositoryError::Database(
                diesel::result::Error::BrokenTransactionManager,
            ))
        });
        repo.product_writer.expect_update_product().never();

        let discounts = MockDiscountProvider::new();

        let result = update_product(&repo, &discounts, 1, edit_form("1.00", None)).await;

        assert!(matches!(result, Err(ServiceError::StoreUnavailable(_))));
    }

    #[actix_web::test]
    async fn update_rejects_invalid_form_before_lookup() {
        let mut repo = FakeRepo::new();
        repo.product_reader.expect_get_product_by_id().never();

        let discounts = MockDiscountProvider::new();

        let result = update_product(&repo, &discounts, 1, edit_form("abc", None)).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    struct FakeRepo {
        product_reader: MockProductReader,
        product_writer: MockProductWriter,
    }

    impl FakeRepo {
        fn new() -> Self {
            Self {
                product_reader: MockProductReader::new(),
                product_writer: MockProductWriter::new(),
            }
        }
    }

    impl ProductReader for FakeRepo {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>> {
            self.product_reader.get_product_by_id(id)
        }

        fn list_products(
            &self,
            query: ProductListQuery,
        ) -> RepositoryResult<(usize, Vec<Product>)> {
            self.product_reader.list_products(query)
        }
    }

    impl ProductWriter for FakeRepo {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product> {
            self.product_writer.create_product(new_product)
        }

        fn update_product(
            &self,
            product_id: i32,
            updates: &UpdateProduct,
        ) -> RepositoryResult<Product> {
            self.product_writer.update_product(product_id, updates)
        }

        fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
            self.product_writer.delete_product(product_id)
        }
    }
}
