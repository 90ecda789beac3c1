//! Product service - menu catalog

use std::sync::Arc;

use crate::domain::result::{ApiResponse, Error, Result};
use crate::domain::Product;
use crate::ports::Store;

pub struct ProductService {
    store: Arc<dyn Store>,
}

impl ProductService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All products, or only those in `category`
    pub fn list(&self, category: Option<&str>) -> Result<ApiResponse<Vec<Product>>> {
        let category = category.map(str::trim).filter(|c| !c.is_empty());
        self.store.list_products(category)
    }

    pub fn get(&self, id: &str) -> Result<ApiResponse<Product>> {
        self.store.get_product(id)
    }

    pub fn create(&self, product: &Product) -> Result<ApiResponse<Product>> {
        if product.name.trim().is_empty() {
            return Err(Error::validation("Product name is required"));
        }
        if product.price.is_sign_negative() {
            return Err(Error::validation("Product price cannot be negative"));
        }
        if product.available < 0 {
            return Err(Error::validation("Product stock cannot be negative"));
        }
        self.store.create_product(product)
    }

    /// Overwrite the stock counter
    pub fn update_availability(&self, id: &str, available: i64) -> Result<ApiResponse<Product>> {
        self.store.update_product_availability(id, available)
    }

    /// Distinct categories in menu order
    pub fn categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = Vec::new();
        for product in self.store.list_products(None)?.data {
            if !product.category.is_empty() && !categories.contains(&product.category) {
                categories.push(product.category);
            }
        }
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::demo;
    use crate::adapters::memory::MemoryStore;
    use rust_decimal::Decimal;

    fn service() -> ProductService {
        ProductService::new(Arc::new(MemoryStore::with_collections(demo::seed_collections())))
    }

    #[test]
    fn test_list_with_blank_category_lists_all() {
        let service = service();
        let all = service.list(None).unwrap().data.len();
        assert_eq!(service.list(Some("  ")).unwrap().data.len(), all);
        assert!(service.list(Some("drinks")).unwrap().data.len() < all);
    }

    #[test]
    fn test_categories_in_order() {
        assert_eq!(service().categories().unwrap(), vec!["burgers", "sides", "drinks"]);
    }

    #[test]
    fn test_create_rejects_negative_stock() {
        let err = service()
            .create(&Product::new("", "Bad", Decimal::ONE, -1))
            .unwrap_err();
        assert_eq!(err.status(), 400);
    }

    #[test]
    fn test_update_availability() {
        let service = service();
        let updated = service.update_availability("1", 42).unwrap();
        assert_eq!(updated.data.available, 42);
        assert_eq!(service.get("1").unwrap().data.available, 42);
    }
}
