// Catalogue domain types

use rust_decimal::Decimal;

/// Largest price the `NUMERIC(12, 2)` price columns can hold
pub const MAX_PRICE: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2); // 9_999_999_999.99

/// Product category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Catalogue entry
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: String,
    pub category_id: i64,
    pub in_stock: bool,
}

/// Validated category name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryName(String);

impl CategoryName {
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err("Category name cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Product data for insertion
///
/// # Invariants
/// - Name is non-empty after trimming
/// - Price is non-negative, rounded to cents and at most [`MAX_PRICE`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    description: String,
    price: Decimal,
    image_url: String,
    category_id: i64,
    in_stock: bool,
}

impl NewProduct {
    /// Validates and creates a new product
    ///
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use storefront_api::domain::product::NewProduct;
    ///
    /// let product = NewProduct::new(
    ///     "Linen shirt".to_string(),
    ///     String::new(),
    ///     Decimal::new(4999, 2),
    ///     String::new(),
    ///     1,
    ///     true,
    /// )
    /// .expect("valid product");
    /// assert_eq!(product.price(), Decimal::new(4999, 2));
    /// ```
    pub fn new(
        name: String,
        description: String,
        price: Decimal,
        image_url: String,
        category_id: i64,
        in_stock: bool,
    ) -> Result<Self, String> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err("Product name cannot be empty".to_string());
        }

        if price.is_sign_negative() {
            return Err("Price cannot be negative".to_string());
        }

        let price = price.round_dp(2);
        if price > MAX_PRICE {
            return Err(format!("Price cannot exceed {}", MAX_PRICE));
        }

        Ok(Self {
            name,
            description,
            price,
            image_url,
            category_id,
            in_stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn category_id(&self) -> i64 {
        self.category_id
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, price: Decimal) -> Result<NewProduct, String> {
        NewProduct::new(name.to_string(), String::new(), price, String::new(), 1, true)
    }

    #[test]
    fn valid_product() {
        let product = product("  Wool coat ", Decimal::new(12900, 2)).unwrap();
        assert_eq!(product.name(), "Wool coat");
        assert_eq!(product.category_id(), 1);
        assert!(product.in_stock());
    }

    #[test]
    fn empty_name_rejected() {
        assert!(product("   ", Decimal::ONE).is_err());
    }

    #[test]
    fn negative_price_rejected() {
        assert!(product("Scarf", Decimal::new(-1, 2)).is_err());
    }

    #[test]
    fn free_product_allowed() {
        assert!(product("Sticker", Decimal::ZERO).is_ok());
    }

    #[test]
    fn price_beyond_column_range_rejected() {
        assert!(product("Yacht", MAX_PRICE).is_ok());
        assert!(product("Island", MAX_PRICE + Decimal::new(1, 2)).is_err());
    }

    #[test]
    fn price_rounded_to_cents() {
        let product = product("Belt", Decimal::new(19999, 3)).unwrap();
        assert_eq!(product.price(), Decimal::new(2000, 2));
    }

    #[test]
    fn category_name_trimmed() {
        assert_eq!(CategoryName::new(" Shoes ").unwrap().as_str(), "Shoes");
        assert!(CategoryName::new("").is_err());
    }
}
