// Order domain types and pricing

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::product::Product;

/// Status of every freshly placed order
pub const STATUS_PENDING: &str = "pending";

/// Largest total the `orders.total NUMERIC(12, 2)` column can hold
pub const MAX_ORDER_TOTAL: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2); // 9_999_999_999.99

/// Placed order with its lines
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    pub total: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// One order line, priced at the time of purchase
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

/// Line as requested by the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedLine {
    pub product_id: i64,
    pub quantity: i32,
}

/// Priced line ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderLine {
    pub product_id: i64,
    pub quantity: i32,
    pub price: Decimal,
}

/// Order ready for insertion
///
/// # Invariants
/// - At least one line
/// - Every quantity is positive
/// - Prices come from the catalogue, never from the client
/// - `total` is the sum of `price * quantity` over all lines
/// - `total` never exceeds [`MAX_ORDER_TOTAL`]
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    user_id: i64,
    total: Decimal,
    lines: Vec<NewOrderLine>,
}

impl NewOrder {
    /// Prices the requested lines against `catalogue`
    ///
    /// Lines for the same product are merged, keeping first-seen order.
    ///
    /// # Errors
    /// Returns a message suitable for a 400 response when the request is
    /// empty, a quantity is not positive, a product is unknown or out of
    /// stock, or the total is too large to store.
    pub fn price(
        user_id: i64,
        requested: &[RequestedLine],
        catalogue: &[Product],
    ) -> Result<Self, String> {
        if requested.is_empty() {
            return Err("Order must contain at least one item".to_string());
        }

        let mut lines: Vec<NewOrderLine> = Vec::with_capacity(requested.len());
        for line in requested {
            if line.quantity <= 0 {
                return Err(format!(
                    "Quantity for product {} must be positive",
                    line.product_id
                ));
            }

            let product = catalogue
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| format!("Product not found: {}", line.product_id))?;

            if !product.in_stock {
                return Err(format!("Product is out of stock: {}", product.name));
            }

            match lines.iter_mut().find(|l| l.product_id == line.product_id) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .checked_add(line.quantity)
                        .ok_or_else(|| format!("Quantity too large for product {}", line.product_id))?;
                }
                None => lines.push(NewOrderLine {
                    product_id: product.id,
                    quantity: line.quantity,
                    price: product.price,
                }),
            }
        }

        let total = lines
            .iter()
            .try_fold(Decimal::ZERO, |total, l| {
                l.price
                    .checked_mul(Decimal::from(l.quantity))
                    .and_then(|amount| total.checked_add(amount))
            })
            .filter(|total| *total <= MAX_ORDER_TOTAL)
            .ok_or_else(|| format!("Order total exceeds the maximum of {}", MAX_ORDER_TOTAL))?;

        Ok(Self {
            user_id,
            total,
            lines,
        })
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn lines(&self) -> &[NewOrderLine] {
        &self.lines
    }

    /// Product ids referenced by the order
    pub fn product_ids(&self) -> Vec<i64> {
        self.lines.iter().map(|l| l.product_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Vec<Product> {
        vec![
            Product {
                id: 1,
                name: "Denim jacket".to_string(),
                description: String::new(),
                price: Decimal::new(8950, 2),
                image_url: String::new(),
                category_id: 1,
                in_stock: true,
            },
            Product {
                id: 2,
                name: "Socks".to_string(),
                description: String::new(),
                price: Decimal::new(499, 2),
                image_url: String::new(),
                category_id: 2,
                in_stock: true,
            },
            Product {
                id: 3,
                name: "Limited sneakers".to_string(),
                description: String::new(),
                price: Decimal::new(19900, 2),
                image_url: String::new(),
                category_id: 2,
                in_stock: false,
            },
        ]
    }

    fn line(product_id: i64, quantity: i32) -> RequestedLine {
        RequestedLine {
            product_id,
            quantity,
        }
    }

    #[test]
    fn total_uses_catalogue_prices() {
        let order = NewOrder::price(7, &[line(1, 1), line(2, 3)], &catalogue()).unwrap();

        assert_eq!(order.user_id(), 7);
        assert_eq!(order.total(), Decimal::new(10447, 2));
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.lines()[1].price, Decimal::new(499, 2));
    }

    #[test]
    fn duplicate_lines_are_merged() {
        let order = NewOrder::price(7, &[line(2, 1), line(1, 1), line(2, 2)], &catalogue()).unwrap();

        assert_eq!(order.product_ids(), vec![2, 1]);
        assert_eq!(order.lines()[0].quantity, 3);
    }

    #[test]
    fn empty_order_rejected() {
        assert!(NewOrder::price(7, &[], &catalogue()).is_err());
    }

    #[test]
    fn non_positive_quantity_rejected() {
        assert!(NewOrder::price(7, &[line(1, 0)], &catalogue()).is_err());
        assert!(NewOrder::price(7, &[line(1, -2)], &catalogue()).is_err());
    }

    #[test]
    fn unknown_product_rejected() {
        let err = NewOrder::price(7, &[line(99, 1)], &catalogue()).unwrap_err();
        assert!(err.contains("99"));
    }

    #[test]
    fn total_beyond_column_range_rejected() {
        // 89.50 * 200_000_000 = 17_900_000_000.00
        let err = NewOrder::price(7, &[line(1, 200_000_000)], &catalogue()).unwrap_err();
        assert!(err.contains("exceeds"));
    }

    #[test]
    fn total_at_the_limit_accepted() {
        let catalogue = vec![Product {
            id: 9,
            name: "Gold bar".to_string(),
            description: String::new(),
            price: MAX_ORDER_TOTAL,
            image_url: String::new(),
            category_id: 1,
            in_stock: true,
        }];

        let order = NewOrder::price(7, &[line(9, 1)], &catalogue).unwrap();
        assert_eq!(order.total(), MAX_ORDER_TOTAL);
    }

    #[test]
    fn out_of_stock_rejected() {
        let err = NewOrder::price(7, &[line(3, 1)], &catalogue()).unwrap_err();
        assert!(err.contains("out of stock"));
    }
}
