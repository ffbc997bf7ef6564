use serde::{Deserialize, Serialize};

use timberstock_core::{DomainError, DomainResult, Money, ProductId};

/// Attributes for a product that is not yet in the store.
///
/// The store assigns the sequential id on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub stock: i64,
    /// Unit-of-measure label shown in alerts and reports (e.g. "m3", "pcs").
    pub unit: String,
    pub critical_level: i64,
    pub cost_price: Money,
}

/// Stock-keeping entity: price, stock, and critical-level state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    category: String,
    price: Money,
    stock: i64,
    unit: String,
    critical_level: i64,
    cost_price: Money,
    active: bool,
}

impl Product {
    /// Build a product from validated attributes. Rejects empty names and
    /// negative price/stock/cost with `Validation`.
    pub fn new(id: ProductId, attrs: NewProduct) -> DomainResult<Self> {
        if attrs.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if attrs.price.is_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        if attrs.cost_price.is_negative() {
            return Err(DomainError::validation("cost price cannot be negative"));
        }
        if attrs.stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }

        Ok(Self {
            id,
            name: attrs.name,
            category: attrs.category,
            price: attrs.price,
            stock: attrs.stock,
            unit: attrs.unit,
            critical_level: attrs.critical_level,
            cost_price: attrs.cost_price,
            active: true,
        })
    }

    pub fn id(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn critical_level(&self) -> i64 {
        self.critical_level
    }

    pub fn cost_price(&self) -> Money {
        self.cost_price
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_unit(&mut self, unit: impl Into<String>) {
        self.unit = unit.into();
    }

    pub fn set_critical_level(&mut self, level: i64) {
        self.critical_level = level;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Replace the unit price. Rejects negative values; state is unchanged on
    /// rejection.
    pub fn set_price(&mut self, price: Money) -> DomainResult<()> {
        if price.is_negative() {
            return Err(DomainError::validation("price cannot be negative"));
        }
        self.price = price;
        Ok(())
    }

    pub fn set_cost_price(&mut self, cost_price: Money) -> DomainResult<()> {
        if cost_price.is_negative() {
            return Err(DomainError::validation("cost price cannot be negative"));
        }
        self.cost_price = cost_price;
        Ok(())
    }

    /// Replace the stock count outright (inventory correction). Rejects
    /// negative values.
    pub fn set_stock(&mut self, stock: i64) -> DomainResult<()> {
        if stock < 0 {
            return Err(DomainError::validation("stock cannot be negative"));
        }
        self.stock = stock;
        Ok(())
    }

    /// Receive `quantity` units into stock. Rejects non-positive quantities
    /// and counts that would overflow.
    pub fn add_stock(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        self.stock = self
            .stock
            .checked_add(quantity)
            .ok_or_else(|| DomainError::invariant("stock count overflows"))?;
        Ok(())
    }

    /// Deduct `quantity` units from stock. Fails with `InsufficientStock` when
    /// the deduction would drive stock negative; stock is unchanged on any
    /// failure.
    pub fn remove_stock(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        if quantity > self.stock {
            return Err(DomainError::insufficient_stock(quantity, self.stock));
        }
        self.stock -= quantity;
        Ok(())
    }

    /// Scale the price by `(1 + percent / 100)` without bound checks.
    ///
    /// This is the bulk-repricing path: negative percentages are allowed and
    /// the result is not clamped, so it can cross zero.
    pub fn scale_price(&mut self, percent: f64) {
        self.price = self.price.scale_by_percent(percent);
    }

    /// Critical-stock condition: stock at or below the configured threshold.
    pub fn is_critical_stock(&self) -> bool {
        self.stock <= self.critical_level
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Monetary value of the stock on hand (price x stock), clamped at the
    /// representable range.
    pub fn stock_value(&self) -> Money {
        self.price.saturating_multiply_quantity(self.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_attrs() -> NewProduct {
        NewProduct {
            name: "Pine Lumber".to_string(),
            category: "Timber".to_string(),
            price: Money::from_minor(85_000),
            stock: 100,
            unit: "m3".to_string(),
            critical_level: 20,
            cost_price: Money::from_minor(65_000),
        }
    }

    fn test_product() -> Product {
        Product::new(ProductId::new(1), test_attrs()).unwrap()
    }

    #[test]
    fn new_product_starts_active() {
        let product = test_product();
        assert!(product.is_active());
        assert_eq!(product.id(), ProductId::new(1));
        assert_eq!(product.stock(), 100);
    }

    #[test]
    fn new_product_rejects_bad_attributes() {
        let mut attrs = test_attrs();
        attrs.name = "   ".to_string();
        match Product::new(ProductId::new(1), attrs) {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error for empty name, got {other:?}"),
        }

        let mut attrs = test_attrs();
        attrs.price = Money::from_minor(-1);
        match Product::new(ProductId::new(1), attrs) {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error for negative price, got {other:?}"),
        }

        let mut attrs = test_attrs();
        attrs.stock = -5;
        match Product::new(ProductId::new(1), attrs) {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error for negative stock, got {other:?}"),
        }
    }

    #[test]
    fn set_price_rejects_negative_and_keeps_state() {
        let mut product = test_product();
        let err = product.set_price(Money::from_minor(-100)).unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error"),
        }
        assert_eq!(product.price(), Money::from_minor(85_000));

        product.set_price(Money::from_minor(90_000)).unwrap();
        assert_eq!(product.price(), Money::from_minor(90_000));
    }

    #[test]
    fn add_stock_increases_by_exact_amount() {
        let mut product = test_product();
        product.add_stock(25).unwrap();
        assert_eq!(product.stock(), 125);
    }

    #[test]
    fn add_stock_rejects_overflowing_quantity() {
        let mut product = test_product();
        let err = product.add_stock(i64::MAX).unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation error"),
        }
        assert_eq!(product.stock(), 100);
    }

    #[test]
    fn add_stock_rejects_non_positive_quantity() {
        let mut product = test_product();
        for qty in [0, -3] {
            match product.add_stock(qty) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for qty {qty}, got {other:?}"),
            }
            assert_eq!(product.stock(), 100);
        }
    }

    #[test]
    fn remove_stock_succeeds_within_available() {
        let mut product = test_product();
        product.remove_stock(100).unwrap();
        assert_eq!(product.stock(), 0);
        assert!(product.is_out_of_stock());
    }

    #[test]
    fn remove_stock_fails_beyond_available() {
        let mut product = test_product();
        let err = product.remove_stock(101).unwrap_err();
        match err {
            DomainError::InsufficientStock {
                requested,
                available,
            } => {
                assert_eq!(requested, 101);
                assert_eq!(available, 100);
            }
            _ => panic!("Expected InsufficientStock error"),
        }
        assert_eq!(product.stock(), 100);
    }

    #[test]
    fn remove_stock_rejects_non_positive_quantity() {
        let mut product = test_product();
        for qty in [0, -1] {
            match product.remove_stock(qty) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for qty {qty}, got {other:?}"),
            }
        }
        assert_eq!(product.stock(), 100);
    }

    #[test]
    fn critical_stock_boundary_is_inclusive() {
        let mut product = test_product();
        product.set_stock(21).unwrap();
        assert!(!product.is_critical_stock());

        // stock == critical level counts as critical.
        product.set_stock(20).unwrap();
        assert!(product.is_critical_stock());

        product.set_stock(19).unwrap();
        assert!(product.is_critical_stock());
    }

    #[test]
    fn stock_value_is_price_times_stock() {
        let product = test_product();
        assert_eq!(product.stock_value(), Money::from_minor(8_500_000));
    }

    #[test]
    fn scale_price_is_unclamped() {
        let mut product = test_product();
        product.scale_price(10.0);
        assert_eq!(product.price(), Money::from_minor(93_500));

        // Repricing below -100% crosses zero; the value is kept as-is.
        product.scale_price(-150.0);
        assert!(product.price().is_negative());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum StockOp {
            Add(i64),
            Remove(i64),
            Set(i64),
        }

        fn stock_op() -> impl Strategy<Value = StockOp> {
            prop_oneof![
                (-50i64..200i64).prop_map(StockOp::Add),
                (-50i64..200i64).prop_map(StockOp::Remove),
                (-50i64..500i64).prop_map(StockOp::Set),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: no sequence of stock operations can drive stock
            /// negative; failed operations leave stock unchanged.
            #[test]
            fn stock_never_goes_negative(ops in prop::collection::vec(stock_op(), 1..40)) {
                let mut product = test_product();
                for op in ops {
                    let before = product.stock();
                    let result = match op {
                        StockOp::Add(q) => product.add_stock(q),
                        StockOp::Remove(q) => product.remove_stock(q),
                        StockOp::Set(s) => product.set_stock(s),
                    };
                    if result.is_err() {
                        prop_assert_eq!(product.stock(), before);
                    }
                    prop_assert!(product.stock() >= 0);
                }
            }

            /// Property: add_stock with a positive quantity increases stock by
            /// exactly that amount.
            #[test]
            fn add_stock_is_exact(qty in 1i64..10_000i64) {
                let mut product = test_product();
                let before = product.stock();
                product.add_stock(qty).unwrap();
                prop_assert_eq!(product.stock(), before + qty);
            }
        }
    }
}
