use serde::{Deserialize, Serialize};

use timberstock_core::{CustomerId, DiscountRate, DomainError, DomainResult, Money, TransactionId};

/// Customer kind: retail walk-in or corporate account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerKind {
    Individual,
    Corporate,
}

/// Contact information for a customer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub phone: String,
    pub email: String,
    pub address: String,
}

/// Attributes for a customer that is not yet in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub contact: ContactInfo,
    pub kind: CustomerKind,
    pub discount_rate: DiscountRate,
}

/// Party entity: debt balance, discount tier, and order-history references.
///
/// The history holds transaction *ids* only (insertion order, chronological);
/// records are resolved through the store's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    contact: ContactInfo,
    debt: Money,
    kind: CustomerKind,
    discount_rate: DiscountRate,
    order_history: Vec<TransactionId>,
    active: bool,
}

impl Customer {
    /// Build a customer with zero debt and an empty order history.
    pub fn new(id: CustomerId, attrs: NewCustomer) -> DomainResult<Self> {
        if attrs.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(Self {
            id,
            name: attrs.name,
            contact: attrs.contact,
            debt: Money::zero(),
            kind: attrs.kind,
            discount_rate: attrs.discount_rate,
            order_history: Vec::new(),
            active: true,
        })
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn debt(&self) -> Money {
        self.debt
    }

    pub fn kind(&self) -> CustomerKind {
        self.kind
    }

    pub fn discount_rate(&self) -> DiscountRate {
        self.discount_rate
    }

    pub fn order_history(&self) -> &[TransactionId] {
        &self.order_history
    }

    pub fn total_orders(&self) -> usize {
        self.order_history.len()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_corporate(&self) -> bool {
        self.kind == CustomerKind::Corporate
    }

    pub fn has_debt(&self) -> bool {
        self.debt > Money::zero()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> DomainResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        self.name = name;
        Ok(())
    }

    pub fn set_contact(&mut self, contact: ContactInfo) {
        self.contact = contact;
    }

    pub fn set_kind(&mut self, kind: CustomerKind) {
        self.kind = kind;
    }

    pub fn set_discount_rate(&mut self, rate: DiscountRate) {
        self.discount_rate = rate;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Accrue debt from a recorded sale. Rejects non-positive amounts.
    pub fn add_debt(&mut self, amount: Money) -> DomainResult<()> {
        if amount <= Money::zero() {
            return Err(DomainError::validation("amount must be positive"));
        }
        self.debt += amount;
        Ok(())
    }

    /// Settle part of the outstanding debt. Fails with `PaymentExceedsDebt`
    /// when the payment is larger than the balance; debt is unchanged on any
    /// failure.
    pub fn pay_debt(&mut self, amount: Money) -> DomainResult<()> {
        if amount <= Money::zero() {
            return Err(DomainError::validation("amount must be positive"));
        }
        if amount > self.debt {
            return Err(DomainError::payment_exceeds_debt(amount, self.debt));
        }
        self.debt -= amount;
        Ok(())
    }

    /// Customer-specific price for `base` after the discount tier is applied.
    pub fn special_price(&self, base: Money) -> Money {
        self.discount_rate.apply_to(base)
    }

    /// Append a transaction id to the order history (no dedup, no cap).
    pub fn record_order(&mut self, transaction_id: TransactionId) {
        self.order_history.push(transaction_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_attrs() -> NewCustomer {
        NewCustomer {
            name: "Northside Furniture Co.".to_string(),
            contact: ContactInfo {
                phone: "555-0102".to_string(),
                email: "orders@northside.example".to_string(),
                address: "14 Mill Road".to_string(),
            },
            kind: CustomerKind::Corporate,
            discount_rate: DiscountRate::from_percent(20.0).unwrap(),
        }
    }

    fn test_customer() -> Customer {
        Customer::new(CustomerId::new(1), test_attrs()).unwrap()
    }

    #[test]
    fn new_customer_starts_clean() {
        let customer = test_customer();
        assert_eq!(customer.debt(), Money::zero());
        assert!(!customer.has_debt());
        assert!(customer.is_active());
        assert!(customer.is_corporate());
        assert_eq!(customer.total_orders(), 0);
    }

    #[test]
    fn new_customer_rejects_empty_name() {
        let mut attrs = test_attrs();
        attrs.name = "  ".to_string();
        match Customer::new(CustomerId::new(1), attrs) {
            Err(DomainError::Validation(_)) => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn add_debt_accrues() {
        let mut customer = test_customer();
        customer.add_debt(Money::from_minor(24_000)).unwrap();
        customer.add_debt(Money::from_minor(6_000)).unwrap();
        assert_eq!(customer.debt(), Money::from_minor(30_000));
        assert!(customer.has_debt());
    }

    #[test]
    fn add_debt_rejects_non_positive_amounts() {
        let mut customer = test_customer();
        for minor in [0, -500] {
            match customer.add_debt(Money::from_minor(minor)) {
                Err(DomainError::Validation(_)) => {}
                other => panic!("Expected Validation error for {minor}, got {other:?}"),
            }
        }
        assert_eq!(customer.debt(), Money::zero());
    }

    #[test]
    fn pay_debt_settles_exact_balance() {
        let mut customer = test_customer();
        customer.add_debt(Money::from_minor(24_000)).unwrap();

        customer.pay_debt(Money::from_minor(24_000)).unwrap();
        assert_eq!(customer.debt(), Money::zero());
    }

    #[test]
    fn pay_debt_rejects_overpayment() {
        let mut customer = test_customer();
        customer.add_debt(Money::from_minor(24_000)).unwrap();

        let err = customer.pay_debt(Money::from_minor(30_000)).unwrap_err();
        match err {
            DomainError::PaymentExceedsDebt {
                requested,
                outstanding,
            } => {
                assert_eq!(requested, Money::from_minor(30_000));
                assert_eq!(outstanding, Money::from_minor(24_000));
            }
            _ => panic!("Expected PaymentExceedsDebt error"),
        }
        assert_eq!(customer.debt(), Money::from_minor(24_000));
    }

    #[test]
    fn special_price_applies_discount_tier() {
        let customer = test_customer();
        assert_eq!(
            customer.special_price(Money::from_minor(10_000)),
            Money::from_minor(8_000)
        );

        let mut attrs = test_attrs();
        attrs.discount_rate = DiscountRate::ZERO;
        attrs.kind = CustomerKind::Individual;
        let walk_in = Customer::new(CustomerId::new(2), attrs).unwrap();
        assert_eq!(
            walk_in.special_price(Money::from_minor(10_000)),
            Money::from_minor(10_000)
        );
    }

    #[test]
    fn order_history_keeps_insertion_order_without_dedup() {
        let mut customer = test_customer();
        customer.record_order(TransactionId::new(3));
        customer.record_order(TransactionId::new(1));
        customer.record_order(TransactionId::new(3));

        assert_eq!(
            customer.order_history(),
            &[
                TransactionId::new(3),
                TransactionId::new(1),
                TransactionId::new(3)
            ]
        );
        assert_eq!(customer.total_orders(), 3);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum DebtOp {
            Add(i64),
            Pay(i64),
        }

        fn debt_op() -> impl Strategy<Value = DebtOp> {
            prop_oneof![
                (-1_000i64..50_000i64).prop_map(DebtOp::Add),
                (-1_000i64..50_000i64).prop_map(DebtOp::Pay),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 512,
                ..ProptestConfig::default()
            })]

            /// Property: no sequence of debt operations can drive the balance
            /// negative; failed operations leave the balance unchanged.
            #[test]
            fn debt_never_goes_negative(ops in prop::collection::vec(debt_op(), 1..40)) {
                let mut customer = test_customer();
                for op in ops {
                    let before = customer.debt();
                    let result = match op {
                        DebtOp::Add(m) => customer.add_debt(Money::from_minor(m)),
                        DebtOp::Pay(m) => customer.pay_debt(Money::from_minor(m)),
                    };
                    if result.is_err() {
                        prop_assert_eq!(customer.debt(), before);
                    }
                    prop_assert!(!customer.debt().is_negative());
                }
            }
        }
    }
}
