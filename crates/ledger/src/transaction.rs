use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use timberstock_core::{CustomerId, DomainError, DomainResult, Money, ProductId, TransactionId};

/// The two transaction kinds: a sale ships stock out, a purchase restocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Sale,
    Purchase,
}

/// Transaction status. Transitions are free-form: any status may be set to any
/// other, there is no enforced state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Completed,
    Pending,
    Cancelled,
}

/// Attributes for a transaction record about to enter the ledger.
///
/// Name and unit snapshots are taken by the store at creation time; they are
/// frozen afterwards and deliberately do not track later renames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
    pub unit: String,
    /// Unit price actually charged (post-discount).
    pub unit_price: Money,
    pub recorded_at: DateTime<Utc>,
    pub note: Option<String>,
}

/// One sale or purchase in the ledger.
///
/// Identity and quantities are fixed at creation; only status and the
/// shipping-company label are meant to change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    id: TransactionId,
    kind: TransactionKind,
    customer_id: CustomerId,
    customer_name: String,
    product_id: ProductId,
    product_name: String,
    quantity: i64,
    unit: String,
    unit_price: Money,
    total: Money,
    recorded_at: DateTime<Utc>,
    note: Option<String>,
    status: TransactionStatus,
    shipping_company: Option<String>,
}

impl Transaction {
    /// Build a completed transaction record. The total is computed from unit
    /// price and quantity; quantity must be positive.
    pub fn new(attrs: NewTransaction) -> DomainResult<Self> {
        if attrs.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        let total = attrs.unit_price.multiply_quantity(attrs.quantity)?;
        Ok(Self {
            id: attrs.id,
            kind: attrs.kind,
            customer_id: attrs.customer_id,
            customer_name: attrs.customer_name,
            product_id: attrs.product_id,
            product_name: attrs.product_name,
            quantity: attrs.quantity,
            unit: attrs.unit,
            unit_price: attrs.unit_price,
            total,
            recorded_at: attrs.recorded_at,
            note: attrs.note,
            status: TransactionStatus::Completed,
            shipping_company: None,
        })
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Customer name as it was when the transaction was recorded.
    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    /// Product name as it was when the transaction was recorded.
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn shipping_company(&self) -> Option<&str> {
        self.shipping_company.as_deref()
    }

    pub fn is_sale(&self) -> bool {
        self.kind == TransactionKind::Sale
    }

    pub fn is_purchase(&self) -> bool {
        self.kind == TransactionKind::Purchase
    }

    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    /// Set the status. Any transition is allowed.
    pub fn set_status(&mut self, status: TransactionStatus) {
        self.status = status;
    }

    pub fn cancel(&mut self) {
        self.status = TransactionStatus::Cancelled;
    }

    pub fn set_shipping_company(&mut self, company: impl Into<String>) {
        self.shipping_company = Some(company.into());
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = Some(note.into());
    }

    /// Replace the quantity; the total is recomputed. The record is unchanged
    /// on any failure.
    pub fn set_quantity(&mut self, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        let total = self.unit_price.multiply_quantity(quantity)?;
        self.quantity = quantity;
        self.total = total;
        Ok(())
    }

    /// Replace the charged unit price; the total is recomputed. The record is
    /// unchanged on any failure.
    pub fn set_unit_price(&mut self, unit_price: Money) -> DomainResult<()> {
        if unit_price.is_negative() {
            return Err(DomainError::validation("unit price cannot be negative"));
        }
        let total = unit_price.multiply_quantity(self.quantity)?;
        self.unit_price = unit_price;
        self.total = total;
        Ok(())
    }

    /// Recompute `total` from the current unit price and quantity.
    pub fn recalculate_total(&mut self) -> DomainResult<()> {
        self.total = self.unit_price.multiply_quantity(self.quantity)?;
        Ok(())
    }
}
