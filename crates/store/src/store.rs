use std::collections::HashMap;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use timberstock_core::{
    CustomerId, DiscountRate, DomainError, DomainResult, IdSequence, Money, ProductId,
    TransactionId,
};
use timberstock_customers::{ContactInfo, Customer, CustomerKind, NewCustomer};
use timberstock_ledger::{NewTransaction, Transaction, TransactionKind, TransactionStatus};
use timberstock_products::{NewProduct, Product};

/// Request to record one sale or purchase against the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub note: Option<String>,
}

/// Full profile update for a product. Stock is adjusted through the dedicated
/// stock operations, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: String,
    pub category: String,
    pub price: Money,
    pub unit: String,
    pub critical_level: i64,
    pub cost_price: Money,
}

/// Full profile update for a customer. Debt moves only through sales and
/// payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: String,
    pub contact: ContactInfo,
    pub kind: CustomerKind,
    pub discount_rate: DiscountRate,
}

/// In-memory store: products, customers, the append-only transaction ledger,
/// and the accumulated stock alerts.
///
/// Identifiers are sequential per entity kind; each [`IdSequence`] advances
/// only when an entity is actually created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    products: HashMap<ProductId, Product>,
    customers: HashMap<CustomerId, Customer>,
    transactions: Vec<Transaction>,
    stock_alerts: Vec<String>,
    product_ids: IdSequence,
    customer_ids: IdSequence,
    transaction_ids: IdSequence,
}

/// Append a human-readable alert line when the product sits at or below its
/// critical level. Alerts accumulate; repeated checks for the same product
/// produce repeated lines.
fn push_alert_if_critical(product: &Product, alerts: &mut Vec<String>) {
    if product.is_critical_stock() {
        warn!(
            product_id = %product.id(),
            stock = product.stock(),
            critical_level = product.critical_level(),
            "critical stock level"
        );
        alerts.push(format!(
            "WARNING: stock for {} is at a critical level (current: {} {}, threshold: {})",
            product.name(),
            product.stock(),
            product.unit(),
            product.critical_level()
        ));
    }
}

impl Store {
    /// An empty store with all id sequences starting at 1.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------- products

    /// Add a product to the catalog and run the critical-stock check on it
    /// (a product can be created already at or below its threshold).
    pub fn add_product(&mut self, attrs: NewProduct) -> DomainResult<ProductId> {
        let product = Product::new(ProductId::new(self.product_ids.peek()), attrs)?;
        let id: ProductId = self.product_ids.next();

        info!(product_id = %id, name = product.name(), "product added");
        push_alert_if_critical(&product, &mut self.stock_alerts);
        self.products.insert(id, product);
        Ok(id)
    }

    /// Replace a product's profile fields. The update is applied all-or-nothing:
    /// if any field fails validation, the stored product is untouched.
    pub fn update_product(&mut self, id: ProductId, update: ProductUpdate) -> DomainResult<()> {
        let product = self.products.get_mut(&id).ok_or(DomainError::NotFound)?;

        let mut updated = product.clone();
        updated.set_name(update.name)?;
        updated.set_category(update.category);
        updated.set_price(update.price)?;
        updated.set_unit(update.unit);
        updated.set_critical_level(update.critical_level);
        updated.set_cost_price(update.cost_price)?;

        *product = updated;
        Ok(())
    }

    pub fn update_product_price(&mut self, id: ProductId, price: Money) -> DomainResult<()> {
        let product = self.products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.set_price(price)
    }

    /// Replace a product's stock count and re-evaluate its alert condition.
    pub fn update_product_stock(&mut self, id: ProductId, stock: i64) -> DomainResult<()> {
        let product = self.products.get_mut(&id).ok_or(DomainError::NotFound)?;
        product.set_stock(stock)?;
        push_alert_if_critical(product, &mut self.stock_alerts);
        Ok(())
    }

    /// Remove a product from the lookup map. Ledger records keep referring to
    /// the removed id; reporting tolerates the dangling reference.
    pub fn remove_product(&mut self, id: ProductId) -> DomainResult<()> {
        self.products.remove(&id).ok_or(DomainError::NotFound)?;
        info!(product_id = %id, "product removed");
        Ok(())
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn active_products(&self) -> Vec<&Product> {
        self.products.values().filter(|p| p.is_active()).collect()
    }

    pub fn critical_stock_products(&self) -> Vec<&Product> {
        self.products
            .values()
            .filter(|p| p.is_critical_stock())
            .collect()
    }

    /// Reprice the whole catalog by `(1 + percent / 100)`.
    ///
    /// This path writes prices directly: negative percentages are allowed and
    /// the results are not clamped, so prices can cross zero.
    pub fn bulk_update_prices(&mut self, percent: f64) {
        for product in self.products.values_mut() {
            product.scale_price(percent);
        }
        info!(percent, count = self.products.len(), "bulk price update applied");
    }

    pub fn stock_alerts(&self) -> &[String] {
        &self.stock_alerts
    }

    pub fn clear_stock_alerts(&mut self) {
        self.stock_alerts.clear();
    }

    // --------------------------------------------------------------- customers

    pub fn add_customer(&mut self, attrs: NewCustomer) -> DomainResult<CustomerId> {
        let customer = Customer::new(CustomerId::new(self.customer_ids.peek()), attrs)?;
        let id: CustomerId = self.customer_ids.next();

        info!(customer_id = %id, name = customer.name(), "customer added");
        self.customers.insert(id, customer);
        Ok(id)
    }

    /// Replace a customer's profile fields, all-or-nothing.
    pub fn update_customer(&mut self, id: CustomerId, update: CustomerUpdate) -> DomainResult<()> {
        let customer = self.customers.get_mut(&id).ok_or(DomainError::NotFound)?;

        let mut updated = customer.clone();
        updated.set_name(update.name)?;
        updated.set_contact(update.contact);
        updated.set_kind(update.kind);
        updated.set_discount_rate(update.discount_rate);

        *customer = updated;
        Ok(())
    }

    pub fn remove_customer(&mut self, id: CustomerId) -> DomainResult<()> {
        self.customers.remove(&id).ok_or(DomainError::NotFound)?;
        info!(customer_id = %id, "customer removed");
        Ok(())
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(&id)
    }

    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.values()
    }

    /// All ledger records for one customer, in ledger (chronological) order.
    /// Works for removed customers too, since this scans the ledger.
    pub fn customer_order_history(&self, id: CustomerId) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.customer_id() == id)
            .collect()
    }

    /// Settle part of a customer's outstanding debt.
    pub fn record_payment(&mut self, id: CustomerId, amount: Money) -> DomainResult<()> {
        let customer = self.customers.get_mut(&id).ok_or(DomainError::NotFound)?;
        customer.pay_debt(amount)?;
        info!(customer_id = %id, %amount, remaining = %customer.debt(), "payment recorded");
        Ok(())
    }

    // ------------------------------------------------------------ transactions

    /// The transaction-application protocol.
    ///
    /// All checks run before any state changes, so every failure leaves the
    /// store exactly as it was:
    ///
    /// 1. quantity must be positive;
    /// 2. customer and product must exist;
    /// 3. a sale needs enough stock;
    /// 4. the charged unit price is the product price after the customer's
    ///    discount tier;
    /// 5. the record is built with name/unit snapshots frozen now;
    /// 6. side effects in sequence — sale: deduct stock then accrue debt;
    ///    purchase: add stock (debt untouched);
    /// 7. the record joins the ledger and the customer's order history;
    /// 8. the product's critical-stock condition is re-evaluated.
    pub fn create_transaction(&mut self, request: TransactionRequest) -> DomainResult<TransactionId> {
        if request.quantity <= 0 {
            debug!(?request, "transaction rejected: non-positive quantity");
            return Err(DomainError::validation("quantity must be positive"));
        }

        let customer = self
            .customers
            .get(&request.customer_id)
            .ok_or(DomainError::NotFound)?;
        let product = self
            .products
            .get(&request.product_id)
            .ok_or(DomainError::NotFound)?;

        if request.kind == TransactionKind::Sale && product.stock() < request.quantity {
            debug!(
                product_id = %request.product_id,
                requested = request.quantity,
                available = product.stock(),
                "transaction rejected: insufficient stock"
            );
            return Err(DomainError::insufficient_stock(
                request.quantity,
                product.stock(),
            ));
        }

        let unit_price = customer.special_price(product.price());
        let id = TransactionId::new(self.transaction_ids.peek());
        let transaction = Transaction::new(NewTransaction {
            id,
            kind: request.kind,
            customer_id: request.customer_id,
            customer_name: customer.name().to_string(),
            product_id: request.product_id,
            product_name: product.name().to_string(),
            quantity: request.quantity,
            unit: product.unit().to_string(),
            unit_price,
            recorded_at: Utc::now(),
            note: request.note,
        })?;
        let _: TransactionId = self.transaction_ids.next();
        let total = transaction.total();

        // Side effects. The checks above guarantee these cannot fail.
        let product = self
            .products
            .get_mut(&request.product_id)
            .ok_or(DomainError::NotFound)?;
        match request.kind {
            TransactionKind::Sale => product.remove_stock(request.quantity)?,
            TransactionKind::Purchase => product.add_stock(request.quantity)?,
        }

        let customer = self
            .customers
            .get_mut(&request.customer_id)
            .ok_or(DomainError::NotFound)?;
        if request.kind == TransactionKind::Sale && total > Money::zero() {
            // Zero-priced sales accrue no debt.
            customer.add_debt(total)?;
        }
        customer.record_order(id);

        info!(
            transaction_id = %id,
            kind = ?request.kind,
            customer_id = %request.customer_id,
            product_id = %request.product_id,
            quantity = request.quantity,
            %total,
            "transaction recorded"
        );
        self.transactions.push(transaction);

        if let Some(product) = self.products.get(&request.product_id) {
            push_alert_if_critical(product, &mut self.stock_alerts);
        }

        Ok(id)
    }

    /// Look up one ledger record by id (linear ledger scan).
    pub fn transaction(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    /// The full ledger in recording order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_by_status(&self, status: TransactionStatus) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.status() == status)
            .collect()
    }

    pub fn update_transaction_status(
        &mut self,
        id: TransactionId,
        status: TransactionStatus,
    ) -> DomainResult<()> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(DomainError::NotFound)?;
        transaction.set_status(status);
        Ok(())
    }

    pub fn set_shipping_company(
        &mut self,
        id: TransactionId,
        company: impl Into<String>,
    ) -> DomainResult<()> {
        let transaction = self
            .transactions
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(DomainError::NotFound)?;
        transaction.set_shipping_company(company);
        Ok(())
    }
}
