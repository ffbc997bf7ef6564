//! Reporting queries over the store.
//!
//! Every report is a linear scan over the ledger or the catalog, computed on
//! demand. Reports read the ledger as recorded: cancelling a transaction later
//! does not remove it from totals.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use timberstock_core::Money;

use crate::store::Store;

/// Profit-and-loss summary over all recorded sales.
///
/// Cost of goods uses each product's *current* cost price, not the cost at
/// sale time, so the figure shifts when costs are edited. Sales of products
/// that were since removed are skipped entirely (no revenue, no cost).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfitLoss {
    pub revenue: Money,
    pub cost_of_goods: Money,
    pub profit: Money,
    /// Profit as a percentage of revenue; zero when there is no revenue.
    pub margin_percent: f64,
}

impl Store {
    /// Units sold per product-name snapshot over the whole ledger.
    ///
    /// Keyed on the name frozen into each record: sales before and after a
    /// rename land in separate buckets, and same-named products merge. Names
    /// stay resolvable after the product itself is removed.
    pub fn sales_quantity_by_product(&self) -> HashMap<String, i64> {
        let mut totals = HashMap::new();
        for txn in self.transactions().iter().filter(|t| t.is_sale()) {
            *totals.entry(txn.product_name().to_string()).or_insert(0) += txn.quantity();
        }
        totals
    }

    /// The `limit` best-selling products as `(name snapshot, units sold)`,
    /// descending by units. Ties break on the lexically smaller name.
    pub fn top_selling_products(&self, limit: usize) -> Vec<(String, i64)> {
        let mut ranked: Vec<(String, i64)> =
            self.sales_quantity_by_product().into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);
        ranked
    }

    /// Total sales revenue recorded on one calendar day (UTC).
    pub fn daily_sales(&self, date: NaiveDate) -> Money {
        self.transactions()
            .iter()
            .filter(|t| t.is_sale() && t.recorded_at().date_naive() == date)
            .map(|t| t.total())
            .sum()
    }

    /// Total sales revenue recorded in one calendar month (UTC).
    pub fn monthly_sales(&self, year: i32, month: u32) -> Money {
        self.transactions()
            .iter()
            .filter(|t| {
                let day = t.recorded_at().date_naive();
                t.is_sale() && day.year() == year && day.month() == month
            })
            .map(|t| t.total())
            .sum()
    }

    /// Profit-and-loss summary over all sales in the ledger.
    pub fn profit_loss(&self) -> ProfitLoss {
        let mut revenue = Money::zero();
        let mut cost_of_goods = Money::zero();

        for txn in self.transactions().iter().filter(|t| t.is_sale()) {
            // A sale of a removed product drops out of the analysis entirely.
            let Some(product) = self.product(txn.product_id()) else {
                continue;
            };
            revenue += txn.total();
            cost_of_goods += product
                .cost_price()
                .saturating_multiply_quantity(txn.quantity());
        }

        let profit = revenue - cost_of_goods;
        let margin_percent = if revenue.is_zero() {
            0.0
        } else {
            profit.minor() as f64 / revenue.minor() as f64 * 100.0
        };

        ProfitLoss {
            revenue,
            cost_of_goods,
            profit,
            margin_percent,
        }
    }

    /// Monetary value of all stock on hand (price x stock, summed).
    pub fn total_stock_value(&self) -> Money {
        self.products().map(|p| p.stock_value()).sum()
    }
}
