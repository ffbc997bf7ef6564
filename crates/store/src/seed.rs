//! Default sample dataset for demos and tests.

use timberstock_core::{DiscountRate, DomainResult, Money};
use timberstock_customers::{ContactInfo, CustomerKind, NewCustomer};
use timberstock_products::NewProduct;

use crate::store::Store;

fn product(
    name: &str,
    category: &str,
    price_minor: i64,
    stock: i64,
    unit: &str,
    critical_level: i64,
    cost_minor: i64,
) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: category.to_string(),
        price: Money::from_minor(price_minor),
        stock,
        unit: unit.to_string(),
        critical_level,
        cost_price: Money::from_minor(cost_minor),
    }
}

fn customer(
    name: &str,
    phone: &str,
    email: &str,
    address: &str,
    kind: CustomerKind,
    discount_percent: f64,
) -> DomainResult<NewCustomer> {
    Ok(NewCustomer {
        name: name.to_string(),
        contact: ContactInfo {
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
        },
        kind,
        discount_rate: DiscountRate::from_percent(discount_percent)?,
    })
}

impl Store {
    /// A store pre-loaded with the sample timber catalog and customers.
    pub fn with_default_catalog() -> DomainResult<Self> {
        let mut store = Self::new();

        store.add_product(product("Pine Lumber", "Timber", 85_000, 100, "m3", 20, 65_000))?;
        store.add_product(product("Oak Lumber", "Timber", 120_000, 75, "m3", 15, 90_000))?;
        store.add_product(product("Plywood 18mm", "Panel", 45_000, 200, "pcs", 30, 32_000))?;
        store.add_product(product("MDF 16mm", "Panel", 38_000, 150, "pcs", 25, 28_000))?;
        store.add_product(product(
            "Laminate Flooring",
            "Flooring",
            9_500,
            500,
            "m2",
            50,
            6_500,
        ))?;

        store.add_customer(customer(
            "Dave Mercer",
            "555-0134",
            "dave.mercer@example.com",
            "Riverton",
            CustomerKind::Individual,
            0.0,
        )?)?;
        store.add_customer(customer(
            "Northside Furniture Co.",
            "555-0102",
            "orders@northside.example",
            "Hillcrest",
            CustomerKind::Corporate,
            15.0,
        )?)?;
        store.add_customer(customer(
            "Builders Depot",
            "555-0177",
            "sales@buildersdepot.example",
            "Lakefield",
            CustomerKind::Corporate,
            20.0,
        )?)?;

        Ok(store)
    }
}
