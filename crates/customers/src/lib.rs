//! Customers domain module.
//!
//! Business rules for the parties a store transacts with: debt balances,
//! discount tiers, and order history. Pure domain logic, no IO.

pub mod customer;

pub use customer::{ContactInfo, Customer, CustomerKind, NewCustomer};
