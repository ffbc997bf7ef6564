//! `timberstock-store` — the single authority over products, customers, and
//! the transaction ledger.
//!
//! A [`Store`] is an explicitly constructed context object: callers and tests
//! create as many isolated instances as they need and pass them where required.
//! All collections live in memory; there is no persistence layer. The API is
//! `&mut self` and single-threaded — callers that share a store across threads
//! must wrap it in their own mutual exclusion so the transaction-application
//! protocol runs as one critical section.

pub mod reporting;
pub mod seed;
pub mod store;

pub use reporting::ProfitLoss;
pub use store::{CustomerUpdate, ProductUpdate, Store, TransactionRequest};
