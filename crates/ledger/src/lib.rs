//! Ledger domain module.
//!
//! Transaction records for the append-only ledger: one record per sale or
//! purchase, with name snapshots frozen at creation time.

pub mod transaction;

pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionStatus};
