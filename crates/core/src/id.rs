//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are sequential surrogate keys. The store owns one [`IdSequence`]
//! per entity kind and assigns the next value at creation time.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

/// Identifier of a customer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(u32);

/// Identifier of a ledger transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(u32);

macro_rules! impl_sequential_id {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u32 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u32> for $t {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u32 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = u32::from_str(s)
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Ok(Self(value))
            }
        }
    };
}

impl_sequential_id!(ProductId, "ProductId");
impl_sequential_id!(CustomerId, "CustomerId");
impl_sequential_id!(TransactionId, "TransactionId");

/// Monotonic identifier counter for one entity kind.
///
/// Mutation is explicit: only [`IdSequence::next`] advances the counter, so a
/// store holding one sequence per entity kind fully controls id assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    /// Sequence whose first issued identifier will be `first`.
    pub const fn starting_at(first: u32) -> Self {
        Self { next: first }
    }

    /// Issue the next identifier and advance the counter.
    pub fn next<T: From<u32>>(&mut self) -> T {
        let value = self.next;
        self.next += 1;
        T::from(value)
    }

    /// The value the next call to [`IdSequence::next`] would issue.
    pub const fn peek(&self) -> u32 {
        self.next
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
