//! # Balance Calculation
//!
//! Signed net capacity of a transaction for one ownership set:
//! owned outputs minus owned inputs. Sums are exact `i128`, so no
//! realistic number of 64-bit capacities can overflow them.

use std::collections::BTreeSet;

use shared_types::Hash;

use super::entities::{InputRecord, OutputRecord, TransferKind};

/// Net capacity moved into the ownership set by a transaction.
///
/// Inputs whose spent cell was never indexed (no lock hash) are skipped;
/// an indexed input with unknown capacity counts as zero.
pub fn transaction_value(
    inputs: &[InputRecord],
    outputs: &[OutputRecord],
    lock_hashes: &BTreeSet<Hash>,
) -> i128 {
    let received: i128 = outputs
        .iter()
        .filter(|o| lock_hashes.contains(&o.lock_hash))
        .map(|o| i128::from(o.capacity))
        .sum();

    let spent: i128 = inputs
        .iter()
        .filter(|i| i.lock_hash.is_some_and(|h| lock_hashes.contains(&h)))
        .map(|i| i128::from(i.capacity.unwrap_or(0)))
        .sum();

    received - spent
}

/// `Receive` for strictly positive values, `Send` otherwise (zero included).
pub fn transfer_kind(value: i128) -> TransferKind {
    if value > 0 {
        TransferKind::Receive
    } else {
        TransferKind::Send
    }
}
