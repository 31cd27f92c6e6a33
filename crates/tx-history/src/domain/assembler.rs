//! Builds [`TransactionView`] rows from a page's headers and cells.

use std::collections::BTreeSet;

use shared_types::Hash;

use super::balance::{transaction_value, transfer_kind};
use super::dao::DaoIndex;
use super::entities::{InputRecord, OutputRecord, TransactionSummary, TransactionView};

/// Annotate one transaction with its value, direction and DAO flag.
///
/// `inputs` and `outputs` are all cells of the transaction, not only the
/// owned ones; ownership filtering happens in the balance calculation.
pub fn assemble_view(
    summary: &TransactionSummary,
    inputs: &[InputRecord],
    outputs: &[OutputRecord],
    lock_hashes: &BTreeSet<Hash>,
    dao: &DaoIndex,
) -> TransactionView {
    let value = transaction_value(inputs, outputs, lock_hashes);

    TransactionView {
        hash: summary.hash,
        version: summary.version,
        timestamp: summary.timestamp,
        block_number: summary.block_number,
        status: summary.status,
        description: summary.description.clone(),
        created_at: summary.created_at,
        updated_at: summary.updated_at,
        value,
        kind: transfer_kind(value),
        nervos_dao: dao.participates(inputs, outputs),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransferKind;
    use shared_types::{OutPoint, TransactionStatus};

    #[test]
    fn test_assemble_receive_with_withdrawal() {
        let tx1 = [1u8; 32];
        let tx2 = [2u8; 32];
        let lock = [0xA; 32];
        let summary = TransactionSummary {
            hash: tx2,
            version: 0,
            timestamp: 42,
            block_number: Some(3),
            block_hash: None,
            status: TransactionStatus::Confirmed,
            description: "withdraw".into(),
            created_at: 40,
            updated_at: 41,
        };
        let inputs = [InputRecord {
            tx_hash: tx2,
            index: 0,
            previous_output: Some(OutPoint::new(tx1, 0)),
            lock_hash: Some(lock),
            capacity: Some(100),
        }];
        let outputs = [OutputRecord {
            out_point: OutPoint::new(tx2, 0),
            lock_hash: lock,
            capacity: 105,
            dao_data: None,
        }];
        let dao = DaoIndex::from_outputs(&[OutputRecord {
            out_point: OutPoint::new(tx1, 0),
            lock_hash: lock,
            capacity: 100,
            dao_data: Some(vec![0; 8]),
        }]);

        let view = assemble_view(&summary, &inputs, &outputs, &BTreeSet::from([lock]), &dao);
        assert_eq!(view.value, 5);
        assert_eq!(view.kind, TransferKind::Receive);
        assert!(view.nervos_dao);
        assert_eq!(view.description, "withdraw");
        assert_eq!(view.block_number, Some(3));
    }
}
