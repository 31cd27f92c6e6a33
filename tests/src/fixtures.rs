//! Synthetic ledgers.
//!
//! Every generated transaction touches the owner's lock hash. Every fourth
//! one is a DAO deposit and the one after it withdraws that deposit, so
//! pages exercise both balance directions and DAO correlation.

use std::sync::Arc;

use shared_types::{Hash, OutPoint, TransactionStatus};
use tx_history::{
    HistoryConfig, HistoryService, InMemoryLedgerStore, InputRecord, OutputRecord,
    StaticLockHashResolver, TransactionRecord,
};

/// Owner's lock hash.
pub const OWNER_LOCK: Hash = [0xA1; 32];
/// Counterparty lock hash.
pub const OTHER_LOCK: Hash = [0xB2; 32];
/// Address resolving to [`OWNER_LOCK`].
pub const OWNER_ADDRESS: &str = "ckt1qyqowner";
/// Address resolving to [`OTHER_LOCK`].
pub const OTHER_ADDRESS: &str = "ckt1qyqother";

/// 2020-01-01T00:00:00Z in milliseconds.
pub const GENESIS_MS: u64 = 1_577_836_800_000;
/// Spacing between generated transactions.
pub const STEP_MS: u64 = 600_000;

pub type MemoryHistoryService =
    HistoryService<InMemoryLedgerStore, InMemoryLedgerStore, StaticLockHashResolver>;

/// Deterministic transaction hash for position `n`.
pub fn tx_hash(n: u32) -> Hash {
    let mut hash = [0u8; 32];
    hash[..4].copy_from_slice(&n.to_be_bytes());
    hash[31] = 0x7F;
    hash
}

/// Transaction `n` of a generated ledger.
pub fn transaction(n: u32) -> TransactionRecord {
    let hash = tx_hash(n);
    let timestamp = GENESIS_MS + u64::from(n) * STEP_MS;

    let mut record = TransactionRecord {
        hash,
        version: 0,
        timestamp,
        block_number: Some(u64::from(n)),
        block_hash: Some([0xCC; 32]),
        status: TransactionStatus::Confirmed,
        description: String::new(),
        created_at: timestamp,
        updated_at: timestamp,
        inputs: Vec::new(),
        outputs: Vec::new(),
    };

    match n % 4 {
        // DAO deposit
        0 => {
            record.outputs.push(OutputRecord {
                out_point: OutPoint::new(hash, 0),
                lock_hash: OWNER_LOCK,
                capacity: 10_000,
                dao_data: Some(vec![0; 8]),
            });
        }
        // Withdraw the previous deposit, paying the counterparty
        1 => {
            record.inputs.push(InputRecord {
                tx_hash: hash,
                index: 0,
                previous_output: Some(OutPoint::new(tx_hash(n - 1), 0)),
                lock_hash: Some(OWNER_LOCK),
                capacity: Some(10_000),
            });
            record.outputs.push(OutputRecord {
                out_point: OutPoint::new(hash, 0),
                lock_hash: OWNER_LOCK,
                capacity: 9_000,
                dao_data: None,
            });
            record.outputs.push(OutputRecord {
                out_point: OutPoint::new(hash, 1),
                lock_hash: OTHER_LOCK,
                capacity: 1_000,
                dao_data: None,
            });
        }
        // Plain receive from an unindexed cell
        _ => {
            record.inputs.push(InputRecord {
                tx_hash: hash,
                index: 0,
                previous_output: Some(OutPoint::new([0xDD; 32], n)),
                lock_hash: None,
                capacity: None,
            });
            record.outputs.push(OutputRecord {
                out_point: OutPoint::new(hash, 0),
                lock_hash: OWNER_LOCK,
                capacity: 500,
                dao_data: None,
            });
        }
    }

    record
}

/// `count` transactions, oldest first.
pub fn ledger(count: u32) -> Vec<TransactionRecord> {
    (0..count).map(transaction).collect()
}

pub fn resolver() -> StaticLockHashResolver {
    StaticLockHashResolver::new()
        .with_address(OWNER_ADDRESS, [OWNER_LOCK])
        .with_address(OTHER_ADDRESS, [OTHER_LOCK])
        .with_pubkey("0x02owner", OWNER_ADDRESS)
}

/// Service over an in-memory ledger of `count` transactions.
pub fn service(count: u32) -> (MemoryHistoryService, Arc<InMemoryLedgerStore>) {
    let store = Arc::new(InMemoryLedgerStore::with_records(ledger(count)));
    let service = HistoryService::new(
        HistoryConfig::default(),
        store.clone(),
        store.clone(),
        Arc::new(resolver()),
    );
    (service, store)
}
