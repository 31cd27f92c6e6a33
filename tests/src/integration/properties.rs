//! # Property Tests
//!
//! Pagination through the full engine: for any ledger size and page size,
//! concatenated pages reproduce the store's candidate order exactly once.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use tx_history::{OwnershipCriteria, PageRequest, TransactionHistoryApi};

    use crate::fixtures::{self, OWNER_LOCK};

    fn runtime() -> tokio::runtime::Runtime {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn pages_reassemble_history(count in 0u32..60, page_size in 1usize..15) {
            let (service, _) = fixtures::service(count);
            let criteria = OwnershipCriteria::LockHashes(vec![OWNER_LOCK]);
            let pages = (count as usize).div_ceil(page_size);

            let collected = runtime().block_on(async {
                let mut collected = Vec::new();
                for page_no in 1..=pages + 1 {
                    let page = service
                        .get_transactions(&criteria, PageRequest::new(page_no, page_size), "")
                        .await
                        .unwrap();
                    assert_eq!(page.total_count, u64::from(count));
                    if page_no > pages {
                        assert!(page.items.is_empty());
                    }
                    collected.extend(page.items.into_iter().map(|v| v.hash));
                }
                collected
            });

            let expected: Vec<_> = (0..count).rev().map(fixtures::tx_hash).collect();
            prop_assert_eq!(collected, expected);
        }

        #[test]
        fn net_value_sums_to_owner_balance(count in 0u32..40) {
            let (service, _) = fixtures::service(count);
            let criteria = OwnershipCriteria::LockHashes(vec![OWNER_LOCK]);

            let total: i128 = runtime().block_on(async {
                service
                    .get_transactions(&criteria, PageRequest::new(1, 1000), "")
                    .await
                    .unwrap()
                    .items
                    .iter()
                    .map(|v| v.value)
                    .sum()
            });

            // Owner keeps 9_000 of each completed deposit/withdraw pair.
            let expected: i128 = (0..count)
                .map(|n| match n % 4 {
                    0 => 10_000,
                    1 => -1_000,
                    _ => 500,
                })
                .sum();
            prop_assert_eq!(total, expected);
        }
    }
}
