//! # Integration Test Flows
//!
//! Tests that tx-history and shared-bus work together correctly.
//!
//! ## Flows Tested:
//!
//! 1. **Description update → Bus**: subscribers observe `DescriptionUpdated`
//! 2. **Backend failure → Bus**: failures are routed to the dead letter topic
//! 3. **Concurrent queries**: independent pages do not interfere

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;
    use tokio_stream::StreamExt;

    use shared_bus::{EventFilter, EventTopic, HistoryEvent, InMemoryEventBus};
    use tx_history::{
        handle_api_query, HistoryConfig, HistoryService, InMemoryLedgerStore, ManualTimeSource,
        OwnershipCriteria, PageRequest, StaticLockHashResolver, TransactionHistoryApi,
        TransferKind,
    };

    use crate::fixtures::{self, OWNER_ADDRESS, OWNER_LOCK};

    fn owner() -> OwnershipCriteria {
        OwnershipCriteria::Addresses(vec![OWNER_ADDRESS.to_string()])
    }

    // =============================================================================
    // DESCRIPTION UPDATE → EVENT BUS
    // =============================================================================

    #[tokio::test]
    async fn test_description_update_reaches_subscriber() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut subscription = bus.subscribe(EventFilter::for_transactions(vec![fixtures::tx_hash(3)]));

        let (service, _) = fixtures::service(8);
        let service = service
            .with_publisher(bus.clone())
            .with_time_source(Arc::new(ManualTimeSource::new(1_700_000_000_000)));

        // Not watched by the subscription.
        service
            .update_description(&fixtures::tx_hash(2), "ignored")
            .await
            .unwrap();
        service
            .update_description(&fixtures::tx_hash(3), "groceries")
            .await
            .unwrap();

        let event = timeout(Duration::from_secs(1), subscription.recv())
            .await
            .expect("event within timeout")
            .expect("bus open");
        assert_eq!(
            event,
            HistoryEvent::DescriptionUpdated {
                tx_hash: fixtures::tx_hash(3),
                description: "groceries".to_string(),
                updated_at: 1_700_000_000_000,
            }
        );
        assert_eq!(subscription.try_recv(), Ok(None));
    }

    #[tokio::test]
    async fn test_unknown_hash_publishes_nothing() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut subscription = bus.subscribe(EventFilter::all());
        let (service, store) = fixtures::service(4);
        let service = service.with_publisher(bus.clone());

        assert!(service
            .update_description(&[0xEE; 32], "note")
            .await
            .unwrap()
            .is_none());
        assert_eq!(subscription.try_recv(), Ok(None));
        assert_eq!(store.len(), 4);
    }

    #[tokio::test]
    async fn test_api_update_streams_event() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut stream = bus.event_stream(EventFilter::topics(vec![EventTopic::Transactions]));
        let (service, _) = fixtures::service(4);
        let service = service.with_publisher(bus.clone());

        let params = serde_json::json!({
            "hash": shared_types::to_hex(&fixtures::tx_hash(1)),
            "description": "refund",
        });
        let result = handle_api_query(&service, "update_description", &params)
            .await
            .unwrap();
        assert_eq!(result["description"], "refund");

        let event = timeout(Duration::from_secs(1), stream.next())
            .await
            .expect("event within timeout")
            .expect("stream open");
        assert_eq!(event.tx_hash(), Some(&fixtures::tx_hash(1)));
    }

    // =============================================================================
    // BACKEND FAILURE → DEAD LETTER TOPIC
    // =============================================================================

    #[tokio::test]
    async fn test_resolver_outage_routed_to_dead_letters() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut dead_letters = bus.subscribe(EventFilter::topics(vec![EventTopic::DeadLetterQueue]));

        let store = Arc::new(InMemoryLedgerStore::with_records(fixtures::ledger(4)));
        let resolver = Arc::new(fixtures::resolver());
        resolver.set_available(false);
        let service = HistoryService::new(
            HistoryConfig::default(),
            store.clone(),
            store,
            resolver.clone(),
        )
        .with_publisher(bus.clone());

        let err = service
            .count_by_address_and_status(OWNER_ADDRESS, &BTreeSet::new())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "resolver");

        match dead_letters.try_recv() {
            Ok(Some(HistoryEvent::BackendFailure { operation, error })) => {
                assert_eq!(operation, "count_by_address_and_status");
                assert!(error.contains("unavailable"));
            }
            other => panic!("expected dead letter, got {other:?}"),
        }

        // Recovery needs no engine state reset.
        resolver.set_available(true);
        let page = service
            .get_transactions(&owner(), PageRequest::new(1, 10), "")
            .await
            .unwrap();
        assert_eq!(page.total_count, 4);
    }

    #[tokio::test]
    async fn test_validation_errors_are_not_dead_letters() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut all = bus.subscribe(EventFilter::all());
        let (service, _) = fixtures::service(4);
        let service = service.with_publisher(bus.clone());

        assert!(service
            .get_transactions(&owner(), PageRequest::new(1, 10), "2021-02-30")
            .await
            .is_err());
        assert_eq!(all.try_recv(), Ok(None));
    }

    // =============================================================================
    // CONCURRENT QUERIES
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_pages_do_not_interfere() {
        let (service, _) = fixtures::service(100);
        let service = Arc::new(service);

        let handles: Vec<_> = (1..=10)
            .map(|page_no| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .get_transactions(&owner(), PageRequest::new(page_no, 10), "")
                        .await
                })
            })
            .collect();

        let mut seen = Vec::new();
        for (i, handle) in handles.into_iter().enumerate() {
            let page = handle.await.unwrap().unwrap();
            assert_eq!(page.total_count, 100);
            assert_eq!(page.items.len(), 10, "page {}", i + 1);
            seen.extend(page.items.into_iter().map(|v| v.hash));
        }

        // Newest first across pages: transaction 99 down to 0.
        let expected: Vec<_> = (0..100).rev().map(fixtures::tx_hash).collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_generated_ledger_annotations() {
        let (service, _) = fixtures::service(8);
        let page = service
            .get_transactions(
                &OwnershipCriteria::LockHashes(vec![OWNER_LOCK]),
                PageRequest::new(1, 8),
                "",
            )
            .await
            .unwrap();

        for view in &page.items {
            let n = u32::from_be_bytes([view.hash[0], view.hash[1], view.hash[2], view.hash[3]]);
            match n % 4 {
                0 => {
                    assert_eq!(view.value, 10_000);
                    assert!(view.nervos_dao);
                }
                1 => {
                    assert_eq!(view.value, -1_000);
                    assert_eq!(view.kind, TransferKind::Send);
                    assert!(view.nervos_dao);
                }
                _ => {
                    assert_eq!(view.value, 500);
                    assert!(!view.nervos_dao);
                }
            }
        }
    }

    #[tokio::test]
    async fn test_pubkey_criteria_match_address_criteria() {
        let (service, _) = fixtures::service(12);
        let page = PageRequest::new(2, 5);

        let by_address = service.get_transactions(&owner(), page, "").await.unwrap();
        let by_pubkey = service
            .get_transactions(&OwnershipCriteria::Pubkeys(vec!["0x02owner".into()]), page, "")
            .await
            .unwrap();
        assert_eq!(by_address, by_pubkey);
    }

    #[tokio::test]
    async fn test_static_resolver_rejects_unknown_pubkey() {
        let store = Arc::new(InMemoryLedgerStore::new());
        let service = HistoryService::new(
            HistoryConfig::default(),
            store.clone(),
            store,
            Arc::new(StaticLockHashResolver::new()),
        );
        let err = service
            .lock_hashes_of(&OwnershipCriteria::Pubkeys(vec!["0x03ff".into()]))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "resolver");
    }
}
