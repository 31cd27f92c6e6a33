//! # Telemetry Integration
//!
//! Engine operations are visible in the Prometheus exposition.

#[cfg(test)]
mod tests {
    use history_telemetry::{encode_metrics, register_metrics, EMPTY_POLICY_RESULTS};
    use tx_history::{OwnershipCriteria, PageRequest, TransactionHistoryApi};

    use crate::fixtures::{self, OWNER_ADDRESS};

    #[tokio::test]
    async fn test_queries_show_up_in_exposition() {
        register_metrics().unwrap();
        let (service, _) = fixtures::service(4);
        let criteria = OwnershipCriteria::Addresses(vec![OWNER_ADDRESS.to_string()]);

        let before = EMPTY_POLICY_RESULTS
            .with_label_values(&["amount_unsupported"])
            .get();
        service
            .get_transactions(&criteria, PageRequest::new(1, 10), "")
            .await
            .unwrap();
        service
            .get_transactions(&criteria, PageRequest::new(1, 10), "42")
            .await
            .unwrap();

        assert!(
            EMPTY_POLICY_RESULTS
                .with_label_values(&["amount_unsupported"])
                .get()
                >= before + 1.0
        );

        let text = encode_metrics().unwrap();
        assert!(text.contains("history_queries_served_total"));
        assert!(text.contains("search_type=\"amount\""));
        assert!(text.contains("history_operation_duration_seconds"));
        assert!(text.contains("history_candidate_set_size"));
    }
}
