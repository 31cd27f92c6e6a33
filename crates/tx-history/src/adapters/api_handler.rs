//! # API Handler
//!
//! Adapter turning JSON requests from an application layer into calls on
//! [`TransactionHistoryApi`]. No transport is provided here.
//!
//! ## Architecture
//!
//! ```text
//! Application layer → handle_api_query → TransactionHistoryApi → stores
//! ```
//!
//! Hashes are `0x`-prefixed hex on the wire.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::{hash_from_hex, Hash, TransactionStatus};

use crate::domain::{HistoryError, OwnershipCriteria, PageRequest};
use crate::ports::TransactionHistoryApi;

/// Error from API query handling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiQueryError {
    pub code: i32,
    pub message: String,
}

impl ApiQueryError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {}", method),
        }
    }

    pub fn invalid_params(msg: &str) -> Self {
        Self {
            code: -32602,
            message: msg.to_string(),
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            code: -32603,
            message: msg.to_string(),
        }
    }

    /// Engine failure. Validation errors are reported as invalid params.
    pub fn from_history(err: &HistoryError) -> Self {
        if err.is_validation() {
            Self::invalid_params(&err.to_string())
        } else {
            Self {
                code: -32000,
                message: err.to_string(),
            }
        }
    }
}

impl std::fmt::Display for ApiQueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiQueryError {}

impl From<HistoryError> for ApiQueryError {
    fn from(err: HistoryError) -> Self {
        Self::from_history(&err)
    }
}

/// Handle an API query.
///
/// ## Supported Methods
///
/// - `ping`: Health check
/// - `get_transactions`: `{criteria: {kind, values}, page_no, page_size, search?}`
/// - `get_transaction`: `{hash}`, `null` when unknown
/// - `update_description`: `{hash, description}`, `null` when unknown
/// - `count_by_address`: `{address, statuses}`
/// - `count_by_lock_hashes`: `{lock_hashes, statuses}`
pub async fn handle_api_query<A>(
    api: &A,
    method: &str,
    params: &Value,
) -> Result<Value, ApiQueryError>
where
    A: TransactionHistoryApi + ?Sized,
{
    match method {
        "ping" => Ok(json!({
            "status": "ok",
            "service": "tx-history"
        })),
        "get_transactions" => {
            let criteria = parse_criteria(params)?;
            let page = PageRequest::new(
                parse_usize_param(params, "page_no")?,
                parse_usize_param(params, "page_size")?,
            );
            let search = params.get("search").and_then(Value::as_str).unwrap_or("");
            let result = api.get_transactions(&criteria, page, search).await?;
            to_json(&result)
        }
        "get_transaction" => {
            let hash = parse_hash_param(params, "hash")?;
            let record = api.get_transaction(&hash).await?;
            to_json(&record)
        }
        "update_description" => {
            let hash = parse_hash_param(params, "hash")?;
            let description = parse_str_param(params, "description")?;
            let record = api.update_description(&hash, description).await?;
            to_json(&record)
        }
        "count_by_address" => {
            let address = parse_str_param(params, "address")?;
            let statuses = parse_statuses(params)?;
            let count = api.count_by_address_and_status(address, &statuses).await?;
            Ok(json!({ "count": count }))
        }
        "count_by_lock_hashes" => {
            let lock_hashes: BTreeSet<Hash> =
                parse_hash_list(params, "lock_hashes")?.into_iter().collect();
            let statuses = parse_statuses(params)?;
            let count = api
                .count_by_lock_hashes_and_status(&lock_hashes, &statuses)
                .await?;
            Ok(json!({ "count": count }))
        }
        _ => Err(ApiQueryError::method_not_found(method)),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, ApiQueryError> {
    serde_json::to_value(value).map_err(|e| ApiQueryError::internal(&e.to_string()))
}

fn parse_str_param<'a>(params: &'a Value, name: &str) -> Result<&'a str, ApiQueryError> {
    params
        .get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiQueryError::invalid_params(&format!("Missing {} parameter", name)))
}

fn parse_usize_param(params: &Value, name: &str) -> Result<usize, ApiQueryError> {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ApiQueryError::invalid_params(&format!("Missing {} parameter", name)))
}

/// Parse a hash parameter from JSON params.
fn parse_hash_param(params: &Value, name: &str) -> Result<Hash, ApiQueryError> {
    let hex_str = parse_str_param(params, name)?;
    hash_from_hex(hex_str).map_err(|e| ApiQueryError::invalid_params(&format!("{}: {}", name, e)))
}

fn parse_hash_list(params: &Value, name: &str) -> Result<Vec<Hash>, ApiQueryError> {
    parse_string_list(params, name)?
        .into_iter()
        .map(|s| {
            hash_from_hex(&s).map_err(|e| ApiQueryError::invalid_params(&format!("{}: {}", name, e)))
        })
        .collect()
}

fn parse_string_list(params: &Value, name: &str) -> Result<Vec<String>, ApiQueryError> {
    let values = params
        .get(name)
        .and_then(Value::as_array)
        .ok_or_else(|| ApiQueryError::invalid_params(&format!("Missing {} parameter", name)))?;

    values
        .iter()
        .map(|v| {
            v.as_str()
                .map(str::to_string)
                .ok_or_else(|| ApiQueryError::invalid_params(&format!("{} must be strings", name)))
        })
        .collect()
}

fn parse_criteria(params: &Value) -> Result<OwnershipCriteria, ApiQueryError> {
    let criteria = params
        .get("criteria")
        .ok_or_else(|| ApiQueryError::invalid_params("Missing criteria parameter"))?;
    let kind = parse_str_param(criteria, "kind")?;

    match kind {
        "addresses" => Ok(OwnershipCriteria::Addresses(parse_string_list(
            criteria, "values",
        )?)),
        "pubkeys" => Ok(OwnershipCriteria::Pubkeys(parse_string_list(
            criteria, "values",
        )?)),
        "lock_hashes" => Ok(OwnershipCriteria::LockHashes(parse_hash_list(
            criteria, "values",
        )?)),
        other => Err(ApiQueryError::invalid_params(&format!(
            "Unknown criteria kind: {}",
            other
        ))),
    }
}

/// Statuses default to all of them when omitted.
fn parse_statuses(params: &Value) -> Result<BTreeSet<TransactionStatus>, ApiQueryError> {
    match params.get("statuses") {
        None | Some(Value::Null) => Ok(TransactionStatus::ALL.into_iter().collect()),
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| ApiQueryError::invalid_params(&format!("statuses: {}", e))),
    }
}
