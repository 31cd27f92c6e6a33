//! # Static Lock Hash Resolver
//!
//! Table-driven [`LockHashResolver`]. Each address maps to every lock hash
//! it stands for; each public key maps to its address. An unavailable flag
//! simulates a resolver whose node is unreachable.

use std::collections::{BTreeSet, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::Hash;

use crate::ports::{LockHashResolver, ResolverError};

#[derive(Debug)]
pub struct StaticLockHashResolver {
    addresses: RwLock<HashMap<String, BTreeSet<Hash>>>,
    pubkeys: RwLock<HashMap<String, String>>,
    available: AtomicBool,
}

impl Default for StaticLockHashResolver {
    fn default() -> Self {
        Self {
            addresses: RwLock::new(HashMap::new()),
            pubkeys: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl StaticLockHashResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an address and its lock hashes.
    pub fn with_address(
        self,
        address: impl Into<String>,
        lock_hashes: impl IntoIterator<Item = Hash>,
    ) -> Self {
        self.register_address(address, lock_hashes);
        self
    }

    /// Register a public key and the address it encodes to.
    pub fn with_pubkey(self, pubkey: impl Into<String>, address: impl Into<String>) -> Self {
        self.pubkeys.write().insert(pubkey.into(), address.into());
        self
    }

    pub fn register_address(
        &self,
        address: impl Into<String>,
        lock_hashes: impl IntoIterator<Item = Hash>,
    ) {
        self.addresses
            .write()
            .entry(address.into())
            .or_default()
            .extend(lock_hashes);
    }

    /// Toggle simulated node availability.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), ResolverError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(ResolverError::Unavailable("node unreachable".to_string()))
        }
    }
}

#[async_trait]
impl LockHashResolver for StaticLockHashResolver {
    async fn address_to_lock_hashes(
        &self,
        address: &str,
    ) -> Result<BTreeSet<Hash>, ResolverError> {
        self.ensure_available()?;
        self.addresses
            .read()
            .get(address)
            .cloned()
            .ok_or_else(|| ResolverError::InvalidAddress(address.to_string()))
    }

    async fn pubkey_to_address(&self, pubkey: &str) -> Result<String, ResolverError> {
        self.ensure_available()?;
        self.pubkeys
            .read()
            .get(pubkey)
            .cloned()
            .ok_or_else(|| ResolverError::InvalidPubkey(pubkey.to_string()))
    }
}
