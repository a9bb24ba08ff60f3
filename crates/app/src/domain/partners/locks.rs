//! Per-partner write locks.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::partners::records::PartnerUuid;

/// Serializes load/mutate/persist cycles for the same partner.
#[derive(Debug, Default)]
pub(crate) struct PartnerLocks {
    locks: Mutex<FxHashMap<PartnerUuid, Arc<Mutex<()>>>>,
}

impl PartnerLocks {
    pub(crate) async fn acquire(&self, partner: PartnerUuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;

            // Entries nobody holds or waits on are dropped.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);

            Arc::clone(locks.entry(partner).or_default())
        };

        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
