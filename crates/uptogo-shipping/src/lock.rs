//! Per-order serialisation of delivery actions.
//!
//! The shipping-method metadata is read by the guards and written after the
//! remote call, with nothing in between to stop a second request for the
//! same order. Holding the order's lock across the whole sequence keeps at
//! most one delivery outstanding per order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct OrderLocks {
    locks: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl OrderLocks {
    /// Waits for exclusive access to `order_id`.
    pub async fn lock(&self, order_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            // Drop entries nobody holds or waits on.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(order_id.to_owned()).or_default())
        };
        lock.lock_owned().await
    }

    /// Number of orders with a held or awaited lock.
    #[must_use]
    pub fn active(&self) -> usize {
        let locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .values()
            .filter(|lock| Arc::strong_count(lock) > 1)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn same_order_waits_for_release() {
        let locks = Arc::new(OrderLocks::default());
        let guard = locks.lock("1001").await;

        let contender = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _guard = locks.lock("1001").await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished(), "second lock must wait");

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), contender)
            .await
            .expect("contender should acquire after release")
            .unwrap();
    }

    #[tokio::test]
    async fn different_orders_do_not_block() {
        let locks = OrderLocks::default();
        let _first = locks.lock("1001").await;
        let second = tokio::time::timeout(Duration::from_millis(100), locks.lock("1002")).await;
        assert!(second.is_ok(), "distinct orders must not contend");
    }

    #[tokio::test]
    async fn released_locks_are_pruned() {
        let locks = OrderLocks::default();
        drop(locks.lock("1001").await);
        assert_eq!(locks.active(), 0);
        let _held = locks.lock("1002").await;
        assert_eq!(locks.active(), 1);
    }
}
