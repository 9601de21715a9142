use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::timeout;

use crate::authenticator::errors::RegistryError;

/// Locking discipline around a copy-on-write registry state.
///
/// Readers take the read lock only long enough to clone the current `Arc`,
/// then work on that immutable value without holding any lock. Writers take
/// the write lock, build the next value off to the side from the current one
/// and publish it with a single store, so no reader ever sees a half-applied
/// change. Every acquisition waits at most `lock_timeout`.
///
/// There is no way to upgrade a read into a write: callers needing both
/// read, release, then write.
#[derive(Debug)]
pub struct RegistryCoordinator<T> {
    current: RwLock<Arc<T>>,
    lock_timeout: Duration,
}

impl<T> RegistryCoordinator<T> {
    pub fn new(initial: T, lock_timeout: Duration) -> Self {
        Self {
            current: RwLock::new(Arc::new(initial)),
            lock_timeout,
        }
    }

    /// Capture the current state.
    ///
    /// # Errors
    /// * `LockContentionTimeout` - Read lock not acquired within the bound
    pub async fn read(&self) -> Result<Arc<T>, RegistryError> {
        let guard = timeout(self.lock_timeout, self.current.read())
            .await
            .map_err(|_| RegistryError::LockContentionTimeout(self.lock_timeout))?;

        Ok(Arc::clone(&guard))
    }

    /// Replace the state under exclusive access.
    ///
    /// `mutate` receives the current state and returns the next one. When it
    /// fails, nothing is published. The closure is synchronous so no I/O can
    /// happen while the lock is held.
    ///
    /// # Returns
    /// The newly published state
    ///
    /// # Errors
    /// * `LockContentionTimeout` - Write lock not acquired within the bound
    /// * Whatever `mutate` returns
    pub async fn write<F>(&self, mutate: F) -> Result<Arc<T>, RegistryError>
    where
        F: FnOnce(&T) -> Result<T, RegistryError>,
    {
        let mut guard = timeout(self.lock_timeout, self.current.write())
            .await
            .map_err(|_| RegistryError::LockContentionTimeout(self.lock_timeout))?;

        let next = Arc::new(mutate(&**guard)?);
        *guard = Arc::clone(&next);

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_millis(100);

    #[tokio::test]
    async fn test_read_returns_current_state() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);

        let state = coordinator.read().await.expect("Read failed");
        assert_eq!(*state, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_write_publishes_next_state() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);

        let published = coordinator
            .write(|current| {
                let mut next = current.clone();
                next.push(4);
                Ok(next)
            })
            .await
            .expect("Write failed");

        assert_eq!(*published, vec![1, 2, 3, 4]);
        assert_eq!(*coordinator.read().await.unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_captured_state_survives_writes() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);
        let before = coordinator.read().await.unwrap();

        coordinator
            .write(|_| Ok(vec![9]))
            .await
            .expect("Write failed");

        assert_eq!(*before, vec![1, 2, 3]);
        assert_eq!(*coordinator.read().await.unwrap(), vec![9]);
    }

    #[tokio::test]
    async fn test_failed_write_publishes_nothing() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);

        let result = coordinator
            .write(|_| Err(RegistryError::InvalidReload("rejected".to_string())))
            .await;

        assert!(matches!(result, Err(RegistryError::InvalidReload(_))));
        assert_eq!(*coordinator.read().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_write_times_out_while_lock_is_held() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);
        let held = coordinator.current.write().await;

        let result = coordinator.write(|_| Ok(vec![0])).await;
        assert_eq!(result, Err(RegistryError::LockContentionTimeout(TIMEOUT)));

        drop(held);
        assert_eq!(*coordinator.read().await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_read_times_out_while_writer_holds_lock() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);
        let held = coordinator.current.write().await;

        let result = coordinator.read().await;
        assert!(matches!(
            result,
            Err(RegistryError::LockContentionTimeout(_))
        ));

        drop(held);
        assert!(coordinator.read().await.is_ok());
    }

    #[tokio::test]
    async fn test_readers_do_not_block_each_other() {
        let coordinator = RegistryCoordinator::new(vec![1, 2, 3], TIMEOUT);
        let _held = coordinator.current.read().await;

        let state = coordinator.read().await.expect("Concurrent read failed");
        assert_eq!(state.len(), 3);
    }
}
