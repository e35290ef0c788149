use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::http_client::Result;
use crate::wasm_utils;

/// Result slot filled by a spawned request and polled from the frame loop.
pub struct PendingCall<T> {
    slot: Arc<Mutex<Option<Result<T>>>>,
}

impl<T> Clone for PendingCall<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for PendingCall<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingCall<T> {
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Already-completed call, used by synchronous API implementations.
    pub fn ready(result: Result<T>) -> Self {
        let call = Self::new();
        call.complete(result);
        call
    }

    pub fn complete(&self, result: Result<T>) {
        match self.slot.lock() {
            Ok(mut slot) => *slot = Some(result),
            Err(_) => log::error!("Failed to acquire pending call lock"),
        }
    }

    /// Takes the result if the call has finished.
    pub fn try_take(&self) -> Option<Result<T>> {
        self.slot.lock().ok().and_then(|mut slot| slot.take())
    }

    pub fn is_abandoned(&self) -> bool {
        Arc::strong_count(&self.slot) == 1
    }
}

impl<T: 'static> PendingCall<T> {
    /// Runs `request` off the frame loop; the returned handle is filled
    /// when it finishes.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn spawn<F>(label: &'static str, request: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
        T: Send,
    {
        let pending = Self::new();
        wasm_utils::spawn_async(pending.clone().fill(label, request));
        pending
    }

    #[cfg(target_arch = "wasm32")]
    pub fn spawn<F>(label: &'static str, request: F) -> Self
    where
        F: Future<Output = Result<T>> + 'static,
    {
        let pending = Self::new();
        wasm_utils::spawn_async(pending.clone().fill(label, request));
        pending
    }

    async fn fill<F>(self, label: &'static str, request: F)
    where
        F: Future<Output = Result<T>>,
    {
        let result = request.await;
        if self.is_abandoned() {
            log::debug!("{} response arrived after the wizard moved on", label);
            return;
        }
        self.complete(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_client::ApiError;

    #[test]
    fn result_is_taken_once() {
        let call = PendingCall::ready(Ok(7u32));
        assert_eq!(call.try_take(), Some(Ok(7)));
        assert_eq!(call.try_take(), None);
    }

    #[test]
    fn clone_shares_the_slot() {
        let call: PendingCall<u32> = PendingCall::new();
        let producer = call.clone();
        assert_eq!(call.try_take(), None);
        assert!(!call.is_abandoned());

        producer.complete(Err(ApiError::Transport("refused".into())));
        drop(producer);

        assert!(call.is_abandoned());
        assert_eq!(call.try_take(), Some(Err(ApiError::Transport("refused".into()))));
    }

    #[tokio::test]
    async fn spawned_request_fills_the_slot() {
        let call = PendingCall::spawn("test", async { Ok("482913".to_string()) });

        let mut result = None;
        for _ in 0..100 {
            result = call.try_take();
            if result.is_some() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        assert_eq!(result, Some(Ok("482913".to_string())));
        assert!(call.is_abandoned());
    }
}
