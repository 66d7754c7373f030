//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{AuthTokenProvider, CelestiaError, Result};

/// Auth provider that counts how often it is asked for a token.
#[derive(Debug, Default)]
pub(crate) struct CountingProvider {
    calls: AtomicUsize,
    fail: bool,
}

impl CountingProvider {
    pub(crate) fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail: true,
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthTokenProvider for CountingProvider {
    async fn fetch_token(&self) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CelestiaError::Auth("node is not running".to_string()));
        }
        Ok("test-token".to_string())
    }
}
