//! View epochs: discarding responses that outlive their view.
//!
//! Navigation is synchronous but requests are not: a view can be torn down
//! while its request is still in flight. Each navigation advances the epoch,
//! and a response is only admitted through a token minted for the epoch it
//! was issued in. A stale response is discarded instead of overwriting the
//! state of whatever view is current now.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::ClientError;

/// Monotonic navigation generation counter.
#[derive(Debug, Clone, Default)]
pub struct Epoch {
    current: Arc<AtomicU64>,
}

impl Epoch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate every outstanding token.
    pub fn advance(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    /// Mint a token tied to the current generation.
    pub fn token(&self) -> EpochToken {
        EpochToken {
            current: Arc::clone(&self.current),
            seen: self.current.load(Ordering::SeqCst),
        }
    }
}

/// A view's claim on the generation it was entered in.
#[derive(Debug, Clone)]
pub struct EpochToken {
    current: Arc<AtomicU64>,
    seen: u64,
}

impl EpochToken {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.seen
    }

    /// Pass a response through iff the token's view is still current.
    pub fn admit<T>(&self, value: T) -> Result<T, ClientError> {
        if self.is_current() {
            Ok(value)
        } else {
            Err(ClientError::Superseded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tokens_admit_values() {
        let epoch = Epoch::new();
        let token = epoch.token();
        assert!(token.is_current());
        assert_eq!(token.admit(7).unwrap(), 7);
    }

    #[test]
    fn advancing_the_epoch_invalidates_older_tokens() {
        let epoch = Epoch::new();
        let before = epoch.token();

        epoch.advance();
        let after = epoch.token();

        assert!(!before.is_current());
        assert!(matches!(before.admit(7), Err(ClientError::Superseded)));
        assert!(after.is_current());
    }

    #[test]
    fn tokens_track_the_epoch_not_each_other() {
        let epoch = Epoch::new();
        let first = epoch.token();
        let second = epoch.token();

        // Same generation: both live.
        assert!(first.is_current() && second.is_current());

        epoch.advance();
        assert!(!first.is_current() && !second.is_current());
    }
}
