//! Document scroll lock (`body { overflow: hidden }`).
//!
//! Every [`ScrollLock::acquire`] hands out a [`ScrollLockToken`] that can only
//! be given back once, which keeps acquisitions and releases paired. The lock
//! is counted: the page stays locked while any token is outstanding.

/// Proof of one outstanding lock acquisition. Not `Clone`.
#[must_use = "dropping the token leaves the page locked; pass it to ScrollLock::release"]
#[derive(Debug, PartialEq, Eq)]
pub struct ScrollLockToken {
    serial: u64,
}

/// Counted page scroll lock.
#[derive(Debug, Default)]
pub struct ScrollLock {
    holders: usize,
    acquisitions: u64,
    releases: u64,
}

impl ScrollLock {
    /// An unlocked page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lock page scrolling.
    pub fn acquire(&mut self) -> ScrollLockToken {
        self.holders += 1;
        self.acquisitions += 1;
        tracing::debug!(holders = self.holders, "scroll lock acquired");
        ScrollLockToken {
            serial: self.acquisitions,
        }
    }

    /// Give a lock back.
    pub fn release(&mut self, token: ScrollLockToken) {
        self.holders = self.holders.saturating_sub(1);
        self.releases += 1;
        tracing::debug!(serial = token.serial, holders = self.holders, "scroll lock released");
    }

    /// Whether page scrolling is currently suppressed.
    pub fn is_locked(&self) -> bool {
        self.holders > 0
    }

    /// Outstanding tokens.
    pub fn holders(&self) -> usize {
        self.holders
    }

    /// Total acquisitions so far.
    pub fn acquisitions(&self) -> u64 {
        self.acquisitions
    }

    /// Total releases so far.
    pub fn releases(&self) -> u64 {
        self.releases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_release_balance() {
        let mut lock = ScrollLock::new();
        assert!(!lock.is_locked());
        let token = lock.acquire();
        assert!(lock.is_locked());
        lock.release(token);
        assert!(!lock.is_locked());
        assert_eq!((lock.acquisitions(), lock.releases()), (1, 1));
    }

    #[test]
    fn counted_lock_stays_until_last_release() {
        let mut lock = ScrollLock::new();
        let a = lock.acquire();
        let b = lock.acquire();
        assert_ne!(a, b);
        lock.release(a);
        assert!(lock.is_locked());
        lock.release(b);
        assert_eq!(lock.holders(), 0);
    }
}
