use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot stop signal. Once set it stays set.
///
/// `set` uses release ordering and `is_set` acquire ordering, so everything
/// the setting thread did before `set` is visible to a thread that observes
/// the flag.
#[derive(Debug, Default)]
pub struct StopFlag {
    set: AtomicBool,
}

impl StopFlag {
    pub const fn new() -> Self {
        Self {
            set: AtomicBool::new(false),
        }
    }

    /// Sets the flag. Returns `true` only for the call that flipped it.
    #[inline]
    pub fn set(&self) -> bool {
        !self.set.swap(true, Ordering::AcqRel)
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn starts_unset() {
        assert!(!StopFlag::new().is_set());
    }

    #[test]
    fn set_is_idempotent_and_monotonic() {
        let flag = StopFlag::new();
        assert!(flag.set());
        assert!(!flag.set());
        for _ in 0..100 {
            assert!(flag.is_set());
        }
    }

    #[test]
    fn exactly_one_racing_setter_wins() {
        let flag = Arc::new(StopFlag::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let flag = Arc::clone(&flag);
                thread::spawn(move || flag.set())
            })
            .collect();
        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&won| won)
            .count();
        assert_eq!(winners, 1);
        assert!(flag.is_set());
    }
}
