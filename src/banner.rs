use std::time::{Duration, Instant};

/// How long a banner stays up unless configured otherwise.
pub const DEFAULT_BANNER_DURATION: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
    Info,
    Warning,
}

/// Short-lived notification shown above whatever view is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
    /// `None` when `now + ttl` does not fit in an `Instant`; such a banner stays up.
    expires_at: Option<Instant>,
}

impl Banner {
    pub fn new(kind: BannerKind, message: impl Into<String>, now: Instant, ttl: Duration) -> Self {
        Self {
            kind,
            message: message.into(),
            expires_at: now.checked_add(ttl),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_ttl() {
        let t0 = Instant::now();
        let banner = Banner::new(BannerKind::Info, "hello", t0, Duration::from_secs(5));
        assert!(!banner.is_expired(t0));
        assert!(!banner.is_expired(t0 + Duration::from_millis(4999)));
        assert!(banner.is_expired(t0 + Duration::from_secs(5)));
    }

    #[test]
    fn oversized_ttl_never_expires() {
        let t0 = Instant::now();
        let banner = Banner::new(BannerKind::Success, "saved", t0, Duration::MAX);
        assert!(!banner.is_expired(t0));
        assert!(!banner.is_expired(t0 + Duration::from_secs(86_400)));
    }
}
