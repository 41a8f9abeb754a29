//! Transient status-bar notices

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// A short message that disappears after [`Notice::TTL`]
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    created_at: Instant,
}

impl Notice {
    pub const TTL: Duration = Duration::from_secs(4);

    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            created_at: Instant::now(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= Self::TTL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_notice_is_not_expired() {
        let notice = Notice::success("Progresso salvo!");
        assert!(!notice.is_expired());
        assert_eq!(notice.level, NoticeLevel::Success);
    }

    #[test]
    fn test_expires_after_ttl() {
        let notice = Notice::warning("x");
        assert!(notice.is_expired_at(notice.created_at + Notice::TTL));
        assert!(!notice.is_expired_at(notice.created_at + Duration::from_secs(1)));
    }
}
