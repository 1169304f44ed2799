use std::time::{Duration, Instant};

pub const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
    expires_at: Instant,
}

/// Transient notifications, newest last.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::new(TOAST_LIFETIME)
    }
}

impl Toasts {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    pub fn push_at(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            text: text.into(),
            expires_at: now + self.lifetime,
        });
        id
    }

    pub fn success(&mut self, text: impl Into<String>) -> u64 {
        self.push_at(ToastKind::Success, text, Instant::now())
    }

    pub fn error(&mut self, text: impl Into<String>) -> u64 {
        self.push_at(ToastKind::Error, text, Instant::now())
    }

    pub fn info(&mut self, text: impl Into<String>) -> u64 {
        self.push_at(ToastKind::Info, text, Instant::now())
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    /// Drop expired toasts. Returns true if anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.items.len();
        self.items.retain(|t| t.expires_at > now);
        self.items.len() != before
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_after_lifetime() {
        let mut toasts = Toasts::new(Duration::from_secs(2));
        let start = Instant::now();
        toasts.push_at(ToastKind::Error, "Failed to load tasks", start);
        toasts.push_at(ToastKind::Success, "Task created successfully!", start + Duration::from_secs(1));

        assert!(!toasts.prune(start + Duration::from_millis(1500)));
        assert!(toasts.prune(start + Duration::from_millis(2500)));
        let left: Vec<&str> = toasts.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(left, vec!["Task created successfully!"]);
        assert!(toasts.prune(start + Duration::from_secs(4)));
        assert!(toasts.is_empty());
    }

    #[test]
    fn dismiss_by_id() {
        let mut toasts = Toasts::default();
        let a = toasts.info("one");
        let b = toasts.info("two");
        assert_ne!(a, b);
        toasts.dismiss(a);
        assert_eq!(toasts.iter().map(|t| t.id).collect::<Vec<_>>(), vec![b]);
    }
}
