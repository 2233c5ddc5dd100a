//! Process-wide logger registry.
//!
//! Components register their logger by name; the startup configurator later
//! claims every entry that has not been configured yet. Claiming flips the
//! entry's marker atomically, so each entry is handed out at most once for
//! the lifetime of the registry.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dashmap::DashMap;

use crate::handlers::Handler;
use crate::logger::{Logger, Severity};

/// State behind every [`Logger`] handle of one name.
#[derive(Debug)]
pub struct LoggerEntry {
    name: String,
    seq: u64,
    configured: AtomicBool,
    threshold: RwLock<Option<Severity>>,
    handlers: RwLock<Vec<Arc<Handler>>>,
}

impl LoggerEntry {
    fn new(name: String, seq: u64) -> Self {
        Self {
            name,
            seq,
            configured: AtomicBool::new(false),
            threshold: RwLock::new(None),
            handlers: RwLock::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_configured(&self) -> bool {
        self.configured.load(Ordering::Acquire)
    }

    /// Mark the entry configured. Returns false if it already was.
    fn claim(&self) -> bool {
        self.configured
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub(crate) fn threshold(&self) -> Option<Severity> {
        *self.threshold.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn set_threshold(&self, threshold: Option<Severity>) {
        *self.threshold.write().unwrap_or_else(PoisonError::into_inner) = threshold;
    }

    pub(crate) fn handlers(&self) -> RwLockReadGuard<'_, Vec<Arc<Handler>>> {
        self.handlers.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub(crate) fn handlers_mut(&self) -> RwLockWriteGuard<'_, Vec<Arc<Handler>>> {
        self.handlers.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns true if `name` can appear in a `LEVEL:name message` line
/// unambiguously: non-empty, no whitespace and no `:`.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c.is_whitespace() || c == ':')
}

/// Registry of named loggers.
#[derive(Debug, Default)]
pub struct LoggerRegistry {
    entries: DashMap<String, Arc<LoggerEntry>>,
    next_seq: AtomicU64,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry used by [`Logger::get`].
    pub fn global() -> &'static LoggerRegistry {
        static GLOBAL: OnceLock<LoggerRegistry> = OnceLock::new();
        GLOBAL.get_or_init(LoggerRegistry::new)
    }

    /// Register `name`, or return a handle to the existing entry.
    pub fn logger(&self, name: impl Into<String>) -> Logger {
        let name = name.into();
        let entry = self
            .entries
            .entry(name.clone())
            .or_insert_with(|| {
                let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                Arc::new(LoggerEntry::new(name, seq))
            })
            .clone();
        Logger::from_entry(entry)
    }

    /// Look up a registered logger without registering it.
    pub fn get(&self, name: &str) -> Option<Logger> {
        self.entries
            .get(name)
            .map(|entry| Logger::from_entry(entry.value().clone()))
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        let mut entries: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|e| (e.seq, e.name.clone()))
            .collect();
        entries.sort_unstable();
        entries.into_iter().map(|(_, name)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove `name`. Existing handles keep working but are no longer
    /// discoverable.
    pub fn deregister(&self, name: &str) -> bool {
        self.entries.remove(name).is_some()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Unconfigured entries in registration order.
    fn pending(&self) -> Vec<Arc<LoggerEntry>> {
        let mut pending: Vec<Arc<LoggerEntry>> = self
            .entries
            .iter()
            .filter(|e| !e.is_configured())
            .map(|e| e.value().clone())
            .collect();
        pending.sort_unstable_by_key(|e| e.seq);
        pending
    }

    /// Name of the earliest-registered unconfigured entry whose name fails
    /// [`is_valid_name`].
    pub fn first_unusable_pending(&self) -> Option<String> {
        self.pending()
            .into_iter()
            .find(|entry| !is_valid_name(&entry.name))
            .map(|entry| entry.name.clone())
    }

    /// Claim the earliest-registered entry that is not configured yet,
    /// marking it configured. Entries with unusable names are never claimed.
    pub fn claim_next_unconfigured(&self) -> Option<Logger> {
        self.pending()
            .into_iter()
            .filter(|entry| is_valid_name(&entry.name))
            .find(|entry| entry.claim())
            .map(Logger::from_entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_entry() {
        let registry = LoggerRegistry::new();
        let a = registry.logger("db");
        let b = registry.logger("db");
        assert!(a.same_as(&b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_claim_once_in_registration_order() {
        let registry = LoggerRegistry::new();
        registry.logger("b");
        registry.logger("a");
        registry.logger("c");

        let claimed: Vec<String> = std::iter::from_fn(|| registry.claim_next_unconfigured())
            .map(|l| l.name().to_string())
            .collect();
        assert_eq!(claimed, vec!["b", "a", "c"]);
        assert!(registry.claim_next_unconfigured().is_none());
    }

    #[test]
    fn test_late_registration_is_claimable() {
        let registry = LoggerRegistry::new();
        registry.logger("early");
        assert!(registry.claim_next_unconfigured().is_some());

        registry.logger("late");
        let next = registry.claim_next_unconfigured().unwrap();
        assert_eq!(next.name(), "late");
        assert!(next.is_configured());
    }

    #[test]
    fn test_unusable_names_stay_pending() {
        let registry = LoggerRegistry::new();
        let bad = registry.logger("has space");
        registry.logger("fine");

        assert_eq!(registry.first_unusable_pending().as_deref(), Some("has space"));
        assert_eq!(registry.claim_next_unconfigured().unwrap().name(), "fine");
        assert!(registry.claim_next_unconfigured().is_none());
        assert!(!bad.is_configured());
        assert_eq!(registry.first_unusable_pending().as_deref(), Some("has space"));
    }

    #[test]
    fn test_teardown() {
        let registry = LoggerRegistry::new();
        registry.logger("x");
        registry.logger("y");
        assert!(registry.deregister("x"));
        assert!(!registry.deregister("x"));
        assert_eq!(registry.names(), vec!["y"]);

        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.get("y").is_none());
    }

    #[test]
    fn test_name_validation() {
        assert!(is_valid_name("app.db"));
        assert!(is_valid_name("worker-1"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("two words"));
        assert!(!is_valid_name("ns:name"));
    }
}
