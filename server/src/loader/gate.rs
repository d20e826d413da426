//! Single-flight coordinator for the data loader.
//!
//! At most one load may hold the gate at a time; concurrent callers are
//! rejected immediately, never queued. The gate also owns the last-run
//! fields the status endpoint reports, so loader state has one home instead
//! of ambient flags scattered across the service.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub const STATUS_NEVER_LOADED: &str = "Never loaded";
pub const STATUS_SUCCESS: &str = "Success";

#[derive(Debug)]
pub struct LoaderGate {
    busy: AtomicBool,
    last: Mutex<LastLoad>,
}

#[derive(Debug, Clone)]
struct LastLoad {
    time: Option<DateTime<Utc>>,
    count: i64,
    status: String,
}

/// Point-in-time view of the gate, combined with a live storage count by the
/// status endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct GateSnapshot {
    pub is_busy: bool,
    pub last_load_time: Option<DateTime<Utc>>,
    pub last_load_count: i64,
    pub last_load_status: String,
}

impl LoaderGate {
    pub fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
            last: Mutex::new(LastLoad {
                time: None,
                count: 0,
                status: STATUS_NEVER_LOADED.to_string(),
            }),
        }
    }

    /// Claim the gate. Returns `None` if a load is already in flight.
    /// The permit releases the gate on drop, whatever happens to the load.
    pub fn try_acquire(self: &Arc<Self>) -> Option<LoadPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(LoadPermit {
            gate: Arc::clone(self),
        })
    }

    /// Non-blocking read, safe from any task.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Record a fully successful load. Sets time, count, and status.
    pub fn record_completed(&self, count: i64, time: DateTime<Utc>) {
        let mut last = self.last.lock().unwrap();
        last.time = Some(time);
        last.count = count;
        last.status = STATUS_SUCCESS.to_string();
    }

    /// Record an outcome line without touching the last successful load's
    /// time and count (failures and empty fetches).
    pub fn record_status(&self, status: impl Into<String>) {
        self.last.lock().unwrap().status = status.into();
    }

    pub fn snapshot(&self) -> GateSnapshot {
        let last = self.last.lock().unwrap();
        GateSnapshot {
            is_busy: self.is_busy(),
            last_load_time: last.time,
            last_load_count: last.count,
            last_load_status: last.status.clone(),
        }
    }
}

impl Default for LoaderGate {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII permit for one load attempt.
pub struct LoadPermit {
    gate: Arc<LoaderGate>,
}

impl Drop for LoadPermit {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_marks_busy_and_drop_releases() {
        let gate = Arc::new(LoaderGate::new());
        assert!(!gate.is_busy());

        let permit = gate.try_acquire().unwrap();
        assert!(gate.is_busy());

        drop(permit);
        assert!(!gate.is_busy());
    }

    #[test]
    fn test_second_acquire_is_rejected_not_queued() {
        let gate = Arc::new(LoaderGate::new());
        let _permit = gate.try_acquire().unwrap();
        assert!(gate.try_acquire().is_none());
    }

    #[test]
    fn test_gate_is_reusable_after_release() {
        let gate = Arc::new(LoaderGate::new());
        drop(gate.try_acquire().unwrap());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_never_loaded_defaults() {
        let gate = LoaderGate::new();
        let snapshot = gate.snapshot();
        assert!(!snapshot.is_busy);
        assert_eq!(snapshot.last_load_time, None);
        assert_eq!(snapshot.last_load_count, 0);
        assert_eq!(snapshot.last_load_status, STATUS_NEVER_LOADED);
    }

    #[test]
    fn test_record_completed_sets_all_fields() {
        let gate = LoaderGate::new();
        let time = Utc::now();
        gate.record_completed(30, time);

        let snapshot = gate.snapshot();
        assert_eq!(snapshot.last_load_time, Some(time));
        assert_eq!(snapshot.last_load_count, 30);
        assert_eq!(snapshot.last_load_status, STATUS_SUCCESS);
    }

    #[test]
    fn test_record_status_preserves_last_success() {
        let gate = LoaderGate::new();
        let time = Utc::now();
        gate.record_completed(30, time);
        gate.record_status("Failed: External API is not accessible");

        let snapshot = gate.snapshot();
        assert_eq!(snapshot.last_load_time, Some(time));
        assert_eq!(snapshot.last_load_count, 30);
        assert_eq!(
            snapshot.last_load_status,
            "Failed: External API is not accessible"
        );
    }
}
