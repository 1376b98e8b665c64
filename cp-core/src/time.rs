//! Thin re-export of `clockabilly`'s clock trait, so callers that need the wall clock (to stamp
//! `deletionTimestamp`, or to test tick-driven reconciliation) can swap in a mock clock in tests
//! without threading `chrono::Utc::now()` through every call site by hand.
pub use clockabilly::{
    Clockable,
    DateTime,
    Utc,
    UtcClock,
};

pub fn now() -> DateTime<Utc> {
    UtcClock.now()
}
