//! Wall-clock time source
//!
//! Timestamps are ISO-8601 UTC with millisecond precision
//! (`2024-06-01T12:30:00.000Z`), the format `Date.prototype.toISOString`
//! produces. Fixed width, so string order is chronological order.

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::VecDeque;

pub trait Clock {
    /// Current time as an ISO-8601 string
    fn now_iso8601(&self) -> String;
}

/// System clock (`js_sys::Date` on web, `chrono` natively)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(target_arch = "wasm32")]
impl Clock for SystemClock {
    fn now_iso8601(&self) -> String {
        js_sys::Date::new_0().to_iso_string().into()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn now_iso8601(&self) -> String {
        chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
    }
}

/// Scripted clock: hands out queued timestamps, repeating the last one
#[cfg(test)]
#[derive(Debug, Default)]
pub struct FixedClock {
    queue: RefCell<VecDeque<String>>,
    last: RefCell<String>,
}

#[cfg(test)]
impl FixedClock {
    /// Clock that always reports `timestamp`
    pub fn new(timestamp: &str) -> Self {
        Self::sequence([timestamp])
    }

    /// Clock that reports each of `timestamps` in turn
    pub fn sequence<I, S>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            queue: RefCell::new(timestamps.into_iter().map(Into::into).collect()),
            last: RefCell::new(String::new()),
        }
    }
}

#[cfg(test)]
impl Clock for FixedClock {
    fn now_iso8601(&self) -> String {
        if let Some(next) = self.queue.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        self.last.borrow().clone()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_iso8601(&self) -> String {
        (**self).now_iso8601()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_format() {
        let now = SystemClock.now_iso8601();
        // 2024-06-01T12:30:00.000Z
        assert_eq!(now.len(), 24, "unexpected timestamp {now}");
        assert!(now.ends_with('Z'));
        assert_eq!(&now[4..5], "-");
        assert_eq!(&now[10..11], "T");
        assert_eq!(&now[19..20], ".");
    }

    #[test]
    fn test_system_clock_non_decreasing() {
        let first = SystemClock.now_iso8601();
        let second = SystemClock.now_iso8601();
        assert!(second >= first);
    }

    #[test]
    fn test_fixed_clock_sequence() {
        let clock = FixedClock::sequence(["2024-01-01T00:00:00.000Z", "2024-01-02T00:00:00.000Z"]);
        assert_eq!(clock.now_iso8601(), "2024-01-01T00:00:00.000Z");
        assert_eq!(clock.now_iso8601(), "2024-01-02T00:00:00.000Z");
        assert_eq!(clock.now_iso8601(), "2024-01-02T00:00:00.000Z");
    }
}
