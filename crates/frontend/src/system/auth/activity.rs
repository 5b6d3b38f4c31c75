//! Inactivity tracking for the logged-in area.

use chrono::Utc;
use gloo_timers::callback::Interval;
use leptos::ev;
use leptos::prelude::*;

use super::context::use_session;
use super::storage::browser_session;

/// Minimum gap between two writes of the activity timestamp
pub const TOUCH_THROTTLE_MS: i64 = 30_000;

/// How often the session expiry is checked
pub const EXPIRY_CHECK_MS: u32 = 60_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityThrottle {
    last_touch_ms: Option<i64>,
}

impl ActivityThrottle {
    /// True when enough time passed since the last accepted touch.
    pub fn should_touch(&mut self, now_ms: i64) -> bool {
        match self.last_touch_ms {
            Some(last) if now_ms - last < TOUCH_THROTTLE_MS => false,
            _ => {
                self.last_touch_ms = Some(now_ms);
                true
            }
        }
    }
}

/// Records user activity and signs out once the session expires.
#[component]
pub fn ActivityTracker() -> impl IntoView {
    let auth = use_session();
    let throttle = StoredValue::new(ActivityThrottle::default());

    let touch = move || {
        let mut current = throttle.get_value();
        if current.should_touch(Utc::now().timestamp_millis()) {
            throttle.set_value(current);
            browser_session().touch_activity();
        }
    };

    let click = window_event_listener(ev::click, move |_| touch());
    let keydown = window_event_listener(ev::keydown, move |_| touch());
    on_cleanup(move || {
        click.remove();
        keydown.remove();
    });

    // dropped, and so cancelled, with this component
    let _interval = StoredValue::new_local(Interval::new(EXPIRY_CHECK_MS, move || {
        if !auth.revalidate() {
            log::info!("Session expired, signing out");
        }
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throttle() {
        let mut throttle = ActivityThrottle::default();
        assert!(throttle.should_touch(1_000));
        assert!(!throttle.should_touch(1_000 + TOUCH_THROTTLE_MS - 1));
        assert!(throttle.should_touch(1_000 + TOUCH_THROTTLE_MS));
        assert!(!throttle.should_touch(1_000 + TOUCH_THROTTLE_MS + 10));
    }
}
