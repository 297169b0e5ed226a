//! Relative-age labels for story and post timestamps.

extern crate alloc;

use alloc::format;
use alloc::string::String;

/// Format how long ago `posted_at_s` was, relative to `now_s` (both
/// unix seconds). Hours and days are floored; timestamps in the future
/// collapse to "Just now".
pub fn relative_age_label(posted_at_s: u64, now_s: u64) -> String {
    let hours = now_s.saturating_sub(posted_at_s) / 3_600;
    if hours < 1 {
        String::from("Just now")
    } else if hours < 24 {
        format!("{}h ago", hours)
    } else {
        format!("{}d ago", hours / 24)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: u64 = 1_700_000_000;

    #[test]
    fn under_an_hour_is_just_now() {
        assert_eq!(relative_age_label(NOW - 30 * 60, NOW), "Just now");
        assert_eq!(relative_age_label(NOW - 59 * 60, NOW), "Just now");
    }

    #[test]
    fn hours_are_floored() {
        assert_eq!(relative_age_label(NOW - 90 * 60, NOW), "1h ago");
        assert_eq!(relative_age_label(NOW - 23 * 3_600, NOW), "23h ago");
    }

    #[test]
    fn days_are_floored_from_hours() {
        assert_eq!(relative_age_label(NOW - 50 * 3_600, NOW), "2d ago");
        assert_eq!(relative_age_label(NOW - 24 * 3_600, NOW), "1d ago");
    }

    #[test]
    fn future_timestamps_collapse_to_just_now() {
        assert_eq!(relative_age_label(NOW + 3_600, NOW), "Just now");
    }
}
