//! Auto-repeat detection over the raw X event stream.
//!
//! The X server reports a held key as KeyRelease/KeyPress pairs carrying the
//! same keycode and the same server timestamp. A press is synthetic when the
//! event just before it is a matching release; a release is synthetic when
//! the event just after it is a matching press. Two different keys struck at
//! the same timestamp are genuine and must never be suppressed.

use x11rb::protocol::xproto::{KeyPressEvent, KeyReleaseEvent};
use x11rb::protocol::Event;

/// A KeyPress is an auto-repeat echo when the previous event is a
/// KeyRelease of the same keycode at the same timestamp.
pub(super) fn press_is_repeat(curr: &KeyPressEvent, prev: Option<&Event>) -> bool {
    matches!(
        prev,
        Some(Event::KeyRelease(r)) if r.detail == curr.detail && r.time == curr.time
    )
}

/// A KeyRelease is an auto-repeat echo when the next event is a KeyPress of
/// the same keycode at the same timestamp.
pub(super) fn release_is_repeat(curr: &KeyReleaseEvent, next: Option<&Event>) -> bool {
    matches!(
        next,
        Some(Event::KeyPress(p)) if p.detail == curr.detail && p.time == curr.time
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(detail: u8, time: u32) -> KeyPressEvent {
        KeyPressEvent {
            detail,
            time,
            ..KeyPressEvent::default()
        }
    }

    #[test]
    fn held_key_burst_collapses() {
        // Hold: Press(t0) .. Release(t1) Press(t1) Release(t1) Press(t1) ..
        let press = key(38, 100);
        let echo_release = key(38, 200);
        let echo_press = key(38, 200);

        // The initial press has no preceding release.
        assert!(!press_is_repeat(&press, None));

        // Each echo pair cancels itself out.
        assert!(release_is_repeat(
            &echo_release,
            Some(&Event::KeyPress(echo_press))
        ));
        assert!(press_is_repeat(
            &echo_press,
            Some(&Event::KeyRelease(echo_release))
        ));
    }

    /// Walk a stream the way the drain does, counting surviving key events.
    fn filter_stream(events: &[Event]) -> (u32, u32) {
        let (mut downs, mut ups) = (0, 0);
        for (i, curr) in events.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| &events[p]);
            let next = events.get(i + 1);
            match curr {
                Event::KeyPress(key) if !press_is_repeat(key, prev) => downs += 1,
                Event::KeyRelease(key) if !release_is_repeat(key, next) => ups += 1,
                _ => {}
            }
        }
        (downs, ups)
    }

    #[test]
    fn repeat_stream_yields_one_down_until_genuine_release() {
        // Hold A across two repeat ticks, then genuinely release it.
        let stream = [
            Event::KeyPress(key(38, 100)),
            Event::KeyRelease(key(38, 130)),
            Event::KeyPress(key(38, 130)),
            Event::KeyRelease(key(38, 160)),
            Event::KeyPress(key(38, 160)),
            Event::KeyRelease(key(38, 200)),
        ];
        assert_eq!(filter_stream(&stream), (1, 1));

        // Truncated mid-hold: no release has fired yet.
        assert_eq!(filter_stream(&stream[..5]), (1, 0));
    }

    #[test]
    fn genuine_release_has_no_matching_press() {
        let release = key(38, 300);
        // Nothing after it, or something unrelated after it.
        assert!(!release_is_repeat(&release, None));
        assert!(!release_is_repeat(
            &release,
            Some(&Event::KeyPress(key(38, 301)))
        ));
    }

    #[test]
    fn interleaved_keys_same_timestamp_not_suppressed() {
        // Two different keys can land on the same server tick.
        let release_a = key(38, 500);
        let press_b = key(56, 500);
        assert!(!release_is_repeat(&release_a, Some(&Event::KeyPress(press_b))));
        assert!(!press_is_repeat(&press_b, Some(&Event::KeyRelease(release_a))));
    }

    #[test]
    fn same_key_different_timestamp_not_suppressed() {
        let release = key(38, 100);
        let press = key(38, 150);
        assert!(!press_is_repeat(&press, Some(&Event::KeyRelease(release))));
    }
}
