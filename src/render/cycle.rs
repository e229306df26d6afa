//! Horizontal ticker for text that does not fit its block.
//!
//! The visible window dwells `pause` ticks at the start, scrolls one character
//! per tick until it reaches the end, dwells `pause` ticks there and wraps.

const ELLIPSIS: &str = "...";

/// Number of ticks after which the ticker repeats.
pub fn period(text_len: usize, width: usize, pause: u64) -> u64 {
    let max_offset = text_len.saturating_sub(width) as u64;
    max_offset + 2 * pause + 1
}

/// Start of the visible window at tick `cycle`.
pub fn cycle_offset(text_len: usize, width: usize, pause: u64, cycle: u64) -> usize {
    if text_len <= width {
        return 0;
    }
    let max_offset = (text_len - width) as u64;
    let tick = cycle % period(text_len, width, pause);
    if tick <= pause {
        return 0;
    }
    (tick - pause).min(max_offset) as usize
}

/// Cut `text` down to `width` chars for tick `cycle`. The tail of a window that
/// stops short of the end of the text is replaced by an ellipsis.
pub fn shorten(text: &str, width: usize, pause: u64, cycle: u64) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= width {
        return text.to_string();
    }

    let start = cycle_offset(chars.len(), width, pause, cycle);
    let end = start + width;
    let mut window = chars[start..end].to_vec();

    let rest = chars.len() - end;
    if rest > 0 {
        let tail = rest.min(ELLIPSIS.len()).min(window.len());
        window.truncate(window.len() - tail);
        window.extend(ELLIPSIS.chars().take(tail));
    }

    window.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_is_periodic() {
        let (len, width, pause) = (23, 10, 3);
        let period = period(len, width, pause);
        assert_eq!(period, 13 + 6 + 1);
        for tick in 0..3 * period {
            assert_eq!(
                cycle_offset(len, width, pause, tick),
                cycle_offset(len, width, pause, tick + period),
                "tick {tick}"
            );
        }
    }

    #[test]
    fn test_dwell_at_start_and_end() {
        let (len, width, pause) = (20, 8, 4);
        for tick in 0..pause {
            assert_eq!(cycle_offset(len, width, pause, tick), 0);
        }
        let max_offset = (len - width) as u64;
        for tick in pause + max_offset..period(len, width, pause) {
            assert_eq!(cycle_offset(len, width, pause, tick), len - width);
        }
    }

    #[test]
    fn test_scrolls_one_char_per_tick() {
        let (len, width, pause) = (15, 10, 2);
        let offsets: Vec<usize> = (0..11)
            .map(|tick| cycle_offset(len, width, pause, tick))
            .collect();
        assert_eq!(offsets, vec![0, 0, 0, 1, 2, 3, 4, 5, 5, 5, 0]);
    }

    #[test]
    fn test_no_pause() {
        assert_eq!(cycle_offset(12, 10, 0, 0), 0);
        assert_eq!(cycle_offset(12, 10, 0, 1), 1);
        assert_eq!(cycle_offset(12, 10, 0, 2), 2);
        assert_eq!(cycle_offset(12, 10, 0, 3), 0);
    }

    #[test]
    fn test_fitting_text_is_untouched() {
        assert_eq!(shorten("short", 10, 3, 7), "short");
        assert_eq!(shorten("exactly10!", 10, 3, 7), "exactly10!");
    }

    #[test]
    fn test_ellipsis_only_before_the_end() {
        let text = "abcdefghijklmnop";
        assert_eq!(shorten(text, 8, 0, 0), "abcde...");
        // window ends one char before the end of the text
        assert_eq!(shorten(text, 8, 0, 7), "hijklmn.");
        // window reaches the end of the text
        assert_eq!(shorten(text, 8, 0, 8), "ijklmnop");
    }

    #[test]
    fn test_ellipsis_on_tiny_width() {
        assert_eq!(shorten("abcdefgh", 2, 0, 0), "..");
        assert_eq!(shorten("abcdefgh", 0, 0, 0), "");
    }

    #[test]
    fn test_multibyte_text() {
        assert_eq!(shorten("ñandú ñandú ñandú", 8, 0, 0), "ñandú...");
    }
}
