use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_width_labels() {
        assert_eq!(display_width("COMP3506"), 8);
        assert_eq!(display_width("\u{2605}\u{2605}\u{2605}"), 3);
        assert_eq!(display_width("12:30"), 5);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn display_width_wide() {
        assert_eq!(display_width("你好"), 4);
    }

    #[test]
    fn truncate_fits() {
        assert_eq!(truncate_to_width("MON", 10), "MON");
        assert_eq!(truncate_to_width("COMP3506", 8), "COMP3506");
    }

    #[test]
    fn truncate_course_code() {
        assert_eq!(truncate_to_width("COMP3506", 5), "COMP\u{2026}");
    }

    #[test]
    fn truncate_wide_boundary() {
        // 你 is 2 cells; the budget of 4 fits one before the ellipsis
        assert_eq!(truncate_to_width("你好世界", 4), "你\u{2026}");
    }

    #[test]
    fn truncate_tiny() {
        assert_eq!(truncate_to_width("COMP3506", 0), "");
        assert_eq!(truncate_to_width("COMP3506", 1), "\u{2026}");
    }
}
