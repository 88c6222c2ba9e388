use std::borrow::Cow;

use taskdeck_client::Task;
use unicode_segmentation::UnicodeSegmentation;

use super::super::constants::{DONE_MARKER, OPEN_MARKER};

pub(in crate::tui) fn truncate_with_ellipsis(input: &str, max_graphemes: usize) -> Cow<'_, str> {
    const ELLIPSIS: &str = "...";
    const ELLIPSIS_GRAPHEMES: usize = 3;

    if max_graphemes == 0 {
        return Cow::Owned(String::new());
    }

    let grapheme_count = input.graphemes(true).count();
    if grapheme_count <= max_graphemes {
        return Cow::Borrowed(input);
    }

    if max_graphemes <= ELLIPSIS_GRAPHEMES {
        return Cow::Owned(input.graphemes(true).take(max_graphemes).collect());
    }

    let mut truncated: String = input.graphemes(true).take(max_graphemes - ELLIPSIS_GRAPHEMES).collect();
    truncated.push_str(ELLIPSIS);
    Cow::Owned(truncated)
}

pub(in crate::tui) const fn completion_marker(task: &Task) -> &'static str {
    if task.completed { DONE_MARKER } else { OPEN_MARKER }
}
