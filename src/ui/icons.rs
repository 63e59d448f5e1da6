// src/ui/icons.rs
//! Icon mappings for file picker entries.

use crate::fs::{Entry, FileCategory};

/// Pick the icon shown next to a picker entry.
pub fn icon_for_entry(entry: &Entry) -> &'static str {
    if entry.is_dir {
        "\u{f07b}" // folder
    } else {
        match entry.category {
            FileCategory::Audio => "\u{f1c7}",
            FileCategory::Image => "\u{f1c5}",
            FileCategory::Video => "\u{f1c8}",
            FileCategory::Document => "\u{f15c}",
            FileCategory::Binary => "\u{f1c6}",
        }
    }
}
