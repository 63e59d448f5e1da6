// src/fs/browser.rs
//! Directory listing for the file picker pane.

use std::fs;
use std::path::Path;

use super::detection::{detect_file_type, FileCategory};

/// One row of the file picker.
#[derive(Debug, Clone)]
pub struct Entry {
    pub name: String,
    pub is_dir: bool,
    pub category: FileCategory,
    pub mime: String,
}

impl Entry {
    /// The original gates playback on `canPlayType`; here the category
    /// check serves the same purpose.
    pub fn is_playable(&self) -> bool {
        !self.is_dir && self.category == FileCategory::Audio
    }
}

/// List `dir`, sorted case-insensitively by name. Unreadable directories
/// and entries simply produce an empty or shorter list.
pub fn load_entries(dir: &Path) -> Vec<Entry> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut entries: Vec<Entry> = read_dir
        .filter_map(Result::ok)
        .map(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            let path = e.path();

            if path.is_dir() {
                Entry {
                    name,
                    is_dir: true,
                    category: FileCategory::Binary,
                    mime: String::new(),
                }
            } else {
                match detect_file_type(&path) {
                    Ok(ft) => Entry {
                        name,
                        is_dir: false,
                        category: ft.category,
                        mime: ft.mime,
                    },
                    Err(_) => Entry {
                        name,
                        is_dir: false,
                        category: FileCategory::Binary,
                        mime: String::new(),
                    },
                }
            }
        })
        .collect();

    entries.sort_by_key(|e| e.name.to_lowercase());
    entries
}

/// Last `keep` components of `path`, for compact pane titles.
pub fn tail_path(path: &Path, keep: usize) -> String {
    let components: Vec<String> = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    let start = components.len().saturating_sub(keep);
    components[start..].join("/")
}
