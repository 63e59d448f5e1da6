// src/fs/detection.rs
//! File type detection: magic-number sniffing with extension fallback.

use std::{fmt, path::Path};

use anyhow::Result;
use infer::{Infer, MatcherType};
use mime_guess::MimeGuess;

/// Coarse file categories for the picker.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FileCategory {
    Audio,
    Image,
    Video,
    Document,
    Binary,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FileCategory::Audio => "Audio",
            FileCategory::Image => "Image",
            FileCategory::Video => "Video",
            FileCategory::Document => "Document",
            FileCategory::Binary => "Binary",
        };
        write!(f, "{s}")
    }
}

/// Detected MIME type plus its category.
#[derive(Debug)]
pub struct FileType {
    pub mime: String,
    pub category: FileCategory,
}

/// Detect the MIME type and category of `path`. Magic numbers win; files
/// with no recognizable signature fall back to their extension.
pub fn detect_file_type(path: &Path) -> Result<FileType> {
    if let Some(kind) = Infer::new().get_from_path(path)? {
        return Ok(FileType {
            mime: kind.mime_type().to_owned(),
            category: match kind.matcher_type() {
                MatcherType::Audio => FileCategory::Audio,
                MatcherType::Image => FileCategory::Image,
                MatcherType::Video => FileCategory::Video,
                _ => FileCategory::Binary,
            },
        });
    }

    let mime = MimeGuess::from_path(path)
        .first_or_octet_stream()
        .to_string();
    let category = category_for_mime(&mime);

    Ok(FileType { mime, category })
}

/// Map a MIME type's top-level part onto a category.
fn category_for_mime(mime: &str) -> FileCategory {
    match mime.split('/').next().unwrap_or("application") {
        "audio" => FileCategory::Audio,
        "image" => FileCategory::Image,
        "video" => FileCategory::Video,
        "text" | "application" => FileCategory::Document,
        _ => FileCategory::Binary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_mime_maps_to_the_audio_category() {
        assert_eq!(category_for_mime("audio/mpeg"), FileCategory::Audio);
        assert_eq!(category_for_mime("audio/flac"), FileCategory::Audio);
    }

    #[test]
    fn text_and_application_map_to_document() {
        assert_eq!(category_for_mime("text/plain"), FileCategory::Document);
        assert_eq!(
            category_for_mime("application/octet-stream"),
            FileCategory::Document
        );
    }

    #[test]
    fn unknown_top_level_maps_to_binary() {
        assert_eq!(category_for_mime("model/gltf+json"), FileCategory::Binary);
    }
}
