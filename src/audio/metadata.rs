// src/audio/metadata.rs
//! Track tag extraction and title derivation using Lofty.

use std::path::PathBuf;

use anyhow::Result;
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::ItemKey;

/// Tags and properties of the current track.
#[derive(Debug, Clone, Default)]
pub struct TrackMetadata {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// Total track length in seconds.
    pub duration_secs: u64,
    /// Audio properties for the player panel (bitrate, sample rate, channels).
    pub properties: Vec<(String, String)>,
}

/// Read tags for `path`. Safe to call from a background thread.
pub fn load_metadata(path: PathBuf) -> Result<TrackMetadata> {
    let tagged_file = Probe::open(&path)?.read()?;

    let (title, artist) = match tagged_file.primary_tag() {
        Some(tag) => (
            tag.get_string(&ItemKey::TrackTitle).map(str::to_owned),
            tag.get_string(&ItemKey::TrackArtist).map(str::to_owned),
        ),
        None => (None, None),
    };

    let props = tagged_file.properties();
    let mut properties = Vec::new();
    if let Some(bitrate) = props.audio_bitrate() {
        properties.push(("Bitrate (kbps)".into(), bitrate.to_string()));
    }
    if let Some(sample_rate) = props.sample_rate() {
        properties.push(("Sample Rate (Hz)".into(), sample_rate.to_string()));
    }
    if let Some(channels) = props.channels() {
        properties.push(("Channels".into(), channels.to_string()));
    }

    Ok(TrackMetadata {
        title,
        artist,
        duration_secs: props.duration().as_secs(),
        properties,
    })
}

/// Title line for the player panel: "Title - Artist" when both tags carry
/// actual content, otherwise the bare file name.
pub fn display_title(metadata: Option<&TrackMetadata>, file_name: &str) -> String {
    if let Some(meta) = metadata {
        if let (Some(title), Some(artist)) = (&meta.title, &meta.artist) {
            if has_content(title) && has_content(artist) {
                return format!("{title} - {artist}");
            }
        }
    }
    file_name.to_owned()
}

fn has_content(s: &str) -> bool {
    s.chars().any(|c| c.is_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(title: Option<&str>, artist: Option<&str>) -> TrackMetadata {
        TrackMetadata {
            title: title.map(str::to_owned),
            artist: artist.map(str::to_owned),
            ..TrackMetadata::default()
        }
    }

    #[test]
    fn tagged_track_shows_title_and_artist() {
        let m = meta(Some("Blue Train"), Some("John Coltrane"));
        assert_eq!(
            display_title(Some(&m), "track01.flac"),
            "Blue Train - John Coltrane"
        );
    }

    #[test]
    fn missing_tags_fall_back_to_the_file_name() {
        assert_eq!(display_title(None, "track01.flac"), "track01.flac");
        let m = meta(None, None);
        assert_eq!(display_title(Some(&m), "track01.flac"), "track01.flac");
    }

    #[test]
    fn blank_tags_fall_back_to_the_file_name() {
        let m = meta(Some("   "), Some("---"));
        assert_eq!(display_title(Some(&m), "track01.flac"), "track01.flac");
    }

    #[test]
    fn one_sided_tags_fall_back_to_the_file_name() {
        let m = meta(Some("Blue Train"), None);
        assert_eq!(display_title(Some(&m), "track01.flac"), "track01.flac");
    }
}
