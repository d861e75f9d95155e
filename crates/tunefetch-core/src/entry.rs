//! Track database entries and file naming

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Anything that can be matched against search results by duration
pub trait ExpectedDuration {
    /// Expected track length in seconds
    fn expected_duration(&self) -> u64;

    /// Human-readable name used in errors and logs
    fn display_name(&self) -> String;
}

/// A track as stored in the track database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackEntry {
    #[serde(default)]
    pub artist: String,
    pub title: String,
    /// Track length in seconds
    pub duration: u64,
}

impl TrackEntry {
    pub fn search_query(&self) -> String {
        format!("{} {}", self.artist, self.title).trim().to_string()
    }

    /// Display name made safe for use as a file name
    pub fn file_name(&self) -> String {
        sanitize_filename(&ExpectedDuration::display_name(self))
    }
}

impl ExpectedDuration for TrackEntry {
    fn expected_duration(&self) -> u64 {
        self.duration
    }

    fn display_name(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.trim().to_string()
        } else {
            format!("{} - {}", artist, self.title.trim())
        }
    }
}

/// Read a JSON array of entries
pub fn load_entries(json: &str) -> Result<Vec<TrackEntry>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Sanitize filename for filesystem
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Append `.ext` unless the name already ends with it
pub fn with_extension(filename: &str, ext: &str) -> String {
    let suffix = format!(".{}", ext);
    if filename.ends_with(&suffix) {
        filename.to_string()
    } else {
        format!("{}{}", filename, suffix)
    }
}

/// Whether `path` carries the extension `ext`
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().is_some_and(|e| e == ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(artist: &str, title: &str) -> TrackEntry {
        TrackEntry {
            artist: artist.to_string(),
            title: title.to_string(),
            duration: 200,
        }
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Normal Title"), "Normal Title");
        assert_eq!(sanitize_filename("AC/DC: Back*In?Black"), "AC_DC_ Back_In_Black");
        assert_eq!(sanitize_filename("  Spaces  "), "Spaces");
    }

    #[test]
    fn test_extension_appended_exactly_once() {
        assert_eq!(with_extension("song", "mp4"), "song.mp4");
        assert_eq!(with_extension("song.mp4", "mp4"), "song.mp4");
        assert_eq!(with_extension(&with_extension("song", "mp4"), "mp4"), "song.mp4");
        assert_eq!(with_extension("song.mp3", "mp4"), "song.mp3.mp4");
    }

    #[test]
    fn test_entry_names() {
        let e = entry("Daft Punk", "One More Time");
        assert_eq!(e.display_name(), "Daft Punk - One More Time");
        assert_eq!(e.search_query(), "Daft Punk One More Time");
        assert_eq!(e.expected_duration(), 200);

        let untitled_artist = entry("", "Intro");
        assert_eq!(untitled_artist.display_name(), "Intro");
        assert_eq!(untitled_artist.search_query(), "Intro");

        assert_eq!(entry("AC/DC", "T.N.T.").file_name(), "AC_DC - T.N.T.");
    }

    #[test]
    fn test_load_entries() {
        let json = r#"[
            {"artist": "Daft Punk", "title": "One More Time", "duration": 320},
            {"title": "Intro", "duration": 95}
        ]"#;
        let entries = load_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].artist, "");
        assert!(load_entries(r#"[{"title": "no duration"}]"#).is_err());
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("/tmp/a.mp4"), "mp4"));
        assert!(!has_extension(Path::new("/tmp/a.mp3"), "mp4"));
        assert!(!has_extension(Path::new("/tmp/mp4"), "mp4"));
    }
}
