//! Metadata shown alongside the game: title, tag line, and the info
//! sections presented next to the playfield. The data ships as JSON and
//! is parsed once at startup.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("invalid panel data at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct GameInfo {
    pub name: String,
    pub tag: String,
    pub year: u32,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub sections: Vec<PanelSection>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PanelSection {
    pub name: String,
    pub id: String,
    pub content: String,
}

/// Parses panel JSON, reporting the path to the offending field on
/// failure rather than just a byte offset.
pub fn parse_game_info(raw: &str) -> Result<GameInfo, PanelError> {
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = err.path().to_string();
        PanelError::Parse {
            path,
            source: err.into_inner(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_complete_panel_data() {
        let raw = r#"{
            "name": "Drift",
            "tag": "a tiny exploration game",
            "year": 2026,
            "images": ["shots/title.png", "shots/camp.png"],
            "sections": [
                {"name": "About", "id": "about", "content": "Wander around."},
                {"name": "Controls", "id": "controls", "content": "Arrow keys."}
            ]
        }"#;

        let info = parse_game_info(raw).expect("parse");
        assert_eq!(info.name, "Drift");
        assert_eq!(info.year, 2026);
        assert_eq!(info.images.len(), 2);
        assert_eq!(info.sections[1].id, "controls");
    }

    #[test]
    fn images_and_sections_default_to_empty() {
        let raw = r#"{"name": "Drift", "tag": "t", "year": 2026}"#;
        let info = parse_game_info(raw).expect("parse");
        assert!(info.images.is_empty());
        assert!(info.sections.is_empty());
    }

    #[test]
    fn error_reports_the_path_of_the_bad_field() {
        let raw = r#"{
            "name": "Drift",
            "tag": "t",
            "year": 2026,
            "sections": [{"name": "About", "id": "about", "content": 7}]
        }"#;

        let err = parse_game_info(raw).expect_err("must fail");
        let PanelError::Parse { path, .. } = err;
        assert_eq!(path, "sections[0].content");
    }
}
