//! Transport status and now-playing metadata, parsed from the server's
//! key-value responses. Polled every tick, never cached longer than one.

use std::collections::HashMap;

/// Remote transport state as reported by `status`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlayState {
    Play,
    Pause,
    #[default]
    Stop,
}

impl PlayState {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "play" => PlayState::Play,
            "pause" => PlayState::Pause,
            _ => PlayState::Stop,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TransportStatus {
    pub state: PlayState,
    pub elapsed_seconds: f64,
    pub duration_seconds: f64,
    pub bitrate_kbps: u32,
    pub current_position: Option<usize>,
}

impl TransportStatus {
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        Self {
            state: pairs.get("state").map(|s| PlayState::parse(s)).unwrap_or_default(),
            elapsed_seconds: pairs
                .get("elapsed")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            duration_seconds: pairs
                .get("duration")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
            bitrate_kbps: pairs
                .get("bitrate")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            current_position: pairs.get("song").and_then(|v| v.parse().ok()),
        }
    }

    pub fn playing(&self) -> bool {
        self.state == PlayState::Play
    }
}

/// Metadata for the current song, from `currentsong`.
#[derive(Clone, Debug)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
}

impl Default for NowPlaying {
    fn default() -> Self {
        Self {
            title: "No song info".to_string(),
            artist: "No artist".to_string(),
        }
    }
}

impl NowPlaying {
    pub fn from_pairs(pairs: &HashMap<String, String>) -> Self {
        let fallback = Self::default();
        Self {
            title: pairs.get("Title").cloned().unwrap_or(fallback.title),
            artist: pairs.get("Artist").cloned().unwrap_or(fallback.artist),
        }
    }
}

/// What the reconciliation loop projects onto the player display each tick.
#[derive(Clone, Debug, Default)]
pub struct PlayerProjection {
    pub status: TransportStatus,
    pub now_playing: NowPlaying,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(entries: &[(&str, &str)]) -> HashMap<String, String> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_a_full_status() {
        let status = TransportStatus::from_pairs(&pairs(&[
            ("state", "pause"),
            ("elapsed", "61.4"),
            ("duration", "185"),
            ("bitrate", "320"),
            ("song", "3"),
        ]));
        assert_eq!(status.state, PlayState::Pause);
        assert!(!status.playing());
        assert_eq!(status.elapsed_seconds, 61.4);
        assert_eq!(status.duration_seconds, 185.0);
        assert_eq!(status.bitrate_kbps, 320);
        assert_eq!(status.current_position, Some(3));
    }

    #[test]
    fn missing_fields_default() {
        let status = TransportStatus::from_pairs(&pairs(&[("state", "stop")]));
        assert_eq!(status.state, PlayState::Stop);
        assert_eq!(status.bitrate_kbps, 0);
        assert_eq!(status.current_position, None);
    }

    #[test]
    fn now_playing_falls_back_when_untagged() {
        let np = NowPlaying::from_pairs(&pairs(&[]));
        assert_eq!(np.title, "No song info");
        assert_eq!(np.artist, "No artist");

        let np = NowPlaying::from_pairs(&pairs(&[("Title", "Datassette"), ("Artist", "MFP")]));
        assert_eq!(np.title, "Datassette");
        assert_eq!(np.artist, "MFP");
    }
}
