use std::env;

use serde::{Deserialize, Serialize};

use sdpmunge::Codec;

use crate::engine::MediaKind;

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub log: Log,
    #[serde(default)]
    pub preferences: Preferences,
    /// Stream ids for every sender. Absent means leave `a=msid` alone.
    #[serde(default)]
    pub streams: Option<Streams>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Preferred codecs per media kind, most preferred first.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub audio: Vec<Codec>,
    #[serde(default)]
    pub video: Vec<Codec>,
}

impl Preferences {
    pub fn get(&self, kind: MediaKind) -> &[Codec] {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Streams {
    #[serde(default)]
    pub ids: Vec<String>,
    /// Used for senders without a track of their own.
    #[serde(default)]
    pub track_id: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    env::var("LOG_LEVEL").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug".to_string()
        } else {
            "info".to_string()
        }
    })
}

impl Config {
    pub fn parse(path: Option<String>) -> Self {
        utils::load("codecpref".to_string(), path)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for kind in [MediaKind::Audio, MediaKind::Video] {
            for codec in self.preferences.get(kind) {
                match codec.mime_type.split_once('/') {
                    Some((k, name)) if k == kind.as_str() && !name.is_empty() => {}
                    _ => anyhow::bail!(
                        "preferences.{} has codec with mime type {:?}",
                        kind,
                        codec.mime_type
                    ),
                }
            }
        }
        Ok(())
    }
}
