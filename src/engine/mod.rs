mod negotiator;

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use sdpmunge::{Codec, SdpType};

use crate::error::Error;
use crate::result::Result;

pub use negotiator::Negotiator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio",
            MediaKind::Video => "video",
        }
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "audio" => Ok(MediaKind::Audio),
            "video" => Ok(MediaKind::Video),
            _ => Err(format!("unknown media kind: {s}")),
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "type")]
    pub sdp_type: SdpType,
    pub sdp: String,
}

impl Description {
    pub fn new(sdp_type: SdpType, sdp: impl ToString) -> Self {
        Description {
            sdp_type,
            sdp: sdp.to_string(),
        }
    }
}

/// One transceiver as seen by the negotiator. Its index in
/// [`NegotiationEngine::transceivers`] is its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransceiverInfo {
    pub kind: MediaKind,
    pub track_id: Option<String>,
}

/// Operations an engine implements on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Support {
    pub codec_preferences: bool,
    pub set_streams: bool,
}

#[async_trait]
pub trait NegotiationEngine: Send + Sync + 'static {
    /// Transceivers in a stable order, matching the order of the audio and
    /// video sections the engine writes.
    async fn transceivers(&self) -> Result<Vec<TransceiverInfo>>;

    async fn create_offer(&self) -> Result<Description>;

    async fn create_answer(&self) -> Result<Description>;

    fn support(&self) -> Support {
        Support::default()
    }

    async fn set_codec_preferences(&self, _handle: usize, _codecs: Vec<Codec>) -> Result<()> {
        Err(Error::unsupported("setCodecPreferences"))
    }

    async fn set_streams(&self, _handle: usize, _stream_ids: Vec<String>) -> Result<()> {
        Err(Error::unsupported("setStreams"))
    }
}

/// Produces a throwaway offer holding a single transceiver of `kind`.
#[async_trait]
pub trait OfferProbe: Send + Sync + 'static {
    async fn probe(&self, kind: MediaKind) -> Result<String>;
}

/// Engine serving one fixed description, for rewriting SDP read from elsewhere.
#[derive(Debug, Clone)]
pub struct StaticEngine {
    description: Description,
    transceivers: Vec<TransceiverInfo>,
}

impl StaticEngine {
    pub fn new(description: Description, transceivers: Vec<TransceiverInfo>) -> Self {
        StaticEngine {
            description,
            transceivers,
        }
    }

    /// One transceiver per audio or video section of the description.
    pub fn from_description(description: Description, track_id: Option<String>) -> Self {
        let transceivers = sdpmunge::split(&description.sdp)
            .iter()
            .filter_map(|section| section.first())
            .filter_map(|line| line.strip_prefix("m="))
            .filter_map(|line| line.split(' ').next()?.parse::<MediaKind>().ok())
            .map(|kind| TransceiverInfo {
                kind,
                track_id: track_id.clone(),
            })
            .collect();
        Self::new(description, transceivers)
    }
}

#[async_trait]
impl NegotiationEngine for StaticEngine {
    async fn transceivers(&self) -> Result<Vec<TransceiverInfo>> {
        Ok(self.transceivers.clone())
    }

    async fn create_offer(&self) -> Result<Description> {
        Ok(self.description.clone())
    }

    async fn create_answer(&self) -> Result<Description> {
        Ok(self.description.clone())
    }
}
