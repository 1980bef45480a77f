use std::sync::Arc;

use futures_util::future::{try_join, BoxFuture, FutureExt, Shared};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sdpmunge::{parse_codecs, parse_extensions, split, Codec, HeaderExtension, Role};

use crate::engine::{MediaKind, OfferProbe};
use crate::error::Error;
use crate::result::Result;
use crate::rtc::WebrtcProbe;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RtpCapabilities {
    pub codecs: Vec<Codec>,
    pub header_extensions: Vec<HeaderExtension>,
}

impl RtpCapabilities {
    /// Drops the header extensions `role` cannot use.
    pub fn for_role(&self, role: Role) -> RtpCapabilities {
        RtpCapabilities {
            codecs: self.codecs.clone(),
            header_extensions: self
                .header_extensions
                .iter()
                .filter(|extension| extension.direction.allows(role))
                .cloned()
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub audio: RtpCapabilities,
    pub video: RtpCapabilities,
}

impl Snapshot {
    pub fn get(&self, kind: MediaKind) -> &RtpCapabilities {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
        }
    }
}

/// Reads the capabilities out of the first media section of an offer.
pub fn capabilities_from_offer(sdp: &str) -> RtpCapabilities {
    let sections = split(sdp);
    let section = sections.get(1).map(Vec::as_slice).unwrap_or_default();
    RtpCapabilities {
        codecs: parse_codecs(section)
            .into_iter()
            .filter_map(|entry| entry.codec)
            .collect(),
        header_extensions: parse_extensions(section),
    }
}

async fn discover(probe: &dyn OfferProbe) -> Result<Snapshot> {
    info!("discovering rtp capabilities");
    let (audio, video) = try_join(probe.probe(MediaKind::Audio), probe.probe(MediaKind::Video)).await?;
    let snapshot = Snapshot {
        audio: capabilities_from_offer(&audio),
        video: capabilities_from_offer(&video),
    };
    debug!(
        "discovered {} audio and {} video codecs",
        snapshot.audio.codecs.len(),
        snapshot.video.codecs.len()
    );
    Ok(snapshot)
}

type SnapshotFuture = Shared<BoxFuture<'static, std::result::Result<Arc<Snapshot>, Error>>>;

/// Runs capability discovery at most once.
///
/// Nothing happens until the first query. Every query after that, concurrent
/// or not, gets the outcome of that single run, failures included.
pub struct Discoverer {
    snapshot: SnapshotFuture,
}

impl Discoverer {
    pub fn new<P: OfferProbe>(probe: P) -> Self {
        let snapshot = async move { discover(&probe).await.map(Arc::new) }
            .boxed()
            .shared();
        Discoverer { snapshot }
    }

    pub async fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.snapshot.clone().await
    }

    /// `getCapabilities(kind)` for a sender or receiver.
    ///
    /// `None` for `kind` mirrors a call with no argument and fails; a kind other
    /// than audio or video gives `Ok(None)`.
    pub async fn get_capabilities(&self, role: Role, kind: Option<&str>) -> Result<Option<RtpCapabilities>> {
        let kind = kind.ok_or_else(|| Error::missing_argument("getCapabilities", role.interface()))?;
        let Ok(kind) = kind.parse::<MediaKind>() else {
            debug!("no capabilities for kind {}", kind);
            return Ok(None);
        };
        let snapshot = self.snapshot().await?;
        Ok(Some(snapshot.get(kind).for_role(role)))
    }
}

static GLOBAL: Lazy<Discoverer> = Lazy::new(|| Discoverer::new(WebrtcProbe));

/// Process-wide discoverer backed by webrtc-rs.
pub fn global() -> &'static Discoverer {
    &GLOBAL
}
