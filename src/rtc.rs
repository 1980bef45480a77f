use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};
use webrtc::{
    api::{
        interceptor_registry::register_default_interceptors, media_engine::MediaEngine,
        APIBuilder,
    },
    interceptor::registry::Registry,
    peer_connection::{
        configuration::RTCConfiguration,
        sdp::{sdp_type::RTCSdpType, session_description::RTCSessionDescription},
        RTCPeerConnection,
    },
    rtp_transceiver::rtp_codec::RTPCodecType,
    track::track_local::TrackLocal,
};

use sdpmunge::SdpType;

use crate::engine::{Description, MediaKind, NegotiationEngine, OfferProbe, TransceiverInfo};
use crate::error::Error;
use crate::result::Result;

impl From<MediaKind> for RTPCodecType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Audio => RTPCodecType::Audio,
            MediaKind::Video => RTPCodecType::Video,
        }
    }
}

impl TryFrom<RTCSessionDescription> for Description {
    type Error = Error;

    fn try_from(description: RTCSessionDescription) -> Result<Self> {
        let sdp_type = match description.sdp_type {
            RTCSdpType::Offer => SdpType::Offer,
            RTCSdpType::Pranswer => SdpType::Pranswer,
            RTCSdpType::Answer => SdpType::Answer,
            RTCSdpType::Rollback => SdpType::Rollback,
            RTCSdpType::Unspecified => return Err(Error::unsupported("unspecified sdp type")),
        };
        Ok(Description {
            sdp_type,
            sdp: description.sdp,
        })
    }
}

impl TryFrom<Description> for RTCSessionDescription {
    type Error = Error;

    fn try_from(description: Description) -> Result<Self> {
        Ok(match description.sdp_type {
            SdpType::Offer => RTCSessionDescription::offer(description.sdp)?,
            SdpType::Pranswer => RTCSessionDescription::pranswer(description.sdp)?,
            SdpType::Answer => RTCSessionDescription::answer(description.sdp)?,
            SdpType::Rollback => {
                let mut rollback = RTCSessionDescription::default();
                rollback.sdp_type = RTCSdpType::Rollback;
                rollback
            }
        })
    }
}

/// [`NegotiationEngine`] over a webrtc-rs peer connection.
pub struct WebrtcEngine {
    peer: Arc<RTCPeerConnection>,
}

impl WebrtcEngine {
    pub fn new(peer: Arc<RTCPeerConnection>) -> Self {
        WebrtcEngine { peer }
    }

    pub fn peer(&self) -> Arc<RTCPeerConnection> {
        self.peer.clone()
    }
}

#[async_trait]
impl NegotiationEngine for WebrtcEngine {
    async fn transceivers(&self) -> Result<Vec<TransceiverInfo>> {
        let mut transceivers = vec![];
        for transceiver in self.peer.get_transceivers().await {
            let kind = match transceiver.kind() {
                RTPCodecType::Audio => MediaKind::Audio,
                RTPCodecType::Video => MediaKind::Video,
                RTPCodecType::Unspecified => continue,
            };
            let track_id = transceiver
                .sender()
                .await
                .track()
                .await
                .map(|track| track.id().to_string());
            transceivers.push(TransceiverInfo { kind, track_id });
        }
        Ok(transceivers)
    }

    async fn create_offer(&self) -> Result<Description> {
        self.peer.create_offer(None).await?.try_into()
    }

    async fn create_answer(&self) -> Result<Description> {
        self.peer.create_answer(None).await?.try_into()
    }
}

/// Offers from a fresh peer connection with the default webrtc-rs codecs and
/// interceptors.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebrtcProbe;

#[async_trait]
impl OfferProbe for WebrtcProbe {
    async fn probe(&self, kind: MediaKind) -> Result<String> {
        let mut m = MediaEngine::default();
        m.register_default_codecs()?;
        let mut registry = Registry::new();
        registry = register_default_interceptors(registry, &mut m)?;
        let api = APIBuilder::new()
            .with_media_engine(m)
            .with_interceptor_registry(registry)
            .build();

        let peer = api.new_peer_connection(RTCConfiguration::default()).await?;
        let offer: std::result::Result<RTCSessionDescription, webrtc::Error> = async {
            peer.add_transceiver_from_kind(kind.into(), None).await?;
            peer.create_offer(None).await
        }
        .await;
        if let Err(err) = peer.close().await {
            warn!("probe peer close error: {}", err);
        }
        let offer = offer?;
        debug!("{} probe offer: {} bytes", kind, offer.sdp.len());
        Ok(offer.sdp)
    }
}
