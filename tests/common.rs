#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use std::time::Duration;

use async_trait::async_trait;

use codecpref::engine::{Description, MediaKind, NegotiationEngine, OfferProbe, Support, TransceiverInfo};
use codecpref::result::Result;
use codecpref::sdpmunge::{Codec, SdpType};

pub const OFFER: &str = "v=0\r\n\
    o=- 4611731400430051336 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    a=group:BUNDLE 0 1 2\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111 63 9 0 8\r\n\
    c=IN IP4 0.0.0.0\r\n\
    a=mid:0\r\n\
    a=extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level\r\n\
    a=sendrecv\r\n\
    a=msid:- 7c1e2b1a-0000-4000-8000-000000000001\r\n\
    a=rtpmap:111 opus/48000/2\r\n\
    a=rtcp-fb:111 transport-cc\r\n\
    a=fmtp:111 minptime=10;useinbandfec=1\r\n\
    a=rtpmap:63 red/48000/2\r\n\
    a=fmtp:63 111/111\r\n\
    a=rtpmap:9 G722/8000\r\n\
    a=rtpmap:0 PCMU/8000\r\n\
    a=rtpmap:8 PCMA/8000\r\n\
    m=application 9 UDP/DTLS/SCTP webrtc-datachannel\r\n\
    c=IN IP4 0.0.0.0\r\n\
    a=mid:1\r\n\
    a=sctp-port:5000\r\n\
    m=video 9 UDP/TLS/RTP/SAVPF 96 97 102 103\r\n\
    c=IN IP4 0.0.0.0\r\n\
    a=mid:2\r\n\
    a=sendrecv\r\n\
    a=rtpmap:96 VP8/90000\r\n\
    a=rtcp-fb:96 nack\r\n\
    a=rtcp-fb:96 nack pli\r\n\
    a=rtpmap:97 rtx/90000\r\n\
    a=fmtp:97 apt=96\r\n\
    a=rtpmap:102 H264/90000\r\n\
    a=rtcp-fb:102 nack pli\r\n\
    a=fmtp:102 level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=42001f\r\n\
    a=rtpmap:103 rtx/90000\r\n\
    a=fmtp:103 apt=102\r\n\
    a=rtcp-fb:* transport-cc\r\n";

pub fn h264() -> Codec {
    Codec::new("video/H264", 90000)
        .with_fmtp("level-asymmetry-allowed=1;packetization-mode=1;profile-level-id=42001f")
}

pub fn vp8() -> Codec {
    Codec::new("video/VP8", 90000)
}

pub fn opus() -> Codec {
    Codec::new("audio/opus", 48000)
        .with_channels(2)
        .with_fmtp("minptime=10;useinbandfec=1")
}

pub struct FakeEngine {
    pub transceivers: Vec<TransceiverInfo>,
    pub support: Support,
    pub native: Mutex<Vec<(usize, Vec<Codec>)>>,
    pub fail: bool,
}

impl FakeEngine {
    /// Audio with a track and video without one, matching [`OFFER`].
    pub fn new() -> Self {
        FakeEngine {
            transceivers: vec![
                TransceiverInfo {
                    kind: MediaKind::Audio,
                    track_id: Some("audio-track".to_string()),
                },
                TransceiverInfo {
                    kind: MediaKind::Video,
                    track_id: None,
                },
            ],
            support: Support::default(),
            native: Mutex::new(vec![]),
            fail: false,
        }
    }
}

#[async_trait]
impl NegotiationEngine for FakeEngine {
    async fn transceivers(&self) -> Result<Vec<TransceiverInfo>> {
        Ok(self.transceivers.clone())
    }

    async fn create_offer(&self) -> Result<Description> {
        if self.fail {
            return Err(anyhow::anyhow!("peer connection closed").into());
        }
        Ok(Description::new(SdpType::Offer, OFFER))
    }

    async fn create_answer(&self) -> Result<Description> {
        Ok(Description::new(SdpType::Answer, OFFER))
    }

    fn support(&self) -> Support {
        self.support
    }

    async fn set_codec_preferences(&self, handle: usize, codecs: Vec<Codec>) -> Result<()> {
        self.native.lock().unwrap().push((handle, codecs));
        Ok(())
    }
}

pub const PROBE_AUDIO: &str = "v=0\r\n\
    o=- 1 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    m=audio 9 UDP/TLS/RTP/SAVPF 111 0 101\r\n\
    a=mid:0\r\n\
    a=extmap:1 urn:ietf:params:rtp-hdrext:ssrc-audio-level\r\n\
    a=extmap:2/sendonly http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time\r\n\
    a=extmap:3/recvonly urn:ietf:params:rtp-hdrext:csrc-audio-level\r\n\
    a=extmap:4/inactive urn:ietf:params:rtp-hdrext:sdes:mid\r\n\
    a=rtpmap:111 opus/48000/2\r\n\
    a=fmtp:111 minptime=10;useinbandfec=1\r\n\
    a=rtpmap:0 PCMU/8000\r\n";

pub const PROBE_VIDEO: &str = "v=0\r\n\
    o=- 1 2 IN IP4 127.0.0.1\r\n\
    s=-\r\n\
    t=0 0\r\n\
    m=video 9 UDP/TLS/RTP/SAVPF 96 97\r\n\
    a=mid:0\r\n\
    a=extmap:5 urn:ietf:params:rtp-hdrext:toffset\r\n\
    a=rtpmap:96 VP8/90000\r\n\
    a=rtpmap:97 rtx/90000\r\n\
    a=fmtp:97 apt=96\r\n";

/// Counts probe runs. Each run sleeps so that concurrent queries overlap.
#[derive(Default)]
pub struct FakeProbe {
    pub runs: AtomicUsize,
    pub fail: bool,
}

impl FakeProbe {
    pub fn failing() -> Self {
        FakeProbe {
            runs: AtomicUsize::new(0),
            fail: true,
        }
    }
}

#[async_trait]
impl OfferProbe for FakeProbe {
    async fn probe(&self, kind: MediaKind) -> Result<String> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        if self.fail {
            return Err(anyhow::anyhow!("no media engine").into());
        }
        Ok(match kind {
            MediaKind::Audio => PROBE_AUDIO,
            MediaKind::Video => PROBE_VIDEO,
        }
        .to_string())
    }
}

/// Probe shared with the test through an `Arc`.
pub struct SharedProbe(pub std::sync::Arc<FakeProbe>);

#[async_trait]
impl OfferProbe for SharedProbe {
    async fn probe(&self, kind: MediaKind) -> Result<String> {
        self.0.probe(kind).await
    }
}
