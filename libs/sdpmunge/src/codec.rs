use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::section::is_media_line;

pub const RTPMAP: &str = "rtpmap";
pub const FMTP: &str = "fmtp";
pub const RTCP_FB: &str = "rtcp-fb";

const AUDIO_KIND: &str = "audio";

/// A codec as declared by an `a=rtpmap` line (plus its `a=fmtp` parameters).
///
/// Mirrors `RTCRtpCodecCapability`: optional fields are `None` when the SDP did
/// not declare them, never zero or empty. Unknown keys are rejected so that a
/// descriptor never carries fields equality cannot see.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Codec {
    pub mime_type: String,
    pub clock_rate: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channels: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sdp_fmtp_line: Option<String>,
}

impl Codec {
    pub fn new(mime_type: impl ToString, clock_rate: u32) -> Self {
        Codec {
            mime_type: mime_type.to_string(),
            clock_rate,
            channels: None,
            sdp_fmtp_line: None,
        }
    }

    pub fn with_channels(mut self, channels: u16) -> Self {
        self.channels = Some(channels);
        self
    }

    pub fn with_fmtp(mut self, fmtp: impl ToString) -> Self {
        self.sdp_fmtp_line = Some(fmtp.to_string());
        self
    }

    /// The `<kind>` half of `<kind>/<name>`.
    pub fn kind(&self) -> Option<&str> {
        self.mime_type.split_once('/').map(|(kind, _)| kind)
    }
}

// Mime types compare case-insensitively. All other fields must match exactly,
// presence included: a codec declaring `sdp_fmtp_line` never equals one that does not.
impl PartialEq for Codec {
    fn eq(&self, other: &Self) -> bool {
        self.mime_type.eq_ignore_ascii_case(&other.mime_type)
            && self.clock_rate == other.clock_rate
            && self.channels == other.channels
            && self.sdp_fmtp_line == other.sdp_fmtp_line
    }
}

/// A payload type from the media line and the codec it maps to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodecEntry {
    pub payload_type: String,
    pub codec: Option<Codec>,
}

/// The `<kind>` and payload types of a media line, `None` for any other line.
pub(crate) fn media_formats(line: &str) -> Option<(&str, Vec<&str>)> {
    if !is_media_line(line) {
        return None;
    }
    let mut tokens = line[2..].split_whitespace();
    let kind = tokens.next().unwrap_or_default();
    Some((kind, tokens.skip(2).collect()))
}

/// Value of an `a=<name>:` attribute line.
pub(crate) fn attribute_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    line.strip_prefix("a=")?
        .strip_prefix(name)?
        .strip_prefix(':')
}

/// Splits `a=<attr>:<digits>...` into `(attr, digits)`.
///
/// The digits must be followed by the end of the line or a non-word character,
/// so `a=rtpmap:96 VP8/90000` yields `("rtpmap", "96")` while `a=rtcp-fb:* nack`
/// and `a=ssrc-group:FID 1 2` yield nothing.
pub fn codec_attribute(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("a=")?;
    let (attr, value) = rest.split_once(':')?;
    if attr.is_empty()
        || !attr
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return None;
    }
    let end = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    if end == 0 {
        return None;
    }
    let boundary = value[end..].chars().next();
    if boundary.is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((attr, &value[..end]))
}

fn parse_rtpmap(kind: &str, value: &str) -> Option<(String, Codec)> {
    let (id, encoding) = value.split_once(' ')?;
    let mut parts = encoding.split('/');
    let name = parts.next()?;
    let clock_rate = parts.next()?.trim().parse::<u32>().ok()?;
    let channels = if kind == AUDIO_KIND {
        let channels = match parts.next().and_then(|c| c.trim().parse::<u32>().ok()) {
            None | Some(0) => 1,
            Some(c) => u16::try_from(c).ok()?,
        };
        Some(channels)
    } else {
        None
    };
    Some((
        id.to_string(),
        Codec {
            mime_type: format!("{kind}/{name}"),
            clock_rate,
            channels,
            sdp_fmtp_line: None,
        },
    ))
}

/// Reads the codec table of a media section, in media line order.
///
/// Returns nothing for a section that does not start with `m=`. Payload types
/// without an `a=rtpmap` line map to `None`.
pub fn parse_codecs(section: &[String]) -> Vec<CodecEntry> {
    let Some((kind, payload_types)) = section.first().and_then(|l| media_formats(l)) else {
        return vec![];
    };

    let mut codecs: HashMap<String, Codec> = HashMap::new();
    for line in section {
        if let Some(value) = attribute_value(line, RTPMAP) {
            match parse_rtpmap(kind, value) {
                Some((id, codec)) => {
                    codecs.insert(id, codec);
                }
                None => warn!("skip malformed rtpmap: {}", line),
            }
        }
    }

    for line in section {
        if let Some(value) = attribute_value(line, FMTP) {
            let (id, params) = value.split_once(' ').unwrap_or((value, ""));
            if let Some(codec) = codecs.get_mut(id) {
                codec.sdp_fmtp_line = Some(params.to_string());
            }
        }
    }

    payload_types
        .into_iter()
        .map(|id| CodecEntry {
            payload_type: id.to_string(),
            codec: codecs.get(id).cloned(),
        })
        .collect()
}
