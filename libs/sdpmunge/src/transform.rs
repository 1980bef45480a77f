use std::{borrow::Cow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::codec::Codec;
use crate::msid::rewrite_msid;
use crate::reorder::reorder;
use crate::section::{is_media_section, join, split};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SdpType {
    Offer,
    Pranswer,
    Answer,
    Rollback,
}

impl FromStr for SdpType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "offer" => Ok(SdpType::Offer),
            "pranswer" => Ok(SdpType::Pranswer),
            "answer" => Ok(SdpType::Answer),
            "rollback" => Ok(SdpType::Rollback),
            _ => Err(format!("unknown sdp type: {s}")),
        }
    }
}

impl fmt::Display for SdpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SdpType::Offer => "offer",
            SdpType::Pranswer => "pranswer",
            SdpType::Answer => "answer",
            SdpType::Rollback => "rollback",
        };
        write!(f, "{s}")
    }
}

/// What one transceiver wants done to its media section.
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaHandle<'a> {
    pub codecs: Option<&'a [Codec]>,
    pub streams: Option<&'a [String]>,
    pub track_id: Option<&'a str>,
}

impl MediaHandle<'_> {
    pub fn is_attached(&self) -> bool {
        self.codecs.is_some() || self.streams.is_some()
    }
}

/// Random id in the `8-4-4-4-12` hex form, used when a sender has no track.
pub fn placeholder_track_id() -> String {
    Uuid::new_v4().to_string()
}

/// Applies codec preferences and stream ids to a session description.
///
/// Audio and video sections are paired in order with `handles`; other sections
/// are copied through and do not consume a handle. Rollbacks, and descriptions
/// where no handle carries anything, are returned borrowed.
pub fn transform<'a>(sdp: &'a str, sdp_type: SdpType, handles: &[MediaHandle]) -> Cow<'a, str> {
    if sdp_type == SdpType::Rollback || !handles.iter().any(MediaHandle::is_attached) {
        trace!("{} passes through", sdp_type);
        return Cow::Borrowed(sdp);
    }

    let mut handles = handles.iter();
    let sections: Vec<_> = split(sdp)
        .into_iter()
        .map(|section| {
            if !is_media_section(&section, "audio") && !is_media_section(&section, "video") {
                return section;
            }
            let Some(handle) = handles.next() else {
                return section;
            };
            let mut section = section;
            if let Some(codecs) = handle.codecs {
                section = reorder(&section, codecs);
            }
            if let Some(streams) = handle.streams {
                let track_id = handle
                    .track_id
                    .map(str::to_string)
                    .unwrap_or_else(placeholder_track_id);
                section = rewrite_msid(&section, streams, &track_id);
            }
            debug!("{} section rewritten: {}", sdp_type, section[0]);
            section
        })
        .collect();
    Cow::Owned(join(&sections))
}
