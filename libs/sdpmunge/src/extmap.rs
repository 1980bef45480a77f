use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::codec::attribute_value;

const EXTMAP: &str = "extmap";

/// Side of a transceiver a capability query is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Sender,
    Receiver,
}

impl Role {
    /// Name of the WebRTC interface the role belongs to.
    pub fn interface(&self) -> &'static str {
        match self {
            Role::Sender => "RTCRtpSender",
            Role::Receiver => "RTCRtpReceiver",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sender" => Ok(Role::Sender),
            "receiver" => Ok(Role::Receiver),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Sendrecv,
    Sendonly,
    Recvonly,
    Inactive,
}

impl Direction {
    pub fn allows(&self, role: Role) -> bool {
        match role {
            Role::Sender => matches!(self, Direction::Sendrecv | Direction::Sendonly),
            Role::Receiver => matches!(self, Direction::Sendrecv | Direction::Recvonly),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sendrecv" => Ok(Direction::Sendrecv),
            "sendonly" => Ok(Direction::Sendonly),
            "recvonly" => Ok(Direction::Recvonly),
            "inactive" => Ok(Direction::Inactive),
            _ => Err(format!("unknown extmap direction: {s}")),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Sendrecv => "sendrecv",
            Direction::Sendonly => "sendonly",
            Direction::Recvonly => "recvonly",
            Direction::Inactive => "inactive",
        };
        write!(f, "{s}")
    }
}

/// An RTP header extension offered through `a=extmap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderExtension {
    pub uri: String,
    #[serde(default)]
    pub direction: Direction,
}

fn parse_extmap(value: &str) -> Option<HeaderExtension> {
    let mut parts = value.split(' ');
    let id = parts.next()?;
    let uri = parts.next().filter(|uri| !uri.is_empty())?;
    let direction = match id.split_once('/') {
        Some((_, direction)) => direction
            .parse()
            .map_err(|e| warn!("{}", e))
            .ok()?,
        None => Direction::default(),
    };
    Some(HeaderExtension {
        uri: uri.to_string(),
        direction,
    })
}

/// Collects the header extensions declared in a section, in line order.
pub fn parse_extensions(section: &[String]) -> Vec<HeaderExtension> {
    section
        .iter()
        .filter_map(|line| attribute_value(line, EXTMAP))
        .filter_map(parse_extmap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::split;
    use crate::tests::{section, SDP_VIDEO};

    #[test]
    fn test_parse_extensions() {
        let media = section(&[
            "m=video 9 RTP/AVP 96",
            "a=extmap-allow-mixed",
            "a=extmap:1 urn:ietf:params:rtp-hdrext:toffset",
            "a=extmap:2/sendonly http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time",
            "a=extmap:3/recvonly urn:3gpp:video-orientation",
            "a=extmap:4/inactive urn:ietf:params:rtp-hdrext:sdes:mid",
            "a=extmap:5/sideways urn:example:unknown",
            "a=extmap:6",
        ]);
        let extensions = parse_extensions(&media);
        assert_eq!(
            extensions,
            vec![
                HeaderExtension {
                    uri: "urn:ietf:params:rtp-hdrext:toffset".to_string(),
                    direction: Direction::Sendrecv,
                },
                HeaderExtension {
                    uri: "http://www.webrtc.org/experiments/rtp-hdrext/abs-send-time".to_string(),
                    direction: Direction::Sendonly,
                },
                HeaderExtension {
                    uri: "urn:3gpp:video-orientation".to_string(),
                    direction: Direction::Recvonly,
                },
                HeaderExtension {
                    uri: "urn:ietf:params:rtp-hdrext:sdes:mid".to_string(),
                    direction: Direction::Inactive,
                },
            ]
        );
    }

    #[test]
    fn test_parse_offer_extensions() {
        let sections = split(SDP_VIDEO);
        let extensions = parse_extensions(&sections[1]);
        assert_eq!(extensions.len(), 11);
        assert!(extensions.iter().all(|e| e.direction == Direction::Sendrecv));
        assert_eq!(extensions[8].uri, "urn:ietf:params:rtp-hdrext:sdes:mid");
    }

    #[test]
    fn test_direction_allows() {
        assert!(Direction::Sendrecv.allows(Role::Sender));
        assert!(Direction::Sendrecv.allows(Role::Receiver));
        assert!(Direction::Sendonly.allows(Role::Sender));
        assert!(!Direction::Sendonly.allows(Role::Receiver));
        assert!(Direction::Recvonly.allows(Role::Receiver));
        assert!(!Direction::Recvonly.allows(Role::Sender));
        assert!(!Direction::Inactive.allows(Role::Sender));
        assert!(!Direction::Inactive.allows(Role::Receiver));
    }

    #[test]
    fn test_direction_round_trip() {
        for direction in ["sendrecv", "sendonly", "recvonly", "inactive"] {
            assert_eq!(direction.parse::<Direction>().unwrap().to_string(), direction);
        }
        assert!("send".parse::<Direction>().is_err());
        assert_eq!("receiver".parse::<Role>().unwrap(), Role::Receiver);
        assert!("Sender".parse::<Role>().is_err());
        assert_eq!(Role::Sender.interface(), "RTCRtpSender");
        assert_eq!(Role::Receiver.interface(), "RTCRtpReceiver");
    }
}
