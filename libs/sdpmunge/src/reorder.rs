use std::collections::HashSet;

use tracing::debug;

use crate::codec::{codec_attribute, parse_codecs, Codec, FMTP, RTCP_FB, RTPMAP};
use crate::section::{is_media_line, Section};

/// Drops `a=rtpmap`, `a=fmtp` and `a=rtcp-fb` lines of the given payload types.
fn drop_codec_lines(section: Section, dropped: &HashSet<String>) -> Section {
    section
        .into_iter()
        .filter(|line| match codec_attribute(line) {
            Some((attr, id)) if attr == RTPMAP || attr == FMTP || attr == RTCP_FB => {
                !dropped.contains(id)
            }
            _ => true,
        })
        .collect()
}

/// Ranks and filters the codecs of a media section by `preferences`.
///
/// Each payload type is ranked by the first preference equal to its codec.
/// Unmatched payload types are removed from the media line together with their
/// codec attribute lines; the rest are written back in rank order. An empty
/// preference list leaves the section untouched.
pub fn reorder(section: &[String], preferences: &[Codec]) -> Section {
    if preferences.is_empty() {
        return section.to_vec();
    }
    let Some(media_line) = section.first().filter(|line| is_media_line(line)) else {
        return section.to_vec();
    };
    let entries = parse_codecs(section);

    let mut kept = Vec::with_capacity(entries.len());
    let mut dropped = HashSet::new();
    for entry in entries {
        let rank = entry
            .codec
            .as_ref()
            .and_then(|codec| preferences.iter().position(|p| p == codec));
        match rank {
            Some(rank) => kept.push((rank, entry.payload_type)),
            None => {
                dropped.insert(entry.payload_type);
            }
        }
    }
    kept.sort_by_key(|(rank, _)| *rank);

    let mut tokens: Vec<&str> = media_line.split_whitespace().take(3).collect();
    tokens.extend(kept.iter().map(|(_, id)| id.as_str()));
    let rewritten = tokens.join(" ");
    debug!(
        "reorder [{}] -> [{}], dropped {:?}",
        media_line, rewritten, dropped
    );

    let mut out = section.to_vec();
    out[0] = rewritten;
    drop_codec_lines(out, &dropped)
}
