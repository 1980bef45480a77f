use crate::section::Section;

const MSID_PREFIX: &str = "a=msid:";
const NO_STREAM: &str = "-";

/// Replaces the `a=msid:` lines of a section with one line per stream id.
///
/// The track id of the first existing `a=msid:` line wins over `track_id`. New
/// lines go where the first old one was, or to the end of the section.
pub fn rewrite_msid(section: &[String], stream_ids: &[String], track_id: &str) -> Section {
    let existing = section.iter().position(|line| line.starts_with(MSID_PREFIX));
    let (index, track_id) = match existing {
        Some(index) => {
            let track = section[index].split(' ').nth(1).unwrap_or(track_id);
            (index, track)
        }
        None => (section.len(), track_id),
    };

    let lines: Vec<String> = if stream_ids.is_empty() {
        vec![format!("{MSID_PREFIX}{NO_STREAM} {track_id}")]
    } else {
        stream_ids
            .iter()
            .map(|stream_id| format!("{MSID_PREFIX}{stream_id} {track_id}"))
            .collect()
    };

    let mut out: Section = section
        .iter()
        .filter(|line| !line.starts_with(MSID_PREFIX))
        .cloned()
        .collect();
    let index = index.min(out.len());
    out.splice(index..index, lines);
    out
}
