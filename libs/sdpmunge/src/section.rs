/// One session-level block or one `m=` media block, as trimmed non-empty lines.
pub type Section = Vec<String>;

const MEDIA_PREFIX: &str = "m=";

/// Splits SDP text into sections at every line starting with `m=`.
///
/// Lines are trimmed (this also drops the `\r` of CRLF endings) and blank lines
/// are removed. Sections left without any line are not returned.
pub fn split(sdp: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::new();
    for raw in sdp.split('\n') {
        if raw.starts_with(MEDIA_PREFIX) && !current.is_empty() {
            sections.push(std::mem::take(&mut current));
        }
        let line = raw.trim();
        if !line.is_empty() {
            current.push(line.to_string());
        }
    }
    if !current.is_empty() {
        sections.push(current);
    }
    sections
}

/// Joins sections back into SDP text, every line terminated by CRLF.
pub fn join(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|lines| lines.join("\r\n") + "\r\n")
        .collect()
}

pub fn is_media_line(line: &str) -> bool {
    line.starts_with(MEDIA_PREFIX)
}

/// True when the section opens with `m=<kind> `.
pub fn is_media_section(section: &[String], kind: &str) -> bool {
    section
        .first()
        .and_then(|line| line.strip_prefix(MEDIA_PREFIX))
        .and_then(|rest| rest.strip_prefix(kind))
        .is_some_and(|rest| rest.starts_with(' '))
}
