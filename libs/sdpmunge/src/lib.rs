//! Text-level SDP rewriting: codec preferences, stream ids and capability parsing.

pub mod codec;
pub mod extmap;
pub mod msid;
pub mod reorder;
pub mod section;
pub mod transform;


pub use codec::{parse_codecs, Codec, CodecEntry};
pub use extmap::{parse_extensions, Direction, HeaderExtension, Role};
pub use msid::rewrite_msid;
pub use reorder::reorder;
pub use section::{join, split, Section};
pub use transform::{placeholder_track_id, transform, MediaHandle, SdpType};
