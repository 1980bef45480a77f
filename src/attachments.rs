use std::collections::HashMap;

use sdpmunge::{Codec, MediaHandle};

use crate::engine::TransceiverInfo;

/// Codec preferences and stream ids attached to transceivers, keyed by handle.
#[derive(Debug, Default, Clone)]
pub struct Attachments {
    codecs: HashMap<usize, Vec<Codec>>,
    streams: HashMap<usize, Vec<String>>,
}

impl Attachments {
    /// An empty list detaches any previous preferences.
    pub fn set_codec_preferences(&mut self, handle: usize, codecs: Vec<Codec>) {
        if codecs.is_empty() {
            self.codecs.remove(&handle);
        } else {
            self.codecs.insert(handle, codecs);
        }
    }

    pub fn set_streams(&mut self, handle: usize, stream_ids: Vec<String>) {
        self.streams.insert(handle, stream_ids);
    }

    pub fn codec_preferences(&self, handle: usize) -> Option<&[Codec]> {
        self.codecs.get(&handle).map(Vec::as_slice)
    }

    pub fn streams(&self, handle: usize) -> Option<&[String]> {
        self.streams.get(&handle).map(Vec::as_slice)
    }

    pub fn clear(&mut self, handle: usize) {
        self.codecs.remove(&handle);
        self.streams.remove(&handle);
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty() && self.streams.is_empty()
    }

    pub fn media_handles<'a>(&'a self, transceivers: &'a [TransceiverInfo]) -> Vec<MediaHandle<'a>> {
        transceivers
            .iter()
            .enumerate()
            .map(|(handle, transceiver)| MediaHandle {
                codecs: self.codec_preferences(handle),
                streams: self.streams(handle),
                track_id: transceiver.track_id.as_deref(),
            })
            .collect()
    }
}
