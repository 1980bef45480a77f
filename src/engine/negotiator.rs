use std::{borrow::Cow, sync::Arc};

use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, trace};

use sdpmunge::{transform, Codec, SdpType};

use crate::attachments::Attachments;
use crate::error::Error;
use crate::result::Result;

use super::{Description, NegotiationEngine, Support};

/// Fills in the operations an engine lacks.
///
/// Preferences and stream ids the engine cannot take natively are kept in a
/// side table, and every offer or answer leaving the engine is rewritten to
/// honor them. Operations the engine supports are passed through untouched.
pub struct Negotiator<E> {
    engine: E,
    support: Support,
    attachments: RwLock<Attachments>,
}

impl<E: NegotiationEngine> Negotiator<E> {
    pub fn new(engine: E) -> Self {
        let support = engine.support();
        debug!("engine support: {:?}", support);
        Negotiator {
            engine,
            support,
            attachments: RwLock::new(Attachments::default()),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn support(&self) -> Support {
        self.support
    }

    async fn check_handle(&self, handle: usize) -> Result<()> {
        let count = self.engine.transceivers().await?.len();
        if handle >= count {
            return Err(Error::handle_not_found(handle));
        }
        Ok(())
    }

    /// `None` mirrors calling `setCodecPreferences()` with no argument.
    pub async fn set_codec_preferences(&self, handle: usize, codecs: Option<Vec<Codec>>) -> Result<()> {
        let codecs = codecs
            .ok_or_else(|| Error::missing_argument("setCodecPreferences", "RTCRtpTransceiver"))?;
        self.check_handle(handle).await?;
        if self.support.codec_preferences {
            return self.engine.set_codec_preferences(handle, codecs).await;
        }
        debug!("transceiver {} codec preferences: {:?}", handle, codecs);
        self.attachments
            .write()
            .await
            .set_codec_preferences(handle, codecs);
        Ok(())
    }

    pub async fn set_streams(&self, handle: usize, stream_ids: Vec<String>) -> Result<()> {
        self.check_handle(handle).await?;
        if self.support.set_streams {
            return self.engine.set_streams(handle, stream_ids).await;
        }
        debug!("transceiver {} streams: {:?}", handle, stream_ids);
        self.attachments.write().await.set_streams(handle, stream_ids);
        Ok(())
    }

    /// Forgets everything attached to `handle`.
    pub async fn clear(&self, handle: usize) {
        self.attachments.write().await.clear(handle);
    }

    pub async fn create_offer(&self) -> Result<Description> {
        let offer = self.engine.create_offer().await?;
        self.adjust(offer).await
    }

    pub async fn create_answer(&self) -> Result<Description> {
        let answer = self.engine.create_answer().await?;
        self.adjust(answer).await
    }

    /// Rewrites a description produced by the engine with the current attachments.
    pub async fn adjust(&self, description: Description) -> Result<Description> {
        if description.sdp_type == SdpType::Rollback {
            return Ok(description);
        }
        if self.attachments.read().await.is_empty() {
            trace!("nothing attached, {} passes through", description.sdp_type);
            return Ok(description);
        }

        // no lock held while the engine is awaited
        let transceivers = self.engine.transceivers().await?;
        let attachments = self.attachments.read().await;
        let handles = attachments.media_handles(&transceivers);
        let rewritten = match transform(&description.sdp, description.sdp_type, &handles) {
            Cow::Borrowed(_) => None,
            Cow::Owned(sdp) => Some(sdp),
        };
        Ok(match rewritten {
            Some(sdp) => Description {
                sdp_type: description.sdp_type,
                sdp,
            },
            None => description,
        })
    }
}

impl<E: NegotiationEngine> Negotiator<E> {
    /// Callback flavour of [`Negotiator::create_offer`].
    pub fn create_offer_with<F>(self: &Arc<Self>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Description>) + Send + 'static,
    {
        let negotiator = self.clone();
        tokio::spawn(async move { callback(negotiator.create_offer().await) })
    }

    pub fn create_answer_with<F>(self: &Arc<Self>, callback: F) -> JoinHandle<()>
    where
        F: FnOnce(Result<Description>) + Send + 'static,
    {
        let negotiator = self.clone();
        tokio::spawn(async move { callback(negotiator.create_answer().await) })
    }
}
