pub mod attachments;
pub mod capabilities;
pub mod config;
pub mod engine;
pub mod error;
pub mod result;
pub mod rtc;

pub use sdpmunge;

pub use attachments::Attachments;
pub use capabilities::{capabilities_from_offer, Discoverer, RtpCapabilities, Snapshot};
pub use engine::{Description, MediaKind, NegotiationEngine, Negotiator, OfferProbe};
pub use error::Error;
