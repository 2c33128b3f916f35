//! Core data types for the Vasari publishing toolkit.
//!
//! This crate provides the types shared by the gateway, the orchestrator and
//! the ledger adapters: what a caller asks to publish, what the platform hands
//! back, and what gets recorded about a post.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod container;
mod container_spec;
mod media;
mod outcome;
mod payload;
mod post;
mod request;
mod stage;

pub use container::{ContainerId, ContainerState, ContainerStatus, MediaContainer, RemoteMediaId};
pub use container_spec::ContainerSpec;
pub use media::{MediaKind, MediaReference, VIDEO_EXTENSIONS};
pub use outcome::{FailureKind, PublishOutcome};
pub use payload::{PublishPayload, PublishPayloadBuilder};
pub use post::{GroupRef, PostRecord, PostRef, PostStatus};
pub use request::{
    ContentMode, MAX_CAPTION_CHARS, MAX_MEDIA_ITEMS, MediaMode, PublishRequest,
    PublishRequestBuilder,
};
pub use stage::PublishStage;
