//! Instagram publishing for the Vasari toolkit.
//!
//! Turns one logical post into the Graph API's two-phase protocol: create
//! media containers, wait until the platform has processed them, then publish.
//!
//! # Architecture
//!
//! - [`GraphGateway`] speaks HTTP to the Graph API
//! - [`ContainerPoller`] waits for container readiness with a bounded budget
//! - [`strategy`] holds the per-mode rules for Carousel, Reels and Stories
//! - [`Publisher`] orchestrates one attempt and never lets a gateway error escape
//! - [`PostService`] records each attempt in a [`vasari_interface::PostLedger`]
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use vasari_core::{ContentMode, MediaReference, PublishRequest};
//! use vasari_instagram::{ContainerPoller, GraphGateway, InstagramConfig, Publisher};
//!
//! # async fn example() -> vasari_error::VasariResult<()> {
//! let config = Arc::new(InstagramConfig::load()?);
//! let publisher = Publisher::new(
//!     Arc::new(GraphGateway::new(config.clone())),
//!     ContainerPoller::from_config(config.polling()),
//! );
//!
//! let request = PublishRequest::new(
//!     "Behind the scenes",
//!     vec![MediaReference::new("https://cdn.example.com/clip.mp4")],
//!     ContentMode::Stories,
//! );
//! let outcome = publisher.publish(&request).await;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gateway;
mod ledger;
mod poller;
mod publisher;
mod service;
pub mod strategy;

pub use config::{
    InstagramConfig, InstagramConfigBuilder, PollingConfig, PollingConfigBuilder,
    missing_credentials,
};
pub use gateway::{GraphGateway, remote_error_message};
pub use ledger::{InMemoryLedger, JsonFileLedger};
pub use poller::ContainerPoller;
pub use publisher::{PublishAttempt, Publisher};
pub use service::PostService;
pub use strategy::{
    CarouselStrategy, FinalStep, ModeStrategy, PlannedContainer, ReelsStrategy, StoriesStrategy,
};
