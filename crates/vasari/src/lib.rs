//! Vasari - Instagram publishing orchestrator
//!
//! Vasari turns a logical post (a caption, one or more media URLs and a
//! content mode) into the Instagram Graph API's container protocol: create
//! containers, poll until the platform has processed them, then publish.
//!
//! # Content Modes
//!
//! - **Carousel**: one image published directly, or up to ten images under a
//!   carousel parent
//! - **Reels**: exactly one video, optionally shared to the main feed
//! - **Stories**: exactly one image or video
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vasari::{
//!     ContainerPoller, GraphGateway, InstagramConfig, JsonFileLedger, PostService,
//!     PublishPayload, Publisher,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(InstagramConfig::load()?);
//!     let publisher = Publisher::new(
//!         Arc::new(GraphGateway::new(config.clone())),
//!         ContainerPoller::from_config(config.polling()),
//!     );
//!     let service = PostService::new(publisher, Arc::new(JsonFileLedger::new("posts.json")));
//!
//!     let payload: PublishPayload = serde_json::from_str(
//!         r#"{"caption": "Hello", "media_urls": ["https://cdn.example.com/a.jpg"]}"#,
//!     )?;
//!     let record = service.upload(payload).await?;
//!     println!("{}", record.status());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `vasari_error` - Error types
//! - `vasari_core` - Requests, containers, outcomes and post records
//! - `vasari_interface` - Gateway, ledger, sleeper and configuration traits
//! - `vasari_instagram` - Graph API gateway, poller, mode strategies and orchestrator
//!
//! This crate (`vasari`) re-exports everything for convenience.

pub use vasari_core::*;
pub use vasari_error::*;
pub use vasari_instagram::*;
pub use vasari_interface::*;

pub mod telemetry;
