//! Test utilities for Vasari Instagram tests.
//!
//! This module provides mock implementations of the publishing seams.

#![allow(dead_code)]

pub mod mock_gateway;
pub mod recording;

#[allow(unused_imports)]
pub use mock_gateway::{GatewayCall, MockGateway};
#[allow(unused_imports)]
pub use recording::{LedgerEvent, RecordingLedger, RecordingSleeper};

use std::time::Duration;
use vasari_core::{ContentMode, MediaReference, PublishRequest};
use vasari_instagram::{ContainerPoller, Publisher};

/// Media references from URL strings.
pub fn media(urls: &[&str]) -> Vec<MediaReference> {
    urls.iter().map(|url| MediaReference::new(*url)).collect()
}

/// A carousel request over `urls`.
pub fn carousel(caption: &str, urls: &[&str]) -> PublishRequest {
    PublishRequest::new(caption, media(urls), ContentMode::Carousel { location_id: None })
}

/// A reels request for one video.
pub fn reels(caption: &str, url: &str, share_to_feed: Option<bool>) -> PublishRequest {
    PublishRequest::new(
        caption,
        media(&[url]),
        ContentMode::Reels {
            cover_url: None,
            share_to_feed,
            location_id: None,
        },
    )
}

/// A stories request for one media reference.
pub fn stories(url: &str) -> PublishRequest {
    PublishRequest::new("", media(&[url]), ContentMode::Stories)
}

/// Publisher over `gateway` that records sleeps instead of waiting.
pub fn publisher(
    gateway: MockGateway,
    max_attempts: u32,
) -> (Publisher<MockGateway, RecordingSleeper>, MockGateway, RecordingSleeper) {
    let sleeper = RecordingSleeper::new();
    let poller = ContainerPoller::with_sleeper(
        sleeper.clone(),
        max_attempts,
        Duration::from_millis(2000),
    );
    let publisher = Publisher::new(std::sync::Arc::new(gateway.clone()), poller);
    (publisher, gateway, sleeper)
}
