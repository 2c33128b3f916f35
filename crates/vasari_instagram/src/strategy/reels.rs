//! Reels.

use super::{FinalStep, ModeStrategy, PlannedContainer, single_target, validate_single};
use reqwest::Url;
use vasari_core::{ContainerId, ContainerSpec, PublishRequest};
use vasari_error::{PublishError, PublishResult};

/// A single video, always polled.
#[derive(Debug, Clone, Copy)]
pub struct ReelsStrategy<'a> {
    cover_url: Option<&'a str>,
    share_to_feed: bool,
    location_id: Option<&'a str>,
}

impl<'a> ReelsStrategy<'a> {
    /// Strategy with the reel's optional fields resolved.
    pub fn new(cover_url: Option<&'a str>, share_to_feed: bool, location_id: Option<&'a str>) -> Self {
        Self {
            cover_url,
            share_to_feed,
            location_id,
        }
    }
}

impl ModeStrategy for ReelsStrategy<'_> {
    fn validate(&self, request: &PublishRequest) -> PublishResult<()> {
        validate_single(request, "Reels")?;

        if let Some(cover) = self.cover_url {
            let is_web_url = Url::parse(cover).is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
            if !is_web_url {
                return Err(PublishError::validation(format!(
                    "Cover URL must be an http(s) URL: {}",
                    cover
                )));
            }
        }

        Ok(())
    }

    fn container_plan(&self, request: &PublishRequest) -> Vec<PlannedContainer> {
        request
            .media()
            .iter()
            .take(1)
            .map(|video| PlannedContainer {
                spec: ContainerSpec::Reels {
                    video_url: video.clone(),
                    caption: request.caption().clone(),
                    cover_url: self.cover_url.map(str::to_string),
                    share_to_feed: self.share_to_feed,
                    location_id: self.location_id.map(str::to_string),
                },
                needs_polling: true,
            })
            .collect()
    }

    fn finalize(&self, ready: &[ContainerId], _request: &PublishRequest) -> PublishResult<FinalStep> {
        single_target(ready)
    }

    fn detail(&self, _request: &PublishRequest) -> &'static str {
        "Instagram Reels published successfully"
    }
}
