//! Stories.

use super::{FinalStep, ModeStrategy, PlannedContainer, single_target, validate_single};
use vasari_core::{ContainerId, ContainerSpec, PublishRequest};
use vasari_error::PublishResult;

/// A single image or video without caption or location. Images are ready as
/// soon as they are created; only videos are polled.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoriesStrategy;

impl ModeStrategy for StoriesStrategy {
    fn validate(&self, request: &PublishRequest) -> PublishResult<()> {
        validate_single(request, "Stories")
    }

    fn container_plan(&self, request: &PublishRequest) -> Vec<PlannedContainer> {
        request
            .media()
            .iter()
            .take(1)
            .map(|media| PlannedContainer {
                spec: ContainerSpec::Stories {
                    media: media.clone(),
                },
                needs_polling: media.is_video(),
            })
            .collect()
    }

    fn finalize(&self, ready: &[ContainerId], _request: &PublishRequest) -> PublishResult<FinalStep> {
        single_target(ready)
    }

    fn detail(&self, _request: &PublishRequest) -> &'static str {
        "Instagram Stories published successfully"
    }
}
