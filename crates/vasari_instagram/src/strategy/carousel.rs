//! Image posts and carousels.

use super::{FinalStep, ModeStrategy, PlannedContainer, validate_common};
use vasari_core::{ContainerId, ContainerSpec, MAX_MEDIA_ITEMS, PublishRequest};
use vasari_error::{PublishError, PublishResult};

/// Images only. One image is published directly; several become bare
/// carousel items under a parent that carries the caption and location.
#[derive(Debug, Clone, Copy)]
pub struct CarouselStrategy<'a> {
    location_id: Option<&'a str>,
}

impl<'a> CarouselStrategy<'a> {
    /// Strategy tagging the post with `location_id`.
    pub fn new(location_id: Option<&'a str>) -> Self {
        Self { location_id }
    }
}

impl ModeStrategy for CarouselStrategy<'_> {
    fn validate(&self, request: &PublishRequest) -> PublishResult<()> {
        if request.media().len() > MAX_MEDIA_ITEMS {
            return Err(PublishError::validation(format!(
                "Carousel posts can have maximum {} items",
                MAX_MEDIA_ITEMS
            )));
        }

        validate_common(request, "Media URLs array is required for carousel posts")?;

        if request.media().iter().any(|m| m.is_video()) {
            return Err(PublishError::validation(
                "Carousel only supports images. Please use Reels type for video content.",
            ));
        }

        Ok(())
    }

    fn container_plan(&self, request: &PublishRequest) -> Vec<PlannedContainer> {
        match request.media().as_slice() {
            [single] => vec![PlannedContainer {
                spec: ContainerSpec::Image {
                    image_url: single.clone(),
                    caption: Some(request.caption().clone()),
                    location_id: self.location_id.map(str::to_string),
                },
                needs_polling: true,
            }],
            media => media
                .iter()
                .map(|image| PlannedContainer {
                    spec: ContainerSpec::CarouselItem {
                        image_url: image.clone(),
                    },
                    needs_polling: true,
                })
                .collect(),
        }
    }

    fn finalize(&self, ready: &[ContainerId], request: &PublishRequest) -> PublishResult<FinalStep> {
        match ready {
            [] => Err(PublishError::validation("No carousel containers were created")),
            [single] => Ok(FinalStep::Publish(single.clone())),
            children => Ok(FinalStep::CreateParent(ContainerSpec::Carousel {
                children: children.to_vec(),
                caption: request.caption().clone(),
                location_id: self.location_id.map(str::to_string),
            })),
        }
    }

    fn detail(&self, request: &PublishRequest) -> &'static str {
        if request.media().len() > 1 {
            "Instagram carousel published successfully"
        } else {
            "Instagram post published successfully"
        }
    }
}
