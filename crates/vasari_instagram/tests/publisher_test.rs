//! Tests for the publishing orchestrator.

mod test_utils;

use std::time::Duration;
use test_utils::{GatewayCall, MockGateway, carousel, media, publisher, reels, stories};
use vasari_core::{
    ContainerId, ContainerSpec, ContainerStatus, ContentMode, FailureKind, MediaReference,
    PublishOutcome, PublishRequest, PublishStage, RemoteMediaId,
};
use vasari_error::PublishErrorKind;

const IMAGES: [&str; 3] = [
    "https://cdn.example.com/1.jpg",
    "https://cdn.example.com/2.jpg",
    "https://cdn.example.com/3.jpg",
];

#[tokio::test]
async fn test_single_image_publishes_without_parent() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    let outcome = publisher.publish(&carousel("Hello", &IMAGES[..1])).await;

    assert_eq!(
        outcome,
        PublishOutcome::Published {
            remote_media_id: RemoteMediaId::new("media-container-1"),
            detail: "Instagram post published successfully".to_string(),
        }
    );
    assert_eq!(
        gateway.creates(),
        vec![ContainerSpec::Image {
            image_url: MediaReference::new(IMAGES[0]),
            caption: Some("Hello".to_string()),
            location_id: None,
        }]
    );
    assert_eq!(gateway.publishes(), vec![ContainerId::new("container-1")]);
}

#[tokio::test]
async fn test_carousel_creates_parent_after_children_ready() {
    let gateway = MockGateway::new()
        .with_statuses_for("container-2", vec![ContainerStatus::InProgress, ContainerStatus::Finished]);
    let (publisher, gateway, sleeper) = publisher(gateway, 30);

    let outcome = publisher.publish(&carousel("Trio", &IMAGES)).await;

    assert!(outcome.is_published());
    assert_eq!(outcome.message(), "Instagram carousel published successfully");

    let creates = gateway.creates();
    assert_eq!(creates.len(), 4);
    for (spec, url) in creates.iter().zip(IMAGES) {
        assert_eq!(
            spec,
            &ContainerSpec::CarouselItem {
                image_url: MediaReference::new(url),
            }
        );
    }
    assert_eq!(
        creates[3],
        ContainerSpec::Carousel {
            children: vec![
                ContainerId::new("container-1"),
                ContainerId::new("container-2"),
                ContainerId::new("container-3"),
            ],
            caption: "Trio".to_string(),
            location_id: None,
        }
    );

    // Every child is checked before the parent is created.
    let calls = gateway.calls();
    let parent_at = calls
        .iter()
        .position(|call| matches!(call, GatewayCall::Create(ContainerSpec::Carousel { .. })))
        .unwrap();
    let last_check = calls
        .iter()
        .rposition(|call| matches!(call, GatewayCall::Status(_)))
        .unwrap();
    assert!(last_check < parent_at);

    assert_eq!(gateway.status_checks().len(), 4);
    assert_eq!(sleeper.sleeps().len(), 1);
    assert_eq!(gateway.publishes(), vec![ContainerId::new("container-4")]);
}

#[tokio::test]
async fn test_carousel_children_follow_media_order_not_completion_order() {
    let gateway = MockGateway::new().delaying_create(1, Duration::from_millis(50));
    let (publisher, gateway, _) = publisher(gateway, 30);

    let outcome = publisher.publish(&carousel("Trio", &IMAGES)).await;
    assert!(outcome.is_published());

    // The first image's container is created last.
    let completed: Vec<ContainerId> = gateway.created().into_iter().map(|(_, id)| id).collect();
    assert_eq!(completed[0], ContainerId::new("container-1"));
    let first_image = gateway
        .id_for(&ContainerSpec::CarouselItem {
            image_url: MediaReference::new(IMAGES[0]),
        })
        .unwrap();
    assert_eq!(first_image, ContainerId::new("container-3"));

    let in_media_order: Vec<ContainerId> = IMAGES
        .iter()
        .map(|url| {
            gateway
                .id_for(&ContainerSpec::CarouselItem {
                    image_url: MediaReference::new(*url),
                })
                .unwrap()
        })
        .collect();
    let parent = gateway
        .creates()
        .into_iter()
        .find(|spec| matches!(spec, ContainerSpec::Carousel { .. }))
        .unwrap();
    assert!(matches!(
        parent,
        ContainerSpec::Carousel { children, .. } if children == in_media_order
    ));
}

#[tokio::test]
async fn test_carousel_rejects_video_without_remote_calls() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    let outcome = publisher
        .publish(&carousel(
            "Mixed",
            &["https://cdn.example.com/a.jpg", "https://cdn.example.com/b.MP4"],
        ))
        .await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
    assert!(outcome.message().contains("Carousel only supports images"));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_carousel_rejects_more_than_ten_items() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);
    let urls: Vec<String> = (0..11)
        .map(|i| format!("https://cdn.example.com/{}.jpg", i))
        .collect();
    let urls: Vec<&str> = urls.iter().map(String::as_str).collect();

    let outcome = publisher.publish(&carousel("Too many", &urls)).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
    assert!(outcome.message().contains("maximum 10 items"));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_empty_media_is_rejected() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    let outcome = publisher.publish(&carousel("Nothing", &[])).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_caption_over_limit_is_rejected() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);
    let caption = "a".repeat(2201);

    let outcome = publisher.publish(&carousel(&caption, &IMAGES[..1])).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_failed_child_stops_before_parent() {
    let gateway = MockGateway::new().with_statuses_for("container-2", vec![ContainerStatus::Error]);
    let (publisher, gateway, _) = publisher(gateway, 30);

    let outcome = publisher.publish(&carousel("Trio", &IMAGES)).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::ProcessingFailed));
    assert!(outcome.message().contains("container-2"));
    assert_eq!(gateway.creates().len(), 3);
    assert!(gateway.publishes().is_empty());
}

#[tokio::test]
async fn test_first_create_failure_in_media_order_wins() {
    let gateway = MockGateway::new()
        .failing_create(2, PublishErrorKind::RemoteRejection("second".to_string()))
        .failing_create(3, PublishErrorKind::RemoteRejection("third".to_string()));
    let (publisher, gateway, _) = publisher(gateway, 30);

    let outcome = publisher.publish(&carousel("Trio", &IMAGES)).await;

    assert_eq!(
        outcome,
        PublishOutcome::Failed {
            error_kind: FailureKind::RemoteRejection,
            message: "Instagram API error: second".to_string(),
        }
    );
    assert!(gateway.status_checks().is_empty());
    assert!(gateway.publishes().is_empty());
}

#[tokio::test]
async fn test_first_failure_in_media_order_wins_when_it_completes_last() {
    let gateway = MockGateway::new()
        .delaying_create(1, Duration::from_millis(50))
        .failing_create(1, PublishErrorKind::RemoteRejection("first".to_string()))
        .failing_create(2, PublishErrorKind::RemoteRejection("second".to_string()));
    let (publisher, _, _) = publisher(gateway, 30);

    let outcome = publisher.publish(&carousel("Trio", &IMAGES)).await;

    assert_eq!(outcome.message(), "Instagram API error: first");
}

#[tokio::test]
async fn test_reels_share_to_feed_defaults_to_true() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    let outcome = publisher
        .publish(&reels("Clip", "https://cdn.example.com/clip.mp4", None))
        .await;

    assert_eq!(outcome.message(), "Instagram Reels published successfully");
    let creates = gateway.creates();
    assert!(matches!(
        &creates[0],
        ContainerSpec::Reels { share_to_feed: true, .. }
    ));
    assert!(
        creates[0]
            .form_fields()
            .contains(&("share_to_feed", "true".to_string()))
    );
    assert_eq!(gateway.status_checks().len(), 1);
}

#[tokio::test]
async fn test_reels_share_to_feed_false_is_sent() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    publisher
        .publish(&reels("Clip", "https://cdn.example.com/clip.mp4", Some(false)))
        .await;

    assert!(
        gateway.creates()[0]
            .form_fields()
            .contains(&("share_to_feed", "false".to_string()))
    );
}

#[tokio::test]
async fn test_reels_sends_any_reference_as_video() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    let outcome = publisher
        .publish(&reels("Clip", "https://cdn.example.com/render?id=42", None))
        .await;

    assert!(outcome.is_published());
    assert!(
        gateway.creates()[0]
            .form_fields()
            .contains(&("video_url", "https://cdn.example.com/render?id=42".to_string()))
    );
    assert_eq!(gateway.status_checks().len(), 1);
}

#[tokio::test]
async fn test_reels_rejects_malformed_cover() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);
    let request = PublishRequest::new(
        "Clip",
        media(&["https://cdn.example.com/clip.mp4"]),
        ContentMode::Reels {
            cover_url: Some("cover.jpg".to_string()),
            share_to_feed: None,
            location_id: None,
        },
    );

    let outcome = publisher.publish(&request).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
    assert!(outcome.message().contains("Cover URL"));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_reels_accepts_https_cover() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);
    let request = PublishRequest::new(
        "Clip",
        media(&["https://cdn.example.com/clip.mp4"]),
        ContentMode::Reels {
            cover_url: Some("https://cdn.example.com/cover.jpg".to_string()),
            share_to_feed: None,
            location_id: None,
        },
    );

    let outcome = publisher.publish(&request).await;

    assert!(outcome.is_published());
    assert!(
        gateway.creates()[0]
            .form_fields()
            .contains(&("cover_url", "https://cdn.example.com/cover.jpg".to_string()))
    );
}

#[tokio::test]
async fn test_reels_requires_exactly_one_media() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);
    let request = PublishRequest::new(
        "Two clips",
        media(&["https://cdn.example.com/a.mp4", "https://cdn.example.com/b.mp4"]),
        ContentMode::Reels {
            cover_url: None,
            share_to_feed: None,
            location_id: None,
        },
    );

    let outcome = publisher.publish(&request).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Validation));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_stories_image_skips_polling() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);

    let outcome = publisher
        .publish(&stories("https://cdn.example.com/story.jpg"))
        .await;

    assert_eq!(outcome.message(), "Instagram Stories published successfully");
    assert!(gateway.status_checks().is_empty());
    assert_eq!(gateway.publishes().len(), 1);
}

#[tokio::test]
async fn test_stories_video_is_polled() {
    let gateway = MockGateway::new().with_statuses(vec![
        ContainerStatus::InProgress,
        ContainerStatus::Finished,
    ]);
    let (publisher, gateway, sleeper) = publisher(gateway, 30);

    let outcome = publisher
        .publish(&stories("https://cdn.example.com/story.mp4?sig=abc"))
        .await;

    assert!(outcome.is_published());
    assert_eq!(gateway.status_checks().len(), 2);
    assert_eq!(sleeper.sleeps().len(), 1);
    assert_eq!(
        gateway.creates(),
        vec![ContainerSpec::Stories {
            media: MediaReference::new("https://cdn.example.com/story.mp4?sig=abc"),
        }]
    );
}

#[tokio::test]
async fn test_reels_timeout_is_retryable_failure() {
    let gateway = MockGateway::new().with_statuses(vec![ContainerStatus::InProgress]);
    let (publisher, gateway, sleeper) = publisher(gateway, 30);

    let outcome = publisher
        .publish(&reels("Clip", "https://cdn.example.com/clip.mov", None))
        .await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::ProcessingTimeout));
    assert!(outcome.message().contains("within 30 attempts"));
    assert_eq!(gateway.status_checks().len(), 30);
    assert_eq!(sleeper.sleeps().len(), 29);
    assert!(gateway.publishes().is_empty());
}

#[tokio::test]
async fn test_publish_rejection_is_reported() {
    let gateway = MockGateway::new().failing_publish(PublishErrorKind::RemoteRejection(
        "Media ID is not available".to_string(),
    ));
    let (publisher, _, _) = publisher(gateway, 30);

    let outcome = publisher.publish(&carousel("Hi", &IMAGES[..1])).await;

    assert_eq!(
        outcome,
        PublishOutcome::Failed {
            error_kind: FailureKind::RemoteRejection,
            message: "Instagram API error: Media ID is not available".to_string(),
        }
    );
}

#[tokio::test]
async fn test_unconfigured_gateway_makes_no_calls() {
    let (publisher, gateway, _) = publisher(MockGateway::new().unconfigured(), 30);

    let outcome = publisher.publish(&carousel("Hi", &IMAGES[..1])).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::Configuration));
    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn test_retry_uses_fresh_containers() {
    let (publisher, gateway, _) = publisher(MockGateway::new(), 30);
    let request = carousel("Again", &IMAGES[..1]);

    let first = publisher.publish(&request).await;
    let second = publisher.publish(&request).await;

    assert_eq!(
        first.remote_media_id(),
        Some(&RemoteMediaId::new("media-container-1"))
    );
    assert_eq!(
        second.remote_media_id(),
        Some(&RemoteMediaId::new("media-container-2"))
    );
    assert_eq!(
        gateway.publishes(),
        vec![ContainerId::new("container-1"), ContainerId::new("container-2")]
    );
}

#[tokio::test]
async fn test_stage_path_on_success() {
    let (publisher, _, _) = publisher(MockGateway::new(), 30);

    let (outcome, attempt) = publisher.publish_traced(&carousel("Trio", &IMAGES)).await;

    assert!(outcome.is_published());
    assert_eq!(
        attempt.stages(),
        &[
            PublishStage::Validating,
            PublishStage::CreatingContainers,
            PublishStage::Polling,
            PublishStage::Finalizing,
            PublishStage::Publishing,
            PublishStage::Succeeded,
        ]
    );
}

#[tokio::test]
async fn test_stage_path_on_validation_failure() {
    let (publisher, _, _) = publisher(MockGateway::new(), 30);

    let (_, attempt) = publisher.publish_traced(&carousel("Empty", &[])).await;

    assert_eq!(
        attempt.stages(),
        &[PublishStage::Validating, PublishStage::Failed]
    );
    assert_eq!(attempt.stage(), PublishStage::Failed);
}

#[tokio::test]
async fn test_stage_path_on_polling_failure() {
    let gateway = MockGateway::new().with_statuses(vec![ContainerStatus::Error]);
    let (publisher, _, _) = publisher(gateway, 30);

    let (_, attempt) = publisher
        .publish_traced(&reels("Clip", "https://cdn.example.com/clip.mp4", None))
        .await;

    assert_eq!(
        attempt.stages(),
        &[
            PublishStage::Validating,
            PublishStage::CreatingContainers,
            PublishStage::Polling,
            PublishStage::Failed,
        ]
    );
}
