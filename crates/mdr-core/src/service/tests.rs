//! Validation and resolution tests with a fixed catalog and a scripted
//! transport.

use super::{DerivativeService, ResolveMode, THUMBNAIL_MAX, THUMBNAIL_MIN};
use crate::catalog::{
    Attachment, AttachmentId, Document, DocumentId, MediaKind, MemoryCatalog, ResourceRef,
};
use crate::error::DerivativeError;
use crate::resolution::FixedAxis;
use crate::transport::{GetOutcome, Transport};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const BASE: &str = "http://api.example.org/v2";

/// What the scripted transport should do on `get`.
enum Script {
    Respond(GetOutcome),
    Fail,
}

/// Transport double: returns a scripted outcome and counts calls.
struct ScriptedTransport {
    script: Script,
    calls: AtomicUsize,
}

impl ScriptedTransport {
    fn respond(status: u32, location: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Respond(GetOutcome {
                status,
                location: location.map(str::to_string),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    fn fail() -> Arc<Self> {
        Arc::new(Self {
            script: Script::Fail,
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, _url: &str) -> anyhow::Result<GetOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.script {
            Script::Respond(outcome) => Ok(outcome.clone()),
            Script::Fail => Err(anyhow::anyhow!("connection refused")),
        }
    }
}

fn image_doc() -> ResourceRef {
    DocumentId::new("http://x/doc/1").unwrap().into()
}

fn video_doc() -> ResourceRef {
    DocumentId::new("http://x/doc/2").unwrap().into()
}

fn video_attachment() -> ResourceRef {
    let parent = DocumentId::new("http://x/doc/1").unwrap();
    AttachmentId::new(parent, "http://x/doc/1/att/1")
        .unwrap()
        .into()
}

fn fixture_catalog() -> Arc<MemoryCatalog> {
    let mut catalog = MemoryCatalog::new();

    let doc1 = DocumentId::new("http://x/doc/1").unwrap();
    let att1 = AttachmentId::new(doc1.clone(), "http://x/doc/1/att/1").unwrap();
    catalog.insert(Document {
        id: doc1,
        media_kind: MediaKind::Image,
        attachments: vec![Attachment {
            id: att1,
            media_kind: MediaKind::Video,
        }],
    });

    catalog.insert(Document {
        id: DocumentId::new("http://x/doc/2").unwrap(),
        media_kind: MediaKind::Video,
        attachments: Vec::new(),
    });

    Arc::new(catalog)
}

fn service_with(transport: Arc<ScriptedTransport>) -> DerivativeService {
    DerivativeService::new(BASE, fixture_catalog(), transport)
}

fn immediate_service() -> (DerivativeService, Arc<ScriptedTransport>) {
    let transport = ScriptedTransport::respond(303, Some("http://real/x.jpg"));
    (service_with(Arc::clone(&transport)), transport)
}

#[test]
fn thumbnail_size_bounds() {
    let (service, _) = immediate_service();
    for bad in [THUMBNAIL_MIN - 1, THUMBNAIL_MAX + 1] {
        let err = service
            .thumbnail_url(&image_doc(), bad, ResolveMode::Immediate)
            .unwrap_err();
        assert!(matches!(err, DerivativeError::SizeOutOfRange { .. }), "size {bad}");
    }
    for good in [THUMBNAIL_MIN, THUMBNAIL_MAX] {
        let url = service
            .thumbnail_url(&image_doc(), good, ResolveMode::Immediate)
            .unwrap();
        assert!(url.is_some(), "size {good}");
    }
}

#[test]
fn thumbnail_accepts_any_media_kind() {
    let (service, _) = immediate_service();
    assert!(service
        .thumbnail_url(&video_doc(), 64, ResolveMode::Immediate)
        .unwrap()
        .is_some());
}

#[test]
fn thumbnail_exact_request_url() {
    let (service, _) = immediate_service();
    let url = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://api.example.org/v2/process/generic/thumbnail\
         ?item=http%3A%2F%2Fx%2Fdoc%2F1&async=false&size=128"
    );
}

#[test]
fn unknown_document_is_not_found() {
    let (service, _) = immediate_service();
    let ghost: ResourceRef = DocumentId::new("http://x/doc/ghost").unwrap().into();
    let err = service
        .thumbnail_url(&ghost, 128, ResolveMode::Immediate)
        .unwrap_err();
    assert!(matches!(err, DerivativeError::NotFound { .. }));
}

#[test]
fn image_size_must_be_positive() {
    let (service, _) = immediate_service();
    let err = service
        .image_url(&image_doc(), 0, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap_err();
    assert!(matches!(err, DerivativeError::NonPositiveSize(0)));

    // size 1 passes the size check
    assert!(service
        .image_url(&image_doc(), 1, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap()
        .is_some());
}

#[test]
fn image_requires_image_media_kind() {
    let (service, _) = immediate_service();
    let err = service
        .image_url(&video_doc(), 640, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap_err();
    match err {
        DerivativeError::MediaKindMismatch { expected, actual } => {
            assert_eq!(expected, MediaKind::Image);
            assert_eq!(actual, MediaKind::Video);
        }
        other => panic!("expected media kind mismatch, got {other:?}"),
    }
}

#[test]
fn image_request_carries_resolution() {
    let (service, _) = immediate_service();
    let url = service
        .image_url(&image_doc(), 640, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert!(url.as_str().ends_with("&async=false&resolution=640xY"));

    let url = service
        .image_url(&image_doc(), 480, FixedAxis::Height, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert!(url.as_str().ends_with("&async=false&resolution=Xx480"));
}

#[test]
fn video_still_defaults_to_middle() {
    let (service, _) = immediate_service();
    let url = service
        .video_still_url(&video_doc(), 720, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert!(url.as_str().ends_with("&timecode=0.5"));
}

#[test]
fn video_timecode_bounds() {
    let (service, _) = immediate_service();
    for bad in [-0.01f32, 1.01] {
        let err = service
            .video_still_url_at(&video_doc(), 720, FixedAxis::Width, bad, ResolveMode::Immediate)
            .unwrap_err();
        assert!(matches!(err, DerivativeError::TimeOutOfRange(_)), "time {bad}");
    }
    for good in [0.0f32, 1.0] {
        let url = service
            .video_still_url_at(&video_doc(), 720, FixedAxis::Width, good, ResolveMode::Immediate)
            .unwrap();
        assert!(url.is_some(), "time {good}");
    }
}

#[test]
fn video_still_requires_video_media_kind() {
    let (service, _) = immediate_service();
    let err = service
        .video_still_url(&image_doc(), 720, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap_err();
    assert!(matches!(
        err,
        DerivativeError::MediaKindMismatch {
            expected: MediaKind::Video,
            actual: MediaKind::Image,
        }
    ));
}

#[test]
fn attachment_resolves_through_parent_document() {
    let (service, _) = immediate_service();
    // The attachment is a video inside an image document.
    let url = service
        .video_still_url(&video_attachment(), 360, FixedAxis::Height, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert!(url
        .as_str()
        .contains("item=http%3A%2F%2Fx%2Fdoc%2F1%2Fatt%2F1"));
}

#[test]
fn unknown_attachment_is_not_found() {
    let (service, _) = immediate_service();
    let parent = DocumentId::new("http://x/doc/1").unwrap();
    let ghost: ResourceRef = AttachmentId::new(parent, "http://x/doc/1/att/ghost")
        .unwrap()
        .into();
    let err = service
        .thumbnail_url(&ghost, 64, ResolveMode::Immediate)
        .unwrap_err();
    assert!(matches!(err, DerivativeError::NotFound { .. }));
}

#[test]
fn attachment_with_missing_parent_is_not_found() {
    let (service, _) = immediate_service();
    let parent = DocumentId::new("http://x/doc/ghost").unwrap();
    let orphan: ResourceRef = AttachmentId::new(parent, "http://x/doc/ghost/att/1")
        .unwrap()
        .into();
    let err = service
        .thumbnail_url(&orphan, 64, ResolveMode::Immediate)
        .unwrap_err();
    assert!(matches!(err, DerivativeError::NotFound { .. }));
}

#[test]
fn immediate_mode_never_touches_transport() {
    let (service, transport) = immediate_service();
    service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Immediate)
        .unwrap();
    service
        .image_url(&image_doc(), 640, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap();
    service
        .video_still_url(&video_doc(), 720, FixedAxis::Width, ResolveMode::Immediate)
        .unwrap();
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn immediate_mode_is_idempotent() {
    let (service, _) = immediate_service();
    let first = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    let second = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert_eq!(first.as_str(), second.as_str());
}

#[test]
fn resolved_mode_returns_redirect_target_on_303() {
    let transport = ScriptedTransport::respond(303, Some("http://real/x.jpg"));
    let service = service_with(Arc::clone(&transport));
    let url = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Resolved)
        .unwrap()
        .unwrap();
    assert_eq!(url.as_str(), "http://real/x.jpg");
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn resolved_mode_rejection_yields_none() {
    for status in [400, 404, 500] {
        let transport = ScriptedTransport::respond(status, None);
        let service = service_with(Arc::clone(&transport));
        let url = service
            .thumbnail_url(&image_doc(), 128, ResolveMode::Resolved)
            .unwrap();
        assert!(url.is_none(), "status {status}");
        assert_eq!(transport.call_count(), 1);
    }
}

#[test]
fn resolved_mode_transport_failure_yields_none() {
    let transport = ScriptedTransport::fail();
    let service = service_with(Arc::clone(&transport));
    let url = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Resolved)
        .unwrap();
    assert!(url.is_none());
    assert_eq!(transport.call_count(), 1);
}

#[test]
fn resolved_mode_303_without_location_yields_none() {
    let transport = ScriptedTransport::respond(303, None);
    let service = service_with(Arc::clone(&transport));
    let url = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Resolved)
        .unwrap();
    assert!(url.is_none());
}

#[test]
fn validation_failure_skips_transport_in_resolved_mode() {
    let transport = ScriptedTransport::respond(303, Some("http://real/x.jpg"));
    let service = service_with(Arc::clone(&transport));
    assert!(service
        .thumbnail_url(&image_doc(), 1000, ResolveMode::Resolved)
        .is_err());
    assert_eq!(transport.call_count(), 0);
}

#[test]
fn service_url_trailing_slash_is_normalized() {
    let transport = ScriptedTransport::respond(303, None);
    let service = DerivativeService::new(
        "http://api.example.org/v2/",
        fixture_catalog(),
        transport,
    );
    let url = service
        .thumbnail_url(&image_doc(), 128, ResolveMode::Immediate)
        .unwrap()
        .unwrap();
    assert!(url
        .as_str()
        .starts_with("http://api.example.org/v2/process/"));
}
