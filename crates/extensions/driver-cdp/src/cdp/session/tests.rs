use railbook_protocols::ReadyState;
use serde_json::json;

use super::navigation::{document_ready, LifecycleWatch};
use crate::cdp::protocol::CdpResponse;

fn lifecycle(frame_id: &str, loader_id: &str, name: &str) -> CdpResponse {
    serde_json::from_value(json!({
        "method": "Page.lifecycleEvent",
        "params": {"frameId": frame_id, "loaderId": loader_id, "name": name, "timestamp": 1.0},
        "sessionId": "S1",
    }))
    .unwrap()
}

#[test]
fn test_dom_content_loaded_accepts_interactive() {
    assert!(document_ready(ReadyState::DomContentLoaded, "interactive"));
    assert!(document_ready(ReadyState::DomContentLoaded, "complete"));
    assert!(!document_ready(ReadyState::DomContentLoaded, "loading"));
}

#[test]
fn test_load_requires_complete() {
    assert!(!document_ready(ReadyState::Load, "interactive"));
    assert!(document_ready(ReadyState::Load, "complete"));
}

#[test]
fn test_network_idle_starts_from_complete() {
    assert!(!document_ready(ReadyState::NetworkIdle, "interactive"));
    assert!(document_ready(ReadyState::NetworkIdle, "complete"));
}

#[test]
fn test_stale_document_does_not_count_as_loaded() {
    // The old document already reported "complete"; its events say nothing
    // about the navigation that replaced it.
    let mut watch = LifecycleWatch::new("F1", "NEW");
    watch.observe(&lifecycle("F1", "OLD", "DOMContentLoaded"));
    watch.observe(&lifecycle("F1", "OLD", "load"));
    watch.observe(&lifecycle("F1", "OLD", "networkIdle"));

    assert!(!watch.reached(ReadyState::DomContentLoaded));
    assert!(!watch.reached(ReadyState::Load));
    assert!(!watch.reached(ReadyState::NetworkIdle));
}

#[test]
fn test_new_document_milestones_in_order() {
    let mut watch = LifecycleWatch::new("F1", "NEW");
    watch.observe(&lifecycle("F1", "NEW", "init"));
    assert!(!watch.reached(ReadyState::DomContentLoaded));

    watch.observe(&lifecycle("F1", "NEW", "DOMContentLoaded"));
    assert!(watch.reached(ReadyState::DomContentLoaded));
    assert!(!watch.reached(ReadyState::Load));

    watch.observe(&lifecycle("F1", "NEW", "load"));
    assert!(watch.reached(ReadyState::Load));
    assert!(!watch.reached(ReadyState::NetworkIdle));

    watch.observe(&lifecycle("F1", "NEW", "networkIdle"));
    assert!(watch.reached(ReadyState::NetworkIdle));
}

#[test]
fn test_other_frames_and_events_ignored() {
    let mut watch = LifecycleWatch::new("F1", "NEW");
    watch.observe(&lifecycle("CHILD", "NEW", "load"));

    let other: CdpResponse = serde_json::from_value(json!({
        "method": "Page.loadEventFired",
        "params": {"timestamp": 1.0},
    }))
    .unwrap();
    watch.observe(&other);

    assert!(!watch.reached(ReadyState::Load));
}
