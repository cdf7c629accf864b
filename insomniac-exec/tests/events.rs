use std::sync::Arc;

use insomniac_core::{Request, RequestBody};
use insomniac_exec::{CompletionMap, CompletionRecord, Event, EventBus, Status};

fn record(id: &str, status: Status) -> Arc<CompletionRecord> {
    Arc::new(CompletionRecord {
        status,
        request: Arc::new(Request {
            id: id.to_string(),
            parent_id: "fld_1".to_string(),
            name: id.to_string(),
            method: "GET".to_string(),
            url: String::new(),
            description: None,
            body: RequestBody::default(),
            headers: Vec::new(),
            parameters: Vec::new(),
            meta_sort_key: None,
            dependency_ids: Vec::new(),
        }),
        response: None,
        error: None,
    })
}

#[tokio::test]
async fn every_subscriber_sees_events_in_order() {
    let bus = EventBus::new();
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();

    bus.publish(Event::Start);
    bus.publish(Event::RequestFinish(record("req_a", Status::Code(200))));

    for sub in [&mut first, &mut second] {
        assert!(matches!(sub.recv().await, Some(Event::Start)));
        match sub.recv().await {
            Some(Event::RequestFinish(r)) => assert_eq!(r.request_id(), "req_a"),
            other => panic!("expected requestFinish, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn late_subscribers_get_no_replay() {
    let bus = EventBus::new();
    bus.publish(Event::Start);

    let mut late = bus.subscribe();
    bus.publish(Event::RequestFinish(record("req_b", Status::Error)));
    bus.close();

    assert!(matches!(late.recv().await, Some(Event::RequestFinish(_))));
    assert!(late.recv().await.is_none());
}

#[tokio::test]
async fn dropped_subscriptions_are_pruned() {
    let bus = EventBus::new();
    let kept = bus.subscribe();
    let dropped = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 2);

    drop(dropped);
    bus.publish(Event::Start);
    assert_eq!(bus.subscriber_count(), 1);
    drop(kept);
}

#[tokio::test]
async fn closed_bus_ignores_new_subscribers() {
    let bus = EventBus::new();
    bus.close();

    let mut sub = bus.subscribe();
    bus.publish(Event::Start);
    assert_eq!(bus.subscriber_count(), 0);
    assert!(sub.recv().await.is_none());
}

#[test]
fn completion_map_is_write_once() {
    let mut map = CompletionMap::new(2);
    assert!(map.is_empty());

    assert!(map.record(record("req_a", Status::Code(200))));
    assert!(!map.record(record("req_a", Status::Error)));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("req_a").unwrap().status, Status::Code(200));
    assert!(!map.is_done());

    assert!(map.record(record("req_b", Status::NotRun)));
    assert!(map.is_done());
    assert_eq!(map.into_records().len(), 2);
}

#[test]
fn status_renders_like_the_report_column() {
    assert_eq!(Status::Code(404).to_string(), "404");
    assert_eq!(Status::Error.to_string(), "ERROR");
    assert_eq!(Status::NotRun.to_string(), "NOT RUN");
    assert_eq!(serde_json::to_value(Status::Code(200)).unwrap(), serde_json::json!(200));
    assert_eq!(serde_json::to_value(Status::NotRun).unwrap(), serde_json::json!("NOT RUN"));
}
