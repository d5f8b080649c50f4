use relay::serde_json::json;
use relay::{ClientEvent, ConnectionId, ServerEvent, SessionRegistry};

/// Mirrors the relay server's delivery decision: snapshot the viewer set and
/// exclude the sender. An absent session means nothing is delivered at all.
fn deliveries(registry: &SessionRegistry, presenter: &str, sender: ConnectionId) -> Vec<ConnectionId> {
    let mut viewers: Vec<ConnectionId> = registry
        .viewers_of(presenter)
        .unwrap_or_default()
        .into_iter()
        .filter(|conn| *conn != sender)
        .collect();
    viewers.sort_unstable();
    viewers
}

const T1: ConnectionId = 1;
const S1: ConnectionId = 2;
const S2: ConnectionId = 3;

#[test]
fn it_delivers_strokes_to_joined_viewers_only() {
    let mut registry = SessionRegistry::new();

    registry.open_session("t1", T1);
    registry.join("t1", S1);

    // S1 receives the stroke, S2 (never joined) and the presenter do not.
    assert_eq!(deliveries(&registry, "t1", T1), vec![S1]);
}

#[test]
fn it_stops_delivering_after_end_session_until_viewers_rejoin() {
    let mut registry = SessionRegistry::new();

    registry.open_session("t1", T1);
    registry.join("t1", S1);
    registry.close_session("t1");

    assert_eq!(deliveries(&registry, "t1", T1), Vec::<ConnectionId>::new());

    // The presenter reconnects and opens again; S1 has not re-joined, so the
    // new session starts with nobody watching.
    registry.remove_connection(T1);
    let t1_again: ConnectionId = 4;
    registry.open_session("t1", t1_again);
    assert_eq!(deliveries(&registry, "t1", t1_again), Vec::<ConnectionId>::new());

    registry.join("t1", S1);
    assert_eq!(deliveries(&registry, "t1", t1_again), vec![S1]);
}

#[test]
fn it_never_crosses_strokes_between_presenters() {
    let mut registry = SessionRegistry::new();
    let t2: ConnectionId = 4;

    registry.open_session("t1", T1);
    registry.open_session("t2", t2);
    registry.join("t1", S1);
    registry.join("t2", S2);

    assert_eq!(deliveries(&registry, "t1", T1), vec![S1]);
    assert_eq!(deliveries(&registry, "t2", t2), vec![S2]);
}

#[test]
fn it_relays_the_stroke_payload_unchanged() {
    let path = json!({ "points": [[0, 0], [1, 1]], "strokeWidth": 4 });

    let event: ClientEvent = relay::serde_json::from_value(json!({
        "type": "draw",
        "presenterId": "t1",
        "path": path.clone(),
    }))
    .expect("must parse");

    let outbound = match event {
        ClientEvent::Draw { path, .. } => ServerEvent::DrawPath { path },
        other => panic!("unexpected event: {:?}", other),
    };

    assert_eq!(
        relay::serde_json::to_value(&outbound).expect("must serialize"),
        json!({ "type": "draw-path", "path": path })
    );
}
