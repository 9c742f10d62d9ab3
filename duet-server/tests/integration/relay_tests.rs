use crate::utils::{create_test_coordinator, init_tracing};
use duet_core::{ClientMessage, PeerId, ServerMessage};
use duet_server::Coordinator;
use serde_json::json;
use std::sync::Arc;

async fn paired_room(coordinator: &Arc<Coordinator>, room: &str) -> (PeerId, PeerId) {
    let (x, y) = (PeerId::new(), PeerId::new());
    coordinator
        .handle(x, ClientMessage::Join { room: room.into() })
        .await;
    coordinator
        .handle(y, ClientMessage::Join { room: room.into() })
        .await;
    (x, y)
}

#[tokio::test]
async fn offer_reaches_only_the_peer_with_payload_unchanged() {
    init_tracing();
    let (coordinator, output) = create_test_coordinator();
    let (x, y) = paired_room(&coordinator, "abc").await;

    let sdp = json!({ "sdp": "v=0...", "type": "offer" });
    coordinator
        .handle(
            x,
            ClientMessage::Offer {
                room: "abc".into(),
                offer: sdp.clone(),
            },
        )
        .await;

    let to_y = output.sent_to(&y).await;
    assert_eq!(
        to_y,
        vec![
            ServerMessage::Joined { initiator: false },
            ServerMessage::Offer { offer: sdp },
        ]
    );

    // Exactly once, and never echoed back to the sender.
    let offers_to_x = output
        .sent_to(&x)
        .await
        .into_iter()
        .filter(|m| matches!(m, ServerMessage::Offer { .. }))
        .count();
    assert_eq!(offers_to_x, 0);
}

#[tokio::test]
async fn answer_and_candidate_flow_back_to_the_initiator() {
    init_tracing();
    let (coordinator, output) = create_test_coordinator();
    let (x, y) = paired_room(&coordinator, "abc").await;

    let answer = json!({ "sdp": "v=0...", "type": "answer" });
    let candidate = json!({ "candidate": "candidate:0 1 UDP ...", "sdpMid": "0" });

    coordinator
        .handle(
            y,
            ClientMessage::Answer {
                room: "abc".into(),
                answer: answer.clone(),
            },
        )
        .await;
    coordinator
        .handle(
            y,
            ClientMessage::Candidate {
                room: "abc".into(),
                candidate: candidate.clone(),
            },
        )
        .await;

    let to_x: Vec<_> = output
        .sent_to(&x)
        .await
        .into_iter()
        .skip_while(|m| !matches!(m, ServerMessage::Answer { .. }))
        .collect();
    assert_eq!(
        to_x,
        vec![
            ServerMessage::Answer { answer },
            ServerMessage::Candidate { candidate },
        ]
    );
}

#[tokio::test]
async fn chat_and_code_events_are_relayed() {
    init_tracing();
    let (coordinator, output) = create_test_coordinator();
    let (x, y) = paired_room(&coordinator, "abc").await;

    coordinator
        .handle(
            x,
            ClientMessage::ChatMessage {
                room: "abc".into(),
                message: "hello".into(),
            },
        )
        .await;
    coordinator
        .handle(
            y,
            ClientMessage::CodeChange {
                room: "abc".into(),
                code: "fn main() {}".into(),
            },
        )
        .await;

    assert!(output.sent_to(&y).await.contains(&ServerMessage::ChatMessage {
        message: "hello".into()
    }));
    assert!(output.sent_to(&x).await.contains(&ServerMessage::CodeChange {
        code: "fn main() {}".into()
    }));
}

#[tokio::test]
async fn relays_from_one_sender_arrive_in_order() {
    init_tracing();
    let (coordinator, output) = create_test_coordinator();
    let (x, y) = paired_room(&coordinator, "abc").await;

    for i in 0..10 {
        coordinator
            .handle(
                x,
                ClientMessage::Candidate {
                    room: "abc".into(),
                    candidate: json!({ "seq": i }),
                },
            )
            .await;
    }

    let seqs: Vec<_> = output
        .sent_to(&y)
        .await
        .into_iter()
        .filter_map(|m| match m {
            ServerMessage::Candidate { candidate } => candidate["seq"].as_i64(),
            _ => None,
        })
        .collect();
    assert_eq!(seqs, (0..10).collect::<Vec<i64>>());
}

#[tokio::test]
async fn relay_without_a_peer_is_silently_dropped() {
    init_tracing();
    let (coordinator, output) = create_test_coordinator();
    let x = PeerId::new();

    coordinator
        .handle(x, ClientMessage::Join { room: "abc".into() })
        .await;
    coordinator
        .handle(
            x,
            ClientMessage::Offer {
                room: "abc".into(),
                offer: json!({ "sdp": "v=0..." }),
            },
        )
        .await;

    // Alone in the room: no error back, nothing delivered anywhere.
    assert_eq!(
        output.sent_to(&x).await,
        vec![ServerMessage::Joined { initiator: true }]
    );
    assert_eq!(output.all().await.len(), 1);
}

#[tokio::test]
async fn relay_to_a_room_the_sender_is_not_in_is_dropped() {
    init_tracing();
    let (coordinator, output) = create_test_coordinator();
    let (_x, _y) = paired_room(&coordinator, "abc").await;
    let outsider = PeerId::new();

    let before = output.all().await.len();
    coordinator
        .handle(
            outsider,
            ClientMessage::ChatMessage {
                room: "abc".into(),
                message: "let me in".into(),
            },
        )
        .await;

    // Members of "abc" must not receive traffic from a non-member.
    assert_eq!(output.all().await.len(), before);
}
