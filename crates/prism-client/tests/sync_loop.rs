// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! End-to-end loop test against a real WebSocket server on loopback.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};
use tokio_tungstenite::tungstenite::Message;

use prism_client::mock::{MockRenderer, MockUi};
use prism_client::{ClientConfig, SyncClient};
use prism_proto::wire::{encode_message, encode_vertices};
use prism_proto::{SceneUpdateHeader, ServerMessage, StageInfo};
use prism_scene_port::ControlDef;

const TRI: [f32; 9] = [-0.4, 0.0, 0.0, 0.4, 0.0, 0.0, 0.0, 0.7, 0.0];

/// Poll `cond` every 10 ms until it holds, panicking after two seconds.
async fn wait_until(what: &str, cond: impl Fn() -> bool) {
    let deadline = async {
        while !cond() {
            sleep(Duration::from_millis(10)).await;
        }
    };
    timeout(Duration::from_secs(2), deadline)
        .await
        .unwrap_or_else(|_| panic!("timed out waiting for {what}"));
}

fn text(msg: &ServerMessage) -> Message {
    Message::Text(encode_message(msg).unwrap().into())
}

#[tokio::test]
async fn full_session_against_a_loopback_server() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (hold_tx, hold_rx) = oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut socket = tokio_tungstenite::accept_async(stream).await.unwrap();

        socket
            .send(text(&ServerMessage::UiBuild {
                controls: vec![ControlDef::Button {
                    action: "request_layers".to_owned(),
                    label: Some("Refresh".to_owned()),
                }],
            }))
            .await
            .unwrap();
        socket
            .send(text(&ServerMessage::StageInfo(StageInfo {
                meters_per_unit: 0.5,
                up_axis: "Z".to_owned(),
            })))
            .await
            .unwrap();
        socket
            .send(text(&ServerMessage::SceneLayers {
                layers: vec![
                    "/World (Xform)".to_owned(),
                    "  /World/Box (Cube) 3 verts".to_owned(),
                ],
            }))
            .await
            .unwrap();
        socket
            .send(text(&ServerMessage::SceneUpdate(SceneUpdateHeader {
                path: "/World/Box".to_owned(),
                prim_type: Some("mesh".to_owned()),
                action: Some("full_update".to_owned()),
                vertex_count: Some(3),
                face_count: Some(1),
                components: Some(3),
            })))
            .await
            .unwrap();
        socket
            .send(Message::Binary(encode_vertices(&TRI).into()))
            .await
            .unwrap();

        // Wait for the client's layer request, then acknowledge it.
        let inbound = loop {
            match socket.next().await.unwrap().unwrap() {
                Message::Text(t) => break t.as_str().to_owned(),
                _ => continue,
            }
        };
        assert_eq!(inbound, r#"{"action":"request_layers"}"#);
        socket
            .send(text(&ServerMessage::UiAck {
                action: "request_layers".to_owned(),
            }))
            .await
            .unwrap();

        // Keep the socket open until the assertions are done.
        let _ = hold_rx.await;
    });

    let renderer = MockRenderer::new();
    let ui = MockUi::new();
    let config = ClientConfig {
        override_url: Some(format!("ws://{addr}/ws")),
        origin: None,
        tls: false,
    };
    let (client, input) = SyncClient::new(&config, renderer.clone(), ui.clone()).unwrap();
    let client_task = tokio::spawn(client.run());

    wait_until("connected status", || ui.status() == "Connected").await;
    wait_until("controls built", || {
        ui.control_captions() == vec!["Refresh".to_owned()]
    })
    .await;
    wait_until("layer list", || {
        ui.layer_paths() == vec!["/World".to_owned(), "/World/Box".to_owned()]
    })
    .await;
    wait_until("mesh applied", || {
        renderer.mesh_vertex_count("/World/Box") == Some(3)
    })
    .await;

    // Stage metadata arrived before the geometry, so the update is scaled.
    assert_eq!(
        renderer.stage(),
        Some((prism_scene_port::UpAxis::Z, 0.5))
    );

    // Selection via the input handle updates both collaborators.
    input.layer_clicked("/World/Box");
    wait_until("highlight", || {
        renderer.highlighted() == Some("/World/Box".to_owned())
            && ui.highlighted() == Some("/World/Box".to_owned())
    })
    .await;

    // An outbound action round-trips to an ack.
    input.request_layers();
    wait_until("ack status", || ui.status() == "Ack: request_layers").await;

    let _ = hold_tx.send(());
    drop(input);
    timeout(Duration::from_secs(2), client_task)
        .await
        .expect("client loop should stop once every input handle is gone")
        .unwrap();
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_reports_and_schedules_retry() {
    // Bind then drop, so the port is (very likely) refusing connections.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let renderer = MockRenderer::new();
    let ui = MockUi::new();
    let config = ClientConfig {
        override_url: Some(format!("ws://{addr}/ws")),
        origin: None,
        tls: false,
    };
    let (client, input) = SyncClient::new(&config, renderer.clone(), ui.clone()).unwrap();
    let client_task = tokio::spawn(client.run());

    // Failed attempt surfaces as error-then-disconnected, never a panic.
    wait_until("disconnected status", || {
        ui.status_history()
            .ends_with(&["Connection error".to_owned(), "Disconnected".to_owned()])
    })
    .await;

    drop(input);
    timeout(Duration::from_secs(2), client_task)
        .await
        .expect("client loop should stop once every input handle is gone")
        .unwrap();
}
