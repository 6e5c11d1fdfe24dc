// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Synchronization core for the Prism stage mirror.
//!
//! Keeps a local scene mirror in step with a remote stage server over a
//! persistent WebSocket, surviving transient network loss. Four pieces:
//!
//! - [`ConnectionManager`] — transport lifecycle, round-robin endpoint
//!   selection, fixed-delay reconnection with a single owned retry timer.
//! - [`MessageRouter`] — classifies inbound frames and pairs each
//!   `SCENE_UPDATE` header with the binary payload that follows it.
//! - [`SceneMirror`] — authoritative path → object mapping, geometry
//!   replacement, layer index, pointer hit-testing.
//! - [`HighlightCoordinator`] — single owner of the current selection,
//!   kept consistent across the 3D view and the layer list.
//!
//! All state transitions run on one logical thread of control: the
//! [`SyncClient`] event loop drains transport and input events and applies
//! each to completion before the next. Renderer and UI are injected port
//! objects (see `prism-scene-port`); [`mock`] provides headless adapters
//! for testing.

use thiserror::Error;

mod client;
mod conn;
mod endpoint;
mod highlight;
mod mirror;
pub mod mock;
mod router;
mod sync;

pub use client::{InputHandle, SyncClient};
pub use conn::{ConnState, ConnectionManager, TransportEvent, RETRY_DELAY};
pub use endpoint::{ClientConfig, EndpointRing};
pub use highlight::HighlightCoordinator;
pub use mirror::{SceneMirror, SceneObject};
pub use router::{ClientEvent, MessageRouter};
pub use sync::{InputEvent, SyncCore};

/// Errors surfaced by the synchronization core's constructors.
///
/// Nothing at runtime is fatal: transport failures become status
/// transitions and retries, never errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The endpoint ring was handed an empty candidate list.
    #[error("endpoint ring requires at least one candidate URL")]
    NoCandidates,
}
