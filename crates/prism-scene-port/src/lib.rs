// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port contracts between the Prism synchronization core and its renderers.
//!
//! This crate defines the domain contract the sync core programs against.
//! It contains NO wire/serialization logic for the protocol—that lives in
//! prism-proto.
//!
//! # Design Principles
//!
//! - **Renderers are dumb** — They receive prepared geometry and render.
//!   Ray casting is the one query they answer; everything else is pushed in.
//! - **UI surfaces are dumb** — They display status, layer lists, and
//!   highlight marks; clicks flow back through whatever input plumbing the
//!   adapter owns.
//! - **Selection has one owner** — Port implementations never mutate
//!   selection themselves; they only reflect what they are told.

mod control;
mod layer;
mod mesh;
mod port;
mod types;

pub use control::ControlDef;
pub use layer::LayerEntry;
pub use mesh::{BoundingSphere, TriangleSoup};
pub use port::{SceneRenderer, UiSurface};
pub use types::{PointerNdc, UpAxis};
