#![forbid(unsafe_code)]

//! A floating, draggable and resizable bubble for block editors, and the
//! backpack built on it: a miniature canvas where blocks can be stashed and
//! copied back out.
//!
//! The crate does not draw blocks or own a canvas. The host editor implements
//! [`Surface`] and [`Workspace`] and feeds pointer events in.

pub mod backpack;
pub mod block_tree;
pub mod bubble;
pub mod coords;
pub mod error;
pub mod host;
pub mod metrics;

pub use backpack::{Backpack, BackpackOptions, Canvas, Transfer, TrayFrame};
pub use block_tree::BlockTree;
pub use bubble::{
    Bubble, BubbleContent, BubbleId, BubbleLayer, BubbleOptions, BubblePart, BubbleResized,
    Interaction, PointerEvent,
};
pub use coords::{LayoutDirection, SurfaceTransform};
pub use error::{BackpackError, MetricsUnavailable};
pub use host::{EmbeddedOptions, Surface, Workspace};
pub use metrics::{ScrollRatio, ViewMetrics};
