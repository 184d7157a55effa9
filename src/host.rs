//! What the bubble and the backpack need from the editor hosting them.
//!
//! The host owns the real drawing surface and block model; this crate only
//! drives it through these traits.

use egui::{Pos2, Rect, Vec2};

use crate::block_tree::BlockTree;
use crate::coords::{LayoutDirection, SurfaceTransform};
use crate::error::MetricsUnavailable;
use crate::metrics::ViewMetrics;

/// A drawing surface a [`crate::Bubble`] can be placed on.
pub trait Surface {
    fn layout_direction(&self) -> LayoutDirection;

    /// Scroll metrics of the surface, or `None` if it has no scrollbars.
    fn view_metrics(&self) -> Option<ViewMetrics>;

    /// Mapping from client (pointer) coordinates onto this surface.
    fn surface_transform(&self) -> SurfaceTransform;

    /// Dismiss transient UI such as context menus and dropdowns.
    fn hide_chaff(&mut self) {}
}

/// How an embedded workspace should be set up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmbeddedOptions {
    pub size: Vec2,
    pub scrollbars: bool,
    pub direction: LayoutDirection,
}

/// A block-editing canvas: the main editor, or the miniature one inside the backpack.
pub trait Workspace: Surface + Sized {
    type BlockId: Copy + Eq + std::fmt::Debug;

    /// Build a new, empty canvas of the same kind to embed in an overlay.
    fn create_embedded(&mut self, options: &EmbeddedOptions) -> Self;

    fn has_scrollbars(&self) -> bool;

    /// Record the size of the area this canvas is shown through.
    fn set_viewport_size(&mut self, size: Vec2);

    fn render(&mut self);

    /// Bounding box of everything drawn on the canvas, in canvas coordinates.
    ///
    /// # Errors
    /// When the platform cannot measure the canvas right now.
    fn content_bounds(&self) -> Result<Rect, MetricsUnavailable>;

    /// Translate the block canvas and its bubble canvas together.
    fn translate_canvas(&mut self, translation: Vec2);

    /// Let the scrollbars recompute their handles from fresh metrics.
    fn update_scrollbars(&mut self, metrics: &ViewMetrics);

    fn top_blocks(&self) -> Vec<Self::BlockId>;

    fn serialize_block(&self, block: Self::BlockId) -> Option<BlockTree>;

    /// Create a new top-level block from `tree` with its top-left corner at `at`.
    fn instantiate_block(&mut self, tree: &BlockTree, at: Pos2) -> Self::BlockId;

    fn move_block_by(&mut self, block: Self::BlockId, delta: Vec2);

    fn is_in_backpack(&self, block: Self::BlockId) -> bool;

    fn set_in_backpack(&mut self, block: Self::BlockId, in_backpack: bool);
}
