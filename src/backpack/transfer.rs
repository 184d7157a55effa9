//! Moving blocks between the main canvas and the backpack.
//!
//! The host runs its own block drags and calls the hooks here at the start,
//! on every move, and at the end. A drop that crosses the backpack boundary
//! copies the block to the other side and sends the original back home.

use egui::{Pos2, Vec2};

use super::Backpack;
use crate::host::Workspace;
use crate::metrics::ViewMetrics;

/// Which canvas a dragged block lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Canvas {
    Host,
    Backpack,
}

/// What a finished drag did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer<B> {
    /// A host block was dropped on the backpack and copied into it.
    IntoBackpack { original: B, copy: B },
    /// A backpack block was dropped on the host canvas and copied onto it.
    OutOfBackpack { original: B, copy: B },
}

#[derive(Clone, Copy, Debug)]
pub(super) enum DragSubject<B> {
    Block {
        canvas: Canvas,
        block: B,
        in_backpack: bool,
    },
    Pan { metrics: ViewMetrics },
}

#[derive(Clone, Copy, Debug)]
pub(super) struct DragSnapshot<B> {
    start_pointer: Pos2,
    start_scroll: Vec2,
    subject: DragSubject<B>,
}

impl<W: Workspace> Backpack<W> {
    /// Copy `block` from the host canvas into the backpack. Returns the copy.
    ///
    /// `None` while hidden, or when the host cannot serialize the block.
    pub fn add_content(&mut self, host: &W, block: W::BlockId) -> Option<W::BlockId> {
        let Some(parts) = self.editor.as_mut() else {
            log::debug!("backpack: hidden, not adding {block:?}");
            return None;
        };
        let Some(tree) = host.serialize_block(block) else {
            log::debug!("backpack: host block {block:?} does not serialize");
            return None;
        };
        let copy = parts
            .workspace
            .instantiate_block(&tree, self.options.drop_origin);
        parts.workspace.set_in_backpack(copy, true);
        log::debug!(
            "backpack: added {} block(s) from host {block:?} as {copy:?}",
            tree.block_count()
        );
        Some(copy)
    }

    /// Copy backpack `block` onto the host canvas at `at` (host surface coordinates).
    pub fn return_to_host(&self, host: &mut W, block: W::BlockId, at: Pos2) -> Option<W::BlockId> {
        let Some(parts) = self.editor.as_ref() else {
            log::debug!("backpack: hidden, not returning {block:?}");
            return None;
        };
        let Some(tree) = parts.workspace.serialize_block(block) else {
            log::debug!("backpack: block {block:?} does not serialize");
            return None;
        };
        let copy = host.instantiate_block(&tree, at);
        host.set_in_backpack(copy, false);
        log::debug!("backpack: returned {block:?} to host as {copy:?}");
        Some(copy)
    }

    /// The host started dragging `block`, which lives on `canvas`.
    ///
    /// Starting a new drag drops whatever drag or pan was in progress.
    pub fn begin_drag(&mut self, host: &W, canvas: Canvas, block: W::BlockId, pointer: Pos2) {
        let in_backpack = match canvas {
            Canvas::Host => host.is_in_backpack(block),
            Canvas::Backpack => self
                .workspace()
                .is_some_and(|workspace| workspace.is_in_backpack(block)),
        };
        self.drag = Some(DragSnapshot {
            start_pointer: pointer,
            start_scroll: self.scroll,
            subject: DragSubject::Block {
                canvas,
                block,
                in_backpack,
            },
        });
        log::trace!("backpack: drag of {canvas:?} block {block:?} started, in backpack: {in_backpack}");
    }

    /// Start panning the embedded canvas. Only starts over a scrollable backpack.
    pub fn begin_pan(&mut self, host: &W, pointer: Pos2) -> bool {
        if !self.is_pointer_over_tray(host, pointer) {
            return false;
        }
        if !self.workspace().is_some_and(W::has_scrollbars) {
            return false;
        }
        let Some(metrics) = self.view_metrics() else {
            return false;
        };
        self.drag = Some(DragSnapshot {
            start_pointer: pointer,
            start_scroll: self.scroll,
            subject: DragSubject::Pan { metrics },
        });
        log::trace!("backpack: pan started at {pointer:?}");
        true
    }

    /// Pointer moved during a drag. Returns true if it panned the backpack.
    pub fn drag_move(&mut self, host: &W, pointer: Pos2) -> bool {
        let over = self.is_pointer_over_tray(host, pointer);
        let Some(snapshot) = self.drag else {
            return false;
        };
        let DragSubject::Pan { metrics } = snapshot.subject else {
            return false;
        };
        if !over {
            return false;
        }
        let Some(tray) = self.workspace() else {
            return false;
        };

        let delta = tray
            .surface_transform()
            .client_delta_to_surface(pointer - snapshot.start_pointer);
        let scroll = metrics.clamp_scroll(snapshot.start_scroll + delta);
        self.scroll_to(metrics, scroll);
        true
    }

    /// The drag ended at `pointer`. Copies the block across if it was dropped
    /// on the other side, then moves the original back to where it started.
    ///
    /// A block whose in-backpack tag disagrees with the canvas it was dragged
    /// on is never transferred.
    pub fn end_drag(&mut self, host: &mut W, pointer: Pos2) -> Option<Transfer<W::BlockId>> {
        let Some(snapshot) = self.drag.take() else {
            log::trace!("backpack: drag end without a drag");
            return None;
        };
        let DragSubject::Block {
            canvas,
            block,
            in_backpack,
        } = snapshot.subject
        else {
            return None;
        };
        let over = self.is_pointer_over_tray(host, pointer);
        if in_backpack != (canvas == Canvas::Backpack) {
            log::debug!(
                "backpack: {canvas:?} block {block:?} has in-backpack tag {in_backpack}, not transferring"
            );
            return None;
        }
        let moved = pointer - snapshot.start_pointer;

        if canvas == Canvas::Host && over {
            let copy = self.add_content(host, block)?;
            let back = host.surface_transform().client_delta_to_surface(moved);
            host.move_block_by(block, -back);
            Some(Transfer::IntoBackpack {
                original: block,
                copy,
            })
        } else if canvas == Canvas::Backpack && !over {
            let at = host.surface_transform().client_to_surface(pointer);
            let copy = self.return_to_host(host, block, at)?;
            if let Some(tray) = self.workspace_mut() {
                let back = tray.surface_transform().client_delta_to_surface(moved);
                tray.move_block_by(block, -back);
            }
            Some(Transfer::OutOfBackpack {
                original: block,
                copy,
            })
        } else {
            None
        }
    }
}
