//! The backpack: a miniature block canvas living inside a [`Bubble`].
//!
//! Blocks dropped onto it are copied in, blocks dragged out of it are copied
//! back to the main canvas. Either way the dragged original returns to where
//! its drag started, so the backpack behaves like a clipboard the user can see.

use std::cell::Cell;
use std::rc::Rc;

use egui::{Color32, Painter, Pos2, Vec2, vec2};

mod options;
mod transfer;

#[cfg(test)]
mod test_workspace;

pub use options::BackpackOptions;
pub use transfer::{Canvas, Transfer};

use transfer::DragSnapshot;

use crate::bubble::{Bubble, BubbleContent, BubbleLayer, BubblePart, PointerEvent};
use crate::coords::SurfaceTransform;
use crate::error::{BackpackError, MetricsUnavailable};
use crate::host::{EmbeddedOptions, Workspace};
use crate::metrics::{ScrollRatio, ViewMetrics};

/// The area inside the bubble the embedded canvas is shown through.
///
/// The size is shared with the bubble's resize listener, which keeps it in
/// step with the bubble's inner size.
#[derive(Clone, Debug, Default)]
pub struct TrayFrame {
    size: Rc<Cell<Vec2>>,
}

impl TrayFrame {
    pub fn size(&self) -> Vec2 {
        self.size.get()
    }

    fn set_size(&self, size: Vec2) {
        self.size.set(size);
    }
}

impl BubbleContent for TrayFrame {
    fn natural_size(&self) -> Result<Vec2, MetricsUnavailable> {
        Ok(self.size.get())
    }
}

/// The embedded canvas and the bubble showing it. They only ever exist together.
struct TrayParts<W> {
    workspace: W,
    bubble: Bubble<TrayFrame>,
}

impl<W: Workspace> TrayParts<W> {
    fn view_metrics(&self, scroll: Vec2, border: f32) -> Option<ViewMetrics> {
        let content = match self.workspace.content_bounds() {
            Ok(content) => content,
            Err(err) => {
                log::debug!("backpack: {err}, no metrics this pass");
                return None;
            }
        };
        let absolute = if self.workspace.layout_direction().is_rtl() {
            Pos2::new(0.0, border)
        } else {
            Pos2::new(border, border)
        };
        Some(ViewMetrics::for_canvas(
            self.bubble.content().size(),
            content,
            scroll,
            self.workspace.has_scrollbars(),
            absolute,
        ))
    }

    fn sync_viewport(&mut self) {
        self.workspace
            .set_viewport_size(self.bubble.content().size());
    }
}

/// A tray of saved blocks, shown in a bubble over the main canvas `W`.
pub struct Backpack<W: Workspace> {
    options: BackpackOptions,
    should_hide: bool,
    /// Size the embedded canvas was last fitted to.
    workspace_size: Vec2,
    pointer_over: bool,
    editor: Option<TrayParts<W>>,
    scroll: Vec2,
    drag: Option<DragSnapshot<W::BlockId>>,
}

impl<W: Workspace> Default for Backpack<W> {
    fn default() -> Self {
        Self::new(BackpackOptions::default())
    }
}

impl<W: Workspace> Backpack<W> {
    pub fn new(options: BackpackOptions) -> Self {
        Self {
            workspace_size: options.initial_workspace_size,
            options,
            should_hide: false,
            pointer_over: false,
            editor: None,
            scroll: Vec2::ZERO,
            drag: None,
        }
    }

    pub fn options(&self) -> &BackpackOptions {
        &self.options
    }

    pub fn is_visible(&self) -> bool {
        self.editor.is_some()
    }

    /// The embedded canvas, while the backpack is shown.
    pub fn workspace(&self) -> Option<&W> {
        self.editor.as_ref().map(|parts| &parts.workspace)
    }

    pub fn workspace_mut(&mut self) -> Option<&mut W> {
        self.editor.as_mut().map(|parts| &mut parts.workspace)
    }

    pub fn bubble(&self) -> Option<&Bubble<TrayFrame>> {
        self.editor.as_ref().map(|parts| &parts.bubble)
    }

    pub fn bubble_mut(&mut self) -> Option<&mut Bubble<TrayFrame>> {
        self.editor.as_mut().map(|parts| &mut parts.bubble)
    }

    /// Top-level blocks in the backpack; empty while hidden.
    pub fn contents(&self) -> Vec<W::BlockId> {
        self.workspace().map(W::top_blocks).unwrap_or_default()
    }

    pub fn workspace_size(&self) -> Vec2 {
        self.workspace_size
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Result of the last [`Self::is_pointer_over_tray`].
    pub fn is_pointer_over(&self) -> bool {
        self.pointer_over
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Open or close the backpack. Does nothing if it is already in that state.
    pub fn set_visible(&mut self, host: &mut W, layer: &mut BubbleLayer, show: bool) {
        if show == self.is_visible() {
            log::trace!("backpack: already {}", if show { "shown" } else { "hidden" });
            return;
        }
        if show {
            self.show(host, layer);
        } else {
            self.hide(layer);
        }
    }

    fn show(&mut self, host: &mut W, layer: &mut BubbleLayer) {
        let width = host.view_metrics().map_or(self.options.initial_bubble_size.x, |m| {
            m.view_width * self.options.width_fraction
        });
        let embedded = EmbeddedOptions {
            size: vec2(width, self.options.initial_bubble_size.y),
            scrollbars: self.options.scrollbars,
            direction: host.layout_direction(),
        };
        let workspace = host.create_embedded(&embedded);

        let frame = TrayFrame::default();
        let mut bubble = Bubble::new(
            layer,
            &*host,
            self.options.anchor,
            frame.clone(),
            Some(self.options.initial_bubble_size),
            self.options.bubble.clone(),
        );
        bubble.set_color(self.options.color);
        frame.set_size(bubble.inner_size());
        bubble.register_resize_listener(move |event| frame.set_size(event.inner_size));

        let mut parts = TrayParts { workspace, bubble };
        parts.sync_viewport();
        log::debug!("backpack: shown in bubble {:?}", parts.bubble.id());

        self.editor = Some(parts);
        self.scroll = Vec2::ZERO;
        self.fit_to_content(host);
    }

    fn hide(&mut self, layer: &mut BubbleLayer) {
        if let Some(parts) = self.editor.take() {
            log::debug!("backpack: hiding bubble {:?}", parts.bubble.id());
            parts.bubble.dispose(layer);
        }
        self.drag = None;
        self.pointer_over = false;
        self.workspace_size = Vec2::ZERO;
    }

    /// Ask for the backpack to close on the next change of its canvas.
    pub fn request_hide(&mut self) {
        self.should_hide = true;
    }

    pub fn should_hide(&self) -> bool {
        self.should_hide
    }

    /// Call whenever the embedded canvas reports a change.
    pub fn on_workspace_change(&mut self, layer: &mut BubbleLayer) {
        if !self.is_visible() {
            return;
        }
        if self.should_hide {
            self.hide(layer);
            self.should_hide = false;
        }
    }

    /// Scroll metrics of the embedded canvas, in its own coordinates.
    ///
    /// `None` while hidden, or when the canvas cannot be measured right now.
    pub fn view_metrics(&self) -> Option<ViewMetrics> {
        self.editor
            .as_ref()
            .and_then(|parts| parts.view_metrics(self.scroll, self.options.bubble.border_width))
    }

    /// Scroll the embedded canvas to a fractional position within its content.
    ///
    /// # Errors
    /// [`BackpackError::ContractViolation`] while hidden or when the embedded
    /// canvas has no scrollbars. Nothing is changed in that case.
    pub fn apply_scroll_ratio(&mut self, ratio: ScrollRatio) -> Result<(), BackpackError> {
        let Some(parts) = self.editor.as_ref() else {
            return Err(BackpackError::ContractViolation {
                operation: "apply_scroll_ratio",
                reason: "the backpack is hidden",
            });
        };
        if !parts.workspace.has_scrollbars() {
            return Err(BackpackError::ContractViolation {
                operation: "apply_scroll_ratio",
                reason: "the backpack canvas has no scrollbars",
            });
        }
        let Some(metrics) = parts.view_metrics(self.scroll, self.options.bubble.border_width) else {
            return Ok(());
        };

        let scroll = metrics.scroll_for_ratio(ratio, self.scroll);
        self.scroll_to(metrics, scroll);
        Ok(())
    }

    /// Move the canvas (and its bubble canvas with it) to `scroll`.
    fn scroll_to(&mut self, metrics: ViewMetrics, scroll: Vec2) {
        let Some(parts) = self.editor.as_mut() else {
            return;
        };
        self.scroll = scroll;
        parts
            .workspace
            .translate_canvas(scroll + metrics.absolute_origin().to_vec2());
        parts.workspace.update_scrollbars(&ViewMetrics {
            view_left: scroll.x,
            view_top: scroll.y,
            ..metrics
        });
        log::trace!("backpack: scrolled to {scroll:?}");
    }

    /// Resize the bubble around whatever is on the embedded canvas.
    ///
    /// Changes no larger than [`BackpackOptions::resize_threshold`] are ignored.
    pub fn fit_to_content(&mut self, host: &W) {
        let Some(parts) = self.editor.as_mut() else {
            return;
        };
        parts.workspace.render();
        let bounds = match parts.workspace.content_bounds() {
            Ok(bounds) => bounds,
            Err(err) => {
                log::debug!("backpack: {err}, fit skipped");
                return;
            }
        };

        let double_border = self.options.bubble.double_border();
        let rtl = parts.workspace.layout_direction().is_rtl();
        let width = if rtl { -bounds.min.x } else { bounds.max.x };
        let size = vec2(width, bounds.height()) + Vec2::splat(3.0 * double_border);

        let threshold = self.options.resize_threshold();
        let change = (self.workspace_size - size).abs();
        if change.x > threshold || change.y > threshold {
            self.workspace_size = size;
            parts
                .bubble
                .set_size(host, size + Vec2::splat(double_border));
            parts.bubble.content().set_size(size);
            parts.sync_viewport();
            log::debug!("backpack: fitted to {size:?}");
        }

        if rtl {
            // Keep the content left-aligned.
            parts.workspace.translate_canvas(vec2(self.workspace_size.x, 0.0));
        }

        if let Some(metrics) = parts.view_metrics(self.scroll, self.options.bubble.border_width) {
            parts.workspace.update_scrollbars(&metrics);
        }
    }

    /// Hit test a client position against the backpack bubble. Remembers the answer.
    pub fn is_pointer_over_tray(&mut self, host: &W, client: Pos2) -> bool {
        let point = host.surface_transform().client_to_surface(client);
        self.pointer_over = self
            .editor
            .as_ref()
            .is_some_and(|parts| parts.bubble.rect().contains(point));
        self.pointer_over
    }

    /// Forward a pointer-down to the bubble's border and grip.
    ///
    /// Presses on the embedded canvas are consumed as well, so the host does not
    /// take a click inside the backpack for a click elsewhere.
    pub fn handle_pointer_down(
        &mut self,
        host: &mut W,
        layer: &mut BubbleLayer,
        event: &PointerEvent,
    ) -> bool {
        let Some(parts) = self.editor.as_mut() else {
            return false;
        };
        if parts.bubble.handle_pointer_down(layer, host, event) {
            return true;
        }
        let point = host.surface_transform().client_to_surface(event.pos);
        parts.bubble.part_at(point) == Some(BubblePart::Content)
    }

    /// Forward a pointer-move to the bubble, keeping the embedded viewport the
    /// size of the bubble while it is being resized.
    pub fn handle_pointer_move(&mut self, host: &W, layer: &BubbleLayer, pos: Pos2) -> bool {
        let Some(parts) = self.editor.as_mut() else {
            return false;
        };
        let handled = parts.bubble.handle_pointer_move(layer, host, pos);
        if handled {
            parts.sync_viewport();
        }
        handled
    }

    pub fn color(&self) -> Option<Color32> {
        self.bubble().map(Bubble::color)
    }

    pub fn paint(&self, painter: &Painter, transform: &SurfaceTransform) {
        if let Some(bubble) = self.bubble() {
            bubble.paint(painter, transform);
        }
    }
}
