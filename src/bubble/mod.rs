//! A draggable, resizable overlay anchored to a point on a host surface.
//!
//! A [`Bubble`] owns one piece of content and knows nothing about what that
//! content is. It places itself next to its anchor until the user moves or
//! resizes it by hand, after which it stays where it was put.

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

mod gesture;
mod layer;
mod options;


pub use gesture::{BubblePart, Interaction, PointerEvent};
pub use layer::{BubbleId, BubbleLayer};
pub use options::BubbleOptions;

use gesture::Gesture;

use crate::coords::{
    LayoutDirection, SurfaceTransform, bubble_rect, follow_pointer, grab_offset,
    relative_x_for_left, resize_grip_rect,
};
use crate::error::MetricsUnavailable;
use crate::host::Surface;

const GRIP_FILL: Color32 = Color32::from_gray(0xaa);
const GRIP_LINE: Color32 = Color32::from_gray(0x88);

/// Something a [`Bubble`] can host.
pub trait BubbleContent {
    /// Size the content would like, used when a bubble is created without an explicit size.
    ///
    /// # Errors
    /// When the content cannot be measured right now; the bubble then sizes itself from zero.
    fn natural_size(&self) -> Result<Vec2, MetricsUnavailable>;
}

/// Delivered to resize listeners after every [`Bubble::set_size`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleResized {
    pub id: BubbleId,
    pub size: Vec2,
    /// Size left for the content once the border is taken off.
    pub inner_size: Vec2,
}

type ResizeListener = Box<dyn FnMut(&BubbleResized)>;

pub struct Bubble<C> {
    id: BubbleId,
    options: BubbleOptions,
    direction: LayoutDirection,

    anchor: Pos2,
    relative: Vec2,
    size: Vec2,
    rect: Rect,

    resizable: bool,
    auto_layout: bool,
    rendered: bool,
    color: Color32,

    content: C,
    resize_listeners: Vec<ResizeListener>,
}

impl<C: std::fmt::Debug> std::fmt::Debug for Bubble<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bubble")
            .field("id", &self.id)
            .field("direction", &self.direction)
            .field("anchor", &self.anchor)
            .field("relative", &self.relative)
            .field("size", &self.size)
            .field("resizable", &self.resizable)
            .field("auto_layout", &self.auto_layout)
            .field("color", &self.color)
            .field("content", &self.content)
            .field("resize_listeners", &self.resize_listeners.len())
            .finish_non_exhaustive()
    }
}

impl<C: BubbleContent> Bubble<C> {
    /// Attach a new bubble to `layer`, on top of the others.
    ///
    /// With `size == None` the bubble is sized to the content's natural size plus
    /// the border, and has no resize grip.
    pub fn new<S: Surface + ?Sized>(
        layer: &mut BubbleLayer,
        surface: &S,
        anchor: Pos2,
        content: C,
        size: Option<Vec2>,
        options: BubbleOptions,
    ) -> Self {
        let id = layer.attach();
        let resizable = size.is_some();
        let size = size.unwrap_or_else(|| {
            let natural = content.natural_size().unwrap_or_else(|err| {
                log::debug!("bubble {id:?}: {err}, sizing from zero");
                Vec2::ZERO
            });
            natural + Vec2::splat(options.double_border())
        });

        let mut bubble = Self {
            id,
            options,
            direction: surface.layout_direction(),
            anchor,
            relative: Vec2::ZERO,
            size: Vec2::ZERO,
            rect: Rect::NOTHING,
            resizable,
            auto_layout: true,
            rendered: false,
            color: Color32::WHITE,
            content,
            resize_listeners: Vec::new(),
        };
        bubble.set_size(surface, size);
        bubble.layout(surface);
        bubble.position();
        bubble.rendered = true;

        log::debug!("bubble {id:?}: attached at {:?}", bubble.rect);
        bubble
    }
}

impl<C> Bubble<C> {
    pub fn id(&self) -> BubbleId {
        self.id
    }

    pub fn options(&self) -> &BubbleOptions {
        &self.options
    }

    pub fn direction(&self) -> LayoutDirection {
        self.direction
    }

    pub fn anchor(&self) -> Pos2 {
        self.anchor
    }

    /// Offset of the bubble from its anchor (mirrored horizontally in RTL).
    pub fn relative_offset(&self) -> Vec2 {
        self.relative
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn inner_size(&self) -> Vec2 {
        (self.size - Vec2::splat(self.options.double_border())).max(Vec2::ZERO)
    }

    /// Where the bubble is, in surface coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn content_rect(&self) -> Rect {
        Rect::from_min_size(
            self.rect.min + Vec2::splat(self.options.border_width),
            self.inner_size(),
        )
    }

    /// The resize grip in surface coordinates, if the bubble is resizable.
    pub fn resize_grip_rect(&self) -> Option<Rect> {
        self.resizable.then(|| {
            resize_grip_rect(self.size, self.options.grip_size(), self.direction)
                .translate(self.rect.min.to_vec2())
        })
    }

    pub fn is_resizable(&self) -> bool {
        self.resizable
    }

    /// False once the user has dragged or resized the bubble.
    pub fn is_auto_layout(&self) -> bool {
        self.auto_layout
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn set_color(&mut self, color: Color32) {
        self.color = color;
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    pub fn interaction(&self, layer: &BubbleLayer) -> Interaction {
        layer.interaction_of(self.id)
    }

    /// Call `listener` after every size change, including ones that were clamped
    /// or did not change anything.
    pub fn register_resize_listener(&mut self, listener: impl FnMut(&BubbleResized) + 'static) {
        self.resize_listeners.push(Box::new(listener));
    }

    pub fn set_size<S: Surface + ?Sized>(&mut self, surface: &S, size: Vec2) {
        self.size = size.max(self.options.min_size());

        if self.rendered {
            if self.auto_layout {
                self.layout(surface);
            }
            self.position();
        }

        let event = BubbleResized {
            id: self.id,
            size: self.size,
            inner_size: self.inner_size(),
        };
        for listener in &mut self.resize_listeners {
            listener(&event);
        }
    }

    pub fn set_anchor<S: Surface + ?Sized>(&mut self, surface: &S, anchor: Pos2) {
        self.anchor = anchor;
        if self.auto_layout {
            self.layout(surface);
        }
        self.position();
    }

    /// Which part of the bubble is at `point` (surface coordinates).
    pub fn part_at(&self, point: Pos2) -> Option<BubblePart> {
        if !self.rect.contains(point) {
            return None;
        }
        if self.resize_grip_rect().is_some_and(|r| r.contains(point)) {
            Some(BubblePart::ResizeGrip)
        } else if self.content_rect().contains(point) {
            Some(BubblePart::Content)
        } else {
            Some(BubblePart::Border)
        }
    }

    /// Pointer-down in client coordinates. Returns true if the bubble consumed it.
    ///
    /// Pressing the border starts a drag, pressing the grip starts a resize.
    /// Either way the bubble is raised and any other gesture in the layer ends.
    pub fn handle_pointer_down<S: Surface + ?Sized>(
        &mut self,
        layer: &mut BubbleLayer,
        surface: &mut S,
        event: &PointerEvent,
    ) -> bool {
        if self.options.read_only {
            return false;
        }
        let point = surface.surface_transform().client_to_surface(event.pos);
        let resize = match self.part_at(point) {
            None | Some(BubblePart::Content) => return false,
            Some(BubblePart::Border) => false,
            Some(BubblePart::ResizeGrip) => true,
        };

        layer.bring_to_front(self.id);
        layer.release_pointer();
        if event.is_secondary() {
            return false;
        }
        if !resize && event.over_text_input {
            return false;
        }

        self.auto_layout = false;
        let gesture = if resize {
            Gesture::Resize {
                grab: grab_offset(self.size, event.pos, self.direction),
            }
        } else {
            Gesture::Drag {
                grab: grab_offset(self.relative, event.pos, self.direction),
            }
        };
        layer.capture(self.id, gesture);
        surface.hide_chaff();

        log::trace!("bubble {:?}: {:?} started", self.id, gesture.interaction());
        true
    }

    /// Pointer-move in client coordinates. Returns true if this bubble is mid-gesture.
    pub fn handle_pointer_move<S: Surface + ?Sized>(
        &mut self,
        layer: &BubbleLayer,
        surface: &S,
        pos: Pos2,
    ) -> bool {
        match layer.gesture_of(self.id) {
            None => false,
            Some(Gesture::Drag { grab }) => {
                self.relative = follow_pointer(grab, pos, self.direction);
                self.position();
                true
            }
            Some(Gesture::Resize { grab }) => {
                self.set_size(surface, follow_pointer(grab, pos, self.direction));
                if self.direction.is_rtl() {
                    // The left edge moves with the grip.
                    self.position();
                }
                true
            }
        }
    }

    /// Detach from `layer`, ending any gesture in flight, and drop the content.
    pub fn dispose(self, layer: &mut BubbleLayer) {
        layer.release_pointer();
        layer.detach(self.id);
        log::debug!("bubble {:?}: disposed", self.id);
    }

    /// The bubble's chrome (background and resize grip) in client coordinates.
    pub fn shapes(&self, transform: &SurfaceTransform) -> Vec<Shape> {
        let rect = transform.rect_to_client(self.rect);
        let mut shapes = vec![Shape::rect_filled(
            rect,
            self.options.border_width * transform.scale,
            self.color,
        )];
        if let Some(grip) = self.resize_grip_rect() {
            shapes.extend(grip_shapes(transform.rect_to_client(grip), self.direction));
        }
        shapes
    }

    pub fn paint(&self, painter: &Painter, transform: &SurfaceTransform) {
        painter.extend(self.shapes(transform));
    }

    fn layout<S: Surface + ?Sized>(&mut self, surface: &S) {
        let mut relative = vec2(-self.size.x / 4.0, -self.size.y - self.options.min_block_y);

        if let Some(metrics) = surface.view_metrics() {
            let visible = metrics.visible_rect();
            let sep = self.options.sep_space;

            let left = bubble_rect(self.anchor, relative, self.size, self.direction).min.x;
            let min_left = visible.min.x + sep.x;
            let max_left =
                visible.max.x - self.size.x - sep.x - self.options.scrollbar_thickness;
            let left = if left < min_left {
                min_left
            } else {
                left.min(max_left)
            };
            relative.x = relative_x_for_left(self.anchor.x, left, self.size.x, self.direction);

            if self.anchor.y + relative.y < visible.min.y + sep.y {
                // No room above: drop below the anchor.
                relative.y = sep.y;
            }
        }

        self.relative = relative;
    }

    fn position(&mut self) {
        self.rect = bubble_rect(self.anchor, self.relative, self.size, self.direction);
    }
}

fn grip_shapes(grip: Rect, direction: LayoutDirection) -> [Shape; 3] {
    let s = grip.width();
    let at = |x: f32, y: f32| {
        let x = if direction.is_rtl() { s - x } else { x };
        grip.min + vec2(x, y)
    };

    let mut triangle = vec![at(s, 0.0), at(s, s), at(0.0, s)];
    if direction.is_rtl() {
        // Keep the winding clockwise after mirroring.
        triangle.reverse();
    }

    let line = Stroke::new(1.0, GRIP_LINE);
    [
        Shape::convex_polygon(triangle, GRIP_FILL, Stroke::NONE),
        Shape::line_segment([at(s / 3.0, s - 1.0), at(s - 1.0, s / 3.0)], line),
        Shape::line_segment(
            [at(s * 2.0 / 3.0, s - 1.0), at(s - 1.0, s * 2.0 / 3.0)],
            line,
        ),
    ]
}
