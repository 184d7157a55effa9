//! Pure coordinate conversions between client space (pointer events),
//! surface space (the host canvas) and bubble-local space.
//!
//! Nothing in here touches a drawing surface, so every rule about mirroring and
//! scaling can be tested on plain numbers.

use egui::{Pos2, Rect, Vec2, pos2, vec2};

/// Horizontal layout direction of the host editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum LayoutDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl LayoutDirection {
    pub fn is_rtl(self) -> bool {
        self == Self::RightToLeft
    }
}

/// Maps client (pointer) coordinates onto a drawing surface.
///
/// `origin` is where the surface's `(0, 0)` lands in client space, including any
/// scroll translation; `scale` is the surface zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceTransform {
    pub origin: Pos2,
    pub scale: f32,
}

impl Default for SurfaceTransform {
    fn default() -> Self {
        Self {
            origin: Pos2::ZERO,
            scale: 1.0,
        }
    }
}

impl SurfaceTransform {
    pub fn new(origin: Pos2, scale: f32) -> Self {
        debug_assert!(scale > 0.0, "surface scale must be positive");
        Self { origin, scale }
    }

    pub fn client_to_surface(&self, client: Pos2) -> Pos2 {
        ((client - self.origin) / self.scale).to_pos2()
    }

    pub fn surface_to_client(&self, surface: Pos2) -> Pos2 {
        self.origin + surface.to_vec2() * self.scale
    }

    /// A pointer movement in client pixels, expressed in surface units.
    pub fn client_delta_to_surface(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    pub fn rect_to_client(&self, rect: Rect) -> Rect {
        Rect::from_min_size(self.surface_to_client(rect.min), rect.size() * self.scale)
    }
}

/// Offset between `value` and the pointer at the start of a gesture.
///
/// In RTL the horizontal axis runs the other way, so the pointer's x is added
/// instead of subtracted. Feed the result to [`follow_pointer`] on every move.
pub fn grab_offset(value: Vec2, pointer: Pos2, direction: LayoutDirection) -> Vec2 {
    let x = match direction {
        LayoutDirection::LeftToRight => value.x - pointer.x,
        LayoutDirection::RightToLeft => value.x + pointer.x,
    };
    vec2(x, value.y - pointer.y)
}

/// Inverse of [`grab_offset`]: the value that keeps its grab offset at `pointer`.
pub fn follow_pointer(grab: Vec2, pointer: Pos2, direction: LayoutDirection) -> Vec2 {
    let x = match direction {
        LayoutDirection::LeftToRight => grab.x + pointer.x,
        LayoutDirection::RightToLeft => grab.x - pointer.x,
    };
    vec2(x, grab.y + pointer.y)
}

/// Surface rectangle of a bubble placed `relative` to its `anchor`.
///
/// In RTL the relative x offset is measured leftwards from the anchor to the
/// bubble's right edge.
pub fn bubble_rect(anchor: Pos2, relative: Vec2, size: Vec2, direction: LayoutDirection) -> Rect {
    let left = match direction {
        LayoutDirection::LeftToRight => anchor.x + relative.x,
        LayoutDirection::RightToLeft => anchor.x - relative.x - size.x,
    };
    Rect::from_min_size(pos2(left, anchor.y + relative.y), size)
}

/// Relative x offset that puts a bubble of `width` with its left edge at `left`.
pub fn relative_x_for_left(anchor_x: f32, left: f32, width: f32, direction: LayoutDirection) -> f32 {
    match direction {
        LayoutDirection::LeftToRight => left - anchor_x,
        LayoutDirection::RightToLeft => anchor_x - left - width,
    }
}

/// Bubble-local rectangle of the square resize grip.
///
/// The grip sits in the bottom-right corner, or bottom-left when mirrored.
pub fn resize_grip_rect(size: Vec2, grip: f32, direction: LayoutDirection) -> Rect {
    let left = match direction {
        LayoutDirection::LeftToRight => size.x - grip,
        LayoutDirection::RightToLeft => 0.0,
    };
    Rect::from_min_size(pos2(left, size.y - grip), Vec2::splat(grip))
}

#[cfg(test)]
mod tests {
    use super::*;

    const LTR: LayoutDirection = LayoutDirection::LeftToRight;
    const RTL: LayoutDirection = LayoutDirection::RightToLeft;

    #[test]
    fn surface_transform_accounts_for_origin_and_scale() {
        let t = SurfaceTransform::new(pos2(100.0, 50.0), 2.0);
        assert_eq!(t.client_to_surface(pos2(140.0, 70.0)), pos2(20.0, 10.0));
        assert_eq!(t.surface_to_client(pos2(20.0, 10.0)), pos2(140.0, 70.0));
        assert_eq!(t.client_delta_to_surface(vec2(8.0, -4.0)), vec2(4.0, -2.0));

        let r = t.rect_to_client(Rect::from_min_size(pos2(1.0, 1.0), vec2(10.0, 5.0)));
        assert_eq!(r, Rect::from_min_size(pos2(102.0, 52.0), vec2(20.0, 10.0)));
    }

    #[test]
    fn grab_then_follow_at_same_pointer_is_identity() {
        let value = vec2(-30.0, 12.0);
        let pointer = pos2(250.0, 80.0);
        for dir in [LTR, RTL] {
            let grab = grab_offset(value, pointer, dir);
            assert_eq!(follow_pointer(grab, pointer, dir), value);
        }
    }

    #[test]
    fn rtl_drag_moves_screen_rect_with_pointer() {
        let anchor = pos2(300.0, 200.0);
        let size = vec2(100.0, 60.0);
        let relative = vec2(10.0, -20.0);
        let start = pos2(50.0, 50.0);

        for dir in [LTR, RTL] {
            let before = bubble_rect(anchor, relative, size, dir);
            let grab = grab_offset(relative, start, dir);
            let moved = follow_pointer(grab, start + vec2(15.0, 5.0), dir);
            let after = bubble_rect(anchor, moved, size, dir);
            assert_eq!(after.min - before.min, vec2(15.0, 5.0), "{dir:?}");
        }
    }

    #[test]
    fn relative_x_for_left_inverts_bubble_rect() {
        let anchor = pos2(40.0, 0.0);
        let size = vec2(80.0, 10.0);
        for dir in [LTR, RTL] {
            let rel = relative_x_for_left(anchor.x, 5.0, size.x, dir);
            let rect = bubble_rect(anchor, vec2(rel, 0.0), size, dir);
            assert_eq!(rect.min.x, 5.0, "{dir:?}");
        }
    }

    #[test]
    fn resize_grip_is_mirrored_in_rtl() {
        let size = vec2(200.0, 100.0);
        assert_eq!(
            resize_grip_rect(size, 12.0, LTR),
            Rect::from_min_size(pos2(188.0, 88.0), Vec2::splat(12.0))
        );
        assert_eq!(
            resize_grip_rect(size, 12.0, RTL),
            Rect::from_min_size(pos2(0.0, 88.0), Vec2::splat(12.0))
        );
    }
}
