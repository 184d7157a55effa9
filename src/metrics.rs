use egui::{Pos2, Rect, Vec2, pos2, vec2};

/// Scroll geometry of a canvas, in that canvas's coordinate space.
///
/// `view_left`/`view_top` are the current scroll offsets, i.e. the translation
/// applied to the canvas content. The visible area therefore starts at
/// `(-view_left, -view_top)` in content coordinates, see [`Self::visible_rect`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct ViewMetrics {
    pub view_width: f32,
    pub view_height: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub view_top: f32,
    pub view_left: f32,
    pub content_top: f32,
    pub content_left: f32,
    pub absolute_top: f32,
    pub absolute_left: f32,
}

/// Fractional scroll position; `None` leaves that axis where it is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollRatio {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl ScrollRatio {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn horizontal(x: f32) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    pub fn vertical(y: f32) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }
}

impl ViewMetrics {
    /// Metrics of a canvas showing `content` through a `viewport` of the given size.
    ///
    /// With `scroll_padding` the scrollable extent reaches half a viewport past
    /// the content on every side, and is never smaller than the viewport itself.
    pub fn for_canvas(
        viewport: Vec2,
        content: Rect,
        scroll: Vec2,
        scroll_padding: bool,
        absolute: Pos2,
    ) -> Self {
        let extent = if scroll_padding {
            let half = viewport / 2.0;
            let min = pos2(
                (content.min.x - half.x).min(content.max.x - viewport.x),
                (content.min.y - half.y).min(content.max.y - viewport.y),
            );
            let max = pos2(
                (content.max.x + half.x).max(content.min.x + viewport.x),
                (content.max.y + half.y).max(content.min.y + viewport.y),
            );
            Rect::from_min_max(min, max)
        } else {
            content
        };

        Self {
            view_width: viewport.x,
            view_height: viewport.y,
            content_width: extent.width(),
            content_height: extent.height(),
            view_top: scroll.y,
            view_left: scroll.x,
            content_top: extent.min.y,
            content_left: extent.min.x,
            absolute_top: absolute.y,
            absolute_left: absolute.x,
        }
    }

    pub fn view_size(&self) -> Vec2 {
        vec2(self.view_width, self.view_height)
    }

    pub fn scroll(&self) -> Vec2 {
        vec2(self.view_left, self.view_top)
    }

    pub fn absolute_origin(&self) -> Pos2 {
        pos2(self.absolute_left, self.absolute_top)
    }

    /// The part of the content currently on screen, in content coordinates.
    pub fn visible_rect(&self) -> Rect {
        Rect::from_min_size(pos2(-self.view_left, -self.view_top), self.view_size())
    }

    pub fn content_rect(&self) -> Rect {
        Rect::from_min_size(
            pos2(self.content_left, self.content_top),
            vec2(self.content_width, self.content_height),
        )
    }

    /// Scroll offsets that show the content at `ratio`; axes without a ratio keep `current`.
    pub fn scroll_for_ratio(&self, ratio: ScrollRatio, current: Vec2) -> Vec2 {
        let x = ratio
            .x
            .map_or(current.x, |rx| -self.content_width * rx - self.content_left);
        let y = ratio
            .y
            .map_or(current.y, |ry| -self.content_height * ry - self.content_top);
        vec2(x, y)
    }

    /// Clamp scroll offsets so the view never leaves the scrollable extent.
    pub fn clamp_scroll(&self, scroll: Vec2) -> Vec2 {
        let clamp_axis = |value: f32, view: f32, start: f32, len: f32| {
            let max = -start;
            let min = (view - start - len).min(max);
            value.clamp(min, max)
        };
        vec2(
            clamp_axis(scroll.x, self.view_width, self.content_left, self.content_width),
            clamp_axis(scroll.y, self.view_height, self.content_top, self.content_height),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 40.0))
    }

    #[test]
    fn padding_adds_half_viewport_on_each_side() {
        let m = ViewMetrics::for_canvas(vec2(200.0, 100.0), content(), Vec2::ZERO, true, Pos2::ZERO);
        // Left: min(10 - 100, 110 - 200) = -90; top: min(20 - 50, 60 - 100) = -40.
        assert_eq!(m.content_left, -90.0);
        assert_eq!(m.content_top, -40.0);
        // Right: max(110 + 100, 10 + 200) = 210; bottom: max(60 + 50, 20 + 100) = 120.
        assert_eq!(m.content_width, 300.0);
        assert_eq!(m.content_height, 160.0);
    }

    #[test]
    fn without_padding_extent_is_the_content() {
        let m = ViewMetrics::for_canvas(vec2(200.0, 100.0), content(), vec2(-3.0, -4.0), false, pos2(6.0, 6.0));
        assert_eq!(m.content_rect(), content());
        assert_eq!(m.scroll(), vec2(-3.0, -4.0));
        assert_eq!(m.visible_rect().min, pos2(3.0, 4.0));
        assert_eq!(m.absolute_origin(), pos2(6.0, 6.0));
    }

    #[test]
    fn zero_ratio_scrolls_to_content_origin() {
        let m = ViewMetrics::for_canvas(vec2(200.0, 100.0), content(), vec2(7.0, 7.0), true, Pos2::ZERO);
        let scroll = m.scroll_for_ratio(ScrollRatio::new(0.0, 0.0), m.scroll());
        assert_eq!(scroll, vec2(-m.content_left, -m.content_top));
    }

    #[test]
    fn partial_ratio_keeps_the_other_axis() {
        let m = ViewMetrics::for_canvas(vec2(200.0, 100.0), content(), Vec2::ZERO, false, Pos2::ZERO);
        let scroll = m.scroll_for_ratio(ScrollRatio::horizontal(0.5), vec2(1.0, 2.0));
        assert_eq!(scroll, vec2(-50.0 - 10.0, 2.0));
        let scroll = m.scroll_for_ratio(ScrollRatio::vertical(1.0), vec2(1.0, 2.0));
        assert_eq!(scroll, vec2(1.0, -40.0 - 20.0));
    }

    #[test]
    fn clamp_scroll_keeps_view_inside_extent() {
        let m = ViewMetrics::for_canvas(vec2(50.0, 20.0), content(), Vec2::ZERO, false, Pos2::ZERO);
        // Scrolled past the top-left of the content.
        assert_eq!(m.clamp_scroll(vec2(100.0, 100.0)), vec2(-10.0, -20.0));
        // Scrolled past the bottom-right: view must still end at content's far edge.
        assert_eq!(m.clamp_scroll(vec2(-1000.0, -1000.0)), vec2(50.0 - 10.0 - 100.0, 20.0 - 20.0 - 40.0));
    }
}
