use egui::{Vec2, vec2};

/// Options for [`super::Bubble`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BubbleOptions {
    /// Width of the draggable border around the content, in surface units.
    ///
    /// Also sets the corner rounding and, doubled, the side of the resize grip.
    pub border_width: f32,

    /// Smallest content area a bubble can be shrunk to.
    ///
    /// The bubble itself never gets smaller than this plus the border on both sides.
    pub min_content_size: Vec2,

    /// Vertical gap kept between the anchor and a bubble placed above it.
    pub min_block_y: f32,

    /// Margin kept between an auto-laid-out bubble and the edges of the visible area.
    pub sep_space: Vec2,

    /// Width of the host's scrollbars; auto-layout keeps bubbles clear of them.
    pub scrollbar_thickness: f32,

    /// If true, the bubble ignores pointer-downs (no dragging or resizing).
    pub read_only: bool,
}

impl Default for BubbleOptions {
    fn default() -> Self {
        Self {
            border_width: 6.0,
            min_content_size: vec2(45.0, 18.0),
            min_block_y: 25.0,
            sep_space: vec2(10.0, 10.0),
            scrollbar_thickness: 15.0,
            read_only: false,
        }
    }
}

impl BubbleOptions {
    pub fn double_border(&self) -> f32 {
        2.0 * self.border_width
    }

    pub fn min_size(&self) -> Vec2 {
        Vec2::splat(self.double_border()) + self.min_content_size
    }

    pub fn grip_size(&self) -> f32 {
        self.double_border()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_size_is_double_border_plus_content_minimum() {
        let opt = BubbleOptions::default();
        assert_eq!(opt.min_size(), vec2(12.0 + 45.0, 12.0 + 18.0));

        let opt = BubbleOptions {
            border_width: 2.0,
            min_content_size: vec2(10.0, 10.0),
            ..Default::default()
        };
        assert_eq!(opt.min_size(), vec2(14.0, 14.0));
        assert_eq!(opt.grip_size(), 4.0);
    }
}
