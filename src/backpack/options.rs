use egui::{Color32, Pos2, Vec2, vec2};

use crate::bubble::BubbleOptions;

/// Options for [`super::Backpack`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BackpackOptions {
    /// Options of the bubble the backpack lives in.
    pub bubble: BubbleOptions,

    /// Where the backpack bubble is anchored on the main canvas.
    pub anchor: Pos2,

    /// Size of the bubble when the backpack opens, before it is fitted to its content.
    pub initial_bubble_size: Vec2,

    /// Cached canvas size a fresh backpack compares its first fit against.
    pub initial_workspace_size: Vec2,

    /// Fill of the bubble background.
    pub color: Color32,

    /// Width of the embedded canvas as a fraction of the main canvas' view width.
    pub width_fraction: f32,

    /// Whether the embedded canvas gets scrollbars (and can be scrolled or panned).
    pub scrollbars: bool,

    /// Minimum change (on either axis) before fitting resizes the bubble.
    ///
    /// Smaller changes are ignored so sub-pixel jitter does not make the bubble shudder.
    /// `None` means twice the bubble border width.
    pub resize_threshold: Option<f32>,

    /// Where copies land inside the backpack canvas.
    pub drop_origin: Pos2,
}

impl Default for BackpackOptions {
    fn default() -> Self {
        Self {
            bubble: BubbleOptions::default(),
            anchor: Pos2::ZERO,
            initial_bubble_size: vec2(200.0, 100.0),
            initial_workspace_size: vec2(20.0, 100.0),
            color: Color32::from_rgb(0xff, 0x00, 0x00),
            width_fraction: 0.25,
            scrollbars: true,
            resize_threshold: None,
            drop_origin: Pos2::ZERO,
        }
    }
}

impl BackpackOptions {
    pub fn resize_threshold(&self) -> f32 {
        self.resize_threshold
            .unwrap_or_else(|| self.bubble.double_border())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_threshold_defaults_to_double_border() {
        let opt = BackpackOptions::default();
        assert_eq!(opt.resize_threshold(), 12.0);

        let opt = BackpackOptions {
            resize_threshold: Some(0.5),
            ..Default::default()
        };
        assert_eq!(opt.resize_threshold(), 0.5);
    }
}
