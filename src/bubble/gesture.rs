use egui::{PointerButton, Pos2, Vec2};

/// A pointer event as delivered by the host, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub pos: Pos2,
    pub button: PointerButton,
    /// True when the event target is a focused text input that must keep its events.
    pub over_text_input: bool,
}

impl PointerEvent {
    pub fn primary(pos: Pos2) -> Self {
        Self {
            pos,
            button: PointerButton::Primary,
            over_text_input: false,
        }
    }

    pub fn secondary(pos: Pos2) -> Self {
        Self {
            button: PointerButton::Secondary,
            ..Self::primary(pos)
        }
    }

    pub fn is_secondary(&self) -> bool {
        self.button == PointerButton::Secondary
    }
}

/// Which part of a bubble is under a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BubblePart {
    /// The frame around the content; dragging it moves the bubble.
    Border,
    /// The corner grip; dragging it resizes the bubble.
    ResizeGrip,
    /// The hosted content, which handles its own pointer events.
    Content,
}

/// What a bubble is doing with the pointer right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    Dragging,
    Resizing,
}

/// An in-flight gesture, holding the offset recorded at pointer-down.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Gesture {
    Drag { grab: Vec2 },
    Resize { grab: Vec2 },
}

impl Gesture {
    pub(crate) fn interaction(self) -> Interaction {
        match self {
            Self::Drag { .. } => Interaction::Dragging,
            Self::Resize { .. } => Interaction::Resizing,
        }
    }
}
