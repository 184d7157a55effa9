use super::gesture::{Gesture, Interaction};

/// Identifies a bubble within its [`BubbleLayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BubbleId(u64);

#[derive(Clone, Copy, Debug)]
struct Capture {
    owner: BubbleId,
    gesture: Gesture,
}

/// The host's overlay layer: stacking order of its bubbles plus the single
/// pointer-capture slot shared by all of them.
///
/// A bubble that starts dragging or resizing takes the capture; whoever held it
/// before loses it. Pointer-up anywhere releases it. There is no other way to
/// cancel a gesture.
#[derive(Debug, Default)]
pub struct BubbleLayer {
    z_order: Vec<BubbleId>,
    next_serial: u64,
    capture: Option<Capture>,
}

impl BubbleLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bubbles from bottom to top.
    pub fn z_order(&self) -> &[BubbleId] {
        &self.z_order
    }

    pub fn topmost(&self) -> Option<BubbleId> {
        self.z_order.last().copied()
    }

    pub fn bring_to_front(&mut self, id: BubbleId) {
        self.z_order.retain(|&x| x != id);
        self.z_order.push(id);
    }

    /// The bubble currently receiving pointer moves, if any.
    pub fn capture_owner(&self) -> Option<BubbleId> {
        self.capture.map(|c| c.owner)
    }

    pub fn interaction_of(&self, id: BubbleId) -> Interaction {
        self.gesture_of(id)
            .map_or(Interaction::Idle, Gesture::interaction)
    }

    /// Pointer-up: end whatever gesture is in flight. Returns whether one was.
    pub fn release_pointer(&mut self) -> bool {
        match self.capture.take() {
            Some(capture) => {
                log::trace!(
                    "bubble {:?}: {:?} released",
                    capture.owner,
                    capture.gesture.interaction()
                );
                true
            }
            None => false,
        }
    }

    pub(crate) fn attach(&mut self) -> BubbleId {
        let id = BubbleId(self.next_serial.max(1));
        self.next_serial = id.0.saturating_add(1);
        self.z_order.push(id);
        id
    }

    pub(crate) fn detach(&mut self, id: BubbleId) {
        self.z_order.retain(|&x| x != id);
    }

    pub(crate) fn capture(&mut self, owner: BubbleId, gesture: Gesture) {
        if let Some(previous) = self.capture.replace(Capture { owner, gesture }) {
            log::debug!(
                "bubble {owner:?}: {:?} supersedes {:?} of bubble {:?}",
                gesture.interaction(),
                previous.gesture.interaction(),
                previous.owner
            );
        }
    }

    pub(crate) fn gesture_of(&self, id: BubbleId) -> Option<Gesture> {
        self.capture
            .filter(|c| c.owner == id)
            .map(|c| c.gesture)
    }
}

#[cfg(test)]
mod tests {
    use egui::Vec2;

    use super::*;

    #[test]
    fn attach_allocates_distinct_ids_on_top() {
        let mut layer = BubbleLayer::new();
        let a = layer.attach();
        let b = layer.attach();
        assert_ne!(a, b);
        assert_eq!(layer.z_order(), &[a, b]);

        layer.bring_to_front(a);
        assert_eq!(layer.topmost(), Some(a));

        layer.detach(a);
        assert_eq!(layer.z_order(), &[b]);
    }

    #[test]
    fn new_capture_replaces_previous_one() {
        let mut layer = BubbleLayer::new();
        let a = layer.attach();
        let b = layer.attach();

        layer.capture(a, Gesture::Drag { grab: Vec2::ZERO });
        assert_eq!(layer.interaction_of(a), Interaction::Dragging);

        layer.capture(b, Gesture::Resize { grab: Vec2::ZERO });
        assert_eq!(layer.interaction_of(a), Interaction::Idle);
        assert_eq!(layer.interaction_of(b), Interaction::Resizing);
        assert_eq!(layer.capture_owner(), Some(b));

        assert!(layer.release_pointer());
        assert!(!layer.release_pointer());
        assert_eq!(layer.interaction_of(b), Interaction::Idle);
    }
}
