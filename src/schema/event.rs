use serde::{Deserialize, Serialize};

use super::coordinate::BoundingRect;
use super::covenant::CovenantField;

/// A discrete UI input consumed by the session flow.
/// Events are the sole input surface of the state machine; presentation
/// collaborators read state back out through the flow's accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A covenant text field changed (covenant phase).
    TextChanged {
        field: CovenantField,
        value: String,
    },
    /// The pointer moved to an absolute position, with the reference
    /// rectangle to normalize against (navigation phase).
    PointerMoved {
        x: f64,
        y: f64,
        bounds: BoundingRect,
    },
    /// The sustained hold gesture began (navigation phase).
    HoldStarted,
    /// The hold was released or the pointer left the surface.
    HoldEnded,
    /// Explicit restart back to the covenant (resonance phase).
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_construction() {
        let event = InputEvent::TextChanged {
            field: CovenantField::UserName,
            value: "Ash".to_string(),
        };
        assert!(matches!(event, InputEvent::TextChanged { .. }));
    }

    #[test]
    fn ron_round_trip() {
        let event = InputEvent::PointerMoved {
            x: 120.0,
            y: 48.0,
            bounds: BoundingRect {
                left: 0.0,
                top: 0.0,
                width: 640.0,
                height: 480.0,
            },
        };
        let serialized = ron::to_string(&event).unwrap();
        let deserialized: InputEvent = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, event);
    }
}
