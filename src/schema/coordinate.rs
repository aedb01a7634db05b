use serde::{Deserialize, Serialize};

/// A normalized position on the two semantic axes.
///
/// `x` is the desire axis (-1 abstinent, +1 feverish); `y` is the gravity
/// axis (-1 possessive, +1 redemptive). Both components are clamped to
/// [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

/// The reference rectangle a pointer position is normalized against,
/// in the host's absolute pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }.clamped()
    }

    /// Normalize an absolute pointer position against a reference rectangle.
    ///
    /// Screen y grows downward, so the vertical axis is flipped: the top
    /// edge of the rectangle maps to +1 (redemptive), the bottom to -1.
    /// A degenerate rectangle maps everything to the origin.
    pub fn from_pointer(px: f64, py: f64, bounds: &BoundingRect) -> Self {
        if bounds.width <= 0.0 || bounds.height <= 0.0 {
            return Self::default();
        }
        let x = (px - bounds.left) / bounds.width * 2.0 - 1.0;
        let y = -((py - bounds.top) / bounds.height * 2.0 - 1.0);
        Self { x, y }.clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(-1.0, 1.0),
            y: self.y.clamp(-1.0, 1.0),
        }
    }

    /// Which half of the desire axis this coordinate falls in.
    /// Exactly zero classifies as abstinent.
    pub fn desire(&self) -> DesirePole {
        if self.x > 0.0 {
            DesirePole::Feverish
        } else {
            DesirePole::Abstinent
        }
    }

    /// Which half of the gravity axis this coordinate falls in.
    /// Exactly zero classifies as possessive.
    pub fn gravity(&self) -> GravityPole {
        if self.y > 0.0 {
            GravityPole::Redemptive
        } else {
            GravityPole::Possessive
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        Quadrant::from_poles(self.desire(), self.gravity())
    }
}

/// The desire axis halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DesirePole {
    Abstinent,
    Feverish,
}

impl DesirePole {
    /// Returns the tag string for this pole (e.g., "desire:feverish").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Abstinent => "desire:abstinent",
            Self::Feverish => "desire:feverish",
        }
    }
}

/// The gravity axis halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GravityPole {
    Possessive,
    Redemptive,
}

impl GravityPole {
    /// Returns the tag string for this pole (e.g., "gravity:redemptive").
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Possessive => "gravity:possessive",
            Self::Redemptive => "gravity:redemptive",
        }
    }
}

/// The four quadrants of the (desire × gravity) plane.
///
/// ```text
///            │ Possessive           │ Redemptive
/// ───────────┼──────────────────────┼────────────────────
/// Abstinent  │ AbstinentPossession  │ AbstinentRedemption
/// Feverish   │ FeverishPossession   │ FeverishRedemption
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    AbstinentRedemption,
    AbstinentPossession,
    FeverishRedemption,
    FeverishPossession,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::AbstinentRedemption,
        Quadrant::AbstinentPossession,
        Quadrant::FeverishRedemption,
        Quadrant::FeverishPossession,
    ];

    pub fn from_poles(desire: DesirePole, gravity: GravityPole) -> Self {
        match (desire, gravity) {
            (DesirePole::Abstinent, GravityPole::Redemptive) => Self::AbstinentRedemption,
            (DesirePole::Abstinent, GravityPole::Possessive) => Self::AbstinentPossession,
            (DesirePole::Feverish, GravityPole::Redemptive) => Self::FeverishRedemption,
            (DesirePole::Feverish, GravityPole::Possessive) => Self::FeverishPossession,
        }
    }

    /// Stable key used by the tasting note table and tooling output.
    pub fn key(&self) -> &'static str {
        match self {
            Self::AbstinentRedemption => "abstinent_redemption",
            Self::AbstinentPossession => "abstinent_possession",
            Self::FeverishRedemption => "feverish_redemption",
            Self::FeverishPossession => "feverish_possession",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: BoundingRect = BoundingRect {
        left: 100.0,
        top: 50.0,
        width: 400.0,
        height: 200.0,
    };

    #[test]
    fn new_clamps_components() {
        let c = Coordinate::new(3.0, -7.5);
        assert_eq!(c, Coordinate { x: 1.0, y: -1.0 });
    }

    #[test]
    fn pointer_at_center_is_origin() {
        let c = Coordinate::from_pointer(300.0, 150.0, &RECT);
        assert_eq!(c, Coordinate { x: 0.0, y: 0.0 });
    }

    #[test]
    fn pointer_vertical_axis_is_flipped() {
        // Top edge of the rect is the redemptive end
        let top = Coordinate::from_pointer(300.0, 50.0, &RECT);
        assert_eq!(top.y, 1.0);
        let bottom = Coordinate::from_pointer(300.0, 250.0, &RECT);
        assert_eq!(bottom.y, -1.0);
    }

    #[test]
    fn pointer_corners_map_to_unit_square() {
        let top_left = Coordinate::from_pointer(100.0, 50.0, &RECT);
        assert_eq!(top_left, Coordinate { x: -1.0, y: 1.0 });
        let bottom_right = Coordinate::from_pointer(500.0, 250.0, &RECT);
        assert_eq!(bottom_right, Coordinate { x: 1.0, y: -1.0 });
    }

    #[test]
    fn pointer_outside_rect_clamps() {
        let c = Coordinate::from_pointer(900.0, -40.0, &RECT);
        assert_eq!(c, Coordinate { x: 1.0, y: 1.0 });
    }

    #[test]
    fn degenerate_rect_maps_to_origin() {
        let rect = BoundingRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(Coordinate::from_pointer(10.0, 10.0, &rect), Coordinate::default());
    }

    #[test]
    fn ties_classify_abstinent_and_possessive() {
        let origin = Coordinate::new(0.0, 0.0);
        assert_eq!(origin.desire(), DesirePole::Abstinent);
        assert_eq!(origin.gravity(), GravityPole::Possessive);
        assert_eq!(origin.quadrant(), Quadrant::AbstinentPossession);
    }

    #[test]
    fn quadrant_classification() {
        assert_eq!(
            Coordinate::new(-0.5, 0.5).quadrant(),
            Quadrant::AbstinentRedemption
        );
        assert_eq!(
            Coordinate::new(0.5, -0.5).quadrant(),
            Quadrant::FeverishPossession
        );
        assert_eq!(
            Coordinate::new(0.01, 0.01).quadrant(),
            Quadrant::FeverishRedemption
        );
    }

    #[test]
    fn pole_tags() {
        assert_eq!(DesirePole::Feverish.tag(), "desire:feverish");
        assert_eq!(GravityPole::Possessive.tag(), "gravity:possessive");
    }

    #[test]
    fn quadrant_keys_are_distinct() {
        let keys: Vec<&str> = Quadrant::ALL.iter().map(|q| q.key()).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
