//! WASM bindings for resonance-engine — powers the interactive web front-end.
//!
//! The host forwards raw UI events (text changes, pointer positions, hold
//! start/end, restart) with `performance.now()` timestamps, ticks the session
//! on its animation frame, and reads phase, coordinate, and report back out
//! for rendering.

use wasm_bindgen::prelude::*;

use resonance_engine::core::corpus::CorpusSet;
use resonance_engine::core::flow::ResonanceFlow;
use resonance_engine::schema::coordinate::BoundingRect;
use resonance_engine::schema::covenant::CovenantField;
use resonance_engine::schema::event::InputEvent;

// ---------------------------------------------------------------------------
// Embedded corpus data — compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const RESONANCE_CORPUS: &str = include_str!("../../corpus_data/resonance.ron");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct CoordinateInfo {
    x: f64,
    y: f64,
    quadrant: &'static str,
}

#[derive(serde::Serialize)]
struct CovenantInfo {
    user_name: String,
    target_name: String,
    complete: bool,
}

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------
fn parse_field(s: &str) -> Option<CovenantField> {
    match s {
        "user" | "user_name" => Some(CovenantField::UserName),
        "target" | "target_name" => Some(CovenantField::TargetName),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// ResonanceSession — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct ResonanceSession {
    flow: ResonanceFlow,
}

#[wasm_bindgen]
impl ResonanceSession {
    /// Create a new session with the embedded corpus and the given seed.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<ResonanceSession, JsError> {
        let corpus = CorpusSet::parse_ron(data::RESONANCE_CORPUS)
            .map_err(|e| JsError::new(&format!("Corpus parse error: {e}")))?;

        let flow = ResonanceFlow::builder()
            .seed(seed)
            .with_corpus(corpus)
            .build()
            .map_err(|e| JsError::new(&format!("Session build error: {e}")))?;

        Ok(ResonanceSession { flow })
    }

    /// Forward a covenant text change. `field` is "user" or "target".
    pub fn text_changed(
        &mut self,
        now_ms: f64,
        field: &str,
        value: &str,
    ) -> Result<(), JsError> {
        let field = parse_field(field)
            .ok_or_else(|| JsError::new(&format!("Unknown covenant field: {field}")))?;
        self.flow.apply(
            now_ms as u64,
            InputEvent::TextChanged {
                field,
                value: value.to_string(),
            },
        );
        Ok(())
    }

    /// Forward a pointer position together with the interactive area's
    /// bounding rectangle (as from `getBoundingClientRect()`).
    #[allow(clippy::too_many_arguments)]
    pub fn pointer_moved(
        &mut self,
        now_ms: f64,
        px: f64,
        py: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) {
        self.flow.apply(
            now_ms as u64,
            InputEvent::PointerMoved {
                x: px,
                y: py,
                bounds: BoundingRect {
                    left,
                    top,
                    width,
                    height,
                },
            },
        );
    }

    pub fn hold_started(&mut self, now_ms: f64) {
        self.flow.apply(now_ms as u64, InputEvent::HoldStarted);
    }

    pub fn hold_ended(&mut self, now_ms: f64) {
        self.flow.apply(now_ms as u64, InputEvent::HoldEnded);
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.flow.apply(now_ms as u64, InputEvent::Restart);
    }

    /// Poll deadlines and the hold gauge; call on the animation frame.
    pub fn tick(&mut self, now_ms: f64) -> Result<(), JsError> {
        self.flow
            .tick(now_ms as u64)
            .map_err(|e| JsError::new(&format!("Tick error: {e}")))
    }

    /// Current phase name: "covenant", "navigating", or "resonating".
    pub fn phase(&self) -> String {
        self.flow.phase().name().to_string()
    }

    pub fn is_linked(&self) -> bool {
        self.flow.is_linked()
    }

    pub fn is_holding(&self) -> bool {
        self.flow.is_holding()
    }

    /// Hold progress at `now_ms`, in [0, 100]. Drives the resonance ring.
    pub fn hold_progress(&self, now_ms: f64) -> f64 {
        self.flow.hold_progress(now_ms as u64)
    }

    /// Current coordinate and quadrant as a JSON string.
    pub fn coordinate_json(&self) -> Result<String, JsError> {
        let coords = self.flow.coordinate();
        let info = CoordinateInfo {
            x: coords.x,
            y: coords.y,
            quadrant: coords.quadrant().key(),
        };
        serde_json::to_string(&info).map_err(|e| JsError::new(&format!("Serialize error: {e}")))
    }

    /// Current covenant names as a JSON string.
    pub fn covenant_json(&self) -> Result<String, JsError> {
        let covenant = self.flow.covenant();
        let info = CovenantInfo {
            user_name: covenant.user_name.clone(),
            target_name: covenant.target_name.clone(),
            complete: covenant.is_complete(),
        };
        serde_json::to_string(&info).map_err(|e| JsError::new(&format!("Serialize error: {e}")))
    }

    /// The current report as a JSON string, or "null" before resonance.
    pub fn report_json(&self) -> Result<String, JsError> {
        serde_json::to_string(&self.flow.report())
            .map_err(|e| JsError::new(&format!("Serialize error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_corpus_parses_and_validates() {
        let corpus = CorpusSet::parse_ron(data::RESONANCE_CORPUS).unwrap();
        corpus.validate().unwrap();
    }

    #[test]
    fn field_parsing_accepts_both_spellings() {
        assert_eq!(parse_field("user"), Some(CovenantField::UserName));
        assert_eq!(parse_field("target_name"), Some(CovenantField::TargetName));
        assert_eq!(parse_field("other"), None);
    }
}
