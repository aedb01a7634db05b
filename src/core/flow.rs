/// The session flow: three phases driven by discrete input events and a
/// host-supplied millisecond clock.
///
/// Wires together covenant input, coordinate capture, the hold gauge, and
/// report generation. The flow is the single owner of all session state;
/// hosts feed it events through `apply` and poll it with `tick`.
use thiserror::Error;

use crate::core::corpus::{CorpusError, CorpusSet};
use crate::core::report::{ComposeError, ReportGenerator};
use crate::core::timer::Deadline;
use crate::schema::coordinate::{BoundingRect, Coordinate};
use crate::schema::covenant::{CovenantField, CovenantInput};
use crate::schema::event::InputEvent;
use crate::schema::report::ResonanceReport;

/// Pause after the covenant becomes complete before the link takes hold.
pub const LINK_SETTLE_MS: u64 = 800;
/// Duration of the link crossing before navigation begins.
pub const LINK_CROSSING_MS: u64 = 2000;
/// Sustained hold required to complete navigation.
pub const HOLD_DURATION_MS: u64 = 2000;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),
}

/// The three mutually exclusive stages of a session. Exactly one is active
/// at any time; the flow owns the value exclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Covenant,
    Navigating,
    Resonating,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Covenant => "covenant",
            Self::Navigating => "navigating",
            Self::Resonating => "resonating",
        }
    }
}

/// Progress of the sustained pointer hold.
///
/// Progress is a monotone percentage of elapsed hold time, clamped to
/// [0, 100]. Release resets it to zero; a new hold always starts from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HoldGauge {
    started_at_ms: Option<u64>,
}

impl HoldGauge {
    fn start(&mut self, now_ms: u64) {
        self.started_at_ms = Some(now_ms);
    }

    fn release(&mut self) {
        self.started_at_ms = None;
    }

    fn is_active(&self) -> bool {
        self.started_at_ms.is_some()
    }

    fn progress(&self, now_ms: u64) -> f64 {
        match self.started_at_ms {
            Some(start) => {
                let elapsed = now_ms.saturating_sub(start) as f64;
                (elapsed / HOLD_DURATION_MS as f64 * 100.0).min(100.0)
            }
            None => 0.0,
        }
    }
}

/// The top-level session state machine. Built via `ResonanceFlow::builder()`.
pub struct ResonanceFlow {
    phase: Phase,
    covenant: CovenantInput,
    coords: Coordinate,
    linked: bool,
    settle: Deadline,
    crossing: Deadline,
    hold: HoldGauge,
    report: Option<ResonanceReport>,
    generator: ReportGenerator,
}

/// Builder for constructing a `ResonanceFlow`.
pub struct ResonanceFlowBuilder {
    seed: u64,
    /// Directly provided corpus (for testing without files).
    corpus: Option<CorpusSet>,
}

impl ResonanceFlow {
    pub fn builder() -> ResonanceFlowBuilder {
        ResonanceFlowBuilder {
            seed: 0,
            corpus: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn covenant(&self) -> &CovenantInput {
        &self.covenant
    }

    /// The last captured coordinate. Retained for the session; (0, 0)
    /// initially and after restart.
    pub fn coordinate(&self) -> Coordinate {
        self.coords
    }

    /// True once the settle delay has elapsed and the link crossing is
    /// under way or finished.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    pub fn is_holding(&self) -> bool {
        self.hold.is_active()
    }

    /// Hold progress at `now_ms`, in [0, 100].
    pub fn hold_progress(&self, now_ms: u64) -> f64 {
        self.hold.progress(now_ms)
    }

    pub fn report(&self) -> Option<&ResonanceReport> {
        self.report.as_ref()
    }

    /// Feed one input event. Events that do not satisfy the current phase's
    /// guard are ignored; there is no recoverable error state.
    pub fn apply(&mut self, now_ms: u64, event: InputEvent) {
        match event {
            InputEvent::TextChanged { field, value } => self.on_text_changed(now_ms, field, value),
            InputEvent::PointerMoved { x, y, bounds } => self.on_pointer_moved(x, y, &bounds),
            InputEvent::HoldStarted => self.on_hold_started(now_ms),
            InputEvent::HoldEnded => self.on_hold_ended(),
            InputEvent::Restart => self.on_restart(),
        }
    }

    /// Poll pending deadlines and the hold gauge. Hosts call this on their
    /// frame or timer cadence; all auto-advancement happens here.
    pub fn tick(&mut self, now_ms: u64) -> Result<(), FlowError> {
        match self.phase {
            Phase::Covenant => {
                if self.settle.fire(now_ms) {
                    self.linked = true;
                    self.crossing.arm(now_ms + LINK_CROSSING_MS);
                }
                if self.crossing.fire(now_ms) {
                    if self.covenant.is_complete() {
                        self.enter_navigating();
                    } else {
                        // Names were emptied mid-crossing; abandon the link
                        self.linked = false;
                    }
                }
                Ok(())
            }
            Phase::Navigating => {
                if self.hold.is_active() && self.hold.progress(now_ms) >= 100.0 {
                    self.complete_navigation()?;
                }
                Ok(())
            }
            Phase::Resonating => Ok(()),
        }
    }

    fn on_text_changed(&mut self, now_ms: u64, field: CovenantField, value: String) {
        if self.phase != Phase::Covenant {
            return;
        }
        self.covenant.set(field, value);
        if self.linked {
            // The crossing is already under way; edits update the names but
            // no longer reschedule it
            return;
        }
        if self.covenant.is_complete() {
            // Each edit while complete restarts the settle pause
            self.settle.arm(now_ms + LINK_SETTLE_MS);
        } else {
            self.settle.cancel();
        }
    }

    fn on_pointer_moved(&mut self, x: f64, y: f64, bounds: &BoundingRect) {
        if self.phase != Phase::Navigating {
            return;
        }
        self.coords = Coordinate::from_pointer(x, y, bounds);
    }

    fn on_hold_started(&mut self, now_ms: u64) {
        if self.phase != Phase::Navigating {
            return;
        }
        self.hold.start(now_ms);
    }

    fn on_hold_ended(&mut self) {
        self.hold.release();
    }

    fn on_restart(&mut self) {
        if self.phase != Phase::Resonating {
            return;
        }
        self.covenant.clear();
        self.coords = Coordinate::default();
        self.report = None;
        self.linked = false;
        self.settle.cancel();
        self.crossing.cancel();
        self.hold.release();
        self.phase = Phase::Covenant;
    }

    fn enter_navigating(&mut self) {
        // Disarm everything the covenant phase owns before leaving it
        self.settle.cancel();
        self.crossing.cancel();
        self.hold.release();
        self.phase = Phase::Navigating;
    }

    /// Completion fires exactly once: the phase moves to Resonating before
    /// any further tick can observe a full gauge.
    fn complete_navigation(&mut self) -> Result<(), FlowError> {
        self.hold.release();
        self.report = Some(self.generator.generate(self.coords)?);
        self.phase = Phase::Resonating;
        Ok(())
    }
}

impl ResonanceFlowBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Provide a corpus directly (for testing without files).
    pub fn with_corpus(mut self, corpus: CorpusSet) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn build(self) -> Result<ResonanceFlow, FlowError> {
        let corpus = match self.corpus {
            Some(corpus) => corpus,
            None => CorpusSet::builtin()?,
        };
        let generator = ReportGenerator::new(corpus, self.seed)?;
        Ok(ResonanceFlow {
            phase: Phase::Covenant,
            covenant: CovenantInput::default(),
            coords: Coordinate::default(),
            linked: false,
            settle: Deadline::idle(),
            crossing: Deadline::idle(),
            hold: HoldGauge::default(),
            report: None,
            generator,
        })
    }
}
