//! The active planet and everything that feeds its parameters.
//!
//! Local controls and the catalog write the bridge's local values; the
//! habitability worker writes its external values. Every change to the
//! physical sliders replaces the parameter state, bumps its version and
//! schedules a debounced scoring request, so answers that arrive for an
//! older state are dropped instead of overwriting the newer one.

use std::time::{Duration, Instant};

use exo_config::ControlsConfig;
use exo_habitability::{Debouncer, HabitabilityRequest, HabitabilityWorker, VersionTracker};
use exo_planet::{
    BodyError, ExternalValues, PhysicalParameters, PlanetBody, PlanetCatalogEntry,
    PlanetVisualParameters, ReactivityBridge, SLIDERS, SliderSpec,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::controls::VisualControl;

#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("catalog has no entry at index {0}")]
    UnknownEntry(usize),

    #[error(transparent)]
    Body(#[from] BodyError),
}

pub struct PlanetSession {
    catalog: Vec<PlanetCatalogEntry>,
    selected: usize,
    body: PlanetBody,
    bridge: ReactivityBridge,
    physical: PhysicalParameters,
    focused_slider: usize,
    step: f32,
    tracker: VersionTracker,
    debouncer: Debouncer<HabitabilityRequest>,
    worker: Option<HabitabilityWorker>,
    habitability: Option<f32>,
}

impl PlanetSession {
    /// Mount `catalog[start]` with the configured control values.
    ///
    /// Without a worker the session never scores and the readout stays at
    /// "Calculating...".
    pub fn new(
        catalog: Vec<PlanetCatalogEntry>,
        start: usize,
        controls: &ControlsConfig,
        worker: Option<HabitabilityWorker>,
        debounce: Duration,
        now: Instant,
    ) -> Result<Self, SessionError> {
        let entry = catalog.get(start).ok_or(SessionError::UnknownEntry(start))?;
        let mut body = PlanetBody::mount(&entry.variant)?;
        let physical = PhysicalParameters::from_stats(&entry.stats);
        let bridge = ReactivityBridge::new(
            PlanetVisualParameters::new(
                controls.temperature,
                controls.sun_proximity,
                controls.vegetation,
                controls.sea_level,
            )
            .with_brightness(controls.brightness),
        );
        bridge.sync(&mut body);

        let mut session = Self {
            catalog,
            selected: start,
            body,
            bridge,
            physical,
            focused_slider: 0,
            step: controls.step,
            tracker: VersionTracker::new(),
            debouncer: Debouncer::new(debounce),
            worker,
            habitability: None,
        };
        session.request_score(now);
        Ok(session)
    }

    /// Switch to another catalog planet.
    ///
    /// The entry's defaults apply immediately; refined vegetation and sea
    /// level follow when its scoring request resolves. Brightness is kept.
    pub fn select(&mut self, index: usize, now: Instant) -> Result<(), SessionError> {
        let entry = self
            .catalog
            .get(index)
            .ok_or(SessionError::UnknownEntry(index))?;
        let mut body = PlanetBody::mount(&entry.variant)?;

        let brightness = self.bridge.local().brightness;
        self.bridge
            .set_local(entry.defaults.with_brightness(brightness));
        self.bridge.clear_external();
        self.physical = PhysicalParameters::from_stats(&entry.stats);
        self.bridge.sync(&mut body);
        self.body = body;
        self.selected = index;

        info!(planet = entry.name, "Selected planet");
        self.request_score(now);
        Ok(())
    }

    /// Move one local control by `direction` steps.
    pub fn adjust(&mut self, control: VisualControl, direction: f32) {
        let next = control.adjust(self.bridge.local(), direction * self.step);
        self.bridge.set_local(next);
        let resolved = self.bridge.sync(&mut self.body);
        debug!(control = control.label(), ?resolved, "Local control changed");
    }

    pub fn focus_slider(&mut self, offset: i32) -> &'static SliderSpec {
        let len = SLIDERS.len() as i32;
        self.focused_slider = (self.focused_slider as i32 + offset).rem_euclid(len) as usize;
        let spec = &SLIDERS[self.focused_slider];
        info!(slider = spec.label, value = self.physical.get(spec.key), "Slider focused");
        spec
    }

    pub fn focused_slider(&self) -> &'static SliderSpec {
        &SLIDERS[self.focused_slider]
    }

    /// Nudge the focused physical slider and rescore.
    pub fn nudge_slider(&mut self, steps: f32, now: Instant) {
        let spec = self.focused_slider();
        if self.physical.nudge(spec.key, steps) {
            info!(slider = spec.label, value = self.physical.get(spec.key), "Slider changed");
            self.request_score(now);
        }
    }

    /// Set a physical slider by key and rescore. `false` for an unknown key.
    pub fn set_physical(&mut self, key: &str, value: f32, now: Instant) -> bool {
        let known = self.physical.set(key, value);
        if known {
            self.request_score(now);
        }
        known
    }

    fn request_score(&mut self, now: Instant) {
        let version = self.tracker.bump();
        self.habitability = None;
        if self.worker.is_some() {
            debug!(version = version.0, "Scheduling habitability request");
            self.debouncer
                .push(HabitabilityRequest::from(&self.physical), now);
        }
    }

    /// Release a due request and apply the newest current answer.
    /// Returns `true` when the parameters changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(worker) = &self.worker else {
            return false;
        };

        if let Some(request) = self.debouncer.poll(now)
            && !worker.submit(self.tracker.current(), request)
        {
            warn!("Habitability worker is gone; request dropped");
        }

        let Some(response) = worker.latest_current(&self.tracker) else {
            return false;
        };
        if !response.succeeded {
            warn!(planet = self.body.name(), "Habitability scoring failed, using zeros");
        }

        let result = response.result;
        self.bridge.set_external(ExternalValues::surface_cover(
            result.vegetation,
            result.sea_level,
        ));
        self.habitability = Some(result.habitability_score);
        self.bridge.sync(&mut self.body);
        info!(
            planet = self.body.name(),
            score = result.habitability_score,
            vegetation = result.vegetation,
            sea_level = result.sea_level,
            "Habitability updated"
        );
        true
    }

    /// One animation step.
    pub fn advance(&mut self) {
        self.body.advance();
    }

    pub fn body(&self) -> &PlanetBody {
        &self.body
    }

    pub fn entry(&self) -> &PlanetCatalogEntry {
        &self.catalog[self.selected]
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn catalog(&self) -> &[PlanetCatalogEntry] {
        &self.catalog
    }

    pub fn physical(&self) -> &PhysicalParameters {
        &self.physical
    }

    pub fn parameters(&self) -> PlanetVisualParameters {
        self.bridge.resolved()
    }

    /// Latest score for the current state; `None` while one is pending.
    pub fn habitability(&self) -> Option<f32> {
        self.habitability
    }

    pub fn readout(&self) -> String {
        self.entry().stats.readout(self.habitability)
    }

    pub fn title(&self, base: &str) -> String {
        format!("{base} - {} | {}", self.entry().name, self.readout())
    }
}
