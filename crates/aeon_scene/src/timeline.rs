use aeon_core::{AeonError, Event, Result};
use aeon_physics::ScaleFactorModel;

use crate::mapper::CoordinateMapper;

/// Chronologically ordered milestones of cosmic history
#[derive(Debug, Clone, PartialEq)]
pub struct EventTimeline {
    events: Vec<Event>,
}

/// An event together with its scale factor and plotted position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlottedEvent<'a> {
    pub event: &'a Event,
    pub scale_factor: f64,
    pub position: [f64; 2],
}

impl EventTimeline {
    /// Build a timeline, ordering events by time. Ties keep their input order;
    /// coincident events are kept as-is.
    pub fn new(mut events: Vec<Event>) -> Result<Self> {
        if let Some(bad) = events
            .iter()
            .find(|e| !e.time.is_finite() || e.time < 0.0)
        {
            return Err(AeonError::configuration(format!(
                "event '{}' has invalid time {}",
                bad.label, bad.time
            )));
        }
        events.sort_by(|a, b| a.time.total_cmp(&b.time));
        Ok(Self { events })
    }

    /// The milestones shown on the scale-factor plot, from the Planck epoch to today
    pub fn cosmic_history() -> Self {
        let events = [
            (1e-10, "Planck"),
            (1e-6, "Particules"),
            (0.00038, "CMB"),
            (0.2, "Réionisation"),
            (1.0, "Galaxies"),
            (4.5, "Voie Lactée"),
            (9.0, "Réaccélération"),
            (13.8, "Aujourd'hui"),
        ]
        .into_iter()
        .map(|(t, label)| Event::new(t, label))
        .collect();
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Compute a(t) and the plotted position of every event, in reveal order
    pub fn plot<'a>(
        &'a self,
        model: &ScaleFactorModel,
        mapper: &CoordinateMapper,
    ) -> Vec<PlottedEvent<'a>> {
        self.events
            .iter()
            .map(|event| {
                let scale_factor = model.a_of_t(event.time);
                PlottedEvent {
                    event,
                    scale_factor,
                    position: mapper.map(event.time, scale_factor),
                }
            })
            .collect()
    }
}
