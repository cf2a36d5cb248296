//! Spoken route summaries.

use servicepro_core::Route;

/// A speech backend. Speaking replaces nothing on its own; callers cancel
/// first when an utterance must not overlap.
pub trait SpeechSynth {
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);
}

pub struct Narrator<S> {
    synth: S,
    enabled: bool,
}

impl<S: SpeechSynth> Narrator<S> {
    pub fn new(synth: S) -> Self {
        Self {
            synth,
            enabled: false,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips narration and returns the new state.
    ///
    /// Turning it off silences any utterance in flight.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        if self.enabled {
            self.synth.cancel();
            self.synth.speak("Voice navigation enabled.");
        } else {
            self.synth.cancel();
        }
        tracing::debug!(enabled = self.enabled, "voice navigation toggled");
        self.enabled
    }

    /// Speaks the summary of `route` if narration is on.
    pub fn narrate_route(&mut self, route: &Route) {
        if !self.enabled {
            return;
        }
        self.synth.cancel();
        self.synth.speak(&route_summary(route));
    }

    pub fn synth(&self) -> &S {
        &self.synth
    }

    pub fn synth_mut(&mut self) -> &mut S {
        &mut self.synth
    }
}

#[must_use]
pub fn format_distance(meters: f64) -> String {
    let rounded = meters.round();
    if rounded < 1000.0 {
        format!("{rounded} meters")
    } else {
        format!("{:.1} kilometers", meters / 1000.0)
    }
}

#[must_use]
pub fn route_summary(route: &Route) -> String {
    let minutes = (route.duration_s / 60.0).round();
    let mut text = format!(
        "Route calculated. Destination is {} away. Travel time is about {minutes} minutes.",
        format_distance(route.distance_m)
    );
    if let Some(first) = route.first_instruction() {
        text.push_str(&format!(" First, {first}."));
    }
    text
}
