//! One-shot "click the map to place this shop" mode.

use servicepro_core::{LatLng, ProviderId, ShopForm};

use crate::sync::MapSurface;

/// An add or edit form that is open (or suspended while picking).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PendingForm {
    pub form: ShopForm,
    /// `Some` when the form edits an existing shop.
    pub editing: Option<ProviderId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum PickerSession {
    #[default]
    Idle,
    Picking(PendingForm),
}

impl PickerSession {
    #[must_use]
    pub fn is_picking(&self) -> bool {
        matches!(self, PickerSession::Picking(_))
    }

    /// Suspends `pending` and arms the next map click. A session already in
    /// progress is replaced.
    pub fn start<M: MapSurface>(&mut self, surface: &mut M, pending: PendingForm) {
        surface.hide_form();
        *self = PickerSession::Picking(pending);
    }

    /// Captures `at` into the suspended form and reopens it.
    ///
    /// Returns `None` without touching anything when no picking session is
    /// armed.
    pub fn on_map_click<M: MapSurface>(&mut self, surface: &mut M, at: LatLng) -> Option<PendingForm> {
        let PickerSession::Picking(mut pending) = std::mem::take(self) else {
            return None;
        };
        pending.form.set_location(at);
        surface.place_temp_marker(at);
        surface.show_form(&pending.form);
        tracing::debug!(%at, "location picked");
        Some(pending)
    }

    /// Leaves picking mode and reopens the form with its previous coordinates.
    pub fn cancel<M: MapSurface>(&mut self, surface: &mut M) -> Option<PendingForm> {
        let PickerSession::Picking(pending) = std::mem::take(self) else {
            return None;
        };
        surface.show_form(&pending.form);
        Some(pending)
    }

    /// Drops the session without reopening anything.
    pub fn abandon(&mut self) {
        *self = PickerSession::Idle;
    }
}
