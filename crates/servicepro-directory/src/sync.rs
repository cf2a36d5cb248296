//! Keeps the map markers and the result list in lockstep with the filtered
//! provider set.
//!
//! Markers and cards are derived state. Every sync clears them and rebuilds
//! both from the same slice, so their id sets and order always agree with the
//! filter output.

use std::collections::BTreeSet;

use servicepro_core::{CurrentUser, LatLng, Provider, ProviderId, Route, ShopForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Basemap {
    #[default]
    Osm,
    Satellite,
}

impl std::str::FromStr for Basemap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "osm" | "street" | "streets" => Ok(Basemap::Osm),
            "satellite" | "imagery" => Ok(Basemap::Satellite),
            other => Err(format!("unknown basemap '{other}' (expected osm or satellite)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    ViewDetails,
    Route,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub title: String,
    pub service: String,
    pub rating: f64,
    pub phone: String,
    pub actions: Vec<PopupAction>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: ProviderId,
    pub position: LatLng,
    pub popup: Popup,
}

impl Marker {
    #[must_use]
    pub fn for_provider(provider: &Provider, user: Option<&CurrentUser>) -> Self {
        let mut actions = vec![PopupAction::ViewDetails, PopupAction::Route];
        if user.is_some_and(|u| u.can_manage(provider)) {
            actions.push(PopupAction::Delete);
        }
        Self {
            id: provider.id.clone(),
            position: provider.location(),
            popup: Popup {
                title: provider.name.clone(),
                service: provider.service.to_string(),
                rating: provider.rating,
                phone: provider.phone.clone(),
                actions,
            },
        }
    }
}

/// A result-list entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: ProviderId,
    pub name: String,
    pub service: String,
    pub rating: f64,
    pub address: String,
    /// Distance from the map center.
    pub distance_m: f64,
}

impl Card {
    #[must_use]
    pub fn for_provider(provider: &Provider, center: LatLng) -> Self {
        Self {
            id: provider.id.clone(),
            name: provider.name.clone(),
            service: provider.service.to_string(),
            rating: provider.rating,
            address: provider.address.clone(),
            distance_m: provider.location().distance_to(&center),
        }
    }
}

/// Everything the directory draws. A browser map, a terminal printer, and the
/// test [`Scene`] all sit behind this.
pub trait MapSurface {
    fn clear_markers(&mut self);
    fn add_marker(&mut self, marker: &Marker);
    fn render_list(&mut self, cards: &[Card]);
    fn set_highlight(&mut self, id: &ProviderId, on: bool);
    fn draw_radius(&mut self, center: LatLng, radius_m: f64);
    fn draw_route(&mut self, route: &Route);
    fn clear_route(&mut self);
    fn fit_bounds(&mut self, a: LatLng, b: LatLng);
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn place_temp_marker(&mut self, at: LatLng);
    fn clear_temp_marker(&mut self);
    fn show_form(&mut self, form: &ShopForm);
    fn hide_form(&mut self);
    fn set_basemap(&mut self, basemap: Basemap);
    fn show_user_marker(&mut self, at: LatLng);
}

/// Zoom used for the initial view and for reset.
pub const DEFAULT_ZOOM: u8 = 14;

/// Tracks which ids are on the surface and which one is selected.
#[derive(Debug, Default)]
pub struct MapSync {
    rendered: Vec<ProviderId>,
    selected: Option<ProviderId>,
}

impl MapSync {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds markers, list and radius circle from `visible`.
    ///
    /// A selection that is no longer visible is dropped; one that survives is
    /// re-highlighted on the fresh markers.
    pub fn sync<M: MapSurface>(
        &mut self,
        surface: &mut M,
        visible: &[Provider],
        user: Option<&CurrentUser>,
        center: LatLng,
        radius_km: f64,
    ) {
        surface.clear_markers();
        for provider in visible {
            surface.add_marker(&Marker::for_provider(provider, user));
        }
        let cards: Vec<Card> = visible
            .iter()
            .map(|p| Card::for_provider(p, center))
            .collect();
        surface.render_list(&cards);
        surface.draw_radius(center, radius_km * 1000.0);

        self.rendered = visible.iter().map(|p| p.id.clone()).collect();
        tracing::debug!(markers = self.rendered.len(), "map synced");

        if let Some(id) = self.selected.take() {
            if self.rendered.contains(&id) {
                surface.set_highlight(&id, true);
                self.selected = Some(id);
            }
        }
    }

    /// Highlights `id`, un-highlighting the previous selection first.
    ///
    /// Returns `false` (and changes nothing) when `id` is not on the surface.
    pub fn select<M: MapSurface>(&mut self, surface: &mut M, id: &ProviderId) -> bool {
        if !self.rendered.contains(id) {
            return false;
        }
        if let Some(prev) = self.selected.take() {
            surface.set_highlight(&prev, false);
        }
        surface.set_highlight(id, true);
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection<M: MapSurface>(&mut self, surface: &mut M) {
        if let Some(prev) = self.selected.take() {
            surface.set_highlight(&prev, false);
        }
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ProviderId> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn rendered(&self) -> &[ProviderId] {
        &self.rendered
    }
}

/// An in-memory [`MapSurface`] that records the current picture.
///
/// Used by the tests and by headless callers that only need to inspect what
/// would be on screen.
#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub markers: Vec<Marker>,
    pub cards: Vec<Card>,
    pub highlighted: BTreeSet<ProviderId>,
    pub radius: Option<(LatLng, f64)>,
    pub route_layers: Vec<Route>,
    pub bounds: Option<(LatLng, LatLng)>,
    pub view: Option<(LatLng, u8)>,
    pub temp_marker: Option<LatLng>,
    pub form: Option<ShopForm>,
    pub basemap: Basemap,
    pub user_marker: Option<LatLng>,
}

impl Scene {
    #[must_use]
    pub fn marker_ids(&self) -> Vec<ProviderId> {
        self.markers.iter().map(|m| m.id.clone()).collect()
    }

    #[must_use]
    pub fn card_ids(&self) -> Vec<ProviderId> {
        self.cards.iter().map(|c| c.id.clone()).collect()
    }

    #[must_use]
    pub fn routes_drawn(&self) -> usize {
        self.route_layers.len()
    }

    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        self.route_layers.last()
    }

    #[must_use]
    pub fn marker(&self, id: &ProviderId) -> Option<&Marker> {
        self.markers.iter().find(|m| &m.id == id)
    }
}

impl MapSurface for Scene {
    fn clear_markers(&mut self) {
        self.markers.clear();
        self.highlighted.clear();
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn render_list(&mut self, cards: &[Card]) {
        self.cards = cards.to_vec();
    }

    fn set_highlight(&mut self, id: &ProviderId, on: bool) {
        if on {
            self.highlighted.insert(id.clone());
        } else {
            self.highlighted.remove(id);
        }
    }

    fn draw_radius(&mut self, center: LatLng, radius_m: f64) {
        self.radius = Some((center, radius_m));
    }

    fn draw_route(&mut self, route: &Route) {
        self.route_layers.push(route.clone());
    }

    fn clear_route(&mut self) {
        self.route_layers.clear();
    }

    fn fit_bounds(&mut self, a: LatLng, b: LatLng) {
        self.bounds = Some((a, b));
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.view = Some((center, zoom));
    }

    fn place_temp_marker(&mut self, at: LatLng) {
        self.temp_marker = Some(at);
    }

    fn clear_temp_marker(&mut self) {
        self.temp_marker = None;
    }

    fn show_form(&mut self, form: &ShopForm) {
        self.form = Some(form.clone());
    }

    fn hide_form(&mut self) {
        self.form = None;
    }

    fn set_basemap(&mut self, basemap: Basemap) {
        self.basemap = basemap;
    }

    fn show_user_marker(&mut self, at: LatLng) {
        self.user_marker = Some(at);
    }
}
