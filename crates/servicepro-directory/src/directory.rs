//! The application state object and its intent dispatcher.
//!
//! Each piece of state has exactly one writer: the store owns the provider
//! list, the router owns the route session, the picker owns picking mode, and
//! the session layer hands in the current user via `SignedIn`/`SignedOut`.
//! Everything on the map surface is derived from that state and rebuilt by
//! [`MapSync`].

use servicepro_core::{
    apply, CurrentUser, FilterCriteria, GeofenceConstraint, LatLng, Provider, ProviderId, Review,
    ShopForm,
};

use crate::error::DirectoryError;
use crate::intent::{Feedback, Intent};
use crate::narration::{route_summary, Narrator, SpeechSynth};
use crate::picker::{PendingForm, PickerSession};
use crate::reviews::ReviewCache;
use crate::routing::{Geolocator, RouteOutcome, RouteService, RouteState, Router};
use crate::store::{ProviderStore, ShopRepository, StoreStatus};
use crate::sync::{Basemap, MapSurface, MapSync, DEFAULT_ZOOM};

/// Zoom used when focusing a single shop or the user's position.
pub const DETAIL_ZOOM: u8 = 16;

/// Fixed settings the directory is opened with.
#[derive(Debug, Clone, Copy)]
pub struct DirectorySettings {
    /// Map center and creation radius. The center also anchors the
    /// search-radius filter.
    pub geofence: GeofenceConstraint,
    pub default_radius_km: f64,
}

/// Everything the detail view shows for one shop.
#[derive(Debug, Clone)]
pub struct ProviderDetails {
    pub provider: Provider,
    pub reviews: Vec<Review>,
    pub distance_m: f64,
    pub can_manage: bool,
}

pub struct Directory<R, T, G, S, M> {
    store: ProviderStore<R>,
    routes: T,
    geolocator: G,
    narrator: Narrator<S>,
    surface: M,
    settings: DirectorySettings,
    criteria: FilterCriteria,
    visible: Vec<Provider>,
    sync: MapSync,
    picker: PickerSession,
    open_form: Option<PendingForm>,
    router: Router,
    user_location: Option<LatLng>,
    current_user: Option<CurrentUser>,
    reviews: ReviewCache,
    basemap: Basemap,
}

impl<R, T, G, S, M> Directory<R, T, G, S, M>
where
    R: ShopRepository,
    T: RouteService,
    G: Geolocator,
    S: SpeechSynth,
    M: MapSurface,
{
    pub fn new(
        store: ProviderStore<R>,
        routes: T,
        geolocator: G,
        narrator: Narrator<S>,
        surface: M,
        settings: DirectorySettings,
    ) -> Self {
        Self {
            store,
            routes,
            geolocator,
            narrator,
            surface,
            settings,
            criteria: FilterCriteria::with_radius(settings.default_radius_km),
            visible: Vec::new(),
            sync: MapSync::new(),
            picker: PickerSession::Idle,
            open_form: None,
            router: Router::new(),
            user_location: None,
            current_user: None,
            reviews: ReviewCache::new(),
            basemap: Basemap::default(),
        }
    }

    /// Draws the initial view and loads the shop list.
    pub async fn open(&mut self) -> Feedback {
        self.surface.set_basemap(self.basemap);
        self.surface.set_view(self.center(), DEFAULT_ZOOM);
        self.dispatch(Intent::Refresh).await
    }

    /// Handles one intent. Failures come back as notices; the directory is
    /// left consistent either way.
    pub async fn dispatch(&mut self, intent: Intent) -> Feedback {
        tracing::debug!(?intent, "dispatch");
        let result = match intent {
            Intent::Refresh => Ok(self.refresh().await),
            Intent::FilterChanged {
                service,
                min_rating,
                radius_km,
            } => {
                self.criteria.service = service;
                self.criteria.min_rating = min_rating;
                self.criteria.radius_km = radius_km;
                self.resync();
                Ok(Feedback::none())
            }
            Intent::SearchChanged(text) => {
                self.criteria.search_text = text;
                self.resync();
                Ok(Feedback::none())
            }
            Intent::CardClicked(id) => self.focus(&id, true),
            Intent::MarkerClicked(id) => {
                if self.picker.is_picking() {
                    Ok(Feedback::none())
                } else {
                    self.focus(&id, false)
                }
            }
            Intent::OpenAddForm => self.open_add_form(),
            Intent::OpenEditForm(id) => self.open_edit_form(&id),
            Intent::StartPicking(form) => self.start_picking(form),
            Intent::MapClicked(at) => {
                if let Some(pending) = self.picker.on_map_click(&mut self.surface, at) {
                    self.open_form = Some(pending);
                }
                Ok(Feedback::none())
            }
            Intent::CancelPicking => {
                if let Some(pending) = self.picker.cancel(&mut self.surface) {
                    self.open_form = Some(pending);
                }
                Ok(Feedback::none())
            }
            Intent::SubmitShop(form) => self.submit_shop(form).await,
            Intent::DeleteShop(id) => self.delete_shop(&id).await,
            Intent::LocateUser => self.locate_user().await.map(|at| {
                self.surface.set_view(at, DETAIL_ZOOM);
                Feedback::none()
            }),
            Intent::RouteRequested(id) => self.request_route(&id).await,
            Intent::CloseDetail => {
                self.router.close(&mut self.surface);
                self.sync.clear_selection(&mut self.surface);
                Ok(Feedback::none())
            }
            Intent::ToggleVoice => Ok(Feedback::info(if self.narrator.toggle() {
                "Voice navigation on"
            } else {
                "Voice navigation off"
            })),
            Intent::SetBasemap(basemap) => {
                self.basemap = basemap;
                self.surface.set_basemap(basemap);
                Ok(Feedback::none())
            }
            Intent::ResetView => {
                self.criteria.radius_km = self.settings.default_radius_km;
                self.surface.set_view(self.center(), DEFAULT_ZOOM);
                self.resync();
                Ok(Feedback::none())
            }
            Intent::AddReview {
                provider,
                rating,
                text,
            } => self.add_review(&provider, rating, &text),
            Intent::SignedIn(user) => {
                tracing::info!(user = %user.username, role = user.role.as_str(), "signed in");
                self.current_user = Some(user);
                self.resync();
                Ok(Feedback::none())
            }
            Intent::SignedOut => {
                self.current_user = None;
                self.close_form();
                self.resync();
                Ok(Feedback::none())
            }
        };

        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "intent failed");
            Feedback::error(e)
        })
    }

    fn center(&self) -> LatLng {
        self.settings.geofence.center
    }

    async fn refresh(&mut self) -> Feedback {
        let feedback = match self.store.refresh().await {
            Ok(_) => Feedback::none(),
            Err(e) => Feedback::error(e),
        };
        self.resync();
        feedback
    }

    /// Recomputes the visible set and redraws everything derived from it.
    fn resync(&mut self) {
        let center = self.center();
        self.visible = apply(&self.store.snapshot(), &self.criteria, center);
        self.sync.sync(
            &mut self.surface,
            &self.visible,
            self.current_user.as_ref(),
            center,
            self.criteria.radius_km,
        );
    }

    fn focus(&mut self, id: &ProviderId, recenter: bool) -> Result<Feedback, DirectoryError> {
        let provider = self
            .visible
            .iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))?;
        let at = provider.location();
        self.sync.select(&mut self.surface, id);
        if recenter {
            self.surface.set_view(at, DETAIL_ZOOM);
        }
        Ok(Feedback::none())
    }

    fn require_add(&self) -> Result<(), DirectoryError> {
        match &self.current_user {
            Some(u) if u.can_add_shops() => Ok(()),
            Some(_) => Err(DirectoryError::Permission("only providers can add shops")),
            None => Err(DirectoryError::Permission("log in to add a shop")),
        }
    }

    fn require_manage(&self, id: &ProviderId) -> Result<Provider, DirectoryError> {
        let provider = self
            .store
            .find_by_id(id)
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))?;
        match &self.current_user {
            Some(u) if u.can_manage(&provider) => Ok(provider),
            _ => Err(DirectoryError::Permission(
                "only the owner or an admin can change this shop",
            )),
        }
    }

    fn open_add_form(&mut self) -> Result<Feedback, DirectoryError> {
        self.require_add()?;
        self.picker.abandon();
        self.show_form(PendingForm::default());
        Ok(Feedback::none())
    }

    fn open_edit_form(&mut self, id: &ProviderId) -> Result<Feedback, DirectoryError> {
        let provider = self.require_manage(id)?;
        self.picker.abandon();
        self.show_form(PendingForm {
            form: ShopForm::from_provider(&provider),
            editing: Some(provider.id),
        });
        Ok(Feedback::none())
    }

    fn show_form(&mut self, pending: PendingForm) {
        self.surface.clear_temp_marker();
        self.surface.show_form(&pending.form);
        self.open_form = Some(pending);
    }

    fn close_form(&mut self) {
        self.picker.abandon();
        self.surface.clear_temp_marker();
        self.surface.hide_form();
        self.open_form = None;
    }

    fn start_picking(&mut self, form: ShopForm) -> Result<Feedback, DirectoryError> {
        let editing = self.open_form.as_ref().and_then(|p| p.editing.clone());
        match &editing {
            Some(id) => {
                self.require_manage(id)?;
            }
            None => self.require_add()?,
        }
        self.open_form = None;
        self.picker
            .start(&mut self.surface, PendingForm { form, editing });
        Ok(Feedback::info("Click on the map to place the shop"))
    }

    async fn submit_shop(&mut self, form: ShopForm) -> Result<Feedback, DirectoryError> {
        let editing = match &self.picker {
            PickerSession::Picking(p) => p.editing.clone(),
            PickerSession::Idle => self.open_form.as_ref().and_then(|p| p.editing.clone()),
        };
        // Edits keep the shop's owner; only new shops take the current user.
        let owner = match &editing {
            Some(id) => self.require_manage(id)?.owner_id,
            None => {
                self.require_add()?;
                self.current_user.as_ref().map(|u| u.id.clone())
            }
        };
        let draft = form.validate(&self.settings.geofence)?;

        // Submitting while picking tears the picker down.
        if self.picker.is_picking() {
            self.picker.abandon();
            self.surface.show_form(&form);
        }
        self.open_form = Some(PendingForm {
            form,
            editing: editing.clone(),
        });

        let written = match &editing {
            Some(id) => self.store.update(id, owner.as_ref(), &draft).await?,
            None => self.store.create(owner.as_ref(), &draft).await?,
        };
        let saved = written.value;
        tracing::info!(id = %saved.id, name = %saved.name, edited = editing.is_some(), "shop saved");

        self.close_form();
        self.resync();
        let mut feedback = Feedback::info(if editing.is_some() {
            format!("Updated {}", saved.name)
        } else {
            format!("Added {}", saved.name)
        });
        if let Err(e) = written.refresh {
            feedback.push_error(e);
        }
        Ok(feedback)
    }

    async fn delete_shop(&mut self, id: &ProviderId) -> Result<Feedback, DirectoryError> {
        let provider = self.require_manage(id)?;
        let written = self.store.delete(id).await?;
        tracing::info!(id = %id, "shop deleted");

        if self
            .router
            .session()
            .is_some_and(|s| &s.destination_id == id)
        {
            self.router.close(&mut self.surface);
        }
        if self.open_form.as_ref().and_then(|p| p.editing.as_ref()) == Some(id) {
            self.close_form();
        }
        self.resync();
        let mut feedback = Feedback::info(format!("Deleted {}", provider.name));
        if let Err(e) = written.refresh {
            feedback.push_error(e);
        }
        Ok(feedback)
    }

    async fn locate_user(&mut self) -> Result<LatLng, DirectoryError> {
        let at = self.geolocator.locate().await?;
        self.user_location = Some(at);
        self.surface.show_user_marker(at);
        tracing::debug!(%at, "user located");
        Ok(at)
    }

    async fn request_route(&mut self, id: &ProviderId) -> Result<Feedback, DirectoryError> {
        let destination = self
            .store
            .find_by_id(id)
            .ok_or_else(|| DirectoryError::NotFound(id.clone()))?;

        let origin = match self.user_location {
            Some(at) => at,
            None => self.locate_user().await?,
        };

        let ticket = self.router.begin(
            &mut self.surface,
            origin,
            destination.id.clone(),
            destination.location(),
        );
        let result = self.routes.route(origin, destination.location()).await;

        match self.router.resolve(&mut self.surface, ticket, result) {
            RouteOutcome::Active(route) => {
                self.narrator.narrate_route(&route);
                Ok(Feedback::info(route_summary(&route)))
            }
            RouteOutcome::Failed(message) => Err(DirectoryError::Routing(message)),
            RouteOutcome::Stale => Ok(Feedback::none()),
        }
    }

    fn add_review(
        &mut self,
        provider: &ProviderId,
        rating: u8,
        text: &str,
    ) -> Result<Feedback, DirectoryError> {
        let author = self
            .current_user
            .as_ref()
            .ok_or(DirectoryError::Permission("log in to leave a review"))?;
        if self.store.find_by_id(provider).is_none() {
            return Err(DirectoryError::NotFound(provider.clone()));
        }
        self.reviews.append(provider, author, rating, text)?;
        Ok(Feedback::info("Review added"))
    }

    /// Detail view data for `id`, with session-local reviews appended.
    #[must_use]
    pub fn details(&self, id: &ProviderId) -> Option<ProviderDetails> {
        let provider = self.store.find_by_id(id)?;
        Some(ProviderDetails {
            reviews: self.reviews.reviews_for(&provider),
            distance_m: provider.location().distance_to(&self.center()),
            can_manage: self
                .current_user
                .as_ref()
                .is_some_and(|u| u.can_manage(&provider)),
            provider,
        })
    }

    #[must_use]
    pub fn visible(&self) -> &[Provider] {
        &self.visible
    }

    #[must_use]
    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    #[must_use]
    pub fn status(&self) -> StoreStatus {
        self.store.status()
    }

    pub fn store(&self) -> &ProviderStore<R> {
        &self.store
    }

    pub fn surface(&self) -> &M {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut M {
        &mut self.surface
    }

    pub fn narrator(&self) -> &Narrator<S> {
        &self.narrator
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.current_user.as_ref()
    }

    #[must_use]
    pub fn selected(&self) -> Option<&ProviderId> {
        self.sync.selected()
    }

    #[must_use]
    pub fn route_state(&self) -> RouteState {
        self.router.state()
    }

    #[must_use]
    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    #[must_use]
    pub fn is_picking(&self) -> bool {
        self.picker.is_picking()
    }

    #[must_use]
    pub fn open_form(&self) -> Option<&PendingForm> {
        self.open_form.as_ref()
    }

    #[must_use]
    pub fn basemap(&self) -> Basemap {
        self.basemap
    }

    #[must_use]
    pub fn settings(&self) -> &DirectorySettings {
        &self.settings
    }
}
