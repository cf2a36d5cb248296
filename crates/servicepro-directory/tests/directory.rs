//! End-to-end behaviour of `Directory::dispatch` against in-memory fakes.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use servicepro_api::{ApiError, RoutingError};
use servicepro_core::{
    apply, CurrentUser, GeofenceConstraint, LatLng, Provider, ProviderId, Role, Route,
    ServiceFilter, ServiceKind, ShopDraft, ShopForm, UserId,
};
use servicepro_directory::{
    Directory, DirectoryError, DirectorySettings, Feedback, GeolocationError, Geolocator, Intent,
    Narrator, ProviderStore, RouteService, RouteState, Scene, ShopRepository, SpeechSynth,
    StoreStatus,
};

const CENTER: LatLng = LatLng::new(31.4880, 74.3430);

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct FakeShops {
    shops: Rc<RefCell<Vec<Provider>>>,
    writes: Rc<Cell<usize>>,
    offline: Rc<Cell<bool>>,
}

impl FakeShops {
    fn with(shops: Vec<Provider>) -> Self {
        let fake = Self::default();
        *fake.shops.borrow_mut() = shops;
        fake
    }
}

fn from_draft(id: ProviderId, owner: Option<&UserId>, draft: &ShopDraft) -> Provider {
    Provider {
        id,
        owner_id: owner.cloned(),
        name: draft.name.clone(),
        service: draft.service.clone(),
        phone: draft.phone.clone(),
        address: draft.address.clone(),
        description: draft.description.clone(),
        lat: draft.location.lat,
        lng: draft.location.lng,
        rating: 0.0,
        reviews: vec![],
    }
}

impl ShopRepository for FakeShops {
    async fn list(&self) -> Result<Vec<Provider>, ApiError> {
        if self.offline.get() {
            return Err(ApiError::Status {
                status: 503,
                message: "Service Unavailable".to_owned(),
            });
        }
        Ok(self.shops.borrow().clone())
    }

    async fn create(
        &self,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError> {
        self.writes.set(self.writes.get() + 1);
        let id = ProviderId(format!("new-{}", self.writes.get()));
        let created = from_draft(id, owner, draft);
        self.shops.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: &ProviderId,
        owner: Option<&UserId>,
        draft: &ShopDraft,
    ) -> Result<Provider, ApiError> {
        self.writes.set(self.writes.get() + 1);
        let mut shops = self.shops.borrow_mut();
        let slot = shops
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| ApiError::Status {
                status: 404,
                message: "Shop not found".to_owned(),
            })?;
        *slot = from_draft(id.clone(), owner, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: &ProviderId) -> Result<(), ApiError> {
        self.writes.set(self.writes.get() + 1);
        self.shops.borrow_mut().retain(|p| &p.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FakeRoutes {
    calls: Rc<Cell<usize>>,
    fail: bool,
}

impl RouteService for FakeRoutes {
    async fn route(&self, from: LatLng, to: LatLng) -> Result<Route, RoutingError> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(RoutingError::NoRoute {
                code: "NoRoute".to_owned(),
                message: "Impossible route between points".to_owned(),
            });
        }
        Ok(Route {
            distance_m: from.distance_to(&to),
            duration_s: 240.0,
            geometry: vec![from, to],
            instructions: vec!["Head north on Main Boulevard".to_owned()],
        })
    }
}

struct FakeGeo(Result<LatLng, GeolocationError>);

impl Geolocator for FakeGeo {
    async fn locate(&self) -> Result<LatLng, GeolocationError> {
        self.0.clone()
    }
}

#[derive(Default)]
struct Speech {
    spoken: Vec<String>,
}

impl SpeechSynth for Speech {
    fn speak(&mut self, text: &str) {
        self.spoken.push(text.to_owned());
    }

    fn cancel(&mut self) {}
}

type TestDirectory = Directory<FakeShops, FakeRoutes, FakeGeo, Speech, Scene>;

fn settings() -> DirectorySettings {
    DirectorySettings {
        geofence: GeofenceConstraint {
            center: CENTER,
            max_radius_km: 2.5,
        },
        default_radius_km: 1.0,
    }
}

fn build(shops: FakeShops, routes: FakeRoutes, geo: FakeGeo) -> TestDirectory {
    Directory::new(
        ProviderStore::new(shops, Duration::from_secs(5)),
        routes,
        geo,
        Narrator::new(Speech::default()),
        Scene::default(),
        settings(),
    )
}

fn shop(id: &str, service: ServiceKind, rating: f64, at: LatLng, owner: Option<&str>) -> Provider {
    Provider {
        id: ProviderId::from(id),
        owner_id: owner.map(|o| UserId(o.to_owned())),
        name: format!("Shop {id}"),
        service,
        phone: "0300-1234567".to_owned(),
        address: "Gulberg".to_owned(),
        description: String::new(),
        lat: at.lat,
        lng: at.lng,
        rating,
        reviews: vec![],
    }
}

/// Point due north of `CENTER` at `meters`.
fn north(meters: f64) -> LatLng {
    LatLng::new(CENTER.lat + (meters / 6_371_000.0).to_degrees(), CENTER.lng)
}

fn neighbourhood() -> Vec<Provider> {
    vec![
        shop("p1", ServiceKind::Plumber, 4.0, north(300.0), Some("10")),
        shop("p2", ServiceKind::Plumber, 2.0, north(600.0), None),
        shop("m1", ServiceKind::Mechanic, 5.0, north(900.0), None),
        shop("far", ServiceKind::Plumber, 5.0, north(1800.0), None),
    ]
}

fn user(id: &str, role: Role) -> CurrentUser {
    CurrentUser {
        id: UserId(id.to_owned()),
        username: format!("user{id}"),
        role,
    }
}

fn ids(providers: &[Provider]) -> Vec<ProviderId> {
    providers.iter().map(|p| p.id.clone()).collect()
}

fn first_error(feedback: &Feedback) -> &DirectoryError {
    feedback.errors().next().expect("expected an error notice")
}

async fn opened(shops: Vec<Provider>) -> TestDirectory {
    let mut dir = build(
        FakeShops::with(shops),
        FakeRoutes::default(),
        FakeGeo(Ok(CENTER)),
    );
    let feedback = dir.open().await;
    assert!(!feedback.has_errors(), "{:?}", feedback.messages());
    dir
}

// ---------------------------------------------------------------------------
// Filtering and map sync
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_renders_shops_inside_default_radius() {
    let dir = opened(neighbourhood()).await;
    assert_eq!(dir.status(), StoreStatus::Online);
    assert_eq!(
        ids(dir.visible()),
        vec![
            ProviderId::from("p1"),
            ProviderId::from("p2"),
            ProviderId::from("m1")
        ]
    );
    assert_eq!(dir.surface().marker_ids(), ids(dir.visible()));
    assert_eq!(dir.surface().card_ids(), ids(dir.visible()));
}

#[tokio::test]
async fn plumber_filter_keeps_only_well_rated_plumber() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::FilterChanged {
        service: ServiceFilter::Only(ServiceKind::Plumber),
        min_rating: 3.0,
        radius_km: 2.0,
    })
    .await;

    assert_eq!(ids(dir.visible()), vec![ProviderId::from("p1"), ProviderId::from("far")]);
    assert_eq!(dir.surface().marker_ids(), ids(dir.visible()));

    dir.dispatch(Intent::FilterChanged {
        service: ServiceFilter::Only(ServiceKind::Plumber),
        min_rating: 3.0,
        radius_km: 1.0,
    })
    .await;
    assert_eq!(ids(dir.visible()), vec![ProviderId::from("p1")]);
}

#[tokio::test]
async fn markers_track_apply_after_every_filter_change() {
    let mut dir = opened(neighbourhood()).await;
    let changes = [
        (ServiceFilter::All, 0.0, 0.5),
        (ServiceFilter::Only(ServiceKind::Mechanic), 0.0, 2.0),
        (ServiceFilter::All, 4.5, 2.0),
        (ServiceFilter::All, 0.0, 0.1),
    ];
    for (service, min_rating, radius_km) in changes {
        dir.dispatch(Intent::FilterChanged {
            service,
            min_rating,
            radius_km,
        })
        .await;
        let expected = apply(&dir.store().snapshot(), dir.criteria(), CENTER);
        assert_eq!(dir.surface().marker_ids(), ids(&expected));
        assert_eq!(dir.surface().card_ids(), ids(&expected));
    }
}

#[tokio::test]
async fn search_overrides_radius_and_rating() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::FilterChanged {
        service: ServiceFilter::Only(ServiceKind::Mechanic),
        min_rating: 5.0,
        radius_km: 0.1,
    })
    .await;
    assert!(dir.visible().is_empty());

    dir.dispatch(Intent::SearchChanged("  PLUMB ".to_owned())).await;
    assert_eq!(
        ids(dir.visible()),
        vec![
            ProviderId::from("p1"),
            ProviderId::from("p2"),
            ProviderId::from("far")
        ]
    );
}

#[tokio::test]
async fn offline_refresh_shows_empty_view_with_notice() {
    let shops = FakeShops::with(neighbourhood());
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    assert_eq!(dir.visible().len(), 3);

    shops.offline.set(true);
    let feedback = dir.dispatch(Intent::Refresh).await;
    assert!(matches!(first_error(&feedback), DirectoryError::Offline(_)));
    assert_eq!(dir.status(), StoreStatus::Offline);
    assert!(dir.visible().is_empty());
    assert!(dir.surface().markers.is_empty());
}

#[tokio::test]
async fn selection_is_cleared_when_shop_leaves_view() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::CardClicked(ProviderId::from("m1"))).await;
    assert_eq!(dir.selected(), Some(&ProviderId::from("m1")));

    dir.dispatch(Intent::SearchChanged("plumber".to_owned())).await;
    assert_eq!(dir.selected(), None);
    assert!(dir.surface().highlighted.is_empty());
}

#[tokio::test]
async fn reset_view_restores_default_radius() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::FilterChanged {
        service: ServiceFilter::All,
        min_rating: 0.0,
        radius_km: 2.0,
    })
    .await;
    assert_eq!(dir.visible().len(), 4);

    dir.dispatch(Intent::ResetView).await;
    assert_eq!(dir.visible().len(), 3);
    assert_eq!(dir.surface().view.map(|(c, _)| c), Some(CENTER));
}

// ---------------------------------------------------------------------------
// Adding shops: permissions and geofence
// ---------------------------------------------------------------------------

fn form_at(at: LatLng) -> ShopForm {
    ShopForm {
        name: "Clean Ride".to_owned(),
        service: "carwash".to_owned(),
        lat: at.lat.to_string(),
        lng: at.lng.to_string(),
        ..ShopForm::default()
    }
}

#[tokio::test]
async fn customer_cannot_add_a_shop() {
    let shops = FakeShops::with(vec![]);
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("3", Role::Customer))).await;

    let feedback = dir.dispatch(Intent::OpenAddForm).await;
    assert!(matches!(first_error(&feedback), DirectoryError::Permission(_)));

    let feedback = dir.dispatch(Intent::SubmitShop(form_at(north(100.0)))).await;
    assert!(matches!(first_error(&feedback), DirectoryError::Permission(_)));
    assert_eq!(shops.writes.get(), 0);
}

#[tokio::test]
async fn picked_location_past_the_geofence_is_rejected_before_saving() {
    let shops = FakeShops::with(vec![]);
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    dir.dispatch(Intent::OpenAddForm).await;

    let typed = ShopForm {
        name: "Clean Ride".to_owned(),
        service: "carwash".to_owned(),
        ..ShopForm::default()
    };
    dir.dispatch(Intent::StartPicking(typed)).await;
    assert!(dir.is_picking());

    dir.dispatch(Intent::MapClicked(north(2_501.0))).await;
    assert!(!dir.is_picking());
    let filled = dir.open_form().expect("form reopened").form.clone();
    assert_eq!(dir.surface().temp_marker, Some(north(2_501.0)));

    let feedback = dir.dispatch(Intent::SubmitShop(filled)).await;
    assert!(matches!(
        first_error(&feedback),
        DirectoryError::Validation(servicepro_core::ValidationError::OutsideGeofence { .. })
    ));
    assert_eq!(shops.writes.get(), 0);
    assert!(dir.open_form().is_some());
}

#[tokio::test]
async fn typed_location_gets_the_same_geofence_check() {
    let shops = FakeShops::with(vec![]);
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    dir.dispatch(Intent::OpenAddForm).await;

    let feedback = dir.dispatch(Intent::SubmitShop(form_at(north(2_501.0)))).await;
    assert!(feedback.has_errors());
    assert_eq!(shops.writes.get(), 0);

    let feedback = dir.dispatch(Intent::SubmitShop(form_at(north(2_499.0)))).await;
    assert!(!feedback.has_errors(), "{:?}", feedback.messages());
    assert_eq!(shops.writes.get(), 1);
    assert!(dir.open_form().is_none());
    assert_eq!(dir.store().len(), 1);
}

#[tokio::test]
async fn picked_location_inside_geofence_is_saved_with_owner() {
    let shops = FakeShops::with(vec![]);
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    dir.dispatch(Intent::OpenAddForm).await;
    dir.dispatch(Intent::StartPicking(form_at(CENTER))).await;

    // Marker clicks are ignored while picking.
    let feedback = dir.dispatch(Intent::MarkerClicked(ProviderId::from("x"))).await;
    assert!(feedback.is_empty());

    dir.dispatch(Intent::MapClicked(LatLng::new(31.50, 74.35))).await;
    let filled = dir.open_form().expect("form reopened").form.clone();
    let feedback = dir.dispatch(Intent::SubmitShop(filled)).await;
    assert_eq!(feedback.messages(), vec!["Added Clean Ride".to_owned()]);

    let snapshot = dir.store().snapshot();
    let saved = &snapshot[0];
    assert_eq!(saved.owner_id, Some(UserId("10".to_owned())));
    assert!(dir.surface().temp_marker.is_none());
    assert!(dir.surface().form.is_none());
}

#[tokio::test]
async fn cancel_picking_keeps_previous_coordinates() {
    let mut dir = opened(vec![]).await;
    dir.dispatch(Intent::SignedIn(user("1", Role::Admin))).await;
    dir.dispatch(Intent::OpenAddForm).await;
    dir.dispatch(Intent::StartPicking(form_at(north(50.0)))).await;
    dir.dispatch(Intent::CancelPicking).await;

    assert!(!dir.is_picking());
    let form = &dir.open_form().expect("form reopened").form;
    assert_eq!(form.lat, north(50.0).lat.to_string());
}

#[tokio::test]
async fn only_owner_or_admin_may_delete() {
    let shops = FakeShops::with(neighbourhood());
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;

    dir.dispatch(Intent::SignedIn(user("11", Role::Provider))).await;
    let feedback = dir.dispatch(Intent::DeleteShop(ProviderId::from("p1"))).await;
    assert!(matches!(first_error(&feedback), DirectoryError::Permission(_)));
    assert_eq!(shops.writes.get(), 0);

    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    let feedback = dir.dispatch(Intent::DeleteShop(ProviderId::from("p1"))).await;
    assert!(!feedback.has_errors());
    assert!(dir.store().find_by_id(&ProviderId::from("p1")).is_none());
    assert!(!dir.surface().marker_ids().contains(&ProviderId::from("p1")));
}

#[tokio::test]
async fn owner_can_edit_their_shop() {
    let shops = FakeShops::with(neighbourhood());
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;

    dir.dispatch(Intent::OpenEditForm(ProviderId::from("p1"))).await;
    let mut form = dir.open_form().expect("edit form").form.clone();
    form.name = "Pipe Masters".to_owned();
    let feedback = dir.dispatch(Intent::SubmitShop(form)).await;

    assert_eq!(feedback.messages(), vec!["Updated Pipe Masters".to_owned()]);
    let p1 = dir.store().find_by_id(&ProviderId::from("p1")).unwrap();
    assert_eq!(p1.name, "Pipe Masters");
    assert_eq!(p1.owner_id, Some(UserId("10".to_owned())));
}

#[tokio::test]
async fn admin_edit_keeps_the_original_owner() {
    let shops = FakeShops::with(neighbourhood());
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("1", Role::Admin))).await;

    dir.dispatch(Intent::OpenEditForm(ProviderId::from("p1"))).await;
    let mut form = dir.open_form().expect("edit form").form.clone();
    form.phone = "0321-7654321".to_owned();
    let feedback = dir.dispatch(Intent::SubmitShop(form)).await;
    assert!(!feedback.has_errors(), "{:?}", feedback.messages());

    let p1 = dir.store().find_by_id(&ProviderId::from("p1")).unwrap();
    assert_eq!(p1.phone, "0321-7654321");
    assert_eq!(p1.owner_id, Some(UserId("10".to_owned())));

    // The owner still manages it afterwards.
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    let feedback = dir.dispatch(Intent::DeleteShop(ProviderId::from("p1"))).await;
    assert!(!feedback.has_errors(), "{:?}", feedback.messages());
}

#[tokio::test]
async fn failed_refresh_after_adding_is_reported_with_the_success() {
    let shops = FakeShops::with(vec![]);
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    dir.dispatch(Intent::OpenAddForm).await;

    shops.offline.set(true);
    let feedback = dir.dispatch(Intent::SubmitShop(form_at(north(100.0)))).await;

    assert_eq!(shops.writes.get(), 1);
    assert_eq!(feedback.messages()[0], "Added Clean Ride");
    assert!(matches!(first_error(&feedback), DirectoryError::Offline(_)));
    assert_eq!(dir.status(), StoreStatus::Offline);
    assert!(dir.visible().is_empty());
}

#[tokio::test]
async fn invalid_submit_while_picking_changes_nothing() {
    let shops = FakeShops::with(vec![]);
    let mut dir = build(shops.clone(), FakeRoutes::default(), FakeGeo(Ok(CENTER)));
    dir.open().await;
    dir.dispatch(Intent::SignedIn(user("10", Role::Provider))).await;
    dir.dispatch(Intent::OpenAddForm).await;
    dir.dispatch(Intent::StartPicking(form_at(CENTER))).await;

    let feedback = dir.dispatch(Intent::SubmitShop(form_at(north(2_501.0)))).await;
    assert!(feedback.has_errors());
    assert!(dir.is_picking());
    assert!(dir.open_form().is_none());
    assert!(dir.surface().form.is_none());
    assert_eq!(shops.writes.get(), 0);
}

// ---------------------------------------------------------------------------
// Routing and narration
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_route_replaces_the_first() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::RouteRequested(ProviderId::from("p1"))).await;
    dir.dispatch(Intent::RouteRequested(ProviderId::from("m1"))).await;

    assert_eq!(dir.surface().routes_drawn(), 1);
    let RouteState::Active(route) = dir.route_state() else {
        panic!("expected an active route");
    };
    assert_eq!(route.geometry.last().copied(), Some(north(900.0)));
    assert_eq!(dir.surface().bounds, Some((CENTER, north(900.0))));
}

#[tokio::test]
async fn route_is_narrated_when_voice_is_on() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::ToggleVoice).await;
    dir.dispatch(Intent::RouteRequested(ProviderId::from("p1"))).await;

    let spoken = &dir.narrator().synth().spoken;
    assert_eq!(spoken[0], "Voice navigation enabled.");
    assert_eq!(
        spoken[1],
        "Route calculated. Destination is 300 meters away. Travel time is about 4 minutes. First, Head north on Main Boulevard."
    );
}

#[tokio::test]
async fn geolocation_failure_keeps_route_idle() {
    let routes = FakeRoutes::default();
    let mut dir = build(
        FakeShops::with(neighbourhood()),
        routes.clone(),
        FakeGeo(Err(GeolocationError::PermissionDenied)),
    );
    dir.open().await;

    let feedback = dir.dispatch(Intent::RouteRequested(ProviderId::from("p1"))).await;
    assert!(matches!(
        first_error(&feedback),
        DirectoryError::Geolocation(GeolocationError::PermissionDenied)
    ));
    assert_eq!(dir.route_state(), RouteState::Idle);
    assert_eq!(routes.calls.get(), 0);
}

#[tokio::test]
async fn routing_failure_is_reported_once_and_location_is_kept() {
    let routes = FakeRoutes {
        fail: true,
        ..FakeRoutes::default()
    };
    let mut dir = build(
        FakeShops::with(neighbourhood()),
        routes.clone(),
        FakeGeo(Ok(CENTER)),
    );
    dir.open().await;

    let feedback = dir.dispatch(Intent::RouteRequested(ProviderId::from("p1"))).await;
    assert_eq!(feedback.errors().count(), 1);
    assert!(matches!(dir.route_state(), RouteState::Error(_)));
    assert_eq!(routes.calls.get(), 1);
    assert_eq!(dir.user_location(), Some(CENTER));
    assert_eq!(dir.surface().routes_drawn(), 0);
}

#[tokio::test]
async fn closing_detail_clears_route() {
    let mut dir = opened(neighbourhood()).await;
    dir.dispatch(Intent::CardClicked(ProviderId::from("p1"))).await;
    dir.dispatch(Intent::RouteRequested(ProviderId::from("p1"))).await;
    dir.dispatch(Intent::CloseDetail).await;

    assert_eq!(dir.route_state(), RouteState::Idle);
    assert_eq!(dir.surface().routes_drawn(), 0);
    assert_eq!(dir.selected(), None);
}

// ---------------------------------------------------------------------------
// Reviews
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reviews_need_login_and_stay_local() {
    let mut dir = opened(neighbourhood()).await;
    let review = || Intent::AddReview {
        provider: ProviderId::from("m1"),
        rating: 5,
        text: "Fixed my brakes".to_owned(),
    };

    let feedback = dir.dispatch(review()).await;
    assert!(matches!(first_error(&feedback), DirectoryError::Permission(_)));

    dir.dispatch(Intent::SignedIn(user("3", Role::Customer))).await;
    let feedback = dir.dispatch(review()).await;
    assert!(!feedback.has_errors());

    let details = dir.details(&ProviderId::from("m1")).unwrap();
    assert_eq!(details.reviews.len(), 1);
    assert_eq!(details.reviews[0].author, "user3");
    assert!(dir.store().find_by_id(&ProviderId::from("m1")).unwrap().reviews.is_empty());
}
