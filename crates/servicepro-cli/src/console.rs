//! Terminal stand-ins for the browser collaborators: speech goes to stdout,
//! geolocation comes from `--from`.

use servicepro_core::{LatLng, Route};
use servicepro_directory::{
    narration::format_distance, Card, GeolocationError, Geolocator, ProviderDetails, SpeechSynth,
};

pub(crate) struct ConsoleSpeech;

impl SpeechSynth for ConsoleSpeech {
    fn speak(&mut self, text: &str) {
        println!("[voice] {text}");
    }

    fn cancel(&mut self) {}
}

/// A geolocator that answers with a position given on the command line.
pub(crate) struct FixedLocation(pub(crate) Option<LatLng>);

impl Geolocator for FixedLocation {
    async fn locate(&self) -> Result<LatLng, GeolocationError> {
        self.0.ok_or_else(|| {
            GeolocationError::Unavailable("pass --from <lat,lng> to set your position".to_owned())
        })
    }
}

/// Parses `"31.49,74.34"` as latitude, longitude.
pub(crate) fn parse_lat_lng(raw: &str) -> Result<LatLng, String> {
    let (lat, lng) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected <lat>,<lng>, got '{raw}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude '{lat}': {e}"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude '{lng}': {e}"))?;
    LatLng::try_new(lat, lng)
}

pub(crate) fn print_cards(cards: &[Card]) {
    if cards.is_empty() {
        println!("No shops match the current filters.");
        return;
    }
    println!(
        "{:<8} {:<28} {:<12} {:>6} {:>10}  ADDRESS",
        "ID", "NAME", "SERVICE", "RATING", "DISTANCE"
    );
    for card in cards {
        println!(
            "{:<8} {:<28} {:<12} {:>6.1} {:>10}  {}",
            card.id,
            card.name,
            card.service,
            card.rating,
            format_distance(card.distance_m),
            card.address
        );
    }
    println!("{} shop(s)", cards.len());
}

pub(crate) fn print_details(details: &ProviderDetails) {
    let p = &details.provider;
    println!("{} ({})", p.name, p.service);
    println!("  id:       {}", p.id);
    println!("  rating:   {:.1}", p.rating);
    println!("  phone:    {}", p.phone);
    println!("  address:  {}", p.address);
    println!("  location: {}", p.location());
    println!("  distance: {}", format_distance(details.distance_m));
    if !p.description.is_empty() {
        println!("  {}", p.description);
    }
    if details.reviews.is_empty() {
        println!("  no reviews yet");
    }
    for review in &details.reviews {
        println!("  [{}/5] {}: {}", review.rating, review.author, review.text);
    }
}

pub(crate) fn print_route(route: &Route) {
    println!(
        "{} in about {} min",
        format_distance(route.distance_m),
        (route.duration_s / 60.0).round()
    );
    for (i, step) in route.instructions.iter().enumerate() {
        println!("  {:>2}. {step}", i + 1);
    }
}
