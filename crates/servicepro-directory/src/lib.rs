//! Provider directory engine: store, map synchronization, location picker,
//! routing sessions and narration, driven by a single intent dispatcher.

pub mod admin;
pub mod assistant;
pub mod directory;
pub mod error;
pub mod intent;
pub mod narration;
pub mod picker;
pub mod reviews;
pub mod routing;
pub mod store;
pub mod sync;

pub use admin::{AdminStats, UserRepository};
pub use directory::{Directory, DirectorySettings, ProviderDetails};
pub use error::DirectoryError;
pub use intent::{Feedback, Intent, Notice};
pub use narration::{Narrator, SpeechSynth};
pub use picker::{PendingForm, PickerSession};
pub use reviews::ReviewCache;
pub use routing::{GeolocationError, Geolocator, RouteService, RouteState, RouteTicket, Router};
pub use store::{
    FetchError, ProviderStore, RefreshOutcome, ShopRepository, StoreStatus, Written,
};
pub use sync::{Basemap, Card, MapSurface, MapSync, Marker, Popup, PopupAction, Scene};
