pub mod client;
pub mod error;
pub mod osrm;
pub mod types;

pub use client::ServiceProClient;
pub use error::{ApiError, RoutingError};
pub use osrm::OsrmClient;
pub use types::{Credentials, IdValue, Registration, ServiceRequest, ShopRecord, UserRecord};
