use servicepro_core::{CurrentUser, LatLng, ProviderId, ServiceFilter, ShopForm};

use crate::error::DirectoryError;
use crate::sync::Basemap;

/// A user action, as delivered by whatever front end drives the directory.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Refresh,
    FilterChanged {
        service: ServiceFilter,
        min_rating: f64,
        radius_km: f64,
    },
    SearchChanged(String),
    CardClicked(ProviderId),
    MarkerClicked(ProviderId),
    OpenAddForm,
    OpenEditForm(ProviderId),
    /// Suspends the open form (with whatever the user typed so far) and
    /// waits for a map click.
    StartPicking(ShopForm),
    MapClicked(LatLng),
    CancelPicking,
    SubmitShop(ShopForm),
    DeleteShop(ProviderId),
    LocateUser,
    RouteRequested(ProviderId),
    CloseDetail,
    ToggleVoice,
    SetBasemap(Basemap),
    ResetView,
    AddReview {
        provider: ProviderId,
        rating: u8,
        text: String,
    },
    SignedIn(CurrentUser),
    SignedOut,
}

#[derive(Debug)]
pub enum Notice {
    Info(String),
    Error(DirectoryError),
}

/// What the user should be told after an intent was handled.
#[derive(Debug, Default)]
pub struct Feedback {
    pub notices: Vec<Notice>,
}

impl Feedback {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            notices: vec![Notice::Info(message.into())],
        }
    }

    #[must_use]
    pub fn error(err: impl Into<DirectoryError>) -> Self {
        Self {
            notices: vec![Notice::Error(err.into())],
        }
    }

    pub fn push_info(&mut self, message: impl Into<String>) {
        self.notices.push(Notice::Info(message.into()));
    }

    pub fn push_error(&mut self, err: impl Into<DirectoryError>) {
        self.notices.push(Notice::Error(err.into()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }

    pub fn errors(&self) -> impl Iterator<Item = &DirectoryError> {
        self.notices.iter().filter_map(|n| match n {
            Notice::Error(e) => Some(e),
            Notice::Info(_) => None,
        })
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Every notice rendered for display, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.notices
            .iter()
            .map(|n| match n {
                Notice::Info(m) => m.clone(),
                Notice::Error(e) => e.user_message(),
            })
            .collect()
    }
}

impl From<DirectoryError> for Feedback {
    fn from(err: DirectoryError) -> Self {
        Self::error(err)
    }
}
