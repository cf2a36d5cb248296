use std::time::Duration;

use anyhow::Context as _;
use servicepro_api::{OsrmClient, ServiceProClient};
use servicepro_core::{AppConfig, CurrentUser, LatLng};
use servicepro_directory::{
    Directory, DirectorySettings, Feedback, Intent, Narrator, ProviderStore, Scene,
};

use crate::console::{ConsoleSpeech, FixedLocation};
use crate::session::Session;

pub(crate) type CliDirectory =
    Directory<ServiceProClient, OsrmClient, FixedLocation, ConsoleSpeech, Scene>;

pub(crate) const LOGIN_COMMAND: &str = "servicepro account login";

/// Shared state for one CLI invocation.
pub(crate) struct Context {
    pub(crate) config: AppConfig,
    pub(crate) session: Session,
}

impl Context {
    pub(crate) fn new(config: AppConfig) -> Self {
        let session = Session::new(config.session_path.clone());
        Self { config, session }
    }

    pub(crate) fn api(&self) -> anyhow::Result<ServiceProClient> {
        ServiceProClient::new(
            &self.config.api_base_url,
            self.config.request_timeout_secs,
            &self.config.user_agent,
        )
        .context("failed to build ServicePro API client")
    }

    pub(crate) fn current_user(&self) -> anyhow::Result<Option<CurrentUser>> {
        self.session.load()
    }

    pub(crate) fn require_user(&self) -> anyhow::Result<CurrentUser> {
        self.current_user()?
            .ok_or_else(|| anyhow::anyhow!("not logged in; run `{LOGIN_COMMAND}` first"))
    }

    /// Builds a directory, loads the shop list and applies the saved session.
    ///
    /// Load failures are reported, not returned: an offline directory is
    /// still usable (and empty).
    pub(crate) async fn open_directory(&self, origin: Option<LatLng>) -> anyhow::Result<CliDirectory> {
        let timeout = Duration::from_secs(self.config.request_timeout_secs);
        let routes = OsrmClient::new(
            &self.config.routing_base_url,
            self.config.request_timeout_secs,
            &self.config.user_agent,
        )
        .context("failed to build routing client")?;

        let mut directory = Directory::new(
            ProviderStore::new(self.api()?, timeout),
            routes,
            FixedLocation(origin),
            Narrator::new(ConsoleSpeech),
            Scene::default(),
            DirectorySettings {
                geofence: self.config.geofence(),
                default_radius_km: self.config.default_radius_km,
            },
        );

        report(&directory.open().await);
        if let Some(user) = self.current_user()? {
            directory.dispatch(Intent::SignedIn(user)).await;
        }
        Ok(directory)
    }
}

/// Prints every notice, errors included.
pub(crate) fn report(feedback: &Feedback) {
    for message in feedback.messages() {
        println!("{message}");
    }
}

/// Like [`report`], but turns an error notice into a command failure.
pub(crate) fn check(feedback: &Feedback) -> anyhow::Result<()> {
    if let Some(err) = feedback.errors().next() {
        anyhow::bail!("{}", err.user_message());
    }
    for message in feedback.messages() {
        println!("{message}");
    }
    Ok(())
}
