//! Dashboard UI state containers
//!
//! Plain state machines driven by events, owned together by [`UiStore`].
//! None of them touch the network; callers feed in what the server said.

pub mod network;
pub mod onboarding;
pub mod setup_banner;

use chrono::{DateTime, Utc};
use log::debug;

pub use network::{NetworkEvent, NetworkState, NetworkStatus};
pub use onboarding::{
    Onboarding, OnboardingEvent, OnboardingStatus, OnboardingStep, Progress, WizardState,
};
pub use setup_banner::{
    AcademicYear, BannerGate, BannerType, SetupBanner, SetupStep, YearStatus, BANNER_HEIGHT,
};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Network(NetworkEvent),
    Onboarding(OnboardingEvent),
    /// The page has mounted on the client
    Mounted,
    /// Signed-in user's role is known
    Session { is_admin: bool },
    YearsLoading,
    YearsLoaded(Vec<AcademicYear>),
}

#[derive(Debug, Clone, Default)]
pub struct UiStore {
    pub network: NetworkState,
    pub onboarding: Onboarding,
    years: Vec<AcademicYear>,
    years_loading: bool,
    mounted: bool,
    is_admin: bool,
}

impl UiStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route an event to the container that owns it; returns whether any
    /// state changed
    pub fn dispatch(&mut self, event: UiEvent) -> bool {
        debug!("ui event: {:?}", event);
        match event {
            UiEvent::Network(e) => self.network.handle(e),
            UiEvent::Onboarding(e) => self.onboarding.handle(e),
            UiEvent::Mounted => !std::mem::replace(&mut self.mounted, true),
            UiEvent::Session { is_admin } => std::mem::replace(&mut self.is_admin, is_admin) != is_admin,
            UiEvent::YearsLoading => !std::mem::replace(&mut self.years_loading, true),
            UiEvent::YearsLoaded(years) => {
                self.years = years;
                self.years_loading = false;
                true
            }
        }
    }

    pub fn years(&self) -> &[AcademicYear] {
        &self.years
    }

    /// Banner state as of `now`
    pub fn setup_banner(&self, now: DateTime<Utc>) -> SetupBanner {
        let gate = BannerGate {
            mounted: self.mounted,
            is_admin: self.is_admin,
            loading: self.years_loading,
            onboarding_complete: self.onboarding.is_complete(),
            wizard_visible: self.onboarding.is_visible(),
        };
        SetupBanner::compute(&self.years, now, gate)
    }
}
