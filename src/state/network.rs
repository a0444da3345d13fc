//! Connectivity banner state

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkStatus {
    #[default]
    Online,
    Offline,
    /// Back online, "connection restored" notice still showing
    Restored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkEvent {
    WentOffline,
    WentOnline,
    Dismiss,
}

#[derive(Debug, Clone, Default)]
pub struct NetworkState {
    status: NetworkStatus,
}

impl NetworkState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> NetworkStatus {
        self.status
    }

    pub fn banner_visible(&self) -> bool {
        self.status != NetworkStatus::Online
    }

    /// Apply an event; returns whether the status changed
    pub fn handle(&mut self, event: NetworkEvent) -> bool {
        let next = match (self.status, event) {
            (_, NetworkEvent::WentOffline) => NetworkStatus::Offline,
            (NetworkStatus::Offline, NetworkEvent::WentOnline) => NetworkStatus::Restored,
            (NetworkStatus::Restored, NetworkEvent::Dismiss) => NetworkStatus::Online,
            // Already online, or dismissing while still offline
            (status, _) => status,
        };
        let changed = next != self.status;
        self.status = next;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_then_restored() {
        let mut net = NetworkState::new();
        assert!(!net.banner_visible());
        assert!(net.handle(NetworkEvent::WentOffline));
        assert_eq!(net.status(), NetworkStatus::Offline);
        assert!(net.handle(NetworkEvent::WentOnline));
        assert_eq!(net.status(), NetworkStatus::Restored);
        assert!(net.banner_visible());
        assert!(net.handle(NetworkEvent::Dismiss));
        assert_eq!(net.status(), NetworkStatus::Online);
    }

    #[test]
    fn test_online_while_online_ignored() {
        let mut net = NetworkState::new();
        assert!(!net.handle(NetworkEvent::WentOnline));
        assert_eq!(net.status(), NetworkStatus::Online);
    }

    #[test]
    fn test_dismiss_while_offline_ignored() {
        let mut net = NetworkState::new();
        net.handle(NetworkEvent::WentOffline);
        assert!(!net.handle(NetworkEvent::Dismiss));
        assert_eq!(net.status(), NetworkStatus::Offline);
    }

    #[test]
    fn test_drop_again_after_restore() {
        let mut net = NetworkState::new();
        net.handle(NetworkEvent::WentOffline);
        net.handle(NetworkEvent::WentOnline);
        assert!(net.handle(NetworkEvent::WentOffline));
        assert_eq!(net.status(), NetworkStatus::Offline);
    }
}
