//! Lifecycle Events and States

use std::fmt;

use crate::domain::address::StoreAddress;
use crate::domain::registry::EntityRegistry;
use crate::error::StoreConnectionError;

/// One step of the connect/load sequence, in emission order
#[derive(Debug)]
pub enum LifecycleEvent {
    /// Connection attempt is starting
    Start { address: StoreAddress },

    /// An entity finished loading (repeats, in registration order)
    EntityLoaded { name: String },

    /// Terminal: the sequence failed
    Error(StoreConnectionError),

    /// Terminal: every entity loaded
    End(EntityRegistry),
}

impl LifecycleEvent {
    /// Short event name, for logging
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::EntityLoaded { .. } => "entityLoaded",
            Self::Error(_) => "error",
            Self::End(_) => "end",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::End(_))
    }
}

/// Where the sequence currently is
///
/// `Idle -> Connecting -> LoadingEntities -> Ready`, or `Failed` from
/// either of the middle states. `Ready` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Connecting,
    LoadingEntities,
    Ready,
    Failed,
}

impl LifecycleState {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::LoadingEntities => "loading-entities",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let start = LifecycleEvent::Start {
            address: StoreAddress::new("memory://"),
        };
        assert_eq!(start.name(), "start");
        assert!(!start.is_terminal());

        let end = LifecycleEvent::End(EntityRegistry::default());
        assert_eq!(end.name(), "end");
        assert!(end.is_terminal());

        let error = LifecycleEvent::Error(StoreConnectionError::Aborted);
        assert!(error.is_terminal());
    }

    #[test]
    fn test_state_codes() {
        assert_eq!(LifecycleState::default(), LifecycleState::Idle);
        assert_eq!(LifecycleState::LoadingEntities.to_string(), "loading-entities");
        assert!(LifecycleState::Ready.is_terminal());
        assert!(LifecycleState::Failed.is_terminal());
        assert!(!LifecycleState::Connecting.is_terminal());
    }
}
