//! Connectivity state machine.
//!
//! ```text
//!            probe ok            any remote failure
//! Probing ───────────► Remote ──────────────────────► LocalFallback
//!    │                                                   ▲
//!    └───────────────────────── probe failed ────────────┘
//! ```
//!
//! There is no edge back to [`SourceMode::Remote`] except through a fresh
//! probe. A late remote success observed while settled in
//! [`SourceMode::LocalFallback`] leaves the mode untouched.

use std::fmt;

/// Where records come from right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMode {
    Remote,
    LocalFallback,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Remote => write!(f, "remote"),
            SourceMode::LocalFallback => write!(f, "local-fallback"),
        }
    }
}

/// Connectivity as held by the orchestrator: either a probe is outstanding
/// or the mode has settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    #[default]
    Probing,
    Settled(SourceMode),
}

impl Connectivity {
    /// State after a probe completes.
    pub fn after_probe(reachable: bool) -> Self {
        if reachable {
            Connectivity::Settled(SourceMode::Remote)
        } else {
            Connectivity::Settled(SourceMode::LocalFallback)
        }
    }

    /// State after a remote call failed. Always a downgrade.
    pub fn after_failure(self) -> Self {
        Connectivity::Settled(SourceMode::LocalFallback)
    }

    /// State after a remote call succeeded.
    ///
    /// Settles an outstanding probe to `Remote`; a settled mode is kept as-is.
    pub fn after_success(self) -> Self {
        match self {
            Connectivity::Probing => Connectivity::Settled(SourceMode::Remote),
            settled => settled,
        }
    }

    /// `true` when operations should be attempted against the remote source.
    pub fn targets_remote(self) -> bool {
        matches!(self, Connectivity::Probing | Connectivity::Settled(SourceMode::Remote))
    }

    /// The settled mode, if any.
    pub fn mode(self) -> Option<SourceMode> {
        match self {
            Connectivity::Probing => None,
            Connectivity::Settled(mode) => Some(mode),
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Connectivity::Probing => write!(f, "probing"),
            Connectivity::Settled(mode) => mode.fmt(f),
        }
    }
}
