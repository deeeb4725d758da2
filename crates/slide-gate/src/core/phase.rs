use serde::Serialize;

/// Animation/lock state of a gate. One value, so "at most one animation in
/// flight" holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Phase<H> {
    /// Input is accepted.
    #[default]
    Idle,
    /// No animation, but input stays suppressed until `until` (ms).
    Locked { until: f64 },
    /// A scroll animation identified by `handle` is in flight; once it ends
    /// the lock still runs until `until`.
    Animating { handle: H, until: f64 },
}

impl<H: Copy> Phase<H> {
    /// Lock deadline, or 0 when idle.
    pub fn lock_until(&self) -> f64 {
        match self {
            Phase::Idle => 0.0,
            Phase::Locked { until } | Phase::Animating { until, .. } => *until,
        }
    }

    pub fn handle(&self) -> Option<H> {
        match self {
            Phase::Animating { handle, .. } => Some(*handle),
            _ => None,
        }
    }

    pub fn is_animating(&self) -> bool {
        matches!(self, Phase::Animating { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }
}

/// Read-only view of a gate's state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GateSnapshot {
    pub attached: bool,
    pub compact: bool,
    pub animating: bool,
    /// 0 when no lock is pending.
    pub lock_until: f64,
    pub hold_counter: u32,
    /// Destination of the most recent committed transition.
    pub last_target: Option<usize>,
}
