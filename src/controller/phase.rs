use std::fmt;

/// The three logical actions the view controller can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Fetch,
    Create,
    Delete,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Fetch, Action::Create, Action::Delete];

    fn index(self) -> usize {
        match self {
            Action::Fetch => 0,
            Action::Create => 1,
            Action::Delete => 2,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Fetch => write!(f, "fetch"),
            Action::Create => write!(f, "create"),
            Action::Delete => write!(f, "delete"),
        }
    }
}

/// Per-action state: each action moves Idle → Loading → Idle on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => write!(f, "IDLE"),
            Phase::Loading => write!(f, "LOADING"),
        }
    }
}

/// In-flight counters, one per [`Action`].
///
/// Actions are not serialized, so the same action may be in flight more than
/// once (a double submit, or a Refresh issued while another is pending). An
/// action is `Loading` while its counter is non-zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionPhases {
    in_flight: [u32; 3],
}

impl ActionPhases {
    pub fn begin(&mut self, action: Action) {
        self.in_flight[action.index()] += 1;
    }

    pub fn finish(&mut self, action: Action) {
        let slot = &mut self.in_flight[action.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn phase(&self, action: Action) -> Phase {
        if self.in_flight[action.index()] > 0 {
            Phase::Loading
        } else {
            Phase::Idle
        }
    }

    #[cfg(test)]
    pub fn in_flight(&self, action: Action) -> u32 {
        self.in_flight[action.index()]
    }

    /// True while any action is between issue and outcome.
    pub fn busy(&self) -> bool {
        Action::ALL.iter().any(|a| self.phase(*a) == Phase::Loading)
    }
}
