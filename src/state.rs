use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Held(Color),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LockState {
    pub current: Option<Color>,
    pub active: usize,
    pub turn: usize,
    pub capacity: usize,
}

impl LockState {
    pub(crate) fn new(capacity: usize, turn: usize) -> Self {
        LockState { current: None, active: 0, turn, capacity }
    }

    pub fn phase(&self) -> Phase {
        match self.current {
            None => Phase::Idle,
            Some(color) => Phase::Held(color),
        }
    }

    pub fn is_idle(&self) -> bool { self.phase() == Phase::Idle }

    // idle exactly when nobody is active; cursor names a valid identity
    pub fn holds_invariants(&self) -> bool {
        (self.active == 0) == self.current.is_none() && self.turn < self.capacity
    }

    pub(crate) fn is_turn_of(&self, id: usize) -> bool { self.turn == id }

    pub(crate) fn admits(&self, color: Color) -> bool {
        self.current.map_or(true, |current| current == color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let state = LockState::new(4, 0);
        assert!(state.is_idle());
        assert!(state.holds_invariants());
        assert!(state.admits(Color::White));
        assert!(state.admits(Color::Black));
    }

    #[test]
    fn held_state_admits_only_its_color() {
        let state = LockState { current: Some(Color::Black), active: 1, turn: 2, capacity: 4 };
        assert_eq!(state.phase(), Phase::Held(Color::Black));
        assert!(state.admits(Color::Black));
        assert!(!state.admits(Color::White));
        assert!(state.is_turn_of(2));
        assert!(!state.is_turn_of(3));
    }

    #[test]
    fn broken_states_are_flagged() {
        let colorless = LockState { current: None, active: 1, turn: 0, capacity: 4 };
        let stale = LockState { current: Some(Color::White), active: 0, turn: 0, capacity: 4 };
        let overrun = LockState { current: None, active: 0, turn: 4, capacity: 4 };
        assert!(!colorless.holds_invariants());
        assert!(!stale.holds_invariants());
        assert!(!overrun.holds_invariants());
    }
}
