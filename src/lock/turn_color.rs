use std::sync::atomic::{AtomicBool, Ordering::*};
use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use parking_lot::{Condvar, Mutex, MutexGuard};

use crate::color::{Color, Participant};
use crate::guard::ColorGuard;
use crate::lock::BorrowError::{self, *};
use crate::state::LockState;

use super::{BoundedLock, Lock, LockRef};

pub const DEFAULT_PARTICIPANTS: usize = 10;

/// Lets a fixed ring of participants in, one identity at a time in
/// identity order, and never lets two colors hold the resource together.
///
/// Entry is gated twice under one mutex: first on the turn cursor naming
/// the caller, then on the current color being idle or matching. The
/// cursor only moves in `release`, so the next identity cannot start its
/// attempt before the previous holder leaves. In practice the lock is a
/// strict round-robin queue with a single holder at a time.
pub struct TurnGatedColorLock {
    state: Mutex<LockState>,
    changed: Condvar,
    // identities handed out through `borrow`; acquire/release ignore it
    claimed: Box<[AtomicBool]>,
}

pub struct TurnColorRef<'a> {
    lock: &'a TurnGatedColorLock,
    participant: Participant,
}

impl TurnGatedColorLock {
    /// Like `with_capacity`, but the first turn goes to `start`.
    pub fn with_start(max_threads: usize, start: usize) -> Self {
        if max_threads == 0 {
            panic!("turn-gated lock needs at least one participant")
        }
        assert!(start < max_threads,
            "start identity {} out of range for {} participants", start, max_threads);
        let mut claimed: Vec<AtomicBool> = Vec::with_capacity(max_threads);
        for _ in 0..max_threads { claimed.push(AtomicBool::new(false)); }
        TurnGatedColorLock {
            state: Mutex::new(LockState::new(max_threads, start)),
            changed: Condvar::new(),
            claimed: claimed.into_boxed_slice(),
        }
    }

    /// Blocks until it is `id`'s turn, then until `color` may hold the
    /// resource, then marks the caller active.
    ///
    /// Panics if `id` is not below the capacity. Blocks forever if the
    /// cursor never reaches `id`.
    pub fn acquire(&self, color: Color, id: usize) {
        self.check_id(id);
        let mut state = self.state.lock();
        trace!("{} #{} waiting for its turn", color, id);
        self.wait_while(&mut state, None, |s| !s.is_turn_of(id));
        trace!("{} #{} waiting for a compatible color", color, id);
        self.wait_while(&mut state, None, |s| !s.admits(color));
        Self::enter(&mut state, color, id);
    }

    /// Same two-stage wait as `acquire`, bounded by `timeout`. Returns
    /// `false` without touching the state if the deadline passes first.
    /// A timeout too large to express as an instant waits without limit.
    pub fn try_acquire_for(&self, color: Color, id: usize, timeout: Duration) -> bool {
        self.check_id(id);
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();
        let granted = self.wait_while(&mut state, deadline, |s| !s.is_turn_of(id))
            && self.wait_while(&mut state, deadline, |s| !s.admits(color));
        if granted {
            Self::enter(&mut state, color, id);
        } else {
            warn!("{} #{} gave up after {:?} (turn of #{}, held by {:?})",
                color, id, timeout, state.turn, state.current);
        }
        granted
    }

    /// Leaves the resource and hands the turn to `(id + 1) % capacity`,
    /// whoever that is, then wakes every waiter.
    ///
    /// Panics if nobody is active.
    pub fn release(&self, color: Color, id: usize) {
        self.check_id(id);
        let mut state = self.state.lock();
        assert!(state.active > 0, "{} #{} released without a matching acquire", color, id);
        state.active -= 1;
        if state.active == 0 {
            debug!("{} #{} left, lock idle", color, id);
            state.current = None;
        }
        state.turn = (id + 1) % state.capacity;
        debug!("turn passes to #{}", state.turn);
        self.changed.notify_all();
    }

    pub fn snapshot(&self) -> LockState { *self.state.lock() }

    fn enter(state: &mut LockState, color: Color, id: usize) {
        if state.current.is_none() {
            debug!("{} #{} took the idle lock", color, id);
            state.current = Some(color);
        }
        state.active += 1;
        trace!("{} #{} active ({} holding)", color, id, state.active);
    }

    // true once `blocked` stops holding, false if the deadline hit first
    fn wait_while<F>(&self, state: &mut MutexGuard<'_, LockState>,
        deadline: Option<Instant>, mut blocked: F) -> bool
    where F: FnMut(&LockState) -> bool {
        while blocked(&**state) {
            match deadline {
                None => self.changed.wait(state),
                Some(deadline) => {
                    if self.changed.wait_until(state, deadline).timed_out() {
                        return !blocked(&**state);
                    }
                }
            }
        }
        true
    }

    fn check_id(&self, id: usize) {
        assert!(id < self.capacity(),
            "identity {} out of range for {} participants", id, self.capacity());
    }
}

impl Default for TurnGatedColorLock {
    fn default() -> Self { Self::with_capacity(DEFAULT_PARTICIPANTS) }
}

impl Lock for TurnGatedColorLock {
    type Ref<'a> = TurnColorRef<'a>;
    fn borrow(&self, participant: Participant) -> Result<Self::Ref<'_>, BorrowError> {
        let id = participant.id;
        let capacity = self.capacity();
        if id >= capacity {
            return Err(IdentityOutOfRange { id, capacity });
        }
        if self.claimed[id].swap(true, AcqRel) {
            return Err(IdentityInUse(id));
        }
        Ok(TurnColorRef { lock: self, participant })
    }
}

impl BoundedLock for TurnGatedColorLock {
    fn with_capacity(max_threads: usize) -> Self {
        Self::with_start(max_threads, 0)
    }
    fn capacity(&self) -> usize { self.claimed.len() }
    fn refs_left(&self) -> usize {
        self.claimed.iter().filter(|flag| !flag.load(Acquire)).count()
    }
}

impl<'a> TurnColorRef<'a> {
    pub fn participant(&self) -> Participant { self.participant }

    pub fn try_acquire_for(&mut self, timeout: Duration) -> Option<ColorGuard<'a>> {
        let Participant { id, color } = self.participant;
        if self.lock.try_acquire_for(color, id, timeout) {
            Some(ColorGuard::new(self.lock, self.participant))
        } else { None }
    }
}

impl Drop for TurnColorRef<'_> {
    fn drop(&mut self) {
        self.lock.claimed[self.participant.id].store(false, Release);
    }
}

impl<'a> LockRef<'a> for TurnColorRef<'a> {
    type Guard = ColorGuard<'a>;
    fn acquire(&mut self) -> Self::Guard {
        let Participant { id, color } = self.participant;
        self.lock.acquire(color, id);
        ColorGuard::new(self.lock, self.participant)
    }
}
