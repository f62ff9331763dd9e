use crate::color::Participant;
use crate::lock::turn_color::TurnGatedColorLock;

/// Held while a participant is active; dropping it releases the lock and
/// passes the turn to the next identity.
pub struct ColorGuard<'a> {
    lock: &'a TurnGatedColorLock,
    participant: Participant,
}

impl<'a> ColorGuard<'a> {
    pub(crate) fn new(lock: &'a TurnGatedColorLock, participant: Participant) -> Self {
        Self { lock, participant }
    }
    pub fn participant(&self) -> Participant { self.participant }
}

impl Drop for ColorGuard<'_> {
    fn drop(&mut self) {
        let Participant { id, color } = self.participant;
        self.lock.release(color, id);
    }
}
