use crate::color::Participant;

pub mod turn_color;

pub trait Lock: Sized {
    type Ref<'a>: LockRef<'a> where Self: 'a;
    fn borrow(&self, participant: Participant) -> Result<Self::Ref<'_>, BorrowError>;
}

pub trait BoundedLock: Lock {
    fn with_capacity(max_threads: usize) -> Self;
    fn capacity(&self) -> usize;
    fn refs_left(&self) -> usize;
}

pub trait LockRef<'a>: Send {
    // the guard's drop method should release the lock
    type Guard: Drop;
    fn acquire(&mut self) -> Self::Guard;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BorrowError {
    #[error("identity {id} out of range for {capacity} participants")]
    IdentityOutOfRange { id: usize, capacity: usize },
    #[error("identity {0} is already borrowed")]
    IdentityInUse(usize),
}
