#![deny(unsafe_op_in_unsafe_fn)]

pub mod color;
pub mod lock;
pub mod state;

mod guard;

pub use color::{Color, Participant};
pub use guard::ColorGuard;
pub use lock::turn_color::{TurnColorRef, TurnGatedColorLock, DEFAULT_PARTICIPANTS};
pub use lock::BorrowError;
pub use state::{LockState, Phase};
