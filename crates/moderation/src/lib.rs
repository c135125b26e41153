mod code;
mod lifecycle;
mod visibility;

#[cfg(any(test, feature = "testing"))]
mod clock;
#[cfg(any(test, feature = "testing"))]
mod memory;

#[cfg(test)]
mod testing;

pub use lifecycle::{
    CommentLifecycle, LifecycleConfig, SubmitReceipt, APPROVED_MESSAGE, DELETED_MESSAGE,
    SUBMITTED_MESSAGE, VERIFIED_MESSAGE,
};
pub use visibility::{Viewer, VisibilityResolver};

#[cfg(any(test, feature = "testing"))]
pub use clock::ManualClock;
#[cfg(any(test, feature = "testing"))]
pub use memory::InMemoryRepository;
