use crate::{Cursor, RecoverableError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// A cycle produced a status-change message.
    PollSucceeded { message: String, now: Cursor },
    /// A cycle failed somewhere between fetch and verdict mapping.
    PollFailed { error: RecoverableError, now: Cursor },
    /// The inter-poll sleep elapsed.
    Woke,
    /// Cancellation was observed; no further cycles will run.
    ShutdownRequested,
}
