//! Statusbot core: payload validation, verdict mapping and the pure poll state machine.
mod effect;
mod error;
mod msg;
mod payload;
mod state;
mod update;
mod verdict;

pub use effect::{Effect, NotificationKind};
pub use error::RecoverableError;
pub use msg::Msg;
pub use payload::{validate, HomeworkRecord, Payload, HOMEWORKS_FIELD};
pub use state::{error_report, Cursor, Phase, PollState};
pub use update::update;
pub use verdict::{map_status, Verdict};
