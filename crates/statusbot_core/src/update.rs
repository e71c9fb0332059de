use crate::{error_report, Effect, Msg, NotificationKind, PollState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PollState, msg: Msg) -> (PollState, Vec<Effect>) {
    let effects = match msg {
        Msg::PollSucceeded { message, now } => {
            let mut effects = Vec::with_capacity(2);
            if state.remember(&message) {
                effects.push(Effect::Notify {
                    kind: NotificationKind::StatusChange,
                    text: message,
                });
            }
            state.finish_cycle(now);
            effects.push(Effect::Sleep);
            effects
        }
        Msg::PollFailed { error, now } => {
            let mut effects = Vec::with_capacity(2);
            let text = error_report(&error);
            // The key moves even if delivery later fails, so a persistent
            // failure is reported once.
            if state.remember(&text) {
                effects.push(Effect::Notify {
                    kind: NotificationKind::ErrorReport,
                    text,
                });
            }
            state.finish_cycle(now);
            effects.push(Effect::Sleep);
            effects
        }
        Msg::Woke => {
            state.wake();
            Vec::new()
        }
        Msg::ShutdownRequested => {
            state.stop();
            Vec::new()
        }
    };

    (state, effects)
}
