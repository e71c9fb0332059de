use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_error, engine_info};
use statusbot_core::{
    map_status, update, validate, Cursor, Effect, Msg, NotificationKind, PollState,
    RecoverableError,
};
use tokio_util::sync::CancellationToken;

use crate::{
    Credentials, EngineSettings, FatalConfigError, Notifier, ReqwestStatusClient, StatusClient,
    TelegramNotifier,
};

/// Source of "now" for the cursor.
pub type Clock = Arc<dyn Fn() -> Cursor + Send + Sync>;

pub fn system_clock() -> Clock {
    Arc::new(|| Cursor::from_unix(u64::try_from(chrono::Utc::now().timestamp()).unwrap_or(0)))
}

/// Validate credentials, then build the HTTP clients.
///
/// Credentials are checked first so a missing one halts without any network traffic.
pub fn bootstrap<F>(lookup: F, settings: EngineSettings) -> Result<PollEngine, FatalConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let credentials = Credentials::from_lookup(lookup)?;
    let client = ReqwestStatusClient::new(
        &settings.endpoint,
        &credentials.api_token,
        &settings.fetch,
    )?;
    let notifier = TelegramNotifier::new(
        &settings.telegram_api,
        &credentials.notifier_token,
        &credentials.destination_id,
        &settings.fetch,
    )?;
    Ok(PollEngine::new(
        Box::new(client),
        Box::new(notifier),
        settings.poll_interval,
        system_clock(),
    ))
}

pub struct PollEngine {
    client: Box<dyn StatusClient>,
    notifier: Box<dyn Notifier>,
    interval: Duration,
    clock: Clock,
    state: PollState,
}

impl PollEngine {
    pub fn new(
        client: Box<dyn StatusClient>,
        notifier: Box<dyn Notifier>,
        interval: Duration,
        clock: Clock,
    ) -> Self {
        let state = PollState::new(clock());
        Self {
            client,
            notifier,
            interval,
            clock,
            state,
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Run one Polling state: fetch, validate, map, then send whatever the
    /// state machine decided. `Notify` effects are executed here; the
    /// returned list still holds them, and `Sleep` is left to [`Self::run`].
    pub async fn poll_once(&mut self) -> Vec<Effect> {
        engine_logging::set_poll_cycle(self.state.completed_cycles() + 1);
        let outcome = self.check(self.state.cursor()).await;
        let now = (self.clock)();

        let msg = match outcome {
            Ok(message) => {
                engine_info!("{}", message);
                Msg::PollSucceeded { message, now }
            }
            Err(error) => {
                engine_error!("Program failure: {}", error);
                Msg::PollFailed { error, now }
            }
        };

        let effects = self.apply(msg);
        let mut notified = false;
        for effect in &effects {
            if let Effect::Notify { kind, text } = effect {
                notified = true;
                self.deliver(*kind, text).await;
            }
        }
        if !notified {
            engine_debug!("Nothing new since the last message, notification suppressed");
        }
        effects
    }

    /// Poll until `cancel` fires. Cancellation is observed between cycles and
    /// during the sleep, never in the middle of a cycle.
    pub async fn run(mut self, cancel: CancellationToken) -> PollState {
        engine_info!(
            "Polling every {}s starting from {}",
            self.interval.as_secs(),
            self.state.cursor().as_unix()
        );
        while !cancel.is_cancelled() {
            let effects = self.poll_once().await;
            if !effects.contains(&Effect::Sleep) {
                continue;
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {
                    self.apply(Msg::Woke);
                }
            }
        }
        self.apply(Msg::ShutdownRequested);
        engine_info!(
            "Stopped after {} poll cycles",
            self.state.completed_cycles()
        );
        self.state
    }

    async fn check(&self, cursor: Cursor) -> Result<String, RecoverableError> {
        let payload = self.client.fetch(cursor).await?;
        let records = validate(&payload)?;
        let record = records.first().ok_or(RecoverableError::EmptyList)?;
        engine_info!("Received homework {:?}", record);
        map_status(record)
    }

    fn apply(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (next, effects) = update(state, msg);
        self.state = next;
        effects
    }

    /// Delivery failures are logged and otherwise ignored.
    async fn deliver(&self, kind: NotificationKind, text: &str) {
        engine_debug!("Sending {:?} message to Telegram: {}", kind, text);
        match self.notifier.send(text).await {
            Ok(()) => engine_info!("Message sent"),
            Err(err) => engine_error!("Failed to send {:?} message: {}", kind, err),
        }
    }
}
