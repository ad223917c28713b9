use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use readme_core::{
    update, AppState, AttemptId, CallOutcome, Effect, GenerationStage, GenerationView, Msg,
    ProgressSettings,
};
use readme_logging::{readme_debug, readme_info, readme_warn};
use tokio::sync::mpsc;

use crate::{Envelope, ProgressTicker, ReadmeApi};

/// Owns one generation attempt at a time: applies messages to the core state
/// machine and runs the effects it asks for.
///
/// Remote calls and ticks run as tokio tasks but never touch state directly;
/// they post messages back to this controller, which applies them one at a
/// time from whichever task owns it. Methods that run effects must be called
/// from within a tokio runtime.
pub struct GenerationController {
    state: AppState,
    api: Arc<dyn ReadmeApi>,
    msg_tx: mpsc::UnboundedSender<Msg>,
    msg_rx: mpsc::UnboundedReceiver<Msg>,
    ticker: Option<ProgressTicker>,
}

impl GenerationController {
    pub fn new(api: Arc<dyn ReadmeApi>) -> Self {
        Self::with_settings(api, ProgressSettings::default())
    }

    pub fn with_settings(api: Arc<dyn ReadmeApi>, settings: ProgressSettings) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::with_settings(settings),
            api,
            msg_tx,
            msg_rx,
            ticker: None,
        }
    }

    pub fn view(&self) -> GenerationView {
        self.state.view()
    }

    pub fn stage(&self) -> GenerationStage {
        self.state.stage()
    }

    pub fn consume_dirty(&mut self) -> bool {
        self.state.consume_dirty()
    }

    pub fn has_active_ticker(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_cancelled())
    }

    /// Begins a new attempt for an already validated URL. Ignored while busy.
    pub fn start_generation(&mut self, url: impl Into<String>) {
        let url = url.into();
        if self.stage().is_busy() {
            readme_warn!(
                "ignoring generation request for {} while attempt {} is {:?}",
                url,
                self.state.attempt(),
                self.stage()
            );
        }
        self.dispatch(Msg::GenerateRequested { url });
    }

    /// Returns to idle immediately. Ticks and remote results still in flight
    /// for the abandoned attempt are discarded when they arrive.
    pub fn reset(&mut self) {
        self.dispatch(Msg::ResetRequested);
    }

    /// Waits for the next message from a ticker or remote call and applies it.
    ///
    /// With nothing in flight this waits forever; use [`Self::settle`] to
    /// drive an attempt to its end.
    pub async fn next_transition(&mut self) {
        if let Some(msg) = self.msg_rx.recv().await {
            self.dispatch(msg);
        }
    }

    /// Applies every message already queued without waiting. Returns how many
    /// were applied.
    pub fn drain_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            applied += 1;
        }
        applied
    }

    /// Drives the current attempt until it is no longer analyzing or generating.
    pub async fn settle(&mut self) -> GenerationView {
        while self.state.stage().is_busy() {
            self.next_transition().await;
        }
        self.view()
    }

    /// Convenience for one-shot callers: start an attempt and wait for it.
    pub async fn generate(&mut self, url: impl Into<String>) -> GenerationView {
        self.start_generation(url);
        self.settle().await
    }

    fn dispatch(&mut self, msg: Msg) {
        if let Some(attempt) = message_attempt(&msg) {
            if attempt != self.state.attempt() {
                readme_debug!(
                    "discarding stale message for attempt {} (current {})",
                    attempt,
                    self.state.attempt()
                );
            }
        }

        let before = self.state.stage();
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.log_transition(before);

        for effect in effects {
            self.run_effect(effect);
        }
    }

    fn log_transition(&self, before: GenerationStage) {
        let after = self.state.stage();
        if before == after {
            return;
        }
        match after {
            GenerationStage::Error => readme_warn!(
                "attempt {} failed: {}",
                self.state.attempt(),
                self.state.error().unwrap_or_default()
            ),
            _ => readme_info!(
                "attempt {}: {:?} -> {:?}",
                self.state.attempt(),
                before,
                after
            ),
        }
    }

    fn run_effect(&mut self, effect: Effect) {
        match effect {
            Effect::StartTicker {
                attempt,
                stage,
                interval,
            } => {
                let tx = self.msg_tx.clone();
                // Replacing the handle drops, and thereby cancels, the previous ticker.
                self.ticker = Some(ProgressTicker::spawn(interval, move || {
                    tx.send(Msg::ProgressTick { attempt, stage }).is_ok()
                }));
            }
            Effect::StopTicker => {
                if let Some(ticker) = self.ticker.take() {
                    ticker.cancel();
                }
            }
            Effect::Analyze { attempt, url } => {
                readme_info!("analyzing {} (attempt {})", url, attempt);
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let outcome = guarded(async move { api.analyze(&url).await }).await;
                    let _ = tx.send(Msg::AnalyzeFinished { attempt, outcome });
                });
            }
            Effect::Generate { attempt, url } => {
                readme_info!("generating readme for {} (attempt {})", url, attempt);
                let api = self.api.clone();
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    let outcome = guarded(async move { api.generate(&url).await }).await;
                    let _ = tx.send(Msg::GenerateFinished { attempt, outcome });
                });
            }
        }
    }
}

fn message_attempt(msg: &Msg) -> Option<AttemptId> {
    match msg {
        Msg::ProgressTick { attempt, .. }
        | Msg::AnalyzeFinished { attempt, .. }
        | Msg::GenerateFinished { attempt, .. } => Some(*attempt),
        Msg::GenerateRequested { .. } | Msg::ResetRequested => None,
    }
}

/// Runs a remote call, turning a panic anywhere inside it into `Crashed`.
async fn guarded<T, U, F>(call: F) -> CallOutcome<U>
where
    F: Future<Output = Envelope<T>>,
    U: From<T>,
{
    match AssertUnwindSafe(call).catch_unwind().await {
        Ok(envelope) => envelope.into_outcome(),
        Err(payload) => CallOutcome::Crashed {
            reason: panic_reason(payload.as_ref()),
        },
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> Option<String> {
    payload
        .downcast_ref::<&str>()
        .map(|text| text.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
}
