//! Timer engine: owns the countdown state, the live tick handle and the
//! observer channel.

mod handle;

pub use handle::TickHandle;

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

use crate::{
    services::Notifier,
    state::{SessionKind, TickOutcome, TimerConfig, TimerState},
    tasks::spawn_ticker,
};

/// Production tick cadence
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// What the ticker should do after delivering a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    /// Keep ticking
    Continue,
    /// The session ended; announce it and stop
    Completed(SessionKind),
    /// This ticker was cancelled or replaced
    Stale,
}

#[derive(Debug)]
struct EngineCore {
    state: TimerState,
    ticker: Option<TickHandle>,
    next_epoch: u64,
    last_action: Option<String>,
    last_action_time: Option<DateTime<Utc>>,
}

impl EngineCore {
    fn cancel_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            debug!("Cancelling ticker (epoch {})", handle.epoch());
            handle.cancel();
        }
    }

    fn record(&mut self, action: &str) {
        self.last_action = Some(action.to_string());
        self.last_action_time = Some(Utc::now());
    }
}

struct Shared {
    core: Mutex<EngineCore>,
    updates_tx: watch::Sender<TimerState>,
    notifier: Arc<dyn Notifier>,
    tick_interval: Duration,
}

/// Handle to the single timer. Cheap to clone; all clones drive the same state.
#[derive(Clone)]
pub struct TimerEngine {
    shared: Arc<Shared>,
}

impl TimerEngine {
    /// Create an engine in `Stopped(Work, full work duration)`
    pub fn new(config: TimerConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_tick_interval(config, notifier, TICK_INTERVAL)
    }

    /// Create an engine with a custom tick cadence
    pub fn with_tick_interval(
        config: TimerConfig,
        notifier: Arc<dyn Notifier>,
        tick_interval: Duration,
    ) -> Self {
        let state = TimerState::new(config);
        let (updates_tx, _) = watch::channel(state);

        Self {
            shared: Arc::new(Shared {
                core: Mutex::new(EngineCore {
                    state,
                    ticker: None,
                    next_epoch: 0,
                    last_action: None,
                    last_action_time: None,
                }),
                updates_tx,
                notifier,
                tick_interval,
            }),
        }
    }

    // Operations never leave the state half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, EngineCore> {
        self.shared.core.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, state: TimerState) {
        self.shared.updates_tx.send_replace(state);
    }

    /// Subscribe to state changes
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.shared.updates_tx.subscribe()
    }

    /// Current state
    pub fn snapshot(&self) -> TimerState {
        self.lock().state
    }

    /// Last user intent or transition and when it happened
    pub fn last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let core = self.lock();
        (core.last_action.clone(), core.last_action_time)
    }

    /// Whether a ticker is currently attached
    pub fn has_live_ticker(&self) -> bool {
        self.lock().ticker.is_some()
    }

    /// Start counting down. No-op if already running.
    pub fn start(&self) -> TimerState {
        let mut core = self.lock();
        if !core.state.start() {
            debug!("Start ignored, timer already running");
            return core.state;
        }

        core.cancel_ticker();
        core.next_epoch += 1;
        let epoch = core.next_epoch;
        let task = spawn_ticker(self.clone(), epoch, self.shared.tick_interval);
        core.ticker = Some(TickHandle::new(epoch, task));
        core.record("start");

        info!(
            "Started {:?} session with {}s remaining",
            core.state.session(),
            core.state.remaining_seconds()
        );
        let state = core.state;
        self.publish(state);
        state
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&self) -> TimerState {
        let mut core = self.lock();
        core.cancel_ticker();
        if !core.state.pause() {
            debug!("Pause ignored, timer not running");
            return core.state;
        }
        core.record("pause");

        info!("Paused with {}s remaining", core.state.remaining_seconds());
        let state = core.state;
        self.publish(state);
        state
    }

    /// Stop and refill the current session
    pub fn reset(&self) -> TimerState {
        let mut core = self.lock();
        core.cancel_ticker();
        core.state.reset();
        core.record("reset");

        info!("Reset {:?} session", core.state.session());
        let state = core.state;
        self.publish(state);
        state
    }

    /// Stop and switch to the other session at its full duration
    pub fn skip_session(&self) -> TimerState {
        let mut core = self.lock();
        core.cancel_ticker();
        core.state.skip_session();
        core.record("skip");

        info!("Skipped to {:?} session", core.state.session());
        let state = core.state;
        self.publish(state);
        state
    }

    /// Set the work duration in minutes (clamped to 1..=120). Returns the stored seconds.
    pub fn set_work_duration(&self, minutes: u32) -> u32 {
        self.set_duration(SessionKind::Work, minutes)
    }

    /// Set the break duration in minutes (clamped to 1..=60). Returns the stored seconds.
    pub fn set_break_duration(&self, minutes: u32) -> u32 {
        self.set_duration(SessionKind::Break, minutes)
    }

    fn set_duration(&self, kind: SessionKind, minutes: u32) -> u32 {
        let mut core = self.lock();
        let seconds = core.state.set_duration(kind, minutes);
        core.record(match kind {
            SessionKind::Work => "set-work-duration",
            SessionKind::Break => "set-break-duration",
        });

        info!("{:?} duration set to {}s (requested {}min)", kind, seconds, minutes);
        self.publish(core.state);
        seconds
    }

    /// Deliver one tick from the ticker identified by `epoch`
    pub(crate) fn tick(&self, epoch: u64) -> TickResult {
        let mut core = self.lock();
        if core.ticker.as_ref().map(TickHandle::epoch) != Some(epoch) {
            trace!("Discarding tick from stale ticker (epoch {})", epoch);
            return TickResult::Stale;
        }

        match core.state.tick() {
            TickOutcome::Counting { remaining_seconds } => {
                trace!("Tick, {}s remaining", remaining_seconds);
                self.publish(core.state);
                TickResult::Continue
            }
            TickOutcome::Completed { finished, next } => {
                // The running ticker is the caller; detach rather than abort it.
                core.ticker = None;
                core.record("complete");
                info!("{:?} session complete, {:?} session ready", finished, next);
                self.publish(core.state);
                TickResult::Completed(finished)
            }
            TickOutcome::Idle => {
                warn!("Live ticker fired while timer stopped, detaching it");
                core.ticker = None;
                TickResult::Stale
            }
        }
    }

    /// Play the completion notification, logging a failure
    pub(crate) async fn announce_completion(&self, finished: SessionKind) {
        if let Err(e) = self.shared.notifier.notify(finished).await {
            warn!("Completion notification failed: {}", e);
        }
    }

    /// Cancel any live ticker, leaving the state as it is
    pub fn shutdown(&self) {
        let mut core = self.lock();
        core.cancel_ticker();
        if core.state.pause() {
            self.publish(core.state);
        }
        info!("Timer engine shut down");
    }
}

impl std::fmt::Debug for TimerEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerEngine")
            .field("state", &self.snapshot())
            .field("tick_interval", &self.shared.tick_interval)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::BoxFuture;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct RecordingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, _finished: SessionKind) -> BoxFuture<'_, Result<(), String>> {
            Box::pin(async move {
                self.calls.fetch_add(1, Ordering::SeqCst);
                if self.fail {
                    Err("no audio device".to_string())
                } else {
                    Ok(())
                }
            })
        }
    }

    fn engine_with(notifier: Arc<RecordingNotifier>) -> TimerEngine {
        TimerEngine::new(TimerConfig::default(), notifier)
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_then_pause_leaves_remaining_unchanged() {
        let engine = engine_with(Arc::default());
        engine.start();
        let state = engine.pause();
        assert_eq!(state.remaining_seconds(), 3000);
        assert!(!state.is_running());
        assert!(!engine.has_live_ticker());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_counts_down_each_second() {
        let engine = engine_with(Arc::default());
        engine.start();
        tokio::time::sleep(Duration::from_millis(10_500)).await;
        assert_eq!(engine.snapshot().remaining_seconds(), 2990);
        assert!(engine.snapshot().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_start_keeps_single_ticker() {
        let engine = engine_with(Arc::default());
        engine.start();
        let again = engine.start();
        assert!(again.is_running());
        tokio::time::sleep(Duration::from_millis(5_500)).await;
        assert_eq!(engine.snapshot().remaining_seconds(), 2995);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_autonomous_change() {
        let engine = engine_with(Arc::default());
        engine.start();
        tokio::time::sleep(Duration::from_millis(3_500)).await;
        engine.pause();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(engine.snapshot().remaining_seconds(), 2997);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_epoch_tick_is_discarded() {
        let engine = engine_with(Arc::default());
        engine.start();
        let stale_epoch = engine.lock().ticker.as_ref().map(TickHandle::epoch).unwrap();
        engine.pause();
        engine.start();

        assert_eq!(engine.tick(stale_epoch), TickResult::Stale);
        assert_eq!(engine.snapshot().remaining_seconds(), 3000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_session_completes_once_and_stops() {
        let notifier = Arc::new(RecordingNotifier::default());
        let engine = engine_with(Arc::clone(&notifier));
        engine.start();

        tokio::time::sleep(Duration::from_secs(3_010)).await;

        let state = engine.snapshot();
        assert_eq!(state.session(), SessionKind::Break);
        assert_eq!(state.remaining_seconds(), 600);
        assert!(!state.is_running());
        assert!(!engine.has_live_ticker());
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.last_action().0.as_deref(), Some("complete"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifier_failure_is_not_fatal() {
        let notifier = Arc::new(RecordingNotifier { calls: AtomicUsize::new(0), fail: true });
        let engine = TimerEngine::new(TimerConfig::from_minutes(1, 1), Arc::clone(&notifier) as Arc<dyn Notifier>);
        engine.start();
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.snapshot().session(), SessionKind::Break);

        // The engine keeps working after the failed notification
        engine.start();
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert_eq!(engine.snapshot().remaining_seconds(), 58);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_and_skip_cancel_ticker() {
        let engine = engine_with(Arc::default());
        engine.start();
        tokio::time::sleep(Duration::from_millis(4_500)).await;

        let state = engine.reset();
        assert_eq!(state.remaining_seconds(), 3000);
        assert!(!engine.has_live_ticker());

        engine.start();
        let state = engine.skip_session();
        assert_eq!(state.session(), SessionKind::Break);
        assert_eq!(state.remaining_seconds(), 600);
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.snapshot().remaining_seconds(), 600);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_changes() {
        let engine = engine_with(Arc::default());
        let mut rx = engine.subscribe();
        assert_eq!(rx.borrow_and_update().remaining_seconds(), 3000);

        engine.set_work_duration(25);
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow_and_update().remaining_seconds(), 1500);

        engine.start();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_duration_setters_clamp() {
        let engine = engine_with(Arc::default());
        assert_eq!(engine.set_work_duration(0), 60);
        assert_eq!(engine.set_work_duration(500), 7200);
        assert_eq!(engine.set_break_duration(61), 3600);
        assert_eq!(engine.snapshot().remaining_seconds(), 7200);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_cancels_ticker() {
        let engine = engine_with(Arc::default());
        engine.start();
        engine.shutdown();
        assert!(!engine.has_live_ticker());
        assert!(!engine.snapshot().is_running());
    }
}
