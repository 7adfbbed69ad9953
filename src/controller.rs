//! Refresh controller
//!
//! Owns the session state and the recurring refresh timer, and drives the
//! Loading → Ready/Failed cycle against a [`QuoteProvider`].
//!
//! Every cycle is tagged with a monotonically increasing request id. A
//! response is only applied if its id is still the latest issued, so a slow
//! fetch that resolves after a newer one can never overwrite fresher data.

use crate::{
    config::TickerConfig,
    error::FetchError,
    provider::QuoteProvider,
    providers::QuoteClient,
    types::{Currency, Phase, Quote, SessionState, ViewModel},
};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, MissedTickBehavior};

/// Recurring refresh timer
///
/// The tick task only holds a weak reference to the controller and is
/// aborted when the timer is dropped.
struct Timer(JoinHandle<()>);

impl Timer {
    fn arm(inner: Weak<Inner>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(tokio::time::Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let Some(inner) = inner.upgrade() else {
                    break;
                };
                tracing::debug!("Refresh timer fired");
                // Each tick gets its own task so a slow fetch does not delay the cadence
                tokio::spawn(async move { inner.run_cycle().await });
            }
        });

        Self(handle)
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// State guarded by a single lock
struct State {
    session: SessionState,
    latest_request: u64,
    stopped: bool,
}

struct Inner {
    provider: Arc<dyn QuoteProvider>,
    credential: String,
    refresh_interval: Duration,
    state: Mutex<State>,
    timer: Mutex<Option<Timer>>,
    view_tx: watch::Sender<ViewModel>,
}

impl Inner {
    /// Enters Loading, fetches the quote for the current currency and applies the result
    async fn run_cycle(&self) {
        let (request_id, currency) = {
            let mut state = self.state.lock();
            if state.stopped {
                return;
            }
            state.latest_request += 1;
            state.session.phase = Phase::Loading;
            self.publish(&state.session);
            (state.latest_request, state.session.currency)
        };

        let result = self.provider.fetch_quote(currency, &self.credential).await;

        self.apply(request_id, currency, result);
    }

    fn apply(&self, request_id: u64, currency: Currency, result: Result<Quote, FetchError>) {
        let mut state = self.state.lock();

        if state.stopped {
            tracing::debug!(request_id, "Controller stopped, ignoring quote response");
            return;
        }
        if request_id != state.latest_request {
            tracing::debug!(
                request_id,
                latest_request = state.latest_request,
                "Discarding stale quote response"
            );
            return;
        }

        let session = &mut state.session;
        match result {
            Ok(quote) => {
                tracing::debug!(
                    currency = currency.code(),
                    price = quote.price,
                    provider = self.provider.provider_name(),
                    "Quote updated"
                );
                session.phase = Phase::Ready;
                session.last_quote = Some(quote);
                session.quoted_in = Some(currency);
                session.last_error = None;
                session.last_updated_at = Some(Utc::now());
            }
            Err(e) => {
                tracing::warn!(
                    currency = currency.code(),
                    error = %e,
                    "Failed to fetch quote"
                );
                session.phase = Phase::Failed;
                session.last_error = Some(e.user_message());
            }
        }

        self.publish(&state.session);
    }

    /// Replaces the timer with a fresh one, unless the controller is stopped
    fn arm_timer(self: &Arc<Self>) {
        let state = self.state.lock();
        if state.stopped {
            return;
        }
        *self.timer.lock() = Some(Timer::arm(Arc::downgrade(self), self.refresh_interval));
    }

    fn timer_armed(&self) -> bool {
        self.timer.lock().is_some()
    }

    fn stop(&self) {
        {
            let mut state = self.state.lock();
            if state.stopped {
                return;
            }
            state.stopped = true;
        }
        self.timer.lock().take();
        tracing::info!("Quote refresh stopped");
    }

    fn publish(&self, session: &SessionState) {
        self.view_tx.send_replace(ViewModel::from(session));
    }
}

/// Handle that stops the controller it was returned from
#[derive(Clone)]
pub struct CancelHandle {
    inner: Weak<Inner>,
}

impl CancelHandle {
    /// Stops the refresh timer; later responses are ignored
    pub fn cancel(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.stop();
        }
    }
}

/// Drives periodic quote fetches and exposes the resulting view model
///
/// # Example
/// ```no_run
/// use btc_ticker::{Currency, RefreshController, TickerConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TickerConfig::from_env()?;
/// let controller = RefreshController::from_config(&config)?;
///
/// let _handle = controller.start(config.initial_currency).await;
/// let mut updates = controller.subscribe();
///
/// controller.set_currency(Currency::EUR).await;
/// while updates.changed().await.is_ok() {
///     let view = updates.borrow().clone();
///     if let Some(quote) = view.quote {
///         println!("BTC: {} ({})", quote.price, quote.change);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct RefreshController {
    inner: Arc<Inner>,
}

impl RefreshController {
    /// Creates a controller backed by the APIVerve client
    pub fn from_config(config: &TickerConfig) -> Result<Self, FetchError> {
        let client = QuoteClient::with_base_url(config.base_url.clone())?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Creates a controller with a custom provider
    pub fn new(provider: Arc<dyn QuoteProvider>, config: &TickerConfig) -> Self {
        let session = SessionState::new(config.initial_currency);
        let (view_tx, _) = watch::channel(ViewModel::from(&session));

        Self {
            inner: Arc::new(Inner {
                provider,
                credential: config.credential().to_string(),
                refresh_interval: config.refresh_interval,
                state: Mutex::new(State {
                    session,
                    latest_request: 0,
                    stopped: false,
                }),
                timer: Mutex::new(None),
                view_tx,
            }),
        }
    }

    /// Selects `initial_currency`, fetches immediately, then arms the refresh timer
    ///
    /// Has no effect once the controller has been stopped.
    pub async fn start(&self, initial_currency: Currency) -> CancelHandle {
        let handle = CancelHandle {
            inner: Arc::downgrade(&self.inner),
        };

        {
            let mut state = self.inner.state.lock();
            if state.stopped {
                tracing::warn!("Ignoring start on a stopped controller");
                return handle;
            }
            state.session.currency = initial_currency;
        }

        tracing::info!(
            currency = initial_currency.code(),
            refresh_interval_secs = self.inner.refresh_interval.as_secs(),
            provider = self.inner.provider.provider_name(),
            "Starting quote refresh"
        );

        self.inner.run_cycle().await;
        self.inner.arm_timer();

        handle
    }

    /// Switches to a new currency and fetches immediately
    ///
    /// A running timer is re-armed, so the next scheduled refresh is one full
    /// interval after the change. Selecting the current currency is a no-op.
    pub async fn set_currency(&self, currency: Currency) {
        {
            let mut state = self.inner.state.lock();
            if state.stopped || state.session.currency == currency {
                return;
            }
            state.session.currency = currency;
        }

        tracing::info!(currency = currency.code(), "Currency changed");

        if self.inner.timer_armed() {
            self.inner.arm_timer();
        }
        self.inner.run_cycle().await;
    }

    /// Fetches immediately without touching the timer or the currency
    pub async fn refresh(&self) {
        self.inner.run_cycle().await;
    }

    /// Cancels the refresh timer; no state changes after this returns
    pub fn stop(&self) {
        self.inner.stop();
    }

    /// Current view model
    pub fn view(&self) -> ViewModel {
        ViewModel::from(&self.inner.state.lock().session)
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<ViewModel> {
        self.inner.view_tx.subscribe()
    }

    /// Copy of the raw session state
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.lock().session.clone()
    }

    /// Currently selected currency
    pub fn currency(&self) -> Currency {
        self.inner.state.lock().session.currency
    }

}

impl Drop for RefreshController {
    fn drop(&mut self) {
        self.inner.stop();
    }
}
