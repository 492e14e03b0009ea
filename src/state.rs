//! Состояние дашборда: период, метрики, оповещения и фоновые таймеры

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::config::DashboardConfig;
use crate::formatters::{display_labels, format_duration, DisplayLabels};
use crate::generators::{build_forecast, AlertGenerator, MetricsGenerator};
use crate::kpi::{summarize, KpiSummary};
use crate::random::{BoxedSource, RngSource};
use crate::storage::{KeyValueStore, PERIOD_KEY};
use crate::types::{Alert, ForecastFigures, MetricsSnapshot, Period};

/// Шаг видимого счетчика у оповещений с таймером
const COUNTDOWN_STEP: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct StateOptions {
    pub alert_interval: Duration,
    pub refresh_delay: Duration,
}

impl Default for StateOptions {
    fn default() -> Self {
        let config = DashboardConfig::default();
        Self::from(&config)
    }
}

impl From<&DashboardConfig> for StateOptions {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            alert_interval: config.alert_interval,
            refresh_delay: config.refresh_delay,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertView {
    #[serde(flatten)]
    pub alert: Alert,
    /// Текущее значение видимого счетчика (секунды)
    pub timer_value: Option<u32>,
    pub timer_label: Option<String>,
}

/// Все, что нужно слою отображения
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub period: Period,
    pub period_label: String,
    pub is_loading: bool,
    pub metrics: MetricsSnapshot,
    pub kpi: KpiSummary,
    pub labels: DisplayLabels,
    pub alerts: Vec<AlertView>,
    pub forecast: ForecastFigures,
}

struct Inner {
    period: Period,
    metrics: MetricsSnapshot,
    forecast: ForecastFigures,
    alerts: Vec<Alert>,
    counters: HashMap<String, u32>,
    metrics_generator: MetricsGenerator<BoxedSource>,
    alert_generator: AlertGenerator<BoxedSource>,
}

impl Inner {
    fn regenerate_metrics(&mut self) {
        self.metrics = self.metrics_generator.generate(self.period);
        self.forecast = build_forecast(&self.metrics);
    }

    /// Полная замена набора, счетчики начинаются заново
    fn regenerate_alerts(&mut self) {
        self.alerts = self.alert_generator.generate();
        self.counters = self
            .alerts
            .iter()
            .filter_map(|a| a.timer.map(|t| (a.id.clone(), t)))
            .collect();
    }

    fn tick_counters(&mut self) {
        for value in self.counters.values_mut() {
            *value = value.saturating_add(1);
        }
    }
}

/// Счетчик незавершенных обновлений
struct LoadingGuard {
    pending: Arc<AtomicUsize>,
}

impl LoadingGuard {
    fn enter(pending: &Arc<AtomicUsize>) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self {
            pending: Arc::clone(pending),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Контейнер состояния дашборда.
///
/// Создается явно на сессию экрана. Фоновые задачи (обновление оповещений и
/// видимые счетчики) принадлежат контейнеру и отменяются в [`shutdown`] или при drop.
/// Конструкторы запускают задачи через `tokio::spawn`, поэтому вызываются внутри рантайма.
///
/// [`shutdown`]: DashboardState::shutdown
pub struct DashboardState {
    inner: Arc<Mutex<Inner>>,
    store: Arc<dyn KeyValueStore>,
    pending_refreshes: Arc<AtomicUsize>,
    refresh_delay: Duration,
    tasks: std::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl DashboardState {
    pub fn new(store: Arc<dyn KeyValueStore>, options: StateOptions) -> Self {
        Self::with_sources(
            store,
            options,
            Box::new(RngSource::from_entropy()),
            Box::new(RngSource::from_entropy()),
        )
    }

    /// Конструктор с подменяемыми источниками случайных чисел
    pub fn with_sources(
        store: Arc<dyn KeyValueStore>,
        options: StateOptions,
        metrics_source: BoxedSource,
        alert_source: BoxedSource,
    ) -> Self {
        let period = load_period(store.as_ref());

        let mut metrics_generator = MetricsGenerator::new(metrics_source);
        let metrics = metrics_generator.generate(period);
        let forecast = build_forecast(&metrics);

        let mut inner = Inner {
            period,
            metrics,
            forecast,
            alerts: Vec::new(),
            counters: HashMap::new(),
            metrics_generator,
            alert_generator: AlertGenerator::new(alert_source),
        };
        inner.regenerate_alerts();

        let inner = Arc::new(Mutex::new(inner));
        let tasks = vec![
            spawn_alert_refresher(Arc::clone(&inner), options.alert_interval),
            spawn_countdown(Arc::clone(&inner)),
        ];

        tracing::info!(
            period = %period,
            alert_interval_secs = options.alert_interval.as_secs(),
            "dashboard state started"
        );

        Self {
            inner,
            store,
            pending_refreshes: Arc::new(AtomicUsize::new(0)),
            refresh_delay: options.refresh_delay,
            tasks: std::sync::Mutex::new(tasks),
        }
    }

    pub async fn period(&self) -> Period {
        self.inner.lock().await.period
    }

    pub async fn metrics(&self) -> MetricsSnapshot {
        self.inner.lock().await.metrics.clone()
    }

    pub async fn forecast(&self) -> ForecastFigures {
        self.inner.lock().await.forecast.clone()
    }

    pub async fn alerts(&self) -> Vec<Alert> {
        self.inner.lock().await.alerts.clone()
    }

    /// Видимый счетчик оповещения, если у него есть таймер
    pub async fn alert_timer(&self, alert_id: &str) -> Option<u32> {
        self.inner.lock().await.counters.get(alert_id).copied()
    }

    pub fn is_loading(&self) -> bool {
        self.pending_refreshes.load(Ordering::SeqCst) > 0
    }

    /// Сохраняет период (ошибки хранилища только логируются) и обновляет данные
    pub async fn set_period(&self, period: Period) {
        if let Err(e) = self.store.set(PERIOD_KEY, period.as_str()) {
            tracing::warn!(error = %e, period = %period, "Error saving period");
        }

        self.inner.lock().await.period = period;
        tracing::info!(period = %period, "period changed");

        self.refresh().await;
    }

    /// Обновление метрик, прогнозов и оповещений.
    ///
    /// Параллельные вызовы допустимы: индикатор загрузки держится до завершения
    /// последнего, снимок записывает тот, кто закончил позже.
    pub async fn refresh(&self) {
        let _loading = LoadingGuard::enter(&self.pending_refreshes);

        // Имитация загрузки данных
        tokio::time::sleep(self.refresh_delay).await;

        let mut inner = self.inner.lock().await;
        inner.regenerate_metrics();
        inner.regenerate_alerts();

        tracing::info!(
            period = %inner.period,
            orders = inner.metrics.orders.total,
            revenue = inner.metrics.revenue.total,
            alerts = inner.alerts.len(),
            "dashboard refreshed"
        );
    }

    /// Удаляет оповещение; `false`, если такого нет
    pub async fn dismiss_alert(&self, alert_id: &str) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.alerts.len();
        inner.alerts.retain(|a| a.id != alert_id);
        inner.counters.remove(alert_id);

        let removed = inner.alerts.len() != before;
        if removed {
            tracing::debug!(alert_id, "alert dismissed");
        }
        removed
    }

    pub async fn view(&self) -> DashboardView {
        let is_loading = self.is_loading();
        let inner = self.inner.lock().await;

        let alerts = inner
            .alerts
            .iter()
            .map(|alert| {
                let timer_value = inner.counters.get(&alert.id).copied();
                AlertView {
                    alert: alert.clone(),
                    timer_value,
                    timer_label: timer_value.map(|v| format_duration(v as u64)),
                }
            })
            .collect();

        DashboardView {
            period: inner.period,
            period_label: inner.period.label().to_string(),
            is_loading,
            metrics: inner.metrics.clone(),
            kpi: summarize(&inner.metrics),
            labels: display_labels(&inner.metrics, &inner.forecast),
            alerts,
            forecast: inner.forecast.clone(),
        }
    }

    /// Останавливает фоновые задачи
    pub fn shutdown(&self) {
        if let Ok(mut tasks) = self.tasks.lock() {
            if !tasks.is_empty() {
                tracing::info!("dashboard state stopped");
            }
            for task in tasks.drain(..) {
                task.abort();
            }
        }
    }
}

impl Drop for DashboardState {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn load_period(store: &dyn KeyValueStore) -> Period {
    match store.get(PERIOD_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Unknown saved period, using default");
            Period::default()
        }),
        Ok(None) => Period::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Error loading settings");
            Period::default()
        }
    }
}

fn spawn_alert_refresher(inner: Arc<Mutex<Inner>>, every: Duration) -> JoinHandle<()> {
    let mut ticker = interval_at(Instant::now() + every, every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            let mut inner = inner.lock().await;
            inner.regenerate_alerts();
            tracing::debug!(alerts = inner.alerts.len(), "alerts regenerated");
        }
    })
}

fn spawn_countdown(inner: Arc<Mutex<Inner>>) -> JoinHandle<()> {
    let mut ticker = interval_at(Instant::now() + COUNTDOWN_STEP, COUNTDOWN_STEP);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::spawn(async move {
        loop {
            ticker.tick().await;
            inner.lock().await.tick_counters();
        }
    })
}
