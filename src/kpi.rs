//! Статусы KPI относительно целевых значений периода

use serde::{Deserialize, Serialize};

use crate::types::{MetricsSnapshot, Period};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KpiStatus {
    Normal,
    Warning,
    Critical,
}

/// Направление "хорошего" значения
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KpiDirection {
    HigherIsBetter,
    LowerIsBetter,
}

pub fn kpi_status(value: f64, target: f64, direction: KpiDirection) -> KpiStatus {
    let ratio = value / target;
    match direction {
        KpiDirection::HigherIsBetter => {
            if ratio >= 1.0 {
                KpiStatus::Normal
            } else if ratio >= 0.8 {
                KpiStatus::Warning
            } else {
                KpiStatus::Critical
            }
        }
        KpiDirection::LowerIsBetter => {
            if ratio <= 1.0 {
                KpiStatus::Normal
            } else if ratio <= 1.2 {
                KpiStatus::Warning
            } else {
                KpiStatus::Critical
            }
        }
    }
}

pub fn revenue_target(period: Period) -> f64 {
    match period {
        Period::Day => 300_000.0,
        Period::Week => 2_000_000.0,
        Period::Month => 8_000_000.0,
    }
}

pub fn orders_target(period: Period) -> f64 {
    match period {
        Period::Day => 150.0,
        Period::Week => 1_000.0,
        Period::Month => 4_000.0,
    }
}

/// Доля выполненных заказов, %
pub const COMPLETION_TARGET: f64 = 85.0;
pub const CLIENT_RATING_TARGET: f64 = 4.0;
/// Маржинальность, %
pub const MARGIN_TARGET: f64 = 30.0;
/// Жалоб за период, меньше лучше
pub const COMPLAINTS_TARGET: f64 = 5.0;
/// Реакция диспетчера дольше этого (секунды) считается предупреждением
pub const RESPONSE_TIME_LIMIT: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub revenue: KpiStatus,
    pub orders: KpiStatus,
    pub completion: KpiStatus,
    pub client_rating: KpiStatus,
    pub margin: KpiStatus,
    pub complaints: KpiStatus,
    pub response_time: KpiStatus,
}

/// Выполненные заказы в процентах от общего числа, с округлением
pub fn completion_rate(metrics: &MetricsSnapshot) -> u32 {
    let total = metrics.orders.total;
    if total == 0 {
        return 0;
    }
    (metrics.orders.statuses.completed as f64 / total as f64 * 100.0).round() as u32
}

pub fn response_time_status(avg_response_time: u32) -> KpiStatus {
    if avg_response_time > RESPONSE_TIME_LIMIT {
        KpiStatus::Warning
    } else {
        KpiStatus::Normal
    }
}

pub fn summarize(metrics: &MetricsSnapshot) -> KpiSummary {
    let higher = KpiDirection::HigherIsBetter;

    KpiSummary {
        revenue: kpi_status(
            metrics.revenue.total as f64,
            revenue_target(metrics.period),
            higher,
        ),
        orders: kpi_status(
            metrics.orders.total as f64,
            orders_target(metrics.period),
            higher,
        ),
        completion: kpi_status(completion_rate(metrics) as f64, COMPLETION_TARGET, higher),
        client_rating: kpi_status(metrics.clients.avg_rating, CLIENT_RATING_TARGET, higher),
        margin: kpi_status(metrics.revenue.margin as f64, MARGIN_TARGET, higher),
        complaints: kpi_status(
            metrics.clients.complaints as f64,
            COMPLAINTS_TARGET,
            KpiDirection::LowerIsBetter,
        ),
        response_time: response_time_status(metrics.dispatchers.avg_response_time),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::MetricsGenerator;
    use crate::random::ConstantSource;

    #[test]
    fn higher_is_better_bands() {
        let d = KpiDirection::HigherIsBetter;
        assert_eq!(kpi_status(100.0, 100.0, d), KpiStatus::Normal);
        assert_eq!(kpi_status(80.0, 100.0, d), KpiStatus::Warning);
        assert_eq!(kpi_status(79.9, 100.0, d), KpiStatus::Critical);
    }

    #[test]
    fn lower_is_better_bands() {
        let d = KpiDirection::LowerIsBetter;
        assert_eq!(kpi_status(90.0, 100.0, d), KpiStatus::Normal);
        assert_eq!(kpi_status(120.0, 100.0, d), KpiStatus::Warning);
        assert_eq!(kpi_status(121.0, 100.0, d), KpiStatus::Critical);
    }

    #[test]
    fn summary_uses_period_targets() {
        // Выручка за день 250000 из 300000, заказы 150 из 150
        let metrics = MetricsGenerator::new(ConstantSource(0.0)).generate(Period::Day);
        let summary = summarize(&metrics);
        assert_eq!(summary.revenue, KpiStatus::Warning);
        assert_eq!(summary.orders, KpiStatus::Normal);

        // За месяц: 7500000 из 8000000, 4500 из 4000
        let metrics = MetricsGenerator::new(ConstantSource(0.0)).generate(Period::Month);
        let summary = summarize(&metrics);
        assert_eq!(summary.revenue, KpiStatus::Warning);
        assert_eq!(summary.orders, KpiStatus::Normal);
    }

    #[test]
    fn complaints_are_lower_is_better() {
        let mut metrics = MetricsGenerator::new(ConstantSource(0.0)).generate(Period::Day);

        metrics.clients.complaints = 5;
        assert_eq!(summarize(&metrics).complaints, KpiStatus::Normal);
        metrics.clients.complaints = 6;
        assert_eq!(summarize(&metrics).complaints, KpiStatus::Warning);
        metrics.clients.complaints = 7;
        assert_eq!(summarize(&metrics).complaints, KpiStatus::Critical);
    }

    #[test]
    fn response_time_over_a_minute_warns() {
        assert_eq!(response_time_status(60), KpiStatus::Normal);
        assert_eq!(response_time_status(61), KpiStatus::Warning);
        assert_eq!(response_time_status(600), KpiStatus::Warning);

        let mut metrics = MetricsGenerator::new(ConstantSource(0.0)).generate(Period::Day);
        metrics.dispatchers.avg_response_time = 61;
        assert_eq!(summarize(&metrics).response_time, KpiStatus::Warning);
    }

    #[test]
    fn completion_margin_and_rating_bands() {
        let mut metrics = MetricsGenerator::new(ConstantSource(0.0)).generate(Period::Day);
        metrics.orders.total = 200;

        metrics.orders.statuses.completed = 170; // 85%
        assert_eq!(completion_rate(&metrics), 85);
        assert_eq!(summarize(&metrics).completion, KpiStatus::Normal);
        metrics.orders.statuses.completed = 136; // 68%
        assert_eq!(summarize(&metrics).completion, KpiStatus::Warning);
        metrics.orders.statuses.completed = 134; // 67%
        assert_eq!(summarize(&metrics).completion, KpiStatus::Critical);

        metrics.revenue.margin = 30;
        assert_eq!(summarize(&metrics).margin, KpiStatus::Normal);
        metrics.revenue.margin = 24;
        assert_eq!(summarize(&metrics).margin, KpiStatus::Warning);
        metrics.revenue.margin = 23;
        assert_eq!(summarize(&metrics).margin, KpiStatus::Critical);

        metrics.clients.avg_rating = 4.2;
        assert_eq!(summarize(&metrics).client_rating, KpiStatus::Normal);
        metrics.clients.avg_rating = 3.5;
        assert_eq!(summarize(&metrics).client_rating, KpiStatus::Warning);
        metrics.clients.avg_rating = 3.1;
        assert_eq!(summarize(&metrics).client_rating, KpiStatus::Critical);
    }

    #[test]
    fn completion_rate_of_empty_period_is_zero() {
        let mut metrics = MetricsGenerator::new(ConstantSource(0.0)).generate(Period::Day);
        metrics.orders.total = 0;
        assert_eq!(completion_rate(&metrics), 0);
    }
}
