/// Типы данных дашборда

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DashboardError;

/// Период агрегации
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Day,
    Week,
    Month,
}

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    /// Множитель объемных метрик
    pub fn multiplier(self) -> u32 {
        match self {
            Period::Day => 1,
            Period::Week => 7,
            Period::Month => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Подпись для фильтра периода
    pub fn label(self) -> &'static str {
        match self {
            Period::Day => "День",
            Period::Week => "Неделя",
            Period::Month => "Месяц",
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(DashboardError::InvalidPeriod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderStatuses {
    pub new: u32,
    pub distributed: u32,
    pub distributed_by_ai: u32,
    pub distributed_by_dispatcher: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub cancelled: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMetrics {
    pub total: u32,
    pub urgent: u32, // не распределены более 5 минут
    pub trend: i32,  // %
    pub completed_on_time: u32,
    pub statuses: OrderStatuses,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicsPoint {
    pub date: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueMetrics {
    pub total: u64,
    pub trend: i32,
    pub average_check: u32,
    pub check_trend: i32,
    pub margin: u32, // маржинальность в %
    pub margin_trend: i32,
    pub dynamics: Vec<DynamicsPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterStats {
    pub id: String,
    pub name: String,
    pub completed_orders: u32,
    pub rating: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderperformingMaster {
    pub id: String,
    pub name: String,
    pub completed_orders: u32,
    pub rating: f64,
    pub issues: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterMetrics {
    pub online: u32,
    pub total: u32,
    pub avg_completion_time: u32, // минуты
    pub avg_rating: f64,
    pub top: Vec<MasterStats>,
    pub underperformers: Vec<UnderperformingMaster>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherStats {
    pub id: String,
    pub name: String,
    pub distributed: u32,
    pub avg_response_time: u32, // секунды
    pub errors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatcherMetrics {
    pub total_distributed: u32,
    pub avg_response_time: u32,
    pub errors: u32,
    pub performance: Vec<DispatcherStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientMetrics {
    pub avg_rating: f64,
    pub new_clients: u32,
    pub returning_rate: f64, // %
    pub complaints: u32,
    pub satisfaction_trend: i32,
}

/// Снимок метрик за период
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub period: Period,
    pub orders: OrderMetrics,
    pub revenue: RevenueMetrics,
    pub masters: MasterMetrics,
    pub dispatchers: DispatcherMetrics,
    pub clients: ClientMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertType {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub r#type: AlertType,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<u32>, // секунды
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueForecast {
    pub next_week: f64,
    pub next_month: f64,
    pub week_trend: i32,
    pub month_trend: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersForecast {
    pub next_week: u64,
    pub next_month: u64,
    pub week_trend: i32,
    pub month_trend: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadForecast {
    pub overloaded: Vec<String>,
    pub underutilized: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskForecast {
    pub client_churn: u32, // %
    pub overload_risk: Vec<String>,
    pub revenue_risk: u32, // %
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskCategory {
    Operations,
    Hr,
    Finance,
    Quality,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastTask {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    pub estimated_impact: String,
}

/// Прогнозы "ИИ"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastFigures {
    pub revenue: RevenueForecast,
    pub orders: OrdersForecast,
    pub workload: WorkloadForecast,
    pub risks: RiskForecast,
    pub recommendations: Vec<String>,
    pub tasks: Vec<ForecastTask>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_multipliers() {
        assert_eq!(Period::Day.multiplier(), 1);
        assert_eq!(Period::Week.multiplier(), 7);
        assert_eq!(Period::Month.multiplier(), 30);
    }

    #[test]
    fn period_parses_persisted_form() {
        for period in Period::ALL {
            assert_eq!(period.as_str().parse::<Period>().unwrap(), period);
        }
        assert!("year".parse::<Period>().is_err());
        assert!("Week".parse::<Period>().is_err());
    }

    #[test]
    fn period_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Period::Month).unwrap(), "\"month\"");
        let parsed: Period = serde_json::from_str("\"week\"").unwrap();
        assert_eq!(parsed, Period::Week);
    }

    #[test]
    fn alert_without_timer_omits_field() {
        let alert = Alert {
            id: "6".to_string(),
            r#type: AlertType::Warning,
            title: "t".to_string(),
            description: "d".to_string(),
            timestamp: Utc::now(),
            timer: None,
        };
        let json = serde_json::to_value(&alert).unwrap();
        assert_eq!(json["type"], "warning");
        assert!(json.get("timer").is_none());
    }
}
