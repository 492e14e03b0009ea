//! Форматирование значений для отображения (локаль ru-RU)

use serde::Serialize;

use crate::kpi::completion_rate;
use crate::types::{ForecastFigures, MetricsSnapshot};

/// Разделитель разрядов в ru-RU: узкий неразрывный пробел
const GROUP_SEPARATOR: char = '\u{202F}';

/// Целое с разделением разрядов: `1 234 567`
pub fn format_number(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Сумма в рублях без копеек: `1 234 ₽`
pub fn format_currency(value: f64) -> String {
    format!("{}\u{00A0}₽", format_number(value.round() as i64))
}

pub fn format_percent(value: i32) -> String {
    format!("{}%", value)
}

/// Изменение к прошлому периоду: `+12%`, `-3%`, `0%`
pub fn format_trend(value: i32) -> String {
    if value > 0 {
        format!("+{}", format_percent(value))
    } else {
        format_percent(value)
    }
}

/// Длительность: `1ч 5м`, `4м 10с`, `42с`
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}ч {}м", hours, minutes)
    } else if minutes > 0 {
        format!("{}м {}с", minutes, secs)
    } else {
        format!("{}с", secs)
    }
}

/// Готовые подписи для карточек KPI и прогноза
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayLabels {
    pub revenue: String,
    pub revenue_trend: String,
    pub orders: String,
    pub orders_trend: String,
    pub average_check: String,
    pub margin: String,
    pub completion: String,
    pub complaints: String,
    pub forecast_revenue_week: String,
    pub forecast_revenue_month: String,
    pub forecast_orders_week: String,
    pub forecast_orders_month: String,
}

pub fn display_labels(metrics: &MetricsSnapshot, forecast: &ForecastFigures) -> DisplayLabels {
    DisplayLabels {
        revenue: format_currency(metrics.revenue.total as f64),
        revenue_trend: format_trend(metrics.revenue.trend),
        orders: format_number(metrics.orders.total as i64),
        orders_trend: format_trend(metrics.orders.trend),
        average_check: format_currency(metrics.revenue.average_check as f64),
        margin: format_percent(metrics.revenue.margin as i32),
        completion: format_percent(completion_rate(metrics) as i32),
        complaints: format_number(metrics.clients.complaints as i64),
        forecast_revenue_week: format_currency(forecast.revenue.next_week),
        forecast_revenue_month: format_currency(forecast.revenue.next_month),
        forecast_orders_week: format_number(forecast.orders.next_week as i64),
        forecast_orders_month: format_number(forecast.orders.next_month as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{build_forecast, MetricsGenerator};
    use crate::random::ConstantSource;
    use crate::types::Period;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1\u{202F}000");
        assert_eq!(format_number(1_775_000), "1\u{202F}775\u{202F}000");
        assert_eq!(format_number(-25_000), "-25\u{202F}000");
    }

    #[test]
    fn currency_rounds_to_rubles() {
        assert_eq!(format_currency(280_000.4), "280\u{202F}000\u{00A0}₽");
        assert_eq!(format_currency(999.5), "1\u{202F}000\u{00A0}₽");
    }

    #[test]
    fn percent_keeps_sign() {
        assert_eq!(format_percent(12), "12%");
        assert_eq!(format_percent(-3), "-3%");
    }

    #[test]
    fn trend_gets_plus_sign_when_positive() {
        assert_eq!(format_trend(5), "+5%");
        assert_eq!(format_trend(0), "0%");
        assert_eq!(format_trend(-10), "-10%");
    }

    #[test]
    fn labels_for_week_snapshot() {
        let metrics = MetricsGenerator::new(ConstantSource(0.5)).generate(Period::Week);
        let forecast = build_forecast(&metrics);
        let labels = display_labels(&metrics, &forecast);

        assert_eq!(labels.revenue, "1\u{202F}775\u{202F}000\u{00A0}₽");
        assert_eq!(labels.orders, "1\u{202F}075");
        assert_eq!(labels.orders_trend, "+5%");
        assert_eq!(labels.average_check, "4\u{202F}250\u{00A0}₽");
        assert_eq!(labels.margin, "42%");
        // round(535 / 1075 * 100)
        assert_eq!(labels.completion, "50%");
        // 1775000 * 1.12
        assert_eq!(labels.forecast_revenue_week, "1\u{202F}988\u{202F}000\u{00A0}₽");
    }

    #[test]
    fn duration_picks_largest_units() {
        assert_eq!(format_duration(42), "42с");
        assert_eq!(format_duration(250), "4м 10с");
        assert_eq!(format_duration(3900), "1ч 5м");
        assert_eq!(format_duration(870), "14м 30с");
    }
}
