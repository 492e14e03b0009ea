//! Прогнозы на основе текущего снимка метрик

use crate::types::{
    ForecastFigures, ForecastTask, MetricsSnapshot, OrdersForecast, RevenueForecast, RiskForecast,
    TaskCategory, TaskPriority, WorkloadForecast,
};

pub const WEEK_FACTOR: f64 = 1.12;
pub const MONTH_FACTOR: f64 = 4.2 * 1.08;

const WEEK_TREND: i32 = 12;
const MONTH_TREND: i32 = 8;

/// Проекции выручки и заказов плюс статические рекомендации.
pub fn build_forecast(metrics: &MetricsSnapshot) -> ForecastFigures {
    let revenue_total = metrics.revenue.total as f64;
    let orders_total = metrics.orders.total as f64;

    ForecastFigures {
        revenue: RevenueForecast {
            next_week: revenue_total * WEEK_FACTOR,
            next_month: revenue_total * MONTH_FACTOR,
            week_trend: WEEK_TREND,
            month_trend: MONTH_TREND,
        },
        orders: OrdersForecast {
            next_week: (orders_total * WEEK_FACTOR).round() as u64,
            next_month: (orders_total * MONTH_FACTOR).round() as u64,
            week_trend: WEEK_TREND,
            month_trend: MONTH_TREND,
        },
        workload: WorkloadForecast {
            overloaded: strings(&["Иван Петров", "Сергей Смирнов"]),
            underutilized: strings(&["Алексей Козлов"]),
            recommendations: strings(&[
                "Перераспределить нагрузку между мастерами",
                "Добавить дополнительные смены в пиковые часы",
            ]),
        },
        risks: RiskForecast {
            client_churn: 15,
            overload_risk: strings(&["Вечерние смены", "Выходные дни"]),
            revenue_risk: 8,
        },
        recommendations: strings(&[
            "Добавить ещё одного мастера в вечерние смены (18:00-22:00)",
            "Увеличить стоимость срочных заказов на 15% для балансировки нагрузки",
            "Провести обучение диспетчера Марии - среднее время реакции выше нормы",
        ]),
        tasks: vec![
            task(
                "1",
                "Нанять дополнительного мастера",
                "Для покрытия вечерних смен и снижения нагрузки",
                TaskPriority::High,
                TaskCategory::Hr,
                "+15% выручки",
            ),
            task(
                "2",
                "Оптимизировать ценообразование",
                "Повысить стоимость срочных заказов",
                TaskPriority::High,
                TaskCategory::Finance,
                "+8% маржинальности",
            ),
            task(
                "3",
                "Обучить диспетчеров",
                "Улучшить время реакции на заявки",
                TaskPriority::Medium,
                TaskCategory::Operations,
                "+12% удовлетворенности",
            ),
        ],
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn task(
    id: &str,
    title: &str,
    description: &str,
    priority: TaskPriority,
    category: TaskCategory,
    estimated_impact: &str,
) -> ForecastTask {
    ForecastTask {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        priority,
        category,
        estimated_impact: estimated_impact.to_string(),
    }
}
