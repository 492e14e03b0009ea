//! Генератор метрик дашборда

use crate::random::RandomSource;
use crate::types::{
    ClientMetrics, DispatcherMetrics, DispatcherStats, DynamicsPoint, MasterMetrics, MasterStats,
    MetricsSnapshot, OrderMetrics, OrderStatuses, Period, RevenueMetrics, UnderperformingMaster,
};

const WEEKDAYS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

/// Всего мастеров в штате
const MASTERS_TOTAL: u32 = 25;

/// (id, имя, база выполненных заказов, разброс, рейтинг)
const TOP_MASTERS: [(&str, &str, f64, f64, f64); 5] = [
    ("1", "Иван Петров", 45.0, 20.0, 4.9),
    ("2", "Сергей Смирнов", 42.0, 18.0, 4.8),
    ("3", "Михаил Иванов", 38.0, 15.0, 4.7),
    ("4", "Алексей Козлов", 35.0, 12.0, 4.6),
    ("5", "Дмитрий Новиков", 32.0, 10.0, 4.5),
];

struct UnderperformerSeed {
    id: &'static str,
    name: &'static str,
    orders: (f64, f64),
    rating: (f64, f64),
    issues: [&'static str; 2],
}

const UNDERPERFORMERS: [UnderperformerSeed; 2] = [
    UnderperformerSeed {
        id: "6",
        name: "Андрей Волков",
        orders: (15.0, 10.0),
        rating: (3.8, 0.4),
        issues: ["Низкий рейтинг", "Медленное выполнение"],
    },
    UnderperformerSeed {
        id: "7",
        name: "Павел Морозов",
        orders: (12.0, 8.0),
        rating: (3.5, 0.5),
        issues: ["Частые жалобы", "Опоздания"],
    },
];

/// (id, имя, распределено, время реакции, ошибки): пары (база, разброс)
const DISPATCHERS: [(&str, &str, (f64, f64), (f64, f64), (f64, f64)); 3] = [
    ("1", "Анна Сидорова", (50.0, 20.0), (25.0, 15.0), (0.0, 2.0)),
    ("2", "Мария Кузнецова", (45.0, 15.0), (35.0, 25.0), (1.0, 3.0)),
    ("3", "Елена Попова", (40.0, 18.0), (20.0, 10.0), (0.0, 1.0)),
];

/// Генерирует снимок метрик за период.
///
/// Каждое поле выбирается независимо: `floor(base + r * spread)`, где `base`
/// масштабируется множителем периода только у объемных метрик. Согласованность
/// между полями (например, сумма статусов и общее число заказов) не поддерживается.
pub struct MetricsGenerator<R: RandomSource> {
    source: R,
}

impl<R: RandomSource> MetricsGenerator<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn generate(&mut self, period: Period) -> MetricsSnapshot {
        let m = period.multiplier() as f64;

        let orders = self.generate_orders(m);
        let revenue = self.generate_revenue(m, period);
        let masters = self.generate_masters();
        let dispatchers = self.generate_dispatchers(m);
        let clients = self.generate_clients(m);

        MetricsSnapshot {
            period,
            orders,
            revenue,
            masters,
            dispatchers,
            clients,
        }
    }

    fn count(&mut self, base: f64, spread: f64) -> u32 {
        self.source.sample(base, spread).max(0.0) as u32
    }

    fn delta(&mut self, base: f64, spread: f64) -> i32 {
        self.source.sample(base, spread) as i32
    }

    fn ratio(&mut self, base: f64, spread: f64) -> f64 {
        base + self.source.next_f64() * spread
    }

    fn generate_orders(&mut self, m: f64) -> OrderMetrics {
        let total = self.count(150.0 * m, 50.0);
        let completed = self.count(75.0 * m, 20.0);
        let on_time_share = self.ratio(0.85, 0.1);

        OrderMetrics {
            total,
            urgent: self.count(3.0, 5.0),
            trend: self.delta(-10.0, 30.0),
            completed_on_time: (completed as f64 * on_time_share).floor() as u32,
            statuses: OrderStatuses {
                new: self.count(10.0 * m, 5.0),
                distributed: self.count(25.0 * m, 10.0),
                distributed_by_ai: self.count(15.0 * m, 8.0),
                distributed_by_dispatcher: self.count(18.0 * m, 7.0),
                in_progress: self.count(35.0 * m, 15.0),
                completed,
                cancelled: self.count(5.0 * m, 3.0),
            },
        }
    }

    fn generate_revenue(&mut self, m: f64, period: Period) -> RevenueMetrics {
        RevenueMetrics {
            total: self.source.sample(250_000.0 * m, 50_000.0).max(0.0) as u64,
            trend: self.delta(-15.0, 40.0),
            average_check: self.count(3500.0, 1500.0),
            check_trend: self.delta(-5.0, 20.0),
            margin: self.count(35.0, 15.0),
            margin_trend: self.delta(-3.0, 10.0),
            dynamics: self.generate_dynamics(period),
        }
    }

    /// Точки не сглаживаются: соседние значения независимы
    fn generate_dynamics(&mut self, period: Period) -> Vec<DynamicsPoint> {
        let (points, base, spread) = match period {
            Period::Day => (6, 30_000.0, 20_000.0),
            Period::Week => (7, 200_000.0, 100_000.0),
            Period::Month => (12, 80_000.0, 40_000.0),
        };

        (0..points)
            .map(|i| {
                let date = match period {
                    Period::Day => format!("{}:00", i * 4),
                    Period::Week => WEEKDAYS[i].to_string(),
                    Period::Month => (i + 1).to_string(),
                };
                DynamicsPoint {
                    date,
                    value: self.source.sample(base, spread).max(0.0) as u64,
                }
            })
            .collect()
    }

    fn generate_masters(&mut self) -> MasterMetrics {
        let online = self.count(8.0, 7.0);
        let avg_completion_time = self.count(45.0, 30.0);
        let avg_rating = self.ratio(4.3, 0.5);

        let top = TOP_MASTERS
            .iter()
            .map(|&(id, name, base, spread, rating)| MasterStats {
                id: id.to_string(),
                name: name.to_string(),
                completed_orders: self.count(base, spread),
                rating,
            })
            .collect();

        let underperformers = UNDERPERFORMERS
            .iter()
            .map(|seed| UnderperformingMaster {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                completed_orders: self.count(seed.orders.0, seed.orders.1),
                rating: self.ratio(seed.rating.0, seed.rating.1),
                issues: seed.issues.iter().map(|s| s.to_string()).collect(),
            })
            .collect();

        MasterMetrics {
            online,
            total: MASTERS_TOTAL,
            avg_completion_time,
            avg_rating,
            top,
            underperformers,
        }
    }

    fn generate_dispatchers(&mut self, m: f64) -> DispatcherMetrics {
        let total_distributed = self.count(140.0 * m, 40.0);
        let avg_response_time = self.count(30.0, 60.0);
        let errors = self.count(2.0 * m, 3.0);

        let performance = DISPATCHERS
            .iter()
            .map(|&(id, name, distributed, response, errors)| DispatcherStats {
                id: id.to_string(),
                name: name.to_string(),
                distributed: self.count(distributed.0, distributed.1),
                avg_response_time: self.count(response.0, response.1),
                errors: self.count(errors.0, errors.1),
            })
            .collect();

        DispatcherMetrics {
            total_distributed,
            avg_response_time,
            errors,
            performance,
        }
    }

    fn generate_clients(&mut self, m: f64) -> ClientMetrics {
        ClientMetrics {
            avg_rating: self.ratio(4.2, 0.6),
            new_clients: self.count(25.0 * m, 15.0),
            returning_rate: self.ratio(65.0, 20.0),
            complaints: self.count(3.0 * m, 5.0),
            satisfaction_trend: self.delta(-5.0, 20.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ConstantSource, RngSource};

    #[test]
    fn dynamics_shape_follows_period() {
        let mut generator = MetricsGenerator::new(RngSource::seeded(1));

        let day = generator.generate(Period::Day).revenue.dynamics;
        let labels: Vec<&str> = day.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(labels, ["0:00", "4:00", "8:00", "12:00", "16:00", "20:00"]);

        let week = generator.generate(Period::Week).revenue.dynamics;
        let labels: Vec<&str> = week.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(labels, WEEKDAYS);

        let month = generator.generate(Period::Month).revenue.dynamics;
        assert_eq!(month.len(), 12);
        assert_eq!(month[0].date, "1");
        assert_eq!(month[11].date, "12");
    }

    #[test]
    fn dynamics_values_stay_in_period_range() {
        let mut generator = MetricsGenerator::new(RngSource::seeded(3));
        for _ in 0..50 {
            for p in generator.generate(Period::Day).revenue.dynamics {
                assert!((30_000..50_000).contains(&p.value));
            }
            for p in generator.generate(Period::Week).revenue.dynamics {
                assert!((200_000..300_000).contains(&p.value));
            }
            for p in generator.generate(Period::Month).revenue.dynamics {
                assert!((80_000..120_000).contains(&p.value));
            }
        }
    }

    #[test]
    fn constant_source_gives_exact_snapshot() {
        let mut generator = MetricsGenerator::new(ConstantSource(0.5));
        let snapshot = generator.generate(Period::Week);

        assert_eq!(snapshot.period, Period::Week);
        assert_eq!(snapshot.orders.total, 1075);
        assert_eq!(snapshot.orders.urgent, 5);
        assert_eq!(snapshot.orders.trend, 5);
        assert_eq!(snapshot.orders.statuses.completed, 535);
        // floor(535 * 0.9)
        assert_eq!(snapshot.orders.completed_on_time, 481);
        assert_eq!(snapshot.orders.statuses.cancelled, 36);
        assert_eq!(snapshot.revenue.total, 1_775_000);
        assert_eq!(snapshot.revenue.average_check, 4250);
        assert_eq!(snapshot.revenue.margin, 42);
        assert!(snapshot.revenue.dynamics.iter().all(|p| p.value == 250_000));
        assert_eq!(snapshot.masters.total, 25);
        assert_eq!(snapshot.masters.online, 11);
        assert!((snapshot.masters.avg_rating - 4.55).abs() < 1e-9);
        assert_eq!(snapshot.masters.top[0].completed_orders, 55);
        assert_eq!(snapshot.dispatchers.total_distributed, 1000);
        assert_eq!(snapshot.dispatchers.errors, 15);
        assert_eq!(snapshot.clients.new_clients, 182);
        assert!((snapshot.clients.returning_rate - 75.0).abs() < 1e-9);
    }

    #[test]
    fn all_counts_non_negative_at_lowest_sample() {
        let mut generator = MetricsGenerator::new(ConstantSource(0.0));
        for period in Period::ALL {
            let snapshot = generator.generate(period);
            assert_eq!(snapshot.orders.trend, -10);
            assert_eq!(snapshot.revenue.trend, -15);
            assert!(snapshot.masters.avg_rating >= 0.0);
            assert!(snapshot.clients.avg_rating >= 0.0);
            assert!(snapshot.dispatchers.performance.iter().all(|d| d.avg_response_time > 0));
        }
    }

    #[test]
    fn rosters_are_fixed() {
        let mut generator = MetricsGenerator::new(RngSource::seeded(11));
        let snapshot = generator.generate(Period::Day);

        assert_eq!(snapshot.masters.top.len(), 5);
        let ratings: Vec<f64> = snapshot.masters.top.iter().map(|m| m.rating).collect();
        assert_eq!(ratings, [4.9, 4.8, 4.7, 4.6, 4.5]);

        assert_eq!(snapshot.masters.underperformers.len(), 2);
        assert_eq!(snapshot.masters.underperformers[1].issues, ["Частые жалобы", "Опоздания"]);
        assert_eq!(snapshot.dispatchers.performance.len(), 3);
        assert_eq!(snapshot.dispatchers.performance[1].name, "Мария Кузнецова");
    }

    fn mean_volumes<R: RandomSource>(
        generator: &mut MetricsGenerator<R>,
        period: Period,
        runs: usize,
    ) -> (f64, f64, f64) {
        let mut orders = 0.0;
        let mut revenue = 0.0;
        let mut clients = 0.0;
        for _ in 0..runs {
            let s = generator.generate(period);
            orders += s.orders.total as f64;
            revenue += s.revenue.total as f64;
            clients += s.clients.new_clients as f64;
        }
        let n = runs as f64;
        (orders / n, revenue / n, clients / n)
    }

    #[test]
    fn volume_metrics_grow_with_period() {
        let mut generator = MetricsGenerator::new(RngSource::seeded(2024));

        let day = mean_volumes(&mut generator, Period::Day, 200);
        let week = mean_volumes(&mut generator, Period::Week, 200);
        let month = mean_volumes(&mut generator, Period::Month, 200);

        assert!(day.0 < week.0 && week.0 < month.0);
        assert!(day.1 < week.1 && week.1 < month.1);
        assert!(day.2 < week.2 && week.2 < month.2);
    }
}
