//! Генератор оповещений

use chrono::Utc;

use crate::random::RandomSource;
use crate::types::{Alert, AlertType};

/// Шаблон описания: часть шаблонов подставляет случайные значения
#[derive(Debug, Clone, Copy)]
enum Description {
    Static(&'static str),
    UnassignedOrders,
    OverdueOrder,
    LowRating,
}

struct AlertTemplate {
    id: &'static str,
    r#type: AlertType,
    title: &'static str,
    /// Оповещение включается, если выборка строго больше порога
    threshold: f64,
    description: Description,
    with_timer: bool,
}

/// Порядок объявления совпадает с порядком вывода
const TEMPLATES: [AlertTemplate; 8] = [
    AlertTemplate {
        id: "1",
        r#type: AlertType::Critical,
        title: "Нераспределённые заявки",
        threshold: 0.4,
        description: Description::UnassignedOrders,
        with_timer: true,
    },
    AlertTemplate {
        id: "2",
        r#type: AlertType::Critical,
        title: "Просроченный заказ",
        threshold: 0.6,
        description: Description::OverdueOrder,
        with_timer: false,
    },
    AlertTemplate {
        id: "5",
        r#type: AlertType::Critical,
        title: "Мастер недоступен",
        threshold: 0.7,
        description: Description::Static("Иван Петров не отвечает на заявки более 20 минут"),
        with_timer: false,
    },
    AlertTemplate {
        id: "3",
        r#type: AlertType::Warning,
        title: "Низкий рейтинг",
        threshold: 0.5,
        description: Description::LowRating,
        with_timer: false,
    },
    AlertTemplate {
        id: "6",
        r#type: AlertType::Warning,
        title: "Высокая нагрузка",
        threshold: 0.6,
        description: Description::Static("Количество заявок превышает норму на 25%"),
        with_timer: false,
    },
    AlertTemplate {
        id: "7",
        r#type: AlertType::Warning,
        title: "Медленная реакция",
        threshold: 0.7,
        description: Description::Static("Диспетчер Мария отвечает на заявки медленнее обычного"),
        with_timer: false,
    },
    AlertTemplate {
        id: "4",
        r#type: AlertType::Info,
        title: "Мастер вышел из сети",
        threshold: 0.8,
        description: Description::Static("Алексей Козлов завершил смену"),
        with_timer: false,
    },
    AlertTemplate {
        id: "8",
        r#type: AlertType::Info,
        title: "Новый клиент",
        threshold: 0.9,
        description: Description::Static("Зарегистрирован новый клиент в системе"),
        with_timer: false,
    },
];

/// Таймер: от 5 до 15 минут, в секундах
const TIMER_BASE_SECS: f64 = 300.0;
const TIMER_SPREAD_SECS: f64 = 600.0;

/// Генерирует набор оповещений: каждый шаблон включается независимо.
pub struct AlertGenerator<R: RandomSource> {
    source: R,
}

impl<R: RandomSource> AlertGenerator<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn template_count() -> usize {
        TEMPLATES.len()
    }

    pub fn generate(&mut self) -> Vec<Alert> {
        let timestamp = Utc::now();
        let mut alerts = Vec::new();

        for template in &TEMPLATES {
            if self.source.next_f64() <= template.threshold {
                continue;
            }

            let description = self.describe(template.description);
            let timer = if template.with_timer {
                Some(self.source.sample(TIMER_BASE_SECS, TIMER_SPREAD_SECS) as u32)
            } else {
                None
            };

            alerts.push(Alert {
                id: template.id.to_string(),
                r#type: template.r#type,
                title: template.title.to_string(),
                description,
                timestamp,
                timer,
            });
        }

        alerts
    }

    fn describe(&mut self, description: Description) -> String {
        match description {
            Description::Static(text) => text.to_string(),
            Description::UnassignedOrders => {
                let count = self.source.sample(1.0, 5.0) as u32;
                format!("{} заявки не распределены более 5 минут", count)
            }
            Description::OverdueOrder => {
                let order = self.order_number();
                let minutes = self.source.sample(10.0, 30.0) as u32;
                format!("Заказ #{} просрочен на {} минут", order, minutes)
            }
            Description::LowRating => {
                let stars = self.source.sample(1.0, 2.0) as u32;
                let order = self.order_number();
                format!("Клиент оставил оценку {} звезды для заказа #{}", stars, order)
            }
        }
    }

    fn order_number(&mut self) -> u32 {
        self.source.sample(1000.0, 9000.0) as u32
    }
}
