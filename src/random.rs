//! Источники случайных чисел для генераторов

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Равномерное распределение на [0, 1)
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;

    /// `floor(base + r * spread)`
    fn sample(&mut self, base: f64, spread: f64) -> f64 {
        (base + self.next_f64() * spread).floor()
    }
}

/// Источник, который можно разделять между задачами tokio
pub type BoxedSource = Box<dyn RandomSource + Send>;

impl RandomSource for BoxedSource {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Обертка над любым генератором из `rand`
pub struct RngSource<R: Rng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

impl RngSource<ThreadRng> {
    pub fn thread() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl RngSource<StdRng> {
    /// Воспроизводимый источник для тестов
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Недетерминированный источник, который можно передавать между потоками
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

/// Всегда возвращает одно и то же значение
#[derive(Debug, Clone, Copy)]
pub struct ConstantSource(pub f64);

impl RandomSource for ConstantSource {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

/// Циклически возвращает заданную последовательность
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    /// `None` для пустой последовательности
    pub fn new(values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self { values, position: 0 })
    }
}

impl RandomSource for SequenceSource {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.position % self.values.len()];
        self.position += 1;
        value
    }
}
