//! Реализация паттерна "Автоматический выключатель" для обеспечения
//! отказоустойчивости при работе с внешним API: после серии сбоев
//! запросы к неработающему сервису временно блокируются.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Состояния выключателя.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitState {
    /// Нормальный режим работы, запросы разрешены.
    Closed,
    /// Режим блокировки после множественных сбоев.
    Open,
    /// Тестовый режим: после таймаута разрешается один пробный запрос.
    HalfOpen,
}

#[derive(Debug)]
pub struct CircuitBreaker {
    state: RwLock<CircuitState>,
    failure_count: AtomicU32,
    /// Секунды от `started` до последнего сбоя. Монотонные, не wall-clock.
    last_failure_secs: AtomicU64,
    started: Instant,
    failure_threshold: u32,
    cooldown: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, cooldown_secs: u64) -> Self {
        Self {
            state: RwLock::new(CircuitState::Closed),
            failure_count: AtomicU32::new(0),
            last_failure_secs: AtomicU64::new(0),
            started: Instant::now(),
            failure_threshold,
            cooldown: Duration::from_secs(cooldown_secs),
        }
    }

    fn now_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }

    /// Можно ли выполнить следующий запрос.
    pub fn can_execute(&self) -> bool {
        let state = match self.state.read() {
            Ok(state) => state,
            Err(_) => return false,
        };

        match *state {
            CircuitState::Closed => true,
            CircuitState::Open => {
                let now = self.now_secs();
                let last_failure = self.last_failure_secs.load(Ordering::Relaxed);

                if now.saturating_sub(last_failure) >= self.cooldown.as_secs() {
                    // Освобождаем блокировку чтения перед записью.
                    drop(state);
                    if let Ok(mut state) = self.state.write() {
                        *state = CircuitState::HalfOpen;
                    }
                    info!("Circuit breaker transitioning to HalfOpen state");
                    true // Разрешаем пробный запрос.
                } else {
                    false
                }
            }
            CircuitState::HalfOpen => true,
        }
    }

    /// Регистрирует успешное выполнение запроса.
    pub fn record_success(&self) {
        let Ok(mut state) = self.state.write() else { return };

        match *state {
            CircuitState::HalfOpen => {
                *state = CircuitState::Closed;
                self.failure_count.store(0, Ordering::Relaxed);
                info!("Circuit breaker recovered - transitioning to Closed state");
            }
            CircuitState::Closed => {
                self.failure_count.store(0, Ordering::Relaxed);
            }
            _ => {}
        }
    }

    /// Регистрирует неудачное выполнение запроса.
    pub fn record_failure(&self) {
        let failure_count = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.last_failure_secs.store(self.now_secs(), Ordering::Relaxed);

        let Ok(mut state) = self.state.write() else { return };

        match *state {
            CircuitState::Closed => {
                if failure_count >= self.failure_threshold {
                    *state = CircuitState::Open;
                    error!(
                        "Circuit breaker OPENED - {} failures reached threshold {}",
                        failure_count, self.failure_threshold
                    );
                }
            }
            CircuitState::HalfOpen => {
                *state = CircuitState::Open;
                warn!("Circuit breaker test failed - returning to Open state");
            }
            _ => {}
        }
    }

    /// Текущее состояние для мониторинга.
    pub fn get_state(&self) -> CircuitState {
        self.state
            .read()
            .map(|s| s.clone())
            .unwrap_or(CircuitState::Open)
    }

    pub fn failure_count(&self) -> u32 {
        self.failure_count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_reaching_the_threshold() {
        let breaker = CircuitBreaker::new(3, 60);
        assert!(breaker.can_execute());

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Closed);

        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Open);
        assert!(!breaker.can_execute());
    }

    #[test]
    fn success_resets_the_failure_count() {
        let breaker = CircuitBreaker::new(3, 60);
        breaker.record_failure();
        breaker.record_failure();
        breaker.record_success();
        assert_eq!(breaker.failure_count(), 0);

        breaker.record_failure();
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Closed);
    }

    #[test]
    fn half_open_after_cooldown_then_recovers_on_success() {
        // Нулевой cooldown: Open сразу разрешает пробный запрос.
        let breaker = CircuitBreaker::new(1, 0);
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Open);

        assert!(breaker.can_execute());
        assert_eq!(breaker.get_state(), CircuitState::HalfOpen);

        breaker.record_success();
        assert_eq!(breaker.get_state(), CircuitState::Closed);
    }

    #[test]
    fn failed_probe_reopens_the_circuit() {
        let breaker = CircuitBreaker::new(1, 0);
        breaker.record_failure();
        assert!(breaker.can_execute()); // HalfOpen probe
        breaker.record_failure();
        assert_eq!(breaker.get_state(), CircuitState::Open);
    }
}
