use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub api: ApiConfig,
    pub booking: BookingConfig,
    pub payment: PaymentConfig,
    pub circuit_breaker: CircuitBreakerConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Настройки клиента бэкенд-API
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

// Настройки процесса бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BookingConfig {
    pub max_seats_per_booking: usize,
    pub notice_ttl_secs: u64,
    pub currency: String,
}

// Настройки платёжного шлюза
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    pub merchant_id: String,
    pub merchant_password: String,
    pub processing_delay_ms: u64,
}

// Настройки Circuit Breaker
#[derive(Debug, Clone, Deserialize)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub cooldown_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            app: AppConfig {
                environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
                rust_log: env::var("RUST_LOG")
                    .unwrap_or_else(|_| "cinema_booking=debug".to_string()),
            },
            api: ApiConfig {
                base_url: env::var("API_BASE_URL")
                    .unwrap_or_else(|_| "http://localhost:8000".to_string()),
                timeout_secs: env::var("API_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .expect("API_TIMEOUT_SECS must be a valid number"),
            },
            booking: BookingConfig {
                max_seats_per_booking: env::var("MAX_SEATS_PER_BOOKING")
                    .unwrap_or_else(|_| "6".to_string())
                    .parse()
                    .expect("MAX_SEATS_PER_BOOKING must be a valid number"),
                notice_ttl_secs: env::var("NOTICE_TTL_SECS")
                    .unwrap_or_else(|_| "3".to_string())
                    .parse()
                    .expect("NOTICE_TTL_SECS must be a valid number"),
                currency: env::var("CURRENCY").unwrap_or_else(|_| "INR".to_string()),
            },
            payment: PaymentConfig {
                merchant_id: env::var("MERCHANT_ID")
                    .unwrap_or_else(|_| "cinema-demo".to_string()),
                merchant_password: env::var("MERCHANT_PASSWORD")
                    .unwrap_or_else(|_| "demo-password".to_string()),
                processing_delay_ms: env::var("PAYMENT_PROCESSING_DELAY_MS")
                    .unwrap_or_else(|_| "1500".to_string())
                    .parse()
                    .expect("PAYMENT_PROCESSING_DELAY_MS must be a valid number"),
            },
            circuit_breaker: CircuitBreakerConfig {
                failure_threshold: env::var("CIRCUIT_BREAKER_FAILURE_THRESHOLD")
                    .unwrap_or_else(|_| "5".to_string())
                    .parse()
                    .expect("CIRCUIT_BREAKER_FAILURE_THRESHOLD must be a valid number"),
                cooldown_secs: env::var("CIRCUIT_BREAKER_COOLDOWN_SECS")
                    .unwrap_or_else(|_| "60".to_string())
                    .parse()
                    .expect("CIRCUIT_BREAKER_COOLDOWN_SECS must be a valid number"),
            },
        }
    }
}
