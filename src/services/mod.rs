// Внешние коллабораторы: HTTP-бэкенд и платёжный шлюз.

pub mod backend;
pub mod breaker;
pub mod payment;

pub use backend::{ApiError, BackendClient};
pub use breaker::{CircuitBreaker, CircuitState};
pub use payment::{MockGateway, PaymentGateway, PaymentGatewayClient};
