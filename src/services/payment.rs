//! payment.rs
//!
//! Сервисный слой оплаты. Реальной интеграции со шлюзом нет - транспорт
//! вынесен за трейт `PaymentGateway`, а поставляемая реализация
//! `MockGateway` имитирует обработку платежа: задержка, проверка токена
//! запроса, сгенерированный идентификатор платежа.
//!
//! Схема токена совпадает с контрактом реального шлюза:
//! sha256(amount ++ currency ++ order_id ++ password ++ merchant_id).

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::PaymentConfig;
use crate::flow::context::BookingDraft;

/// Запрос на проведение платежа.
#[derive(Debug, Clone, Serialize)]
pub struct GatewayRequest {
    #[serde(rename = "merchantId")]
    pub merchant_id: String,
    pub token: String,
    pub amount: i64,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub currency: String,
    pub description: String,
}

/// Ответ шлюза.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayResponse {
    pub success: bool,
    #[serde(rename = "paymentId")]
    pub payment_id: Option<String>,
    pub status: Option<String>,
    pub message: Option<String>,
}

/// Квитанция об успешном платеже, уходит на экран подтверждения.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    pub payment_id: String,
    pub order_id: String,
    /// Сумма в минорных единицах валюты.
    pub amount_minor: i64,
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("payment declined: {message}")]
    Declined { message: String },
    #[error("payment gateway returned no payment id")]
    MalformedResponse,
}

/// Транспорт платёжного шлюза.
pub trait PaymentGateway: Send + Sync {
    fn process(&self, request: GatewayRequest) -> impl Future<Output = GatewayResponse> + Send;
}

fn request_token(
    amount: i64,
    currency: &str,
    order_id: &str,
    password: &str,
    merchant_id: &str,
) -> String {
    let token_string = format!("{amount}{currency}{order_id}{password}{merchant_id}");
    let mut hasher = Sha256::new();
    hasher.update(token_string.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Клиент платёжного шлюза поверх произвольного транспорта.
#[derive(Clone)]
pub struct PaymentGatewayClient<G> {
    merchant_id: String,
    password: String,
    currency: String,
    gateway: G,
}

impl<G: PaymentGateway> PaymentGatewayClient<G> {
    pub fn new(config: &PaymentConfig, currency: &str, gateway: G) -> Self {
        Self {
            merchant_id: config.merchant_id.clone(),
            password: config.merchant_password.clone(),
            currency: currency.to_string(),
            gateway,
        }
    }

    /// Проводит платёж по черновику бронирования.
    ///
    /// Идентификатор заказа: `booking-{movie_id}-{unix_ts}`; сумма
    /// переводится в минорные единицы.
    pub async fn pay(&self, draft: &BookingDraft) -> Result<PaymentReceipt, PaymentError> {
        let order_id = format!(
            "booking-{}-{}",
            draft.movie_id,
            chrono::Utc::now().timestamp()
        );
        let amount = (draft.total_price * 100.0).round() as i64;
        let token = request_token(
            amount,
            &self.currency,
            &order_id,
            &self.password,
            &self.merchant_id,
        );

        info!(order_id = %order_id, amount, currency = %self.currency, "creating payment");

        let response = self
            .gateway
            .process(GatewayRequest {
                merchant_id: self.merchant_id.clone(),
                token,
                amount,
                order_id: order_id.clone(),
                currency: self.currency.clone(),
                description: format!("Tickets for {}", draft.movie_title),
            })
            .await;

        if !response.success {
            let message = response
                .message
                .unwrap_or_else(|| "payment was not accepted".to_string());
            warn!(order_id = %order_id, %message, "payment declined");
            return Err(PaymentError::Declined { message });
        }

        let payment_id = response.payment_id.ok_or(PaymentError::MalformedResponse)?;
        info!(order_id = %order_id, payment_id = %payment_id, "payment completed");

        Ok(PaymentReceipt {
            payment_id,
            order_id,
            amount_minor: amount,
            status: response.status.unwrap_or_else(|| "CONFIRMED".to_string()),
        })
    }
}

/// Имитация шлюза: проверяет токен запроса, выдерживает настроенную
/// задержку обработки и отвечает сгенерированным идентификатором.
#[derive(Clone)]
pub struct MockGateway {
    merchant_id: String,
    password: String,
    processing_delay: Duration,
    decline_all: bool,
}

impl MockGateway {
    pub fn from_config(config: &PaymentConfig) -> Self {
        Self {
            merchant_id: config.merchant_id.clone(),
            password: config.merchant_password.clone(),
            processing_delay: Duration::from_millis(config.processing_delay_ms),
            decline_all: false,
        }
    }

    /// Шлюз, отклоняющий все платежи (для тестов).
    pub fn declining(config: &PaymentConfig) -> Self {
        Self {
            decline_all: true,
            ..Self::from_config(config)
        }
    }

    fn expected_token(&self, request: &GatewayRequest) -> String {
        request_token(
            request.amount,
            &request.currency,
            &request.order_id,
            &self.password,
            &self.merchant_id,
        )
    }
}

impl PaymentGateway for MockGateway {
    async fn process(&self, request: GatewayRequest) -> GatewayResponse {
        if !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }

        if request.token != self.expected_token(&request) {
            return GatewayResponse {
                success: false,
                payment_id: None,
                status: Some("REJECTED".to_string()),
                message: Some("invalid request token".to_string()),
            };
        }

        if self.decline_all {
            return GatewayResponse {
                success: false,
                payment_id: None,
                status: Some("CANCELLED".to_string()),
                message: Some("insufficient funds".to_string()),
            };
        }

        GatewayResponse {
            success: true,
            payment_id: Some(Uuid::new_v4().to_string()),
            status: Some("CONFIRMED".to_string()),
            message: None,
        }
    }
}
