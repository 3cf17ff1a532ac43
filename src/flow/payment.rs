use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError, ValidationErrors};

use super::context::BookingDraft;
use super::FlowError;
use crate::services::payment::{PaymentError, PaymentGateway, PaymentGatewayClient, PaymentReceipt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Upi,
}

fn card_number_16_digits(value: &str) -> Result<(), ValidationError> {
    if value.len() == 16 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("card_number").with_message("Invalid card number".into()))
    }
}

fn expiry_mm_yy(value: &str) -> Result<(), ValidationError> {
    let bad = || ValidationError::new("expiry_date").with_message("Invalid expiry date".into());
    let (month, year) = value.split_once('/').ok_or_else(bad)?;
    if month.len() != 2 || year.len() != 2 {
        return Err(bad());
    }
    let month: u8 = month.parse().map_err(|_| bad())?;
    if !(1..=12).contains(&month) || year.parse::<u8>().is_err() {
        return Err(bad());
    }
    Ok(())
}

fn cvv_3_digits(value: &str) -> Result<(), ValidationError> {
    if value.len() == 3 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("cvv").with_message("Invalid CVV".into()))
    }
}

fn upi_handle(value: &str) -> Result<(), ValidationError> {
    if value.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::new("upi_id").with_message("Invalid UPI ID".into()))
    }
}

/// Данные карточного платежа. Правила совпадают с формой исходного
/// экрана оплаты: номер ровно 16 цифр, владелец обязателен, срок в
/// формате MM/YY, CVV ровно 3 цифры.
#[derive(Debug, Clone, Default, Validate)]
pub struct CardDetails {
    #[validate(custom(function = "card_number_16_digits"))]
    pub card_number: String,
    #[validate(length(min = 1, message = "Please fill in all card details"))]
    pub card_holder: String,
    #[validate(custom(function = "expiry_mm_yy"))]
    pub expiry_date: String,
    #[validate(custom(function = "cvv_3_digits"))]
    pub cvv: String,
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UpiDetails {
    #[validate(custom(function = "upi_handle"))]
    pub upi_id: String,
}

/// Заполненная форма оплаты: либо карта, либо UPI.
#[derive(Debug, Clone)]
pub enum PaymentForm {
    Card(CardDetails),
    Upi(UpiDetails),
}

impl PaymentForm {
    pub fn method(&self) -> PaymentMethod {
        match self {
            PaymentForm::Card(_) => PaymentMethod::Card,
            PaymentForm::Upi(_) => PaymentMethod::Upi,
        }
    }

    /// Пофилдовая валидация; при ошибках пользователь остаётся на шаге.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            PaymentForm::Card(card) => card.validate(),
            PaymentForm::Upi(upi) => upi.validate(),
        }
    }
}

/// Ошибки шага оплаты.
#[derive(Debug, thiserror::Error)]
pub enum ChargeError {
    #[error("payment form is invalid")]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Gateway(#[from] PaymentError),
}

/// Оплаченное бронирование: черновик плюс квитанция шлюза.
#[derive(Debug)]
pub struct PaidBooking {
    pub draft: BookingDraft,
    pub receipt: PaymentReceipt,
    pub method: PaymentMethod,
}

/// Экран оплаты. Требует черновик бронирования; без него пользователь
/// возвращается к списку фильмов.
#[derive(Debug)]
pub struct PaymentScreen {
    draft: BookingDraft,
}

impl PaymentScreen {
    pub fn enter(draft: Option<BookingDraft>) -> Result<Self, FlowError> {
        let draft = draft.ok_or(FlowError::MissingContext { field: "booking_draft" })?;
        info!(movie = %draft.movie_title, total = draft.total_price, "entering payment");
        Ok(Self { draft })
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Проверяет форму и проводит платёж через шлюз. Успех поглощает
    /// экран: черновик уходит дальше вместе с квитанцией.
    pub async fn charge<G: PaymentGateway>(
        self,
        form: &PaymentForm,
        client: &PaymentGatewayClient<G>,
    ) -> Result<PaidBooking, (Self, ChargeError)> {
        if let Err(e) = form.validate() {
            return Err((self, ChargeError::Invalid(e)));
        }

        match client.pay(&self.draft).await {
            Ok(receipt) => Ok(PaidBooking {
                method: form.method(),
                draft: self.draft,
                receipt,
            }),
            Err(e) => Err((self, ChargeError::Gateway(e))),
        }
    }
}
