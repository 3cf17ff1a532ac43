pub mod admin;
pub mod config;
pub mod flow;
pub mod models;
pub mod seating;
pub mod services;
pub mod store;

use std::sync::Arc;

use services::backend::BackendClient;
use services::payment::{MockGateway, PaymentGatewayClient};
use store::{BookingArchive, MemoryStore, MovieCatalog, SessionStore, SharedStore};

// Shared state для всего приложения
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: SharedStore,
    pub session: SessionStore,
    pub movies: MovieCatalog,
    pub bookings: BookingArchive,
    pub backend: BackendClient,
    pub gateway: PaymentGatewayClient<MockGateway>,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let store: SharedStore = Arc::new(MemoryStore::new());
        Self::with_store(config, store)
    }

    /// Состояние с инжектированным хранилищем (тесты подставляют своё).
    pub fn with_store(config: config::Config, store: SharedStore) -> Arc<Self> {
        let session = SessionStore::new(store.clone());
        let movies = MovieCatalog::new(store.clone());
        let bookings = BookingArchive::new(store.clone());
        let backend = BackendClient::from_config(&config.api, &config.circuit_breaker);
        let gateway = PaymentGatewayClient::new(
            &config.payment,
            &config.booking.currency,
            MockGateway::from_config(&config.payment),
        );

        Arc::new(Self {
            config,
            store,
            session,
            movies,
            bookings,
            backend,
            gateway,
        })
    }
}
