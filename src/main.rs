use std::time::Instant;

use anyhow::Context;
use chrono::Utc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinema_booking::{
    admin::AdminConsole,
    config::Config,
    flow::confirmation::ConfirmationScreen,
    flow::context::NavigationState,
    flow::payment::{CardDetails, PaymentForm, PaymentScreen},
    flow::seat_selection::SeatSelectionScreen,
    models::{MovieDraft, User},
    seating::SeatMap,
    AppState,
};

// Демонстрационный прогон: сеанс пользователя от каталога до записи
// в архиве бронирований.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting cinema booking demo");
    let state = AppState::new(config);

    // Наполняем каталог, если он пуст
    if state.movies.is_empty()? {
        for (title, genre, price) in [
            ("Inception", "Sci-Fi", 200.0),
            ("Interstellar", "Sci-Fi", 250.0),
            ("The Dark Knight", "Action", 220.0),
        ] {
            state.movies.add(
                MovieDraft {
                    title: title.to_string(),
                    genre: genre.to_string(),
                    poster_url: format!(
                        "https://posters.example/{}.jpg",
                        title.to_lowercase().replace(' ', "-")
                    ),
                    price,
                    ..MovieDraft::default()
                },
                Utc::now().timestamp_millis(),
            )?;
        }
        info!("Catalog seeded");
    }

    // Входим демо-пользователем (бэкенд в демо не участвует)
    let user = User {
        id: 1,
        username: "demo".to_string(),
        email: "demo@example.com".to_string(),
        is_admin: true,
        is_active: true,
        created_at: None,
    };
    state.session.login("demo-token", &user)?;

    // Экран фильмов -> выбор мест
    let movies = state.movies.list()?;
    let movie = movies.first().context("catalog is empty")?;
    info!(movie = %movie.title, price = movie.price, "opening seat selection");

    let mut screen = SeatSelectionScreen::enter(
        NavigationState::from(movie),
        SeatMap::current_screening(),
        &state.config.booking,
    )?;

    let now = Instant::now();
    for id in ["A-1", "A-2", "B-5"] {
        screen.toggle_seat(id.parse()?, now);
    }
    // Занятое место - no-op
    screen.toggle_seat("C-4".parse()?, now);

    // Седьмое место отклоняется и поднимает гаснущее уведомление
    for id in ["B-6", "B-7", "B-8", "B-9"] {
        screen.toggle_seat(id.parse()?, now);
    }
    if let Some(notice) = screen.notice(now) {
        warn!("notice: {}", notice.message());
    }
    screen.dismiss_expired(now + std::time::Duration::from_secs(3));

    info!(total = screen.total_price(), seats = screen.selection().len(), "selection done");
    let draft = screen.proceed(now)?;

    // Оплата картой через имитацию шлюза
    let payment = PaymentScreen::enter(Some(draft))?;
    let form = PaymentForm::Card(CardDetails {
        card_number: "4111111111111111".to_string(),
        card_holder: "Demo User".to_string(),
        expiry_date: "12/28".to_string(),
        cvv: "123".to_string(),
    });
    let paid = payment
        .charge(&form, &state.gateway)
        .await
        .map_err(|(_, e)| anyhow::anyhow!(e))?;
    info!(payment_id = %paid.receipt.payment_id, "payment accepted");

    // Подтверждение и запись в архив
    let mut confirmation = ConfirmationScreen::enter(Some(paid))?;
    let record = confirmation
        .confirm(&state.session, &state.bookings, Utc::now())?
        .clone();

    println!(
        "Booking {} confirmed: {} - seats {} - total {} {}",
        record.booking_id,
        record.movie_title,
        record.selected_seats.join(", "),
        record.total_price,
        state.config.booking.currency,
    );

    // Админский срез архива
    let console = AdminConsole::new(state.clone());
    info!(bookings = console.list_bookings()?.len(), "admin archive view");

    Ok(())
}
