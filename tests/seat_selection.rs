//! Сквозные сценарии экрана выбора мест и property-инварианты ядра.

use std::time::{Duration, Instant};

use proptest::prelude::*;

use cinema_booking::config::BookingConfig;
use cinema_booking::flow::notice::NoticeKind;
use cinema_booking::flow::router::{redirect_for, Transition};
use cinema_booking::flow::seat_selection::{Phase, SeatSelectionScreen};
use cinema_booking::flow::{context::NavigationState, FlowError};
use cinema_booking::seating::{pricing, SeatId, SeatMap, Selection, Toggle};

fn booking_config() -> BookingConfig {
    BookingConfig {
        max_seats_per_booking: 6,
        notice_ttl_secs: 3,
        currency: "INR".to_string(),
    }
}

fn enter(price: Option<f64>) -> Result<SeatSelectionScreen, FlowError> {
    let state = NavigationState {
        movie_id: Some(42),
        movie_title: Some("Inception".to_string()),
        price,
        ..NavigationState::default()
    };
    SeatSelectionScreen::enter(state, SeatMap::current_screening(), &booking_config())
}

fn seat(id: &str) -> SeatId {
    id.parse().unwrap()
}

#[test]
fn selecting_three_seats_at_200_totals_600_then_400_after_deselect() {
    let now = Instant::now();
    let mut screen = enter(Some(200.0)).unwrap();

    for id in ["A-1", "A-2", "B-1"] {
        assert_eq!(screen.toggle_seat(seat(id), now), Toggle::Added);
    }
    assert_eq!(screen.total_price(), 600.0);

    assert_eq!(screen.toggle_seat(seat("A-2"), now), Toggle::Removed);
    assert_eq!(screen.total_price(), 400.0);

    let order: Vec<String> = screen.selection().iter().map(|s| s.to_string()).collect();
    assert_eq!(order, vec!["A-1", "B-1"]);
}

#[test]
fn seventh_seat_raises_a_notice_that_clears_after_the_window() {
    let now = Instant::now();
    let mut screen = enter(Some(150.0)).unwrap();

    for id in ["A-1", "A-2", "A-3", "A-4", "A-5", "A-6"] {
        screen.toggle_seat(seat(id), now);
    }
    let before: Vec<String> = screen.selection().iter().map(|s| s.to_string()).collect();

    assert_eq!(screen.toggle_seat(seat("D-1"), now), Toggle::RejectedFull);
    let after: Vec<String> = screen.selection().iter().map(|s| s.to_string()).collect();
    assert_eq!(before, after);
    assert_eq!(
        screen.notice(now).unwrap().kind(),
        NoticeKind::CapacityExceeded
    );
    assert_eq!(screen.phase(now), Phase::CapacityBlocked);

    // После окна уведомление гаснет, выбор не тронут.
    let later = now + Duration::from_secs(3);
    assert!(screen.notice(later).is_none());
    assert_eq!(screen.phase(later), Phase::Selecting);
    assert_eq!(screen.selection().len(), 6);
}

#[test]
fn proceed_on_empty_selection_yields_no_payload() {
    let now = Instant::now();
    let mut screen = enter(Some(150.0)).unwrap();

    let err = screen.proceed(now).err().unwrap();
    assert!(matches!(err, FlowError::EmptySelection));
    assert_eq!(redirect_for(&err), Transition::Stay);
    assert_ne!(screen.phase(now), Phase::Proceeding);
}

#[test]
fn entering_without_movie_id_redirects_home_instead_of_panicking() {
    let state = NavigationState {
        movie_title: Some("Inception".to_string()),
        price: Some(200.0),
        ..NavigationState::default()
    };
    let err = SeatSelectionScreen::enter(state, SeatMap::current_screening(), &booking_config())
        .err()
        .unwrap();
    assert!(matches!(err, FlowError::MissingContext { field: "movie_id" }));
    assert_eq!(redirect_for(&err), Transition::RedirectHome);
}

#[test]
fn every_booked_seat_toggle_leaves_the_selection_unchanged() {
    let now = Instant::now();
    let mut screen = enter(Some(150.0)).unwrap();
    screen.toggle_seat(seat("B-2"), now);

    for id in [
        "A-7", "C-1", "C-3", "C-4", "C-6", "E-7", "G-1", "G-6", "G-7", "G-8", "I-15", "I-16",
    ] {
        assert_eq!(screen.toggle_seat(seat(id), now), Toggle::RejectedBooked);
        assert_eq!(screen.selection().len(), 1);
    }
}

#[test]
fn draft_carries_click_order_and_recomputed_total() {
    let now = Instant::now();
    let mut screen = enter(Some(200.0)).unwrap();
    screen.toggle_seat(seat("J-12"), now);
    screen.toggle_seat(seat("A-1"), now);

    let draft = screen.proceed(now).unwrap();
    assert_eq!(draft.movie_id, 42);
    assert_eq!(draft.movie_title, "Inception");
    assert_eq!(draft.selected_seats, vec!["J-12", "A-1"]);
    assert_eq!(draft.total_price, 400.0);
}

fn arb_seat() -> impl Strategy<Value = SeatId> {
    (0u8..10, 1u8..=12).prop_map(|(row, number)| {
        format!("{}-{}", (b'A' + row) as char, number).parse().unwrap()
    })
}

proptest! {
    // Инвариант: никакая последовательность кликов не превышает лимит
    // и не затаскивает в выбор занятые места.
    #[test]
    fn any_toggle_sequence_respects_capacity_and_booked_set(
        toggles in proptest::collection::vec(arb_seat(), 0..60)
    ) {
        let map = SeatMap::current_screening();
        let mut selection = Selection::new(6);

        for seat in toggles {
            selection.toggle(seat, &map);
            prop_assert!(selection.len() <= 6);
            prop_assert!(selection.iter().all(|s| !map.is_booked(s)));
        }

        // Без дубликатов.
        let mut seen = std::collections::HashSet::new();
        prop_assert!(selection.iter().all(|s| seen.insert(*s)));
    }

    // Снятие выбранного незанятого места работает всегда, даже при
    // заполненном лимите.
    #[test]
    fn deselection_always_succeeds(fill in proptest::collection::vec(arb_seat(), 6..40)) {
        let map = SeatMap::current_screening();
        let mut selection = Selection::new(6);
        for seat in fill {
            selection.toggle(seat, &map);
        }

        if let Some(&chosen) = selection.seats().first() {
            let before = selection.len();
            prop_assert_eq!(selection.toggle(chosen, &map), Toggle::Removed);
            prop_assert_eq!(selection.len(), before - 1);
        }
    }

    // total(selection, price) == price * |selection| для любых
    // неотрицательных цен.
    #[test]
    fn total_is_linear_in_selection_size(
        count in 0usize..100,
        price in 0.0f64..10_000.0
    ) {
        prop_assert_eq!(pricing::total(count, Some(price)), price * count as f64);
        prop_assert_eq!(pricing::total(count, None), 0.0);
    }
}
