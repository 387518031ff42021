//! Home, product detail and dashboard views against an in-memory backend.

mod common;

use common::{alert, external, favorite, point, FakeBackend};
use price_tracker_sdk::format::Trend;
use price_tracker_sdk::models::{Mover, PricedProduct, Statistics};
use price_tracker_sdk::reconcile::ProductRef;
use price_tracker_sdk::views::detail::{PRODUCT_NOT_TRACKED, TARGET_PRICE_INVALID};
use price_tracker_sdk::views::{
    parse_target_price, DashboardView, HomeView, LoadState, PriceChart, ProductDetailView,
};
use price_tracker_sdk::{ProductKey, Resolution, Route};

fn catalog_backend() -> FakeBackend {
    FakeBackend::new().with_catalog(vec![
        external(42, "Mechanical Keyboard", 120.0, "electronics"),
        external(43, "Desk Lamp", 35.5, "home"),
        external(44, "Monitor", 300.0, "electronics"),
    ])
}

fn tracked_backend() -> FakeBackend {
    catalog_backend()
        .with_favorites(vec![favorite(7, 42, "Mechanical Keyboard", 110.0)])
        .with_history(
            7,
            vec![
                point(100.0, "2024-03-01T09:00:00"),
                point(120.0, "2024-01-01T09:00:00"),
                point(110.0, "2024-02-01T09:00:00"),
            ],
        )
        .with_alerts(
            7,
            vec![alert(1, 80.0, false), alert(2, 95.0, true), alert(3, 90.0, true)],
        )
}

// ---------------------------------------------------------------------------
// HomeView
// ---------------------------------------------------------------------------

#[test]
fn home_marks_already_favorited_products() {
    let backend = catalog_backend().with_favorites(vec![favorite(7, 42, "Keyboard", 110.0)]);

    let view = HomeView::open(&backend);

    let products = view.products().ready().unwrap();
    assert_eq!(products.len(), 3);
    assert!(products.iter().all(|p| !p.is_tracked()));
    assert!(view.is_favorited(42));
    assert!(!view.is_favorited(43));

    let keyboard = &products[0];
    assert!(view.actions(keyboard).already_favorite);
    assert!(view.actions(&products[1]).can_add);
    assert_eq!(view.categories(), ["electronics", "home"]);
}

#[test]
fn home_search_filters_by_category() {
    let backend = catalog_backend();
    let mut view = HomeView::open(&backend);

    view.search("home");

    assert_eq!(view.selected_category(), "home");
    let ids: Vec<i64> = view
        .products()
        .ready()
        .unwrap()
        .iter()
        .map(ProductRef::key)
        .collect();
    assert_eq!(ids, vec![43]);
}

#[test]
fn home_search_with_no_results_is_empty() {
    let backend = catalog_backend();
    let mut view = HomeView::open(&backend);
    view.search("garden");
    assert_eq!(*view.products(), LoadState::Empty);
}

#[test]
fn adding_updates_favorited_set_after_success() {
    let backend = catalog_backend();
    let mut view = HomeView::open(&backend);
    assert!(!view.is_favorited(43));

    assert!(view.add_favorite(43));

    assert!(view.is_favorited(43));
    assert_eq!(backend.notifier.successes(), vec!["Product added to favorites"]);
}

#[test]
fn failed_add_leaves_favorited_set_untouched() {
    let backend = catalog_backend();
    let mut view = HomeView::open(&backend);
    backend.fail("add_favorite");

    assert!(!view.add_favorite(43));

    assert!(!view.is_favorited(43));
    assert_eq!(backend.notifier.errors(), vec!["Could not add to favorites"]);
}

#[test]
fn failed_search_notifies() {
    let backend = catalog_backend();
    backend.fail("search_products");

    let view = HomeView::open(&backend);

    assert!(matches!(view.products(), LoadState::Failed(_)));
    assert_eq!(backend.notifier.errors(), vec!["Could not load products"]);
}

// ---------------------------------------------------------------------------
// ProductDetailView
// ---------------------------------------------------------------------------

#[test]
fn invalid_target_price_is_rejected_without_a_request() {
    let backend = tracked_backend();
    let mut view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    for input in ["0", "-5", "abc", "", "NaN"] {
        assert!(view.create_alert(input).is_err(), "accepted {input:?}");
        assert_eq!(view.alert_error(), Some(TARGET_PRICE_INVALID));
    }
    assert_eq!(backend.call_count("create_alert"), 0);
}

#[test]
fn target_price_parsing() {
    assert_eq!(parse_target_price(" 99.90 ").unwrap(), 99.9);
    assert!(parse_target_price("0").is_err());
    assert!(parse_target_price("inf").is_err());
}

#[test]
fn creating_an_alert_reloads_the_product() {
    let backend = tracked_backend();
    let mut view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    let created = view.create_alert("85").unwrap();

    assert_eq!(created.target_price, 85.0);
    assert_eq!(view.alert_error(), None);
    assert_eq!(view.alerts().len(), 4);
    assert_eq!(backend.call_count("favorite"), 2);
    assert_eq!(backend.notifier.successes(), vec!["Alert created"]);
}

#[test]
fn failed_alert_creation_sets_local_error() {
    let backend = tracked_backend();
    let mut view = ProductDetailView::open(&backend, ProductKey::Internal(7));
    backend.fail("create_alert");

    assert!(view.create_alert("85").is_err());

    assert_eq!(view.alert_error(), Some("Could not create alert"));
    assert_eq!(backend.notifier.errors(), vec!["Could not create alert"]);
}

#[test]
fn deleting_an_alert_reloads_the_product() {
    let backend = tracked_backend();
    let mut view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    assert!(view.delete_alert(2));

    assert_eq!(view.alerts().len(), 2);
    assert_eq!(view.chart().unwrap().alert_price, Some(90.0));
    assert_eq!(backend.notifier.successes(), vec!["Alert removed"]);
}

#[test]
fn chart_is_chronological_with_first_active_alert() {
    let backend = tracked_backend();
    let view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    let chart = view.chart().unwrap();

    assert_eq!(chart.prices, vec![120.0, 110.0, 100.0]);
    assert_eq!(chart.labels, vec!["01/01/2024", "01/02/2024", "01/03/2024"]);
    assert_eq!(chart.trend, Trend::Falling);
    assert_eq!(chart.alert_price, Some(95.0));
}

#[test]
fn chart_needs_history() {
    assert_eq!(PriceChart::from_history(&[], Some(10.0)), None);

    let flat = [point(50.0, "2024-01-01T00:00:00"), point(50.0, "2024-01-02T00:00:00")];
    let chart = PriceChart::from_history(&flat, None).unwrap();
    assert_eq!(chart.trend, Trend::Rising);
    assert_eq!(chart.alert_price, None);
}

#[test]
fn trackable_product_offers_add_and_navigates_to_new_favorite() {
    let backend = catalog_backend().next_favorite_id(7);
    let mut view = ProductDetailView::open(&backend, ProductKey::External(42));

    assert!(matches!(view.state(), LoadState::Ready(Resolution::Trackable(_))));
    assert!(view.chart().is_none());
    assert!(view.alerts().is_empty());

    assert_eq!(view.add_to_favorites(), Some(Route::Product(7)));
    assert_eq!(backend.notifier.successes(), vec!["Product added to favorites"]);
}

#[test]
fn alerts_require_a_tracked_product() {
    let backend = catalog_backend();
    let mut view = ProductDetailView::open(&backend, ProductKey::External(42));

    assert!(view.create_alert("10").is_err());
    assert_eq!(view.alert_error(), Some(PRODUCT_NOT_TRACKED));
    assert!(!view.delete_alert(1));
    assert_eq!(backend.call_count("create_alert"), 0);
}

#[test]
fn alert_on_failed_load_reports_why() {
    let backend = tracked_backend();
    backend.fail("favorite");
    let mut view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    assert!(view.create_alert("10").is_err());

    assert_eq!(view.alert_error(), Some(PRODUCT_NOT_TRACKED));
    assert_eq!(backend.call_count("create_alert"), 0);
}

#[test]
fn missing_product_resolves_to_not_found() {
    let backend = catalog_backend();
    let view = ProductDetailView::open(&backend, ProductKey::Internal(99));
    assert_eq!(*view.state(), LoadState::Ready(Resolution::NotFound));
    assert!(backend.notifier.errors().is_empty());
}

#[test]
fn failed_detail_load_notifies() {
    let backend = tracked_backend();
    backend.fail("price_history");

    let view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    assert!(matches!(view.state(), LoadState::Failed(_)));
    assert_eq!(backend.notifier.errors(), vec!["Could not load product data"]);
}

#[test]
fn stale_detail_result_is_discarded() {
    let backend = tracked_backend();
    let mut view = ProductDetailView::open(&backend, ProductKey::Internal(7));

    let stale = view.begin_load();
    view.reload();
    view.finish_load(stale, Ok(Resolution::NotFound));

    assert!(matches!(view.state(), LoadState::Ready(Resolution::Tracked(_))));
}

// ---------------------------------------------------------------------------
// DashboardView
// ---------------------------------------------------------------------------

#[test]
fn dashboard_cards_in_display_order() {
    let backend = FakeBackend::new().with_statistics(Statistics {
        total_products: 12,
        biggest_rise: Some(Mover {
            id: Some(3),
            name: "Monitor".to_string(),
            variation: 12.5,
        }),
        biggest_drop: None,
        most_expensive: Some(PricedProduct {
            id: Some(3),
            name: "Monitor".to_string(),
            price: 1299.9,
        }),
        cheapest: Some(PricedProduct {
            id: Some(5),
            name: "Cable".to_string(),
            price: 4.5,
        }),
        active_alerts: 4,
        alerts_triggered_today: 1,
    });

    let view = DashboardView::open(&backend);
    let cards = view.cards();

    let titles: Vec<&str> = cards.iter().map(|c| c.title).collect();
    assert_eq!(
        titles,
        vec![
            "Total products",
            "Biggest rise",
            "Biggest drop",
            "Most expensive",
            "Cheapest",
            "Active alerts"
        ]
    );
    assert_eq!(cards[0].value, "12");
    assert_eq!(cards[1].value, "12.50%");
    assert_eq!(cards[1].subtitle.as_deref(), Some("Monitor"));
    assert_eq!(cards[2].value, "N/A");
    assert_eq!(cards[2].subtitle, None);
    assert_eq!(cards[3].value, "$1,299.90");
    assert_eq!(cards[4].value, "$4.50");
    assert_eq!(cards[5].value, "4");
    assert_eq!(cards[5].subtitle.as_deref(), Some("1 triggered today"));
}

#[test]
fn dashboard_failure_notifies_and_shows_no_cards() {
    let backend = FakeBackend::new();
    backend.fail("statistics");

    let view = DashboardView::open(&backend);

    assert!(matches!(view.state(), LoadState::Failed(_)));
    assert!(view.cards().is_empty());
    assert_eq!(backend.notifier.errors(), vec!["Could not load statistics"]);
}
