use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use price_tracker_sdk::config::{default_config_path, Settings};
use price_tracker_sdk::format::{
    format_date_time, format_price, format_price_opt, variation_badge,
};
use price_tracker_sdk::models::FavoriteProduct;
use price_tracker_sdk::reconcile::{self, ProductRef, Resolution};
use price_tracker_sdk::views::{
    DashboardView, FavoritesComposer, FavoritesView, HomeView, LoadState, ProductDetailView,
};
use price_tracker_sdk::{
    Backend, ConsoleNotifier, PriceTrackerSdk, ProductKey, Result, Route, SortOption,
};

#[derive(Parser)]
#[command(name = "price-tracker")]
#[command(about = "Track product prices, favorites and price alerts", long_about = None)]
#[command(version)]
struct Cli {
    /// Backend base URL, including the `/api` prefix.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Config file to read instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse catalog products.
    Search {
        #[arg(long)]
        category: Option<String>,
    },

    /// List catalog categories.
    Categories,

    /// List tracked products.
    Favorites {
        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        min: Option<String>,

        #[arg(long)]
        max: Option<String>,

        /// One of created_at_desc, created_at_asc, preco_asc, preco_desc, nome_asc, nome_desc.
        #[arg(long)]
        sort: Option<SortOption>,

        #[arg(long, default_value = "1")]
        page: u32,
    },

    /// Render the page at a route path, e.g. `/produto/7`.
    Open { path: String },

    /// Start tracking a catalog product.
    Add { external_id: i64 },

    /// Stop tracking a product.
    Remove { id: i64 },

    /// Manage price alerts of a tracked product.
    Alert {
        #[command(subcommand)]
        command: AlertCommands,
    },

    /// Show aggregate statistics.
    Dashboard,
}

#[derive(Subcommand)]
enum AlertCommands {
    Create { id: i64, price: String },
    Delete { id: i64, alert_id: i64 },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut settings = Settings::load_from(&path)?;
    settings.apply_env();
    if let Some(url) = &cli.base_url {
        settings.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        settings.timeout_secs = Some(secs);
    }
    Ok(settings)
}

/// Returns whether the command succeeded.
fn run(cli: Cli) -> Result<bool> {
    let settings = load_settings(&cli)?;
    let sdk = PriceTrackerSdk::builder()
        .settings(settings)
        .notifier(Arc::new(ConsoleNotifier))
        .build()?;

    match cli.command {
        Commands::Search { category } => {
            let mut view = HomeView::open(&sdk);
            if let Some(category) = category.filter(|c| !c.is_empty()) {
                view.search(&category);
            }
            Ok(render_home(&view))
        }
        Commands::Categories => {
            for category in sdk.categories()? {
                println!("{category}");
            }
            Ok(true)
        }
        Commands::Favorites {
            category,
            min,
            max,
            sort,
            page,
        } => {
            let mut composer = FavoritesComposer::new();
            composer.set_category(category.as_deref().unwrap_or(""));
            composer.set_min_price(min.as_deref().unwrap_or(""));
            composer.set_max_price(max.as_deref().unwrap_or(""));
            if let Some(sort) = sort {
                composer.set_sort(sort);
            }
            composer.set_page(page);
            let view = FavoritesView::open_with(&sdk, composer);
            Ok(render_favorites(&view))
        }
        Commands::Open { path } => open_route(&sdk, Route::parse(&path)),
        Commands::Add { external_id } => match reconcile::add_to_favorites(&sdk, external_id) {
            Ok(route) => {
                sdk.notifier().success("Product added to favorites");
                println!("{route}");
                Ok(true)
            }
            Err(_) => Ok(false),
        },
        Commands::Remove { id } => match sdk.remove_favorite(id) {
            Ok(()) => {
                sdk.notifier().success("Product removed from favorites");
                Ok(true)
            }
            Err(_) => Ok(false),
        },
        Commands::Alert { command } => match command {
            AlertCommands::Create { id, price } => {
                let mut view = ProductDetailView::open(&sdk, ProductKey::Internal(id));
                match view.create_alert(&price) {
                    Ok(alert) => {
                        println!("{}\t{}", alert.id, format_price(alert.target_price));
                        Ok(true)
                    }
                    Err(e) => {
                        match view.alert_error() {
                            Some(message) => eprintln!("{message}"),
                            None => eprintln!("Error: {e}"),
                        }
                        Ok(false)
                    }
                }
            }
            AlertCommands::Delete { id, alert_id } => {
                let mut view = ProductDetailView::open(&sdk, ProductKey::Internal(id));
                Ok(view.delete_alert(alert_id))
            }
        },
        Commands::Dashboard => Ok(render_dashboard(&DashboardView::open(&sdk))),
    }
}

fn open_route(sdk: &PriceTrackerSdk, route: Route) -> Result<bool> {
    match route {
        Route::Home => Ok(render_home(&HomeView::open(sdk))),
        Route::Favorites => Ok(render_favorites(&FavoritesView::open(sdk))),
        Route::Dashboard => Ok(render_dashboard(&DashboardView::open(sdk))),
        Route::Product(id) => Ok(render_detail(&ProductDetailView::open(
            sdk,
            ProductKey::Internal(id),
        ))),
        Route::ExternalProduct(id) => Ok(render_detail(&ProductDetailView::open(
            sdk,
            ProductKey::External(id),
        ))),
        Route::NotFound(path) => {
            eprintln!("Page not found: {path}");
            Ok(false)
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Prints the empty or failed placeholder. Returns `None` when there is
/// nothing more to render.
fn placeholder<T>(state: &LoadState<T>, empty: &str) -> Option<bool> {
    match state {
        LoadState::Loading => Some(false),
        LoadState::Empty => {
            println!("{empty}");
            Some(true)
        }
        LoadState::Failed(_) => Some(false),
        LoadState::Ready(_) => None,
    }
}

fn render_home<B: Backend>(view: &HomeView<'_, B>) -> bool {
    if let Some(done) = placeholder(view.products(), "No products found") {
        return done;
    }
    for product in view.products().ready().into_iter().flatten() {
        let details = product.details();
        let actions = view.actions(product);
        let marker = if actions.already_favorite { "*" } else { " " };
        println!(
            "{marker} {:>6}  {:<48}  {:>12}  {}",
            product.key(),
            details.name,
            format_price_opt(details.display_price()),
            details.category.unwrap_or_default(),
        );
    }
    true
}

fn favorite_line(favorite: &FavoriteProduct) -> String {
    let mut line = format!(
        "{:>6}  {:<48}  {:>12}",
        favorite.id,
        favorite.name,
        format_price_opt(favorite.display_price()),
    );
    if favorite.price_changed() {
        line.push_str(&format!("  (was {})", format_price_opt(favorite.original_price)));
    }
    if let Some(badge) = variation_badge(favorite.variation) {
        line.push_str(&format!("  {badge}"));
    }
    line
}

fn render_favorites<B: Backend>(view: &FavoritesView<'_, B>) -> bool {
    if let Some(done) = placeholder(view.state(), "No favorites yet") {
        return done;
    }
    for favorite in view.state().ready().into_iter().flatten() {
        println!("{}", favorite_line(favorite));
    }
    let pagination = view.pagination();
    if pagination.show_controls() {
        println!(
            "page {} of {} ({} products)",
            pagination.page, pagination.pages, pagination.total
        );
    }
    true
}

fn render_detail<B: Backend>(view: &ProductDetailView<'_, B>) -> bool {
    let Some(resolution) = view.state().ready() else {
        return false;
    };
    let Some(details) = resolution.details() else {
        eprintln!("Product not found");
        return false;
    };

    println!("{}", details.name);
    if let Some(category) = &details.category {
        println!("category: {category}");
    }
    println!("price: {}", format_price_opt(details.display_price()));
    if let Some(badge) = variation_badge(details.variation) {
        println!("variation: {badge}");
    }
    if let Some(description) = &details.description {
        println!("\n{description}");
    }

    match resolution {
        Resolution::Tracked(_) => {
            if let Some(chart) = view.chart() {
                println!("\nhistory:");
                for (label, price) in chart.labels.iter().zip(&chart.prices) {
                    println!("  {label}  {}", format_price(*price));
                }
                if let Some(target) = chart.alert_price {
                    println!("  alert at {}", format_price(target));
                }
            }
            if !view.alerts().is_empty() {
                println!("\nalerts:");
            }
            for alert in view.alerts() {
                let created = alert
                    .created_at
                    .as_ref()
                    .map(format_date_time)
                    .unwrap_or_default();
                println!(
                    "  {:>4}  {:>12}  {}  {created}",
                    alert.id,
                    format_price(alert.target_price),
                    alert.status_label(),
                );
            }
        }
        Resolution::Trackable(product) => {
            let actions = ProductRef::Untracked(product.clone()).actions(false);
            if actions.can_add {
                println!("\nnot tracked; run `price-tracker add {}`", product.id);
            }
        }
        Resolution::NotFound => {}
    }
    true
}

fn render_dashboard<B: Backend>(view: &DashboardView<'_, B>) -> bool {
    if view.state().ready().is_none() {
        return false;
    }
    for card in view.cards() {
        match card.subtitle {
            Some(subtitle) => println!("{:<16} {:>12}  {subtitle}", card.title, card.value),
            None => println!("{:<16} {:>12}", card.title, card.value),
        }
    }
    true
}
