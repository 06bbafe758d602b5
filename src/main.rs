use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use grocerygo::app::App;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("grocerygo=info")),
        )
        .init();

    tracing::info!("Starting GroceryGo {}", env!("CARGO_PKG_VERSION"));

    let window = WindowBuilder::new()
        .with_title("Product Identification System")
        .with_inner_size(LogicalSize::new(560.0, 820.0));

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .launch(App);
}
