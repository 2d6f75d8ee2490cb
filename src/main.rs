use std::sync::Arc;

use commander_picker::app::State;
use commander_picker::config;
use commander_picker::search::scryfall::ScryfallClient;
use commander_picker::search::CardSearch;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = config::load();

    let client = match ScryfallClient::new(&config.search) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to create card search client: {}", e);
            std::process::exit(1);
        }
    };
    let search: Arc<dyn CardSearch> = Arc::new(client);

    tracing::info!("Starting commander picker ({})", config.search.api_base);

    let window_size = iced::Size::new(config.window.width, config.window.height);

    iced::application(
        move || State::new(config.clone(), Arc::clone(&search)),
        State::update,
        State::view,
    )
    .title(State::title)
    .subscription(State::subscription)
    .theme(State::theme)
    .window_size(window_size)
    .run()
}
