use relm4::prelude::*;
use valentine::config;
use valentine::gui::app::AppModel;
use valentine::sys::runtime;

fn main() {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Failed to write default config: {}", e);
    }
    let config = config::load_or_default();

    let (tx, rx) = async_channel::bounded(32);

    // Config watcher
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.valentine.card");

    app.run::<AppModel>((config, rx));
}
