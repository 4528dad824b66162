use notes_dashboard::app::NotesApp;
use notes_dashboard::backend::{ApiBackend, LocalBackend, NoteStore, StoreResult};
use notes_dashboard::config::{BackendKind, Config};
use notes_dashboard::constant;
use notes_dashboard::ui;
use tracing::{error, info};

fn open_store(config: &Config) -> StoreResult<Box<dyn NoteStore>> {
    match config.backend() {
        BackendKind::Local => {
            let data_dir = config.data_dir();
            info!("Using local notes in {:?}", data_dir);
            Ok(Box::new(LocalBackend::open(&data_dir)?))
        }
        BackendKind::Remote { api_url } => {
            info!("Using notes API at {}", api_url);
            let api = ApiBackend::new(&api_url, config.request_timeout())?;
            match api.health() {
                Ok(health) => info!("API health: {} {}", health.status, health.message),
                // Not fatal, the pages report errors as requests fail
                Err(e) => error!("API health check failed: {}", e),
            }
            Ok(Box::new(api))
        }
    }
}

fn main() -> eframe::Result {
    let config = Config::default();

    tracing_subscriber::fmt()
        .with_max_level(config.settings.tracing_level())
        .init();

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to open note store: {}", e);
            std::process::exit(1);
        }
    };

    let options = ui::viewport::build_viewport();

    eframe::run_native(
        constant::DEFAULT_WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(NotesApp::new(cc, config, store)))),
    )
}
