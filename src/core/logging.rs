use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// `filter` follows the `env_logger` filter syntax (e.g. "info" or
/// "perceptual_swatch=debug"). Without one, `RUST_LOG` is used, falling back
/// to info-level output.
pub fn init_logging(filter: Option<&str>) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = filter {
            builder.parse_filters(filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        // Tests may install their own logger first.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
