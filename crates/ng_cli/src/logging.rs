use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Install the global fmt subscriber. Later calls are no-ops.
pub fn init_logging(level: Level) {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_target(false)
                .init();
        });
    }
}
