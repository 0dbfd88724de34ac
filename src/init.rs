use std::sync::Once;

static INIT: Once = Once::new();

/// Sets up `env_logger`; `RUST_LOG` overrides the default `info` level
pub fn init() {
    INIT.call_once(|| {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .format_timestamp_secs()
            .init();
    });
}
