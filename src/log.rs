use tracing_subscriber::{
    fmt::Layer, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// JSON logs by default, human readable ones when `debug` is set. `RUST_LOG`
/// overrides the default level.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

    let registry = tracing_subscriber::registry().with(filter);

    if debug {
        registry.with(Layer::default().pretty()).init();
    } else {
        registry.with(Layer::default().json().flatten_event(true)).init();
    }
}
