use tracing_subscriber::fmt::format::FmtSpan;

/// Sets up structured logging for a long-running daemon (API server, scheduler, node agent).
pub fn setup(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NEW)
        .with_target(false)
        .with_env_filter(env_filter)
        .compact()
        .init();
}

/// Sets up logging for the operator CLI: no timestamps, no span events, quieter by default.
pub fn setup_for_cli(env_filter: &str) {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(env_filter)
        .without_time()
        .compact()
        .init();
}
