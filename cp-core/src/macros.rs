// Logs a fatal startup/runtime error and exits the process with status 1.  Every binary's
// `main` funnels its `run(...)` failure through this instead of panicking, so a bad flag or an
// unreachable API server produces a clean one-line error instead of a Rust backtrace dump.
#[macro_export]
macro_rules! fatal {
    ($err:expr, $msg:literal) => {
        tracing::error!("{}: {:#}", $msg, $err);
        std::process::exit(1);
    };
}

pub use fatal;
