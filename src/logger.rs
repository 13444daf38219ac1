//! Logging setup for the Stencil application.

/// Initializes logging for the whole run. Verbose mode lowers the
/// threshold to debug.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .format_timestamp(None)
        .init();
}
