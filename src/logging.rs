use env_logger;

/// Initialize the logger with the specified verbosity level
///
/// # Arguments
/// * `verbose` - Verbosity level (0=warn, 1=info, 2=debug, 3+=trace everywhere)
pub fn setup_logger(verbose: u8) {
    let env_filter = match verbose {
        0 => "landas=warn",
        1 => "landas=info",
        2 => "landas=debug",
        // -vvv opens the floodgates for dependencies too; keep targets
        // visible so probe output can be told apart from classification
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(env_filter))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(verbose >= 3)
        .init();
}
