use termlog::{Emitter, logger_config};

fn main() {
    let logger = logger_config().enable("net").build();
    logger.say("always shown");
    logger.notice_as("net", "net is enabled");
    logger.warn_as("fs", "fs is not");
    logger.enable("fs");
    logger.warn_as("fs", "now it is");

    logger.init_global(log::LevelFilter::Debug).unwrap();
    log::info!("routed through the log facade");
    log::debug!("only shown once the debug channel is enabled");
    logger.enable("debug");
    log::debug!("debug channel enabled");
}
