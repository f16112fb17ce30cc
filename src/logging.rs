//! Console and rolling file logging for the server

use log::LevelFilter;
use log4rs::{
    append::{
        console::ConsoleAppender,
        rolling_file::{
            policy::compound::{
                roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy,
            },
            RollingFileAppender,
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    init_config, Config,
};

/// The pattern to use when logging
const LOGGING_PATTERN: &str = "[{d} {h({l})} {M}] {m}{n}";
/// Max logging file size before rolling over to the next log file. (5mb)
const LOGGING_MAX_SIZE: u64 = 1024 * 1024 * 5;
/// The max number of logging files to keep before deleting
const LOGGING_MAX_FILES: u32 = 8;
/// Logger name of this crate, other crates only log warnings and errors
const LOGGING_MODULE: &str = "chess_league";
/// Names of the appenders every logger writes to
const APPENDERS: [&str; 2] = ["stdout", "file"];

/// Initializes logging to stdout and to log files within the logging
/// directory. Nothing is initialized when the level is [`LevelFilter::Off`]
///
/// `level` The level to log this crate at
/// `dir`   The directory log files are written to
pub fn setup(level: LevelFilter, dir: &str) {
    if level == LevelFilter::Off {
        return;
    }

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
        .build();

    let config = Config::builder()
        .appender(Appender::builder().build(APPENDERS[0], Box::new(stdout)))
        .appender(Appender::builder().build(APPENDERS[1], Box::new(file_appender(dir))))
        .logger(
            Logger::builder()
                .appenders(APPENDERS)
                .additive(false)
                .build(LOGGING_MODULE, level),
        )
        .build(
            Root::builder()
                .appenders(APPENDERS)
                .build(LevelFilter::Warn),
        )
        .expect("Failed to create logging config");

    init_config(config).expect("Unable to initialize logger");
}

/// Creates the appender writing to `log.log` within the directory, rolling
/// over to numbered files once it grows too large
fn file_appender(dir: &str) -> RollingFileAppender {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{dir}/log-{{}}.log"), LOGGING_MAX_FILES)
        .expect("Unable to create fixed window log roller");

    let policy = CompoundPolicy::new(
        Box::new(SizeTrigger::new(LOGGING_MAX_SIZE)),
        Box::new(roller),
    );

    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOGGING_PATTERN)))
        .build(format!("{dir}/log.log"), Box::new(policy))
        .expect("Unable to create logging file appender")
}
