use std::fs::File;
use std::path::Path;

use simplelog::{ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode, WriteLogger};

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("a global logger has already been installed")]
    AlreadyInitialized(#[from] log::SetLoggerError),
    #[error("could not create log file: {0}")]
    LogFile(#[from] std::io::Error),
}

/// Installs the global logger.
/// 
/// Messages at `term_level` and above go to the terminal. If `file` is given,
/// everything at `Debug` and above (which includes every insert and removal
/// that changes a tree) is also written there.
pub fn initialize_logging(term_level: LevelFilter, file: Option<&Path>) -> Result<(), LoggingError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(term_level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto),
    ];
    
    if let Some(path) = file {
        loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), File::create(path)?));
    }
    
    CombinedLogger::init(loggers)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    
    #[test]
    fn second_init_is_rejected() {
        // some other test may have won the race already, either way the
        // second call has to fail
        let _ = initialize_logging(LevelFilter::Warn, None);
        assert!(matches!(
            initialize_logging(LevelFilter::Warn, None),
            Err(LoggingError::AlreadyInitialized(_))
        ));
    }
}
