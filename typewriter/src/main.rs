use std::path::PathBuf;

use clap::Parser;

use crate::app::App;
use crate::config::Config;
use crate::error::AppError;

mod app;
mod config;
mod error;
mod keys;
mod logging;
mod ui;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding `settings.toml`. Defaults to the platform config directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session length in seconds, overriding the settings file
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    time: Option<u32>,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // The log file location comes from the config, so nothing can be logged before this
    let config = Config::get(cli.config, cli.time)?;
    logging::init(&config.log_path())?;
    log_startup(&config);

    App::new(config)?.run()?;

    Ok(())
}

fn log_startup(config: &Config) {
    tracing::info!(
        directory = %config.directory.display(),
        duration_secs = config.settings.duration_secs,
        paragraphs = config.paragraphs.len(),
        "configuration loaded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use platen::Paragraphs;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_startup_is_logged_with_config_details() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = Config {
            settings: Settings::default(),
            paragraphs: Paragraphs::new(["one", "two"]).unwrap(),
            directory: PathBuf::from("/tmp/typewriter-test"),
        };
        tracing::subscriber::with_default(subscriber, || log_startup(&config));

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("configuration loaded"));
        assert!(output.contains("/tmp/typewriter-test"));
        assert!(output.contains("paragraphs=2"));
    }

    #[test]
    fn test_cli_rejects_zero_time() {
        assert!(Cli::try_parse_from(["typewriter", "--time", "0"]).is_err());

        let cli = Cli::try_parse_from(["typewriter", "-t", "45", "-c", "/tmp/cfg"]).unwrap();
        assert_eq!(cli.time, Some(45));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/cfg")));
    }
}
