#![allow(dead_code)]

use cosmic::app::Settings;
use cosmic::iced::Limits;

mod application;
mod components;
mod localize;
mod message;
mod pages;

use taskflow::config;
use taskflow::core;
use taskflow::remote;
use taskflow::route;
use taskflow::session;
use taskflow::state;

use application::{Flags, TaskFlow};
use config::TaskFlowConfig;
use route::Route;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, cosmic_config) =
        TaskFlowConfig::load().ok_or("Failed to open the TaskFlow config")?;
    let config = config.with_env_overrides();

    // Log to the systemd user journal (`journalctl --user -t taskflow -f`).
    // Our own targets at info/debug (per config), everything else at warn.
    {
        struct FilteredJournal {
            inner: systemd_journal_logger::JournalLog,
        }

        impl log::Log for FilteredJournal {
            fn enabled(&self, metadata: &log::Metadata) -> bool {
                let target = metadata.target();
                if target.starts_with("taskflow") {
                    let max = if taskflow::debug_logging() { log::LevelFilter::Debug } else { log::LevelFilter::Info };
                    metadata.level() <= max
                } else {
                    metadata.level() <= log::LevelFilter::Warn
                }
            }
            fn log(&self, record: &log::Record) {
                if self.enabled(record.metadata()) {
                    self.inner.log(record);
                }
            }
            fn flush(&self) {
                self.inner.flush();
            }
        }

        taskflow::set_debug_logging(config.debug_logging);

        match systemd_journal_logger::JournalLog::new() {
            Ok(journal) => {
                let journal = journal.with_syslog_identifier("taskflow".to_string());
                if log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })).is_ok() {
                    // Global max must be Debug so our debug logs can pass when toggled
                    log::set_max_level(log::LevelFilter::Debug);
                }
            }
            Err(e) => eprintln!("Journal logging unavailable: {}", e),
        }
    }

    localize::localize();

    let initial_route = parse_route_flag(std::env::args().skip(1)).unwrap_or(Route::Dashboard);
    log::info!("Starting at {}", initial_route.path());

    let settings = Settings::default()
        .size_limits(Limits::NONE.min_width(420.0).min_height(360.0));

    let flags = Flags { config, cosmic_config, initial_route };
    cosmic::app::run::<TaskFlow>(settings, flags)?;

    Ok(())
}

/// `--route <path>` or `--route=<path>`.
fn parse_route_flag(mut args: impl Iterator<Item = String>) -> Option<Route> {
    while let Some(arg) = args.next() {
        if arg == "--route" {
            return args.next().map(|path| Route::parse(&path));
        }
        if let Some(path) = arg.strip_prefix("--route=") {
            return Some(Route::parse(path));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| s.to_string()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn route_flag_forms() {
        assert_eq!(parse_route_flag(args(&["--route", "/tasks"])), Some(Route::Tasks));
        assert_eq!(parse_route_flag(args(&["--route=/tasks/new"])), Some(Route::NewTask));
        assert_eq!(parse_route_flag(args(&["--route"])), None);
        assert_eq!(parse_route_flag(args(&[])), None);
    }
}
