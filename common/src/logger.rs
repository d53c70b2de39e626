use crate::constants::DEBUG_ENV_VAR;
use chrono::Local;
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Per-component console logger. `DEBUG` lines only show up when
/// `DISCOVERY_DEBUG` is set.
#[derive(Debug, Clone)]
pub struct Logger {
    pub name: String,
    pub info_color: Color,
    pub debug_enabled: bool,
}

impl Logger {
    pub fn new(name: impl Into<String>, info_color: Color) -> Self {
        Self {
            name: name.into().to_uppercase(),
            info_color,
            debug_enabled: std::env::var_os(DEBUG_ENV_VAR).is_some(),
        }
    }

    fn header(&self, level: Level) -> ColoredString {
        let header = format!(
            "[{}][{}][{}]",
            Local::now().format("%H:%M:%S%.3f"),
            level.tag(),
            self.name
        );
        match level {
            Level::Debug => header.dimmed(),
            Level::Info => header.bold().color(self.info_color),
            Level::Warn => header.bold().yellow(),
            Level::Error => header.bold().bright_red(),
        }
    }

    pub fn log(&self, level: Level, msg: impl AsRef<str>) {
        if level == Level::Debug && !self.debug_enabled {
            return;
        }
        let line = format!("{} {} {}", self.header(level), "→".dimmed(), msg.as_ref());
        if level == Level::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    pub fn debug(&self, msg: impl AsRef<str>) {
        self.log(Level::Debug, msg);
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.log(Level::Info, msg);
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.log(Level::Warn, msg);
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        self.log(Level::Error, msg);
    }
}
