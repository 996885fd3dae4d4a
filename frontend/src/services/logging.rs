use log::{Level, LevelFilter, Metadata, Record};

/// Console logger for the browser.
///
/// Components log through the `*_with_component` helpers; the domain crate
/// logs through the `log` facade, which `Logger::init` routes here as well.
pub struct Logger;

static LOGGER: Logger = Logger;

impl Logger {
    /// Install as the `log` backend. Safe to call more than once.
    pub fn init(max_level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(max_level);
        }
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::write(Level::Debug, Some(component), message);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::write(Level::Info, Some(component), message);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::write(Level::Warn, Some(component), message);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::write(Level::Error, Some(component), message);
    }

    fn write(level: Level, component: Option<&str>, message: &str) {
        let line = format_line(level, component, message);
        match level {
            Level::Error => gloo::console::error!(line),
            Level::Warn => gloo::console::warn!(line),
            Level::Info => gloo::console::info!(line),
            Level::Debug | Level::Trace => gloo::console::debug!(line),
        }
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = record.args().to_string();
            Self::write(record.level(), Some(record.target()), &message);
        }
    }

    fn flush(&self) {}
}

fn format_line(level: Level, component: Option<&str>, message: &str) -> String {
    match component {
        Some(component) => format!("[{}] {}: {}", level, component, message),
        None => format!("[{}] {}", level, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_format_line() {
        assert_eq!(
            format_line(Level::Warn, Some("auth"), "token expired"),
            "[WARN] auth: token expired"
        );
        assert_eq!(format_line(Level::Info, None, "ready"), "[INFO] ready");
    }
}
