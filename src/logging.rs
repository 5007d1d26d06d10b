//! Routes the `log` facade to the browser's developer console.

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, Copy)]
pub struct Config {
	max_level: LevelFilter,
	prefer_target: bool,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			max_level: match cfg!(debug_assertions) {
				true => LevelFilter::Debug,
				false => LevelFilter::Info,
			},
			prefer_target: false,
		}
	}
}

impl Config {
	pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
		self.max_level = max_level;
		self
	}

	/// Prefix lines with the log target (ex: `sync`) instead of the module path.
	pub fn prefer_target(mut self) -> Self {
		self.prefer_target = true;
		self
	}
}

struct ConsoleLogger {
	config: Config,
}

impl ConsoleLogger {
	fn format(&self, record: &Record) -> String {
		let origin = match (self.config.prefer_target, record.module_path()) {
			(false, Some(module)) => module,
			_ => record.target(),
		};
		format!("[{}] {origin}: {}", record.level(), record.args())
	}
}

impl Log for ConsoleLogger {
	fn enabled(&self, metadata: &Metadata) -> bool {
		metadata.level() <= self.config.max_level
	}

	fn log(&self, record: &Record) {
		if !self.enabled(record.metadata()) {
			return;
		}
		let line = JsValue::from_str(&self.format(record));
		match record.level() {
			Level::Error => web_sys::console::error_1(&line),
			Level::Warn => web_sys::console::warn_1(&line),
			Level::Info => web_sys::console::info_1(&line),
			Level::Debug => web_sys::console::log_1(&line),
			Level::Trace => web_sys::console::debug_1(&line),
		}
	}

	fn flush(&self) {}
}

pub fn init(config: Config) {
	let logger = Box::new(ConsoleLogger { config });
	match log::set_boxed_logger(logger) {
		Ok(()) => log::set_max_level(config.max_level),
		Err(err) => web_sys::console::warn_1(&JsValue::from_str(&format!("logger already installed: {err}"))),
	}
}
