pub mod web_ext;

/// Blocks on a browser alert, the way failed actions are reported to the user.
pub fn alert(message: &str) {
	if let Err(err) = gloo_utils::window().alert_with_message(message) {
		log::error!(target: "ui", "failed to show alert {message:?}: {err:?}");
	}
}

/// Logs a failed action and, unless it is shown inline, alerts the user about it.
pub fn report(target: &'static str, err: &crate::sync::SyncError) {
	log::error!(target: target, "{err}");
	if let Some(message) = err.notification() {
		alert(&message);
	}
}
