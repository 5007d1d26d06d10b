use wasm_bindgen::JsCast;
use yew::prelude::*;

pub trait InputExt {
	fn input_value(&self) -> Option<String>;
}

impl InputExt for InputEvent {
	fn input_value(&self) -> Option<String> {
		let target = self.target()?;
		let input = target.dyn_into::<web_sys::HtmlInputElement>().ok()?;
		Some(input.value())
	}
}

pub trait CallbackExt {
	/// Ignores the event and emits `()` instead.
	fn unit<E: 'static>(&self) -> Callback<E>;
}

impl CallbackExt for Callback<()> {
	fn unit<E: 'static>(&self) -> Callback<E> {
		self.reform(|_: E| ())
	}
}
