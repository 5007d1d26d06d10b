use crate::{
	data::{Field, FieldErrors, User, UserForm},
	sync::Coordinator,
	util::web_ext::{CallbackExt, InputExt},
};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct UserFormModalProps {
	/// The user being edited, or `None` to create a new one.
	pub user: Option<User>,
	pub on_close: Callback<()>,
	pub on_saved: Callback<()>,
}

/// Binds a text input to one field of the form.
fn bind(form: &UseStateHandle<UserForm>, apply: fn(&mut UserForm, String)) -> Callback<InputEvent> {
	let form = form.clone();
	Callback::from(move |ev: InputEvent| {
		let Some(value) = ev.input_value() else {
			return;
		};
		let mut data = (*form).clone();
		apply(&mut data, value);
		form.set(data);
	})
}

fn error_text(errors: &FieldErrors, field: Field) -> Html {
	match errors.get(field) {
		Some(message) => html! { <div class="form-text text-danger">{message}</div> },
		None => html!(),
	}
}

#[function_component]
pub fn UserFormModal(props: &UserFormModalProps) -> Html {
	let Some(coordinator) = use_context::<Coordinator>() else {
		log::error!(target: "ui", "UserFormModal rendered outside of the sync provider");
		return html!();
	};
	let form = use_state({
		let user = props.user.clone();
		move || user.as_ref().map(UserForm::from_user).unwrap_or_default()
	});
	let errors = use_state(FieldErrors::default);
	let pending = use_state_eq(|| false);
	let editing = props.user.as_ref().map(|user| user.id);

	let submit = Callback::from({
		let form = form.clone();
		let errors = errors.clone();
		let pending = pending.clone();
		let on_saved = props.on_saved.clone();
		let on_close = props.on_close.clone();
		move |ev: SubmitEvent| {
			ev.prevent_default();
			if *pending {
				return;
			}
			pending.set(true);
			let coordinator = coordinator.clone();
			let data = (*form).clone();
			let errors = errors.clone();
			let pending = pending.clone();
			let on_saved = on_saved.clone();
			let on_close = on_close.clone();
			wasm_bindgen_futures::spawn_local(async move {
				let result = match editing {
					None => coordinator.create(&data).await,
					Some(id) => coordinator.update(id, &data).await,
				};
				pending.set(false);
				match result {
					Ok(user) => {
						log::info!(target: "ui", "saved user {}", user.id);
						errors.set(FieldErrors::default());
						on_saved.emit(());
						on_close.emit(());
					}
					Err(err) => match err.field_errors() {
						Some(field_errors) => errors.set(field_errors.clone()),
						None => crate::util::report("ui", &err),
					},
				}
			});
		}
	});

	let (title, submit_text) = match editing {
		None => ("Create User", "Create"),
		Some(_) => ("Edit User", "Save Changes"),
	};

	html! {
		<div class="modal d-block" style="background-color: rgba(0, 0, 0, 0.5);" tabindex="-1">
			<div class="modal-dialog modal-dialog-scrollable">
				<div class="modal-content">
					<form onsubmit={submit}>
						<div class="modal-header">
							<h2 class="modal-title fs-4">{title}</h2>
						</div>
						<div class="modal-body">
							<div class="mb-3">
								<label class="form-label">{"Name:"}</label>
								<input class="form-control" type="text" value={form.name.clone()}
									oninput={bind(&form, |data, value| data.name = value)} />
								{error_text(&errors, Field::Name)}
							</div>
							<div class="mb-3">
								<label class="form-label">{"Email:"}</label>
								<input class="form-control" type="email" value={form.email.clone()}
									oninput={bind(&form, |data, value| data.email = value)} />
								{error_text(&errors, Field::Email)}
							</div>
							<div class="mb-3">
								<label class="form-label">{"Phone:"}</label>
								<input class="form-control" type="tel" value={form.phone.clone()}
									oninput={bind(&form, |data, value| data.phone = value)} />
								{error_text(&errors, Field::Phone)}
							</div>
							if editing.is_none() {
								<div class="mb-3">
									<label class="form-label">{"Username:"}</label>
									<input class="form-control bg-light" type="text" value={form.username()} readonly=true />
								</div>
							}
							<div class="mb-3">
								<label class="form-label">{"Address:"}</label>
								<input class="form-control" type="text" placeholder="Street" value={form.street.clone()}
									oninput={bind(&form, |data, value| data.street = value)} />
								<input class="form-control mt-2" type="text" placeholder="City" value={form.city.clone()}
									oninput={bind(&form, |data, value| data.city = value)} />
								{error_text(&errors, Field::Address)}
							</div>
							<div class="mb-3">
								<label class="form-label">{"Company Name (Optional):"}</label>
								<input class="form-control" type="text" value={form.company.clone()}
									oninput={bind(&form, |data, value| data.company = value)} />
								{error_text(&errors, Field::Company)}
							</div>
							<div class="mb-3">
								<label class="form-label">{"Website (Optional):"}</label>
								<input class="form-control" type="text" value={form.website.clone()}
									oninput={bind(&form, |data, value| data.website = value)} />
								{error_text(&errors, Field::Website)}
							</div>
						</div>
						<div class="modal-footer">
							<button class="btn btn-primary" type="submit" disabled={*pending}>{submit_text}</button>
							<button class="btn btn-secondary" type="button" onclick={props.on_close.unit()}>{"Cancel"}</button>
						</div>
					</form>
				</div>
			</div>
		</div>
	}
}
