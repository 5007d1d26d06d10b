use crate::{data::UserId, sync::Coordinator, util::web_ext::CallbackExt};
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct DeleteModalProps {
	pub id: UserId,
	pub on_close: Callback<()>,
	pub on_deleted: Callback<()>,
}

#[function_component]
pub fn DeleteModal(props: &DeleteModalProps) -> Html {
	let Some(coordinator) = use_context::<Coordinator>() else {
		log::error!(target: "ui", "DeleteModal rendered outside of the sync provider");
		return html!();
	};
	let deleting = use_state_eq(|| false);

	let confirm = Callback::from({
		let deleting = deleting.clone();
		let id = props.id;
		let on_deleted = props.on_deleted.clone();
		let on_close = props.on_close.clone();
		move |_: MouseEvent| {
			deleting.set(true);
			let coordinator = coordinator.clone();
			let deleting = deleting.clone();
			let on_deleted = on_deleted.clone();
			let on_close = on_close.clone();
			wasm_bindgen_futures::spawn_local(async move {
				match coordinator.delete(id).await {
					Ok(()) => {
						log::info!(target: "ui", "deleted user {id}");
						on_deleted.emit(());
						on_close.emit(());
					}
					Err(err) => {
						deleting.set(false);
						crate::util::report("ui", &err);
					}
				}
			});
		}
	});

	html! {
		<div class="modal d-block" style="background-color: rgba(0, 0, 0, 0.5);" tabindex="-1">
			<div class="modal-dialog modal-sm">
				<div class="modal-content">
					<div class="modal-header">
						<h2 class="modal-title fs-4">{"Confirm Delete"}</h2>
					</div>
					<div class="modal-body">
						<p>{"Are you sure you want to delete this user?"}</p>
					</div>
					<div class="modal-footer">
						<button class="btn btn-danger" onclick={confirm} disabled={*deleting}>
							{if *deleting { "Deleting..." } else { "Delete" }}
						</button>
						<button class="btn btn-secondary" onclick={props.on_close.unit()}>{"Cancel"}</button>
					</div>
				</div>
			</div>
		</div>
	}
}
