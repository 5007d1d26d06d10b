use crate::{
	components::{UserFormModal, UserTable},
	data::User,
	hooks::{use_async, LocalFuture},
	sync::{Coordinator, SyncError},
};
use std::rc::Rc;
use yew::prelude::*;

#[function_component]
pub fn Home() -> Html {
	let Some(coordinator) = use_context::<Coordinator>() else {
		log::error!(target: "ui", "Home rendered outside of the sync provider");
		return html!();
	};
	let users = use_async(true, {
		let coordinator = coordinator.clone();
		move || -> LocalFuture<Rc<Vec<User>>, Rc<SyncError>> {
			let coordinator = coordinator.clone();
			Box::pin(async move {
				coordinator.load().await.map(Rc::new).map_err(|err| {
					crate::util::report("ui", &err);
					Rc::new(err)
				})
			})
		}
	});
	let creating = use_state_eq(|| false);

	// After any write the cache holds the latest list, so there's no need to go back to the remote.
	let refresh = Callback::from({
		let users = users.clone();
		let coordinator = coordinator.clone();
		move |_: ()| users.set(Rc::new(coordinator.working_set()))
	});
	let open_create = Callback::from({
		let creating = creating.clone();
		move |_: MouseEvent| creating.set(true)
	});
	let close_create = Callback::from({
		let creating = creating.clone();
		move |_: ()| creating.set(false)
	});

	html! {
		<div class="container p-4">
			<h1 class="display-6">{"User Management Application"}</h1>
			<p class="lead mb-4">{"Click on User's Name to view details."}</p>
			<button class="btn btn-primary mb-3" onclick={open_create}>{"Add User"}</button>
			if *creating {
				<UserFormModal user={None::<User>} on_close={close_create} on_saved={refresh.clone()} />
			}
			{match (users.loading, &users.data) {
				(true, _) => html! { <p class="text-center fs-5">{"Loading..."}</p> },
				(false, Some(users)) => html! { <UserTable users={users.clone()} on_changed={refresh} /> },
				// the failure was already reported, show an empty list
				(false, None) => html! { <UserTable users={Rc::new(Vec::new())} on_changed={refresh} /> },
			}}
		</div>
	}
}
