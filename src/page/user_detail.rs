use crate::{
	data::User,
	hooks::{use_async, LocalFuture},
	sync::{Coordinator, SyncError},
};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct UserDetailProps {
	pub id: AttrValue,
}

#[function_component]
pub fn UserDetail(props: &UserDetailProps) -> Html {
	let Some(coordinator) = use_context::<Coordinator>() else {
		log::error!(target: "ui", "UserDetail rendered outside of the sync provider");
		return html!();
	};
	let user = use_async(true, {
		let id = props.id.clone();
		move || -> LocalFuture<Option<User>, Rc<SyncError>> {
			let coordinator = coordinator.clone();
			let id = id.clone();
			Box::pin(async move {
				coordinator.load_one(&id).await.map_err(|err| {
					crate::util::report("ui", &err);
					Rc::new(err)
				})
			})
		}
	});

	if user.loading {
		return html! { <p class="text-center fs-5">{"Loading..."}</p> };
	}
	let Some(Some(user)) = &user.data else {
		return html! { <p class="text-center fs-5">{"User not found."}</p> };
	};
	html! {
		<div class="container p-4">
			<h1 class="display-6 mb-4">{&user.name}</h1>
			<p class="mb-2">{format!("Email: {}", user.email)}</p>
			<p class="mb-2">{format!("Phone: {}", user.phone)}</p>
			<p class="mb-2">{format!("Address: {}", user.address)}</p>
			<p class="mb-2">{format!("Company: {}", user.company_name().unwrap_or_default())}</p>
			<p class="mb-2">{format!("Website: {}", user.website)}</p>
		</div>
	}
}
