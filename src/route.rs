use crate::page;
use yew::prelude::*;
use yew_router::Routable;

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum Route {
	#[at("/")]
	Home,
	#[at("/users/:id")]
	User { id: String },
	#[not_found]
	#[at("/404")]
	NotFound,
}

impl Route {
	pub fn user(id: crate::data::UserId) -> Self {
		Self::User { id: id.to_string() }
	}

	pub fn html(self) -> Html {
		match self {
			Self::Home => html! { <page::Home /> },
			// keyed so that moving between users mounts a fresh page (and a fresh lookup)
			Self::User { id } => {
				let key = id.clone();
				html! { <page::UserDetail key={key} {id} /> }
			}
			Self::NotFound => html! {
				<h1 class="display-6">{"404: Page not found"}</h1>
			},
		}
	}

	pub fn switch() -> Html {
		html! { <yew_router::Switch<Route> render={Route::html} /> }
	}
}
