use super::{DeleteModal, UserFormModal};
use crate::{
	data::{User, UserId},
	route::Route,
};
use std::rc::Rc;
use yew::prelude::*;
use yew_router::prelude::Link;

#[derive(Clone, PartialEq, Properties)]
pub struct UserTableProps {
	pub users: Rc<Vec<User>>,
	/// Emitted after a user has been edited or deleted.
	pub on_changed: Callback<()>,
}

#[function_component]
pub fn UserTable(UserTableProps { users, on_changed }: &UserTableProps) -> Html {
	let editing = use_state_eq(|| None::<User>);
	let deleting = use_state_eq(|| None::<UserId>);

	let close_edit = Callback::from({
		let editing = editing.clone();
		move |_: ()| editing.set(None)
	});
	let close_delete = Callback::from({
		let deleting = deleting.clone();
		move |_: ()| deleting.set(None)
	});

	let rows = users.iter().enumerate().map(|(idx, user)| {
		let row_class = match idx % 2 {
			0 => "table-success",
			_ => "table-dark",
		};
		let edit = Callback::from({
			let editing = editing.clone();
			let user = user.clone();
			move |_: MouseEvent| editing.set(Some(user.clone()))
		});
		let delete = Callback::from({
			let deleting = deleting.clone();
			let id = user.id;
			move |_: MouseEvent| deleting.set(Some(id))
		});
		html! {
			<tr key={user.id} class={row_class}>
				<td>
					<Link<Route> classes="link-underline" to={Route::user(user.id)}>{&user.name}</Link<Route>>
				</td>
				<td>{&user.email}</td>
				<td>
					<button class="btn btn-warning btn-sm mx-1" onclick={edit}>{"Edit"}</button>
					<button class="btn btn-danger btn-sm mx-1" onclick={delete}>{"Delete"}</button>
				</td>
			</tr>
		}
	});

	html! {<>
		<table class="table table-bordered shadow-sm">
			<thead class="table-dark">
				<tr>
					<th>{"Name"}</th>
					<th>{"Email"}</th>
					<th>{"Actions"}</th>
				</tr>
			</thead>
			<tbody>
				{for rows}
			</tbody>
		</table>
		if let Some(user) = (*editing).clone() {
			<UserFormModal
				key={user.id}
				user={Some(user.clone())}
				on_close={close_edit.clone()}
				on_saved={on_changed.clone()}
			/>
		}
		if let Some(id) = *deleting {
			<DeleteModal {id} on_close={close_delete} on_deleted={on_changed.clone()} />
		}
	</>}
}
