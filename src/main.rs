use yew::prelude::*;
use yew_router::prelude::BrowserRouter;

mod api;
mod components;
mod config;
mod data;
mod hooks;
mod logging;
mod page;
mod response;
mod route;
mod storage;
mod sync;
#[cfg(test)]
mod testing;
mod util;

fn main() {
	logging::init(logging::Config::default().prefer_target());
	yew::Renderer::<App>::new().render();
}

#[function_component]
fn App() -> Html {
	html! {
		<BrowserRouter>
			<sync::Provider>
				<main class="min-vh-100 bg-light">
					{ route::Route::switch() }
				</main>
			</sync::Provider>
		</BrowserRouter>
	}
}
