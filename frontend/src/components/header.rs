use yew::prelude::*;

pub fn render_header() -> Html {
    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-leaf"></i> {" CropGuard"}</h1>
            <p class="subtitle">{"Upload a leaf photo to detect crop disease and get treatment advice"}</p>
        </header>
    }
}
