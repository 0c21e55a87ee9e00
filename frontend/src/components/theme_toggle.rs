use crate::{Model, Msg};
use yew::prelude::*;

pub fn render_theme_toggle(model: &Model, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="top-right">
            <button
                id="theme-toggle"
                class="theme-toggle"
                onclick={link.callback(|_| Msg::ToggleTheme)}
                title={ if model.theme == "light" { "Switch to Dark Mode" } else { "Switch to Light Mode" } }
            >
                { if model.theme == "light" {
                    html! { <img src="https://cdnjs.cloudflare.com/ajax/libs/twemoji/14.0.2/svg/2600.svg" alt="Sun Icon" class="toggle-icon" /> }
                } else {
                    html! { <img src="https://cdnjs.cloudflare.com/ajax/libs/twemoji/14.0.2/svg/1f319.svg" alt="Moon Icon" class="toggle-icon" /> }
                }}
            </button>
        </div>
    }
}
