use crate::components::utils::{debounce, format_file_size};
use crate::{Model, Msg};
use cropguard_shared::SessionPhase;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

const LANGUAGES: [(&str, &str); 4] = [
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("hi", "हिन्दी"),
];

pub fn render_preview_area(model: &Model, ctx: &Context<Model>) -> Html {
    let submitting = model.session.phase() == SessionPhase::Submitting;
    if !matches!(
        model.session.phase(),
        SessionPhase::Previewing | SessionPhase::Submitting
    ) {
        return html! {};
    }
    let Some(held) = model.session.file() else {
        return html! {};
    };

    let link = ctx.link().clone();
    let handle_language = ctx.link().callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::LanguageChanged(select.value())
    });

    html! {
        <div id="preview-container">
            { render_selected_image_preview(model) }
            <p class="file-info">
                { format!("{} ({})", held.meta.name, format_file_size(held.meta.size_bytes)) }
            </p>

            <div class="language-selector">
                <label for="language-select">{"Recommendation language: "}</label>
                <select
                    id="language-select"
                    onchange={handle_language}
                    disabled={submitting}
                >
                    { for LANGUAGES.iter().map(|(code, label)| html! {
                        <option value={*code} selected={model.language == *code}>{ label }</option>
                    })}
                </select>
            </div>

            <div class="button-container">
                <button
                    id="clear-btn"
                    class="analyze-btn"
                    style="background-color: var(--danger-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                    disabled={submitting}
                >
                    <i class="fa-solid fa-trash"></i>{" Clear"}
                </button>
                <button
                    id="analyze-btn"
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Submit)
                    })}
                    disabled={submitting}
                >
                    { render_analyze_button_content(model, submitting) }
                </button>
            </div>
        </div>
    }
}

fn render_selected_image_preview(model: &Model) -> Html {
    if let Some(url) = &model.preview_url {
        html! {
            <img id="actual-image-preview"
                src={url.to_string()}
                alt="Image Preview"
                style="max-width:100%; max-height: 400px; object-fit: contain; margin-bottom: 10px;" />
        }
    } else {
        html! {
            <div style="display: flex; justify-content: center; align-items: center; height: 400px; margin-bottom: 10px; border: 1px dashed var(--text-color); border-radius: 4px;">
                <p>{"Preview unavailable"}</p>
            </div>
        }
    }
}

fn render_analyze_button_content(model: &Model, submitting: bool) -> Html {
    if submitting {
        return html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> };
    }

    let filename = model
        .session
        .file()
        .map(|held| held.meta.name.clone())
        .unwrap_or_else(|| "Selected Image".to_string());

    let display_name = if filename.len() > 20 {
        format!("{}...", &filename[..17])
    } else {
        filename
    };

    html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{}\"", display_name) }</> }
}
