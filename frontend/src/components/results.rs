use crate::components::utils::{debounce, gradcam_data_uri};
use crate::{Model, Msg};
use cropguard_shared::{
    format_recommendation, map_severity, ContentBlock, SessionPhase, TextSpan,
    GENERIC_FAILURE_MESSAGE,
};
use yew::prelude::*;

pub fn render_results(model: &Model, ctx: &Context<Model>) -> Html {
    if model.session.phase() != SessionPhase::Success {
        return html! {};
    }
    let Some(outcome) = model.session.outcome() else {
        return html! {};
    };

    let prediction = &outcome.prediction;
    let band = map_severity(prediction.severity_level);
    let blocks = format_recommendation(&outcome.recommendation.recommendation);
    let link = ctx.link().clone();

    html! {
        <div class="results-container">
            <div class="result-header">
                <h2><i class="fa-solid fa-stethoscope"></i>{ format!(" {}", prediction.disease_name) }</h2>
                {
                    if let Some(message) = &prediction.message {
                        html! { <p class="result-message">{ message }</p> }
                    } else {
                        html! {}
                    }
                }
                <div class="confidence-meter">
                    <div class="meter-label">{"Confidence:"}</div>
                    <div class="meter">
                        <div class="meter-fill" style={format!("width: {}%", prediction.confidence)}></div>
                    </div>
                    <div class="meter-value">{ format!("{:.1}%", prediction.confidence) }</div>
                </div>
                <div class="severity-meter">
                    <div class="meter-label">{"Severity:"}</div>
                    <div class="meter">
                        <div
                            class={classes!("meter-fill", format!("severity-{}", band.color))}
                            style={format!("width: {}%", band.fill_percent)}
                        ></div>
                    </div>
                    <div class="meter-value">{ format!("{}/5", prediction.severity_level) }</div>
                </div>
                <p class="image-quality">{ format!("Image quality: {}", prediction.image_quality) }</p>
            </div>

            {
                if let Some(base64_png) = &prediction.gradcam_image {
                    html! {
                        <div class="gradcam-container">
                            <h3>{"Affected Regions"}</h3>
                            <img
                                src={gradcam_data_uri(base64_png)}
                                alt="Grad-CAM overlay"
                                style="max-width:100%; object-fit: contain;" />
                        </div>
                    }
                } else {
                    html! {}
                }
            }

            <div class="recommendation-container">
                <h3>{"Treatment Recommendation"}</h3>
                { for blocks.iter().map(render_block) }
                <p class="timestamp">{ format!("Generated: {}", outcome.recommendation.timestamp) }</p>
            </div>

            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::ExportReport)
                    })}
                >
                    <i class="fa-solid fa-file-arrow-down"></i>{" Export Report"}
                </button>
                <button
                    class="analyze-btn"
                    style="background-color: var(--primary-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                >
                    <i class="fa-solid fa-rotate-left"></i>{" Analyze Another"}
                </button>
            </div>
        </div>
    }
}

pub fn render_failure(model: &Model, ctx: &Context<Model>) -> Html {
    if model.session.phase() != SessionPhase::Failed {
        return html! {};
    }

    let message = model
        .session
        .failure_message()
        .unwrap_or(GENERIC_FAILURE_MESSAGE);
    let link = ctx.link().clone();
    let has_file = model.session.file().is_some();

    html! {
        <div class="results-container failed">
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ message }</p>
            </div>
            <div class="button-container">
                <button
                    class="analyze-btn"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Retry)
                    })}
                >
                    <i class="fa-solid fa-rotate-right"></i>
                    { if has_file { " Try Again" } else { " Back" } }
                </button>
                <button
                    class="analyze-btn"
                    style="background-color: var(--danger-color);"
                    onclick={debounce(300, {
                        let link = link.clone();
                        move || link.send_message(Msg::Reset)
                    })}
                >
                    <i class="fa-solid fa-trash"></i>{" Start Over"}
                </button>
            </div>
        </div>
    }
}

fn render_block(block: &ContentBlock) -> Html {
    match block {
        ContentBlock::Paragraph(spans) => html! {
            <p>{ for spans.iter().map(render_span) }</p>
        },
        ContentBlock::List(items) => html! {
            <ul>
                { for items.iter().map(|item| html! {
                    <li>{ for item.iter().map(render_span) }</li>
                })}
            </ul>
        },
    }
}

fn render_span(span: &TextSpan) -> Html {
    if span.emphasized {
        html! { <strong>{ span.text.clone() }</strong> }
    } else {
        html! { <>{ span.text.clone() }</> }
    }
}
