mod api;
mod components;
mod export;
mod prefs;

use components::handlers;
use components::header::render_header;
use components::preview_area::render_preview_area;
use components::results::{render_failure, render_results};
use components::theme_toggle::render_theme_toggle;
use components::upload_section::render_upload_section;
use components::utils::render_notice;
use cropguard_shared::{AnalysisEnvelope, UploadSession};
use gloo_events::EventListener;
use gloo_file::{File as GlooFile, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent};
use yew::prelude::*;

// Yew msg components
pub enum Msg {
    // File operations
    FilesSelected(Vec<GlooFile>),

    // Analysis operations
    Submit,
    AnalysisSettled(AnalysisEnvelope),
    AnalysisFailed(String),
    Retry,
    Reset,
    ExportReport,

    // UI states
    LanguageChanged(String),
    SetNotice(Option<String>),
    SetDragging(bool),
    ToggleTheme,

    // Input events
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    session: UploadSession<GlooFile>,
    language: String,
    preview_url: Option<ObjectUrl>,
    notice: Option<String>,
    is_dragging: bool,
    theme: String,
    paste_listener: Option<EventListener>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let language =
            prefs::preferred_language().unwrap_or_else(|| prefs::DEFAULT_LANGUAGE.to_string());

        let mut model = Self {
            session: UploadSession::new(language.clone()),
            language,
            preview_url: None,
            notice: None,
            is_dragging: false,
            theme: "light".to_string(),
            paste_listener: None,
        };

        let link = ctx.link().clone();
        let window = web_sys::window().expect("no global `window` exists");
        let listener = EventListener::new(&window, "paste", move |event| {
            if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                link.send_message(Msg::HandlePaste(clipboard_event.clone()));
            }
        });
        model.paste_listener = Some(listener);

        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // File operations
            Msg::FilesSelected(files) => handlers::handle_files_selected(self, files),

            // Analysis operations
            Msg::Submit => handlers::handle_submit(self, ctx),
            Msg::AnalysisSettled(envelope) => handlers::handle_settled(self, envelope),
            Msg::AnalysisFailed(message) => handlers::handle_transport_failure(self, message),
            Msg::Retry => handlers::handle_retry(self),
            Msg::Reset => handlers::handle_reset(self),
            Msg::ExportReport => handlers::handle_export(self),

            // UI states
            Msg::LanguageChanged(code) => {
                self.language = code;
                true
            }
            Msg::SetNotice(notice) => {
                self.notice = notice;
                true
            }
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::ToggleTheme => handlers::handle_toggle_theme(self),

            // Input events
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                { render_header() }
                { render_theme_toggle(self, ctx) }

                <main class="main-content">
                    { render_upload_section(self, ctx) }
                    { render_notice(self) }
                    { render_preview_area(self, ctx) }
                    { render_failure(self, ctx) }
                    { render_results(self, ctx) }
                </main>

                <footer class="app-footer">
                    <p>{"CropGuard | Crop Disease Analysis"}</p>
                </footer>
            </div>
        }
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
