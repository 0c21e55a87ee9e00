use crate::{api, export, prefs, Model, Msg};
use cropguard_shared::{
    build_report, AnalysisEnvelope, CandidateFile, FileMeta, SessionError, SessionPhase,
};
use gloo_file::{File as GlooFile, ObjectUrl};
use web_sys::{ClipboardEvent, DragEvent, FileList};
use yew::prelude::*;

/// Stages the first offered image. Multi-file drops and pastes collapse to
/// one candidate; the session validates and either previews or refuses it.
pub fn handle_files_selected(model: &mut Model, files: Vec<GlooFile>) -> bool {
    let Some(file) = files.into_iter().next() else {
        model.notice = Some("No valid image files selected.".to_string());
        return true;
    };

    let candidate = CandidateFile {
        meta: FileMeta {
            name: file.name(),
            media_type: file.raw_mime_type(),
            size_bytes: file.size(),
        },
        payload: file,
    };

    match model.session.select_file(candidate) {
        Ok(()) => {
            model.notice = None;
            model.preview_url = model
                .session
                .file()
                .map(|held| ObjectUrl::from(held.payload.clone()));
            true
        }
        Err(err) => {
            model.notice = Some(err.to_string());
            true
        }
    }
}

pub fn handle_submit(model: &mut Model, ctx: &Context<Model>) -> bool {
    let language = model.language.clone();
    match model.session.begin_submit(&language) {
        Ok(candidate) => {
            api::submit_analysis(ctx, candidate.payload.clone(), language);
            true
        }
        // The gate: a second submit while one is in flight changes nothing.
        Err(SessionError::SubmissionInFlight) => false,
        Err(err) => {
            model.notice = Some(err.to_string());
            true
        }
    }
}

pub fn handle_settled(model: &mut Model, envelope: AnalysisEnvelope) -> bool {
    match model.session.settle(envelope) {
        Ok(()) => {
            if model.session.phase() == SessionPhase::Success {
                prefs::remember_language(model.session.language());
            }
            true
        }
        Err(err) => {
            log::warn!("Dropped a settlement outside an active submission: {err}");
            false
        }
    }
}

pub fn handle_transport_failure(model: &mut Model, message: String) -> bool {
    match model.session.fail(message) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Dropped a failure outside an active submission: {err}");
            false
        }
    }
}

pub fn handle_retry(model: &mut Model) -> bool {
    match model.session.retry() {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Retry refused: {err}");
            false
        }
    }
}

pub fn handle_reset(model: &mut Model) -> bool {
    model.session.reset();
    model.preview_url = None;
    model.notice = None;
    true
}

pub fn handle_export(model: &mut Model) -> bool {
    if let Some(outcome) = model.session.outcome() {
        let report = build_report(&outcome.prediction, &outcome.recommendation);
        export::download_report(&report);
    } else {
        log::warn!("Export requested without a result on screen.");
    }
    false
}

pub fn handle_toggle_theme(model: &mut Model) -> bool {
    let body = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.body());
    let Some(body) = body else {
        return false;
    };

    if model.theme == "light" {
        model.theme = "dark".to_string();
        let _ = body.class_list().add_1("dark-mode");
    } else {
        model.theme = "light".to_string();
        let _ = body.class_list().remove_1("dark-mode");
    }

    true
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(data_transfer) = event.data_transfer() {
        if let Some(file_list) = data_transfer.files() {
            process_file_list(ctx, file_list);
        }
    }

    true
}

pub fn handle_paste(ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if let Some(data_transfer) = event.clipboard_data() {
        if let Some(file_list) = data_transfer.files() {
            event.prevent_default();
            process_file_list(ctx, file_list);
            return true;
        }
    }
    false
}

fn process_file_list(ctx: &Context<Model>, file_list: FileList) {
    let mut files_to_process = Vec::new();

    for i in 0..file_list.length() {
        if let Some(file) = file_list.item(i) {
            if file.type_().starts_with("image/") {
                files_to_process.push(GlooFile::from(file));
            } else {
                log::warn!("Skipping non-image file: {}", file.name());
                ctx.link().send_message(Msg::SetNotice(Some(format!(
                    "Skipped non-image file: {}",
                    file.name()
                ))));
            }
        }
    }

    if !files_to_process.is_empty() {
        ctx.link().send_message(Msg::FilesSelected(files_to_process));
    }
}
