use crate::{Model, Msg};
use cropguard_shared::AnalysisEnvelope;
use gloo_file::File as GlooFile;
use gloo_net::http::Request;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub const ANALYZE_ENDPOINT: &str = "/api/predict-and-recommend";

/// Ships the staged image and language code as a multipart request and maps
/// the settlement back onto the session through messages. The session is
/// already in its submitting phase when this is called; exactly one of the
/// settlement messages is sent per invocation.
pub fn submit_analysis(ctx: &Context<Model>, file: GlooFile, language_code: String) {
    let link = ctx.link().clone();

    spawn_local(async move {
        let form_data = match build_form(&file, &language_code) {
            Ok(form_data) => form_data,
            Err(_) => {
                link.send_message(Msg::AnalysisFailed(
                    "Failed to build the upload form.".to_string(),
                ));
                return;
            }
        };

        let request = match Request::post(ANALYZE_ENDPOINT).body(form_data) {
            Ok(request) => request,
            Err(err) => {
                link.send_message(Msg::AnalysisFailed(format!("Failed to build request: {err}")));
                return;
            }
        };

        match request.send().await {
            Ok(response) if response.ok() => {
                match response.json::<AnalysisEnvelope>().await {
                    Ok(envelope) => link.send_message(Msg::AnalysisSettled(envelope)),
                    Err(err) => link.send_message(Msg::AnalysisFailed(format!(
                        "Failed to parse response: {err}"
                    ))),
                }
            }
            Ok(response) => {
                // Error statuses still carry an envelope body when the
                // service itself answered; prefer its message.
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<AnalysisEnvelope>(&body)
                    .ok()
                    .and_then(|envelope| envelope.error)
                    .unwrap_or_else(|| format!("Server error: {status}"));
                link.send_message(Msg::AnalysisFailed(message));
            }
            Err(err) => {
                link.send_message(Msg::AnalysisFailed(format!("Network error: {err}")));
            }
        }
    });
}

fn build_form(
    file: &GlooFile,
    language_code: &str,
) -> Result<web_sys::FormData, wasm_bindgen::JsValue> {
    let form_data = web_sys::FormData::new()?;
    form_data.append_with_blob_and_filename("image", file.as_ref(), &file.name())?;
    form_data.append_with_str("language_code", language_code)?;
    Ok(form_data)
}
