use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlAnchorElement;

/// Wraps the report text in a blob and triggers a browser download with a
/// timestamp-suffixed filename. The object URL is revoked once the click
/// has been dispatched.
pub fn download_report(report: &str) {
    let blob = Blob::new_with_options(report, Some("text/plain"));
    let url = ObjectUrl::from(blob);
    let filename = format!("cropguard_report_{}.txt", js_sys::Date::now() as u64);

    if let Err(err) = trigger_download(&url, &filename) {
        gloo_console::error!("Report download failed:", err);
    }
}

fn trigger_download(url: &str, filename: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .ok_or_else(|| JsValue::from_str("no window"))?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(url);
    anchor.set_download(filename);

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    anchor.remove();
    Ok(())
}
