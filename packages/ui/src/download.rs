//! Browser-side file download via a `data:` URL on a temporary anchor.

#[cfg(target_arch = "wasm32")]
pub fn trigger_download(filename: &str, content: &str) {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    use wasm_bindgen::JsCast;

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Ok(element) = document.create_element("a") else {
        return;
    };

    let href = format!(
        "data:text/csv;charset=utf-8,{}",
        utf8_percent_encode(content, NON_ALPHANUMERIC)
    );
    let _ = element.set_attribute("href", &href);
    let _ = element.set_attribute("download", filename);

    if let Ok(anchor) = element.dyn_into::<web_sys::HtmlElement>() {
        anchor.click();
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn trigger_download(_filename: &str, _content: &str) {
    // Server-side rendering has nowhere to download to.
}
