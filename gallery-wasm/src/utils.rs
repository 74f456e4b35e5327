use gallery_core::GalleryConfig;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

/// Wall-clock milliseconds, the time base for autoplay.
pub fn now_ms() -> u64 {
    js_sys::Date::now().max(0.0) as u64
}

pub fn html_element(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Read `window.__GALLERY_CONFIG`, set by the host page as a JSON string or a
/// plain object. Anything missing or invalid falls back to the defaults.
pub fn read_config(window: &Window) -> GalleryConfig {
    let raw = match js_sys::Reflect::get(window, &JsValue::from_str("__GALLERY_CONFIG")) {
        Ok(v) if v.is_undefined() || v.is_null() => return GalleryConfig::default(),
        Ok(v) => v,
        Err(_) => return GalleryConfig::default(),
    };
    let text = match raw.as_string() {
        Some(s) => s,
        None => match js_sys::JSON::stringify(&raw).ok().and_then(|s| s.as_string()) {
            Some(s) => s,
            None => return GalleryConfig::default(),
        },
    };
    parse_config(&text)
}

pub fn parse_config(text: &str) -> GalleryConfig {
    GalleryConfig::from_json(text).unwrap_or_else(|e| {
        log::warn!("ignoring gallery config: {e}");
        GalleryConfig::default()
    })
}

/// Simple query string parser used at start-up.
pub fn get_query_param(search: &str, key: &str) -> Option<String> {
    let s = search.trim_start_matches('?');
    for pair in s.split('&') {
        let mut it = pair.splitn(2, '=');
        let k = it.next()?;
        let v = it.next().unwrap_or("");
        if k == key {
            return Some(url_decode(v));
        }
    }
    None
}

fn url_decode(s: &str) -> String {
    let s = s.replace('+', " ");
    percent_encoding::percent_decode_str(&s)
        .decode_utf8_lossy()
        .to_string()
}
