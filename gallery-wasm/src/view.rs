//! DOM updates for the gallery. Presentation is owned by the host page; this
//! only fills in the elements it exposes by id.

use gallery_core::{LoadState, NavEvent, PaginationEngine, Theme, View, ViewportQuery};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::state::App;
use crate::utils::html_element;

pub const SERIES_ID: &str = "gallery-series";
pub const PREVIEW_ID: &str = "gallery-preview";
pub const IMAGE_ID: &str = "gallery-image";
pub const COUNT_ID: &str = "gallery-count";
pub const PROGRESS_ID: &str = "gallery-progress";
pub const DETAIL_ID: &str = "gallery-detail";
pub const PREV_ID: &str = "gallery-prev";
pub const NEXT_ID: &str = "gallery-next";
pub const INFO_ID: &str = "gallery-info";
pub const PAUSE_ID: &str = "gallery-pause";
pub const ERROR_ID: &str = "gallery-error";
pub const RETRY_ID: &str = "gallery-retry";

/// Attribute on the preview image naming the generation it is loading.
pub const GENERATION_ATTR: &str = "data-generation";

/// Element id of the list entry for a category.
pub fn category_item_id(index: usize) -> String {
    format!("gallery-serie-{index}")
}

/// "3 / 12" pagination label.
pub fn count_label(engine: &PaginationEngine) -> String {
    if engine.sculpture_max() == 0 {
        return String::new();
    }
    format!("{} / {}", engine.position().sculpture, engine.sculpture_max())
}

pub fn progress_style(engine: &PaginationEngine) -> String {
    format!("width: {:.1}%", engine.progress() * 100.0)
}

/// Apply queued engine emissions to the preview image.
pub fn apply_events(app: &mut App, events: Vec<NavEvent>) {
    for event in events {
        match event {
            NavEvent::PreviewChanged { url, generation } => {
                if !show_preview(&app.document, &url, generation) {
                    app.gallery.preview_settled(generation);
                }
            }
        }
    }
}

/// Point the preview at `url`. Returns false when there is nothing to wait
/// for (no image, no element, or the same image already shown).
fn show_preview(document: &Document, url: &str, generation: u64) -> bool {
    let Some(img) = document
        .get_element_by_id(IMAGE_ID)
        .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
    else {
        return false;
    };
    if url.is_empty() {
        let _ = img.remove_attribute("src");
        return false;
    }
    if img.src() == url && img.complete() {
        return false;
    }
    let _ = img.set_attribute(GENERATION_ATTR, &generation.to_string());
    img.set_src(url);
    true
}

/// Rebuild the category list. Only needed when the categories change.
pub fn render_series(app: &mut App) {
    let Some(list) = html_element(&app.document, SERIES_ID) else {
        return;
    };
    list.set_inner_html("");
    for (i, category) in app.gallery.engine().categories().iter().enumerate() {
        let Ok(li) = app.document.create_element("li") else {
            continue;
        };
        li.set_id(&category_item_id(i));
        li.set_class_name(&format!("serie serie-{i}"));
        let _ = li.set_attribute("data-index", &i.to_string());
        if let Ok(h) = app.document.create_element("h1") {
            h.set_class_name("big");
            h.set_text_content(Some(&category.name));
            let _ = li.append_child(&h);
        }
        let _ = list.append_child(&li);
    }
    app.rendered_categories = app.gallery.engine().categories().len();
}

/// Bring every element in line with the current state.
pub fn render(app: &mut App) {
    if app.rendered_categories != app.gallery.engine().categories().len() {
        render_series(app);
    }
    let doc = &app.document;
    let engine = app.gallery.engine();
    let position = engine.position();

    if let Some(body) = doc.body() {
        let classes = body.class_list();
        for theme in [Theme::Day, Theme::Night] {
            let _ = classes.toggle_with_force(theme.class_name(), app.theme == theme);
        }
    }

    let state = app.gallery.load_state();
    if let Some(err) = html_element(doc, ERROR_ID) {
        match state {
            LoadState::Failed(msg) => {
                err.set_hidden(false);
                err.set_title(msg);
            }
            _ => err.set_hidden(true),
        }
    }

    for i in 0..app.rendered_categories {
        if let Some(li) = doc.get_element_by_id(&category_item_id(i)) {
            let selected = i == position.category;
            let _ = li.class_list().toggle_with_force("selected", selected);
            let _ = li.class_list().toggle_with_force("disabled", selected);
        }
    }

    let detail = app.gallery.view() == View::Detail;
    if let Some(series) = html_element(doc, SERIES_ID) {
        series.set_hidden(detail);
        let _ = series
            .class_list()
            .toggle_with_force("loading", *state == LoadState::Loading);
    }
    if let Some(panel) = html_element(doc, DETAIL_ID) {
        panel.set_hidden(!detail);
        match engine.focused() {
            Some(sculpture) => {
                let category = engine.selected_category().map(|c| c.name.as_str()).unwrap_or_default();
                let mut html = String::new();
                html.push_str(&format!(
                    "<h3 class=\"single-cat\">- {}</h3><div class=\"title-container\"><h1>{}</h1></div>",
                    escape(category),
                    escape(&sculpture.title)
                ));
                if let Some(size) = &sculpture.size {
                    html.push_str(&format!("<div class=\"size\">{}</div>", escape(size)));
                }
                // Rendered CMS content is trusted markup.
                html.push_str(&format!("<div class=\"content\">{}</div>", sculpture.content));
                panel.set_inner_html(&html);
            }
            None => panel.set_inner_html(""),
        }
    }

    if let Some(count) = html_element(doc, COUNT_ID) {
        count.set_inner_text(&count_label(engine));
    }
    if let Some(progress) = html_element(doc, PROGRESS_ID) {
        let _ = progress.set_attribute("style", &progress_style(engine));
    }
    if let Some(prev) = html_element(doc, PREV_ID) {
        let _ = prev.class_list().toggle_with_force("disabled", !engine.can_retreat());
    }
    if let Some(next) = html_element(doc, NEXT_ID) {
        let _ = next.class_list().toggle_with_force("disabled", !engine.can_advance());
    }
    if let Some(info) = html_element(doc, INFO_ID) {
        info.set_inner_text(if detail { "info" } else { "info_outline" });
    }
    if let Some(pause) = html_element(doc, PAUSE_ID) {
        let autoplay = app.gallery.autoplay();
        let paused = autoplay.is_pause_requested() || autoplay.is_faulted();
        pause.set_inner_text(if paused { "play_arrow" } else { "pause" });
    }
    if let Some(preview) = html_element(doc, PREVIEW_ID) {
        let mobile = app.viewport.is_mobile(app.gallery.config().mobile_breakpoint_px);
        let _ = preview.class_list().toggle_with_force("mobile", mobile);
    }

    let item = category_item_id(position.category);
    if !detail
        && !app.viewport.is_visible(&item)
        && let Some(li) = doc.get_element_by_id(&item)
    {
        li.scroll_into_view();
    }
}

/// Fade class put on the list/detail container while a toggle is pending.
pub fn set_fading(document: &Document, fading: bool) {
    for id in [SERIES_ID, DETAIL_ID] {
        if let Some(el) = html_element(document, id) {
            let _ = el.class_list().toggle_with_force("fade-out", fading);
        }
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
