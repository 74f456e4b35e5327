use std::cell::RefCell;
use std::rc::Rc;

use gallery_core::{Gallery, GalleryConfig, Route, ThemeProvider};
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

mod browser;
mod controls;
mod logger;
mod state;
mod transport;
pub mod utils;
pub mod view;

use browser::{BrowserHistory, MediaTheme, WindowViewport};
use state::{App, STATE};
use utils::{get_query_param, read_config};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let search = window.location().search().unwrap_or_default();
    logger::init(if get_query_param(&search, "debug").is_some() {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let config = read_config(&window);
    let path = window.location().pathname()?;
    match Route::parse(&path, config.route()) {
        Route::Home(_) => mount(window, document, config),
        route @ (Route::Page(_) | Route::Exposition(_)) => {
            log::info!("{path} is a {} page; gallery not mounted", route.component());
            Ok(())
        }
        Route::NotFound(path) => {
            log::warn!("no page for {path}");
            Ok(())
        }
    }
}

fn mount(window: Window, document: Document, config: GalleryConfig) -> Result<(), JsValue> {
    if document.get_element_by_id(view::SERIES_ID).is_none() {
        return Err(JsValue::from_str("gallery container #gallery-series not found"));
    }
    let theme = MediaTheme::new(window.clone()).initial();
    let gallery = Gallery::new(config, BrowserHistory::new(window.clone()));
    let app = Rc::new(RefCell::new(App {
        viewport: Box::new(WindowViewport::new(window.clone())),
        window,
        document,
        gallery,
        theme,
        rendered_categories: 0,
        listeners: Vec::new(),
        timer: None,
    }));

    STATE.with(|st| st.replace(Some(app.clone())));
    controls::attach(&app);
    controls::load_content(app);
    Ok(())
}

/// Tear the gallery down: stop autoplay, drop the timer and every listener.
#[wasm_bindgen]
pub fn disconnect() {
    let Some(app) = STATE.with(|st| st.borrow_mut().take()) else {
        return;
    };
    let mut app = app.borrow_mut();
    app.gallery.disconnect();
    app.timer = None;
    app.listeners.clear();
    log::debug!("gallery disconnected");
}

/// Fetch the content again after a failure.
#[wasm_bindgen]
pub fn retry() {
    if let Some(app) = state::current() {
        controls::load_content(app);
    }
}

/// Switch between day and night. Returns the new body class.
#[wasm_bindgen]
pub fn toggle_theme() -> String {
    let Some(app) = state::current() else {
        return String::new();
    };
    let theme = app.borrow().theme.toggled();
    app.borrow_mut().theme = theme;
    controls::refresh(&app);
    theme.class_name().to_string()
}
