//! DOM event wiring, the autoplay timer and content loading.

use gallery_core::{
    AutoplayState, ContentFetcher, GalleryError, KeyCommand, Result, TickOutcome,
};
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, KeyboardEvent};

use crate::state::{App, SharedApp};
use crate::transport::FetchTransport;
use crate::utils::now_ms;
use crate::view;

/// How often the running timer asks the scheduler whether a boundary passed.
const TICK_POLL_MS: u32 = 100;

/// Register every handler the gallery needs. The listeners live in
/// `App::listeners` and are removed when that vector is dropped.
pub fn attach(st: &SharedApp) {
    let (window, document) = {
        let app = st.borrow();
        (app.window.clone(), app.document.clone())
    };
    let mut listeners = Vec::new();

    // Keyboard
    {
        let st = st.clone();
        listeners.push(EventListener::new_with_options(
            &window,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                    return;
                };
                let Some(command) = KeyCommand::from_key(&key) else {
                    return;
                };
                event.prevent_default();
                update(&st, |app, now| app.gallery.handle_key(command, now));
            },
        ));
    }

    on_click(&document, view::NEXT_ID, st, &mut listeners, |app, now| {
        app.gallery.next(now)
    });
    on_click(&document, view::PREV_ID, st, &mut listeners, |app, now| {
        app.gallery.prev(now)
    });
    on_click(&document, view::PAUSE_ID, st, &mut listeners, |app, now| {
        app.gallery.toggle_pause(now);
        Ok(())
    });

    for id in [view::INFO_ID, view::IMAGE_ID] {
        if let Some(el) = document.get_element_by_id(id) {
            let st = st.clone();
            listeners.push(EventListener::new(&el, "click", move |_| toggle_focus(&st)));
        }
    }

    if let Some(el) = document.get_element_by_id(view::RETRY_ID) {
        let st = st.clone();
        listeners.push(EventListener::new(&el, "click", move |_| {
            load_content(st.clone())
        }));
    }

    // Category list, delegated to the container so re-rendering keeps working.
    if let Some(list) = document.get_element_by_id(view::SERIES_ID) {
        let st = st.clone();
        listeners.push(EventListener::new(&list, "click", move |event| {
            let index = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest("li[data-index]").ok().flatten())
                .and_then(|li| li.get_attribute("data-index"))
                .and_then(|v| v.parse::<usize>().ok());
            if let Some(index) = index {
                update(&st, |app, now| app.gallery.select_category(index, now));
            }
        }));
    }

    // Hovering the preview holds the walk.
    if let Some(preview) = document.get_element_by_id(view::PREVIEW_ID) {
        let enter = st.clone();
        listeners.push(EventListener::new(&preview, "mouseenter", move |_| {
            update(&enter, |app, _| {
                app.gallery.pointer_enter();
                Ok(())
            })
        }));
        let leave = st.clone();
        listeners.push(EventListener::new(&preview, "mouseleave", move |_| {
            update(&leave, |app, now| {
                app.gallery.pointer_leave(now);
                Ok(())
            })
        }));
    }

    // A finished (or failed) preview load releases the autoplay tick.
    if let Some(img) = document.get_element_by_id(view::IMAGE_ID) {
        for name in ["load", "error"] {
            let st = st.clone();
            let img_for_closure = img.clone();
            listeners.push(EventListener::new(&img, name, move |_| {
                let generation = img_for_closure
                    .get_attribute(view::GENERATION_ATTR)
                    .and_then(|v| v.parse::<u64>().ok());
                if let Some(generation) = generation {
                    update(&st, |app, _| {
                        app.gallery.preview_settled(generation);
                        Ok(())
                    });
                }
            }));
        }
    }

    st.borrow_mut().listeners = listeners;
}

fn on_click(
    document: &Document,
    id: &str,
    st: &SharedApp,
    listeners: &mut Vec<EventListener>,
    op: impl Fn(&mut App, u64) -> Result<()> + 'static,
) {
    let Some(el) = document.get_element_by_id(id) else {
        return;
    };
    let st = st.clone();
    listeners.push(EventListener::new(&el, "click", move |_| update(&st, &op)));
}

/// Run a state change, then redraw and resync the timer.
pub fn update(st: &SharedApp, op: impl FnOnce(&mut App, u64) -> Result<()>) {
    {
        let mut app = st.borrow_mut();
        if let Err(err) = op(&mut app, now_ms()) {
            report(&err);
        }
    }
    refresh(st);
}

pub fn refresh(st: &SharedApp) {
    {
        let mut app = st.borrow_mut();
        let events = app.gallery.drain_events();
        view::apply_events(&mut app, events);
        view::render(&mut app);
    }
    sync_timer(st);
}

/// Keep an interval alive exactly while autoplay runs.
fn sync_timer(st: &SharedApp) {
    let mut app = st.borrow_mut();
    let running = app.gallery.autoplay().is_running();
    if running && app.timer.is_none() {
        let st = st.clone();
        app.timer = Some(Interval::new(TICK_POLL_MS, move || on_tick(&st)));
    } else if !running && app.timer.is_some() {
        app.timer = None;
    }
}

fn on_tick(st: &SharedApp) {
    let outcome = st.borrow_mut().gallery.tick(now_ms());
    match outcome {
        Ok(TickOutcome::NotDue) => {}
        Ok(outcome) => {
            log::debug!("autoplay tick: {outcome:?}");
            refresh(st);
        }
        Err(err) => {
            report(&err);
            refresh(st);
        }
    }
}

/// List/detail toggle: fade out, then switch.
fn toggle_focus(st: &SharedApp) {
    let (transition, document) = {
        let mut app = st.borrow_mut();
        (app.gallery.begin_toggle_focus(), app.document.clone())
    };
    let Some(transition) = transition else {
        return;
    };
    view::set_fading(&document, true);
    let st = st.clone();
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(transition.fade_ms).await;
        view::set_fading(&document, false);
        update(&st, |app, now| app.gallery.commit_toggle_focus(now).map(|_| ()));
    });
}

/// Fetch the categories and hand them to the gallery. Also the retry action.
pub fn load_content(st: SharedApp) {
    let (fetcher, transport) = {
        let mut app = st.borrow_mut();
        app.gallery.begin_load();
        (
            ContentFetcher::from_config(app.gallery.config()),
            FetchTransport::new(app.window.clone()),
        )
    };
    refresh(&st);
    wasm_bindgen_futures::spawn_local(async move {
        let result = fetcher.fetch_categories(&transport).await;
        {
            let mut app = st.borrow_mut();
            if app.gallery.autoplay().state() == AutoplayState::Stopped {
                return;
            }
            app.gallery.load(result, now_ms());
        }
        refresh(&st);
    });
}

fn report(err: &GalleryError) {
    match err {
        GalleryError::InvariantViolation(_) | GalleryError::Range { .. } => {
            log::error!("gallery: {err}")
        }
        _ => log::warn!("gallery: {err}"),
    }
}
