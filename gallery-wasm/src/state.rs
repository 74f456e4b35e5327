use std::cell::RefCell;
use std::rc::Rc;

use gallery_core::{Gallery, Theme, ViewportQuery};
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use web_sys::{Document, Window};

use crate::browser::BrowserHistory;

/// Everything the mounted gallery needs, shared across callbacks behind an
/// `Rc<RefCell<_>>`.
pub struct App {
    pub window: Window,
    pub document: Document,
    pub gallery: Gallery<BrowserHistory>,
    pub theme: Theme,
    pub viewport: Box<dyn ViewportQuery>,
    /// Category list rendered for this many categories; rebuilt on change.
    pub rendered_categories: usize,
    /// Dropping these detaches the DOM handlers.
    pub listeners: Vec<EventListener>,
    /// Present only while autoplay is running.
    pub timer: Option<Interval>,
}

pub type SharedApp = Rc<RefCell<App>>;

/// Thread local storage for the single mounted gallery.
thread_local! {
    pub static STATE: RefCell<Option<SharedApp>> = const { RefCell::new(None) };
}

pub fn current() -> Option<SharedApp> {
    STATE.with(|st| st.borrow().clone())
}
