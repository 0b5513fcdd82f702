//! Browser binding for the scroll-driven header.
//!
//! Built for `wasm32-unknown-unknown` with `--no-default-features --features
//! hydrate`. The page loads it through `/static/public/header.js`; when the
//! bundle is missing the server-rendered first frame stays in place.

use std::{
    cell::RefCell,
    collections::HashMap,
    rc::{Rc, Weak},
};

use wasm_bindgen::{JsCast, closure::Closure, prelude::wasm_bindgen};
use web_sys::{AddEventListenerOptions, CssStyleDeclaration, Document, HtmlElement, Window};

use crate::application::header::{
    HeaderMode, HeaderRect, LayoutProbe, ListenerId, ListenerOptions, ScrollHeaderController,
    ScrollMetrics, StyleSink, ViewportEvent, ViewportEvents,
};

const HEADER_SELECTOR: &str = "[data-header-mode]";
const HEADER_BAR_SELECTOR: &str = "[data-header-bar]";
const AVATAR_ANCHOR_SELECTOR: &str = "[data-avatar-anchor]";
const HEADER_MODE_ATTRIBUTE: &str = "data-header-mode";

pub fn event_name(event: ViewportEvent) -> &'static str {
    match event {
        ViewportEvent::Scroll => "scroll",
        ViewportEvent::Resize => "resize",
    }
}

/// Inline style of `document.documentElement`.
pub struct RootStyle {
    style: CssStyleDeclaration,
}

impl RootStyle {
    pub fn new(document: &Document) -> Option<Self> {
        let root = document.document_element()?.dyn_into::<HtmlElement>().ok()?;
        Some(Self {
            style: root.style(),
        })
    }
}

impl StyleSink for RootStyle {
    fn set_property(&mut self, name: &str, value: String) {
        let _ = self.style.set_property(name, &value);
    }

    fn remove_property(&mut self, name: &str) {
        let _ = self.style.remove_property(name);
    }
}

/// Live measurements taken from `window` and the rendered header.
pub struct WindowLayout {
    window: Window,
    document: Document,
}

impl WindowLayout {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn find(&self, selector: &str) -> Option<HtmlElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
    }
}

impl LayoutProbe for WindowLayout {
    fn scroll_metrics(&self) -> ScrollMetrics {
        let scroll_y = self.window.scroll_y().unwrap_or(0.0);
        let viewport_height = self
            .window
            .inner_height()
            .ok()
            .and_then(|value| value.as_f64())
            .unwrap_or(0.0);
        let document_height = self
            .document
            .body()
            .map_or(0.0, |body| f64::from(body.scroll_height()));

        ScrollMetrics {
            scroll_y,
            viewport_height,
            document_height,
        }
    }

    fn header_rect(&self) -> Option<HeaderRect> {
        let rect = self.find(HEADER_BAR_SELECTOR)?.get_bounding_client_rect();
        Some(HeaderRect {
            top: rect.top(),
            height: rect.height(),
        })
    }

    fn avatar_offset_top(&self) -> Option<f64> {
        self.find(AVATAR_ANCHOR_SELECTOR)
            .map(|anchor| f64::from(anchor.offset_top()))
    }
}

type Dispatch = Rc<dyn Fn(ViewportEvent)>;

/// `window` listeners that forward every event to one dispatch function.
pub struct WindowEvents {
    window: Window,
    dispatch: Dispatch,
    next_id: u64,
    listeners: HashMap<ListenerId, (ViewportEvent, Closure<dyn FnMut()>)>,
}

impl WindowEvents {
    pub fn new(window: Window, dispatch: Dispatch) -> Self {
        Self {
            window,
            dispatch,
            next_id: 0,
            listeners: HashMap::new(),
        }
    }
}

impl ViewportEvents for WindowEvents {
    fn add_listener(&mut self, event: ViewportEvent, options: ListenerOptions) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);

        let dispatch = Rc::clone(&self.dispatch);
        let callback = Closure::<dyn FnMut()>::new(move || dispatch(event));

        let listener_options = AddEventListenerOptions::new();
        listener_options.set_passive(options.passive);
        let _ = self
            .window
            .add_event_listener_with_callback_and_add_event_listener_options(
                event_name(event),
                callback.as_ref().unchecked_ref(),
                &listener_options,
            );

        self.listeners.insert(id, (event, callback));
        id
    }

    fn remove_listener(&mut self, id: ListenerId) {
        if let Some((event, callback)) = self.listeners.remove(&id) {
            let _ = self.window.remove_event_listener_with_callback(
                event_name(event),
                callback.as_ref().unchecked_ref(),
            );
        }
    }
}

struct HeaderState {
    controller: ScrollHeaderController,
    layout: WindowLayout,
    sink: RootStyle,
}

impl HeaderState {
    fn attach(&mut self, events: &mut WindowEvents) {
        let Self {
            controller,
            layout,
            sink,
        } = self;
        controller.attach(events, &*layout, sink);
    }

    fn handle(&mut self, event: ViewportEvent) {
        let Self {
            controller,
            layout,
            sink,
        } = self;
        controller.handle(event, &*layout, sink);
    }
}

/// A controller bound to the current page.
pub struct HeaderBinding {
    state: Rc<RefCell<HeaderState>>,
    events: WindowEvents,
}

impl HeaderBinding {
    /// `None` when the page has no document root or no header.
    pub fn attach(window: Window) -> Option<Self> {
        let document = window.document()?;
        let mode = document
            .query_selector(HEADER_SELECTOR)
            .ok()
            .flatten()?
            .get_attribute(HEADER_MODE_ATTRIBUTE)
            .map_or(HeaderMode::Inner, |value| HeaderMode::from_attribute(&value));
        let sink = RootStyle::new(&document)?;

        let state = Rc::new(RefCell::new(HeaderState {
            controller: ScrollHeaderController::new(mode),
            layout: WindowLayout::new(window.clone(), document),
            sink,
        }));

        let mut events = WindowEvents::new(window, dispatcher(Rc::downgrade(&state)));
        state.borrow_mut().attach(&mut events);

        Some(Self { state, events })
    }

    pub fn detach(mut self) {
        self.state.borrow_mut().controller.detach(&mut self.events);
    }
}

fn dispatcher(state: Weak<RefCell<HeaderState>>) -> Dispatch {
    Rc::new(move |event| {
        let Some(state) = state.upgrade() else {
            return;
        };
        // Re-entrant events are dropped; the next one recomputes everything.
        if let Ok(mut state) = state.try_borrow_mut() {
            state.handle(event);
        }
    })
}

thread_local! {
    static HEADER: RefCell<Option<HeaderBinding>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    attach_header();
}

#[wasm_bindgen(js_name = attachHeader)]
pub fn attach_header() {
    HEADER.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_none() {
            *slot = web_sys::window().and_then(HeaderBinding::attach);
        }
    });
}

#[wasm_bindgen(js_name = detachHeader)]
pub fn detach_header() {
    let binding = HEADER.with(|slot| slot.borrow_mut().take());
    if let Some(binding) = binding {
        binding.detach();
    }
}
