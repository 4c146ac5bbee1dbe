#![cfg(target_arch = "wasm32")]

//! Browser-backed implementations of the core query and scroll-lock seams.

use folio_core::{QueryState, QueryStore, ScrollLock};
use wasm_bindgen::JsValue;
use web_sys::{console, HtmlElement, Window};
use yew::Callback;

/// Current `location.search`, or an empty string outside a browser.
pub fn current_search() -> String {
    web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default()
}

/// Query store over the address bar. Writes go through `history.pushState`
/// so back/forward navigation replays them; `on_change` receives the new
/// search string after every write.
pub struct BrowserQuery {
    window: Option<Window>,
    on_change: Callback<String>,
}

impl BrowserQuery {
    pub fn new(on_change: Callback<String>) -> Self {
        Self {
            window: web_sys::window(),
            on_change,
        }
    }

    fn snapshot(&self) -> QueryState {
        QueryState::parse(&current_search())
    }

    fn push(&self, state: &QueryState) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        let path = window
            .location()
            .pathname()
            .unwrap_or_else(|_| "/".to_string());
        let search = state.to_query_string();
        let url = format!("{path}{search}");

        let pushed = window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&url)));
        match pushed {
            Ok(()) => self.on_change.emit(search),
            Err(err) => console::error_1(&err),
        }
    }
}

impl QueryStore for BrowserQuery {
    fn get(&self, key: &str) -> Option<String> {
        self.snapshot().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        let mut state = self.snapshot();
        state.set(key, value);
        self.push(&state);
    }

    fn clear(&mut self, key: &str) {
        let mut state = self.snapshot();
        state.clear(key);
        self.push(&state);
    }
}

/// Suspends scrolling of `document.body` by toggling its `overflow` style.
#[derive(Clone)]
pub struct BodyScrollLock {
    body: Option<HtmlElement>,
    previous: Option<String>,
}

impl BodyScrollLock {
    pub fn new() -> Self {
        let body = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.body());
        Self {
            body,
            previous: None,
        }
    }
}

impl ScrollLock for BodyScrollLock {
    fn suspend(&mut self) {
        let Some(body) = self.body.as_ref() else {
            return;
        };
        let style = body.style();
        self.previous = style.get_property_value("overflow").ok();
        if let Err(err) = style.set_property("overflow", "hidden") {
            console::error_1(&err);
        }
    }

    fn restore(&mut self) {
        let Some(body) = self.body.as_ref() else {
            return;
        };
        let previous = self.previous.take().unwrap_or_default();
        let result = if previous.is_empty() {
            body.style().remove_property("overflow").map(|_| ())
        } else {
            body.style().set_property("overflow", &previous)
        };
        if let Err(err) = result {
            console::error_1(&err);
        }
    }
}
