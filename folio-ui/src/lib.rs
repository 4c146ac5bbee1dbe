//! Portfolio page components for the WebAssembly target.

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod browser;
#[cfg(target_arch = "wasm32")]
mod modal_view;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod timeline_view;

#[cfg(target_arch = "wasm32")]
mod mount {
    use crate::app::{PortfolioApp, PortfolioAppProps};
    use folio_core::{ConfigOverrides, TimelineConfig};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Window};

    /// Mount the portfolio page on the element matching `selector`, using the
    /// embedded project data. `config` may override timeline geometry.
    #[wasm_bindgen]
    pub fn mount_portfolio(selector: &str, config: Option<JsValue>) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document available"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

        let config = match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                TimelineConfig::from(from_value::<ConfigOverrides>(js_cfg)?)
            }
            _ => TimelineConfig::default(),
        };

        let portfolio = folio_content::builtin_portfolio()
            .map_err(|err| JsValue::from_str(&format!("Could not load projects: {err}")))?;

        yew::Renderer::<PortfolioApp>::with_root_and_props(
            target,
            PortfolioAppProps { portfolio, config },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use mount::mount_portfolio;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_portfolio(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "folio-ui only supports the wasm32 target",
    ))
}
