#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-folio-ui]";

/// Default CSS for the page along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --folio-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --folio-bg: #000000;
  --folio-text: #ffffff;
  --folio-line: rgba(255, 255, 255, 0.4);
  --folio-line-faint: rgba(255, 255, 255, 0.2);
  --folio-accent: #ffffff;
  --folio-thumb-size: 80px;
  --folio-thumb-offset: 120px;
  --folio-guide-height: 100px;
  --folio-item-guide-height: 200px;
}

body {
  margin: 0;
  background: var(--folio-bg);
  color: var(--folio-text);
  font-family: var(--folio-font-family);
}

.folio-page {
  min-height: 100vh;
  background: var(--folio-bg);
}

.folio-header {
  position: fixed;
  top: 0;
  left: 0;
  right: 0;
  z-index: 20;
  padding: 32px 16px;
  text-align: center;
  pointer-events: none;
}

.folio-header h1 {
  margin: 0 0 24px;
  font-size: 3.5rem;
  font-family: cursive;
  font-weight: 400;
}

.folio-links {
  display: flex;
  justify-content: center;
  gap: 24px;
  pointer-events: auto;
}

.folio-links a {
  color: var(--folio-text);
  text-decoration: none;
  font-size: 0.9rem;
  opacity: 1;
  transition: opacity 0.2s ease;
}

.folio-links a:hover {
  opacity: 0.8;
}

.folio-focus {
  margin-top: 16px;
  font-size: 0.8rem;
  letter-spacing: 0.08em;
  text-transform: uppercase;
  color: var(--folio-line);
}

.folio-fade {
  position: fixed;
  top: 0;
  bottom: 0;
  width: 48px;
  z-index: 10;
  pointer-events: none;
  backdrop-filter: blur(1px);
}

.folio-fade.is-left {
  left: 0;
  background: linear-gradient(to right, rgba(0, 0, 0, 1) 0%, rgba(0, 0, 0, 0.95) 20%, rgba(0, 0, 0, 0.7) 40%, rgba(0, 0, 0, 0.3) 60%, rgba(0, 0, 0, 0) 100%);
}

.folio-fade.is-right {
  right: 0;
  background: linear-gradient(to left, rgba(0, 0, 0, 1) 0%, rgba(0, 0, 0, 0.95) 20%, rgba(0, 0, 0, 0.7) 40%, rgba(0, 0, 0, 0.3) 60%, rgba(0, 0, 0, 0) 100%);
}

.folio-timeline {
  position: fixed;
  inset: 0;
  overflow-x: auto;
  overflow-y: hidden;
  scrollbar-width: none;
}

.folio-timeline::-webkit-scrollbar {
  display: none;
}

.folio-track {
  position: relative;
  height: 100vh;
}

.folio-axis {
  position: absolute;
  top: 50%;
  height: 2px;
  background: var(--folio-line);
  transform: translateY(-50%);
}

.folio-gridline {
  position: absolute;
  top: calc(50% - var(--folio-guide-height) / 2);
  width: 1px;
  height: var(--folio-guide-height);
  background: var(--folio-text);
  opacity: 0.2;
  transform: translateX(-50%);
}

.folio-gridline.is-year {
  top: 0;
  bottom: 0;
  height: auto;
  width: 2px;
  opacity: 0.4;
}

.folio-gridline.is-centered {
  opacity: 0.8;
}

.folio-label {
  position: absolute;
  white-space: nowrap;
  transform: translateX(-50%);
  font-weight: 500;
}

.folio-label.is-year {
  top: calc(50% - 105px);
  font-size: 0.875rem;
}

.folio-label.is-month {
  top: calc(50% + 56px);
  font-size: 10px;
  color: var(--folio-line-faint);
}

.folio-label.is-item-date {
  top: calc(50% - 20px);
  font-size: 10px;
  color: var(--folio-line);
}

.folio-label.is-centered {
  color: var(--folio-accent);
}

.folio-item {
  position: absolute;
  top: 0;
  bottom: 0;
  transform: translateX(-50%);
}

.folio-item-guide {
  position: absolute;
  left: 50%;
  width: 2px;
  height: var(--folio-item-guide-height);
  background: var(--folio-line);
  transform: translateX(-50%);
}

.folio-item[data-side="above"] .folio-item-guide {
  top: calc(50% - var(--folio-item-guide-height) / 2);
}

.folio-item[data-side="below"] .folio-item-guide {
  top: 50%;
}

.folio-thumb {
  position: absolute;
  left: 50%;
  z-index: 10;
  width: var(--folio-thumb-size);
  height: var(--folio-thumb-size);
  padding: 0;
  border-radius: 50%;
  overflow: hidden;
  background: #000000;
  border: 3px solid var(--folio-line);
  box-shadow: 0 0 10px rgba(255, 255, 255, 0.2);
  cursor: pointer;
  transform: translate(-50%, -50%);
  transition: border-color 0.2s ease, box-shadow 0.2s ease;
}

.folio-item[data-side="above"] .folio-thumb {
  top: calc(50% - var(--folio-thumb-offset));
}

.folio-item[data-side="below"] .folio-thumb {
  top: calc(50% + var(--folio-thumb-offset));
}

.folio-thumb.is-hovered,
.folio-thumb.is-centered {
  border-color: var(--folio-accent);
  box-shadow: 0 0 10px rgba(255, 255, 255, 0.5);
}

.folio-thumb img {
  width: 100%;
  height: 100%;
  object-fit: cover;
}

.folio-modal-backdrop {
  position: fixed;
  inset: 0;
  z-index: 50;
  display: flex;
  align-items: flex-start;
  justify-content: center;
  overflow-y: auto;
  background: rgba(0, 0, 0, 0.9);
  backdrop-filter: blur(4px);
}

.folio-modal {
  position: relative;
  width: 100%;
  max-width: 56rem;
  margin: 32px 16px;
  background: #000000;
  border: 2px solid var(--folio-line);
}

.folio-modal-close {
  position: absolute;
  top: 16px;
  right: 16px;
  z-index: 10;
  padding: 8px;
  background: #000000;
  color: var(--folio-line);
  border: 1px solid var(--folio-line);
  cursor: pointer;
  transition: color 0.2s ease, border-color 0.2s ease;
}

.folio-modal-close:hover {
  color: var(--folio-accent);
  border-color: var(--folio-accent);
}

.folio-modal article {
  padding: 48px;
}

.folio-modal-tag {
  display: inline-block;
  padding: 4px 12px;
  margin-bottom: 12px;
  font-size: 0.875rem;
  border: 1px solid var(--folio-line);
}

.folio-modal-title {
  margin: 0 0 16px;
  font-size: 3rem;
  font-weight: 700;
}

.folio-modal-date {
  font-size: 0.875rem;
  color: var(--folio-line);
}

.folio-modal-hero {
  position: relative;
  width: 100%;
  height: 24rem;
  margin: 32px 0;
  overflow: hidden;
  border: 2px solid var(--folio-line);
}

.folio-modal-hero img {
  width: 100%;
  height: 100%;
  object-fit: cover;
  filter: invert(1);
}

.folio-modal-content p {
  margin: 0 0 24px;
  line-height: 1.7;
}

.folio-modal-media {
  display: grid;
  gap: 16px;
  margin-top: 24px;
}

.folio-modal-media img,
.folio-modal-media video {
  width: 100%;
  border: 1px solid var(--folio-line-faint);
}

@media (max-width: 640px) {
  .folio-header h1 {
    font-size: 3rem;
  }

  .folio-modal article {
    padding: 32px;
  }

  .folio-modal-title {
    font-size: 2.25rem;
  }

  .folio-modal-hero {
    height: 16rem;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-folio-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
