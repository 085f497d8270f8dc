//! Rendering
//!
//! `layout` is backend independent; `canvas` draws with Canvas 2D in the browser.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod layout;

#[cfg(target_arch = "wasm32")]
pub use canvas::{CanvasRenderer, update_hud};
