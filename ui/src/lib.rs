//! Browser binding of the tags page.
//!
//! On `wasm32` the module's start function builds the page controller from
//! the live document and wires its DOM events. Native builds only carry the
//! boot helpers so they can be tested.

mod boot;

#[cfg(target_arch = "wasm32")]
mod cookies;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod start;

pub use boot::{CONFIG_SCRIPT_ID, anchor_api, config_from_script};
