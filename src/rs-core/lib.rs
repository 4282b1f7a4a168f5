use wasm_bindgen::prelude::*;

mod adaptive;
mod bindings;
mod controller;
pub mod dispatcher;
mod media_element;
mod utils;

pub use utils::logger::Logger;
