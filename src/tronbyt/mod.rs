mod client;
mod controller;
mod map_properties;
mod observer;

pub use client::new_api;
pub use controller::{CONTROLLER_ID, TronbytController};
pub use map_properties::map_properties;
pub use observer::{ObserveError, observe};
