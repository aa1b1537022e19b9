mod client;
mod controller;
mod map_properties;
mod observer;

pub use client::{device_api, new_client};
pub use controller::{CONTROLLER_ID, TidbytController};
pub use map_properties::map_properties;
pub use observer::observe;
