pub mod commands;
pub mod controller;
pub mod controller_registry;
pub mod device;
pub mod events;
mod installation;
pub mod property;
pub mod property_value;
mod time;

pub use installation::{Installation, installation_ids};
pub use time::Time;
