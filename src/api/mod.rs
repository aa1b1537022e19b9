mod device_api;
mod domain;
mod map_device;

pub use device_api::{ApiError, DeviceApi};
pub use domain::{DeviceGet, PushAppRequest};
pub use map_device::map_device;
