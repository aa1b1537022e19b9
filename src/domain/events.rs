use crate::domain::Installation;
use crate::domain::device::Device;

#[derive(Debug)]
pub enum Event {
    DevicesRefreshed(Vec<Device>),
    DeviceUpdated(Device),
    InstallationUpdated { device_id: String, installation: Installation },
}
