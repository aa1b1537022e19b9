use crate::domain::device::Device;
use crate::domain::property::{BooleanProperty, NumberProperty, Property, PropertyType, Unit};

pub fn map_properties(device: &Device) -> Vec<Box<dyn Property>> {
    vec![
        Box::new(
            NumberProperty::builder("brightness".to_string(), PropertyType::Brightness, false)
                .unit(Unit::Percentage)
                .value(device.brightness, 0, 100)
                .turn_on_value(100)
                .build(),
        ),
        Box::new(BooleanProperty::new("auto_dim".to_string(), PropertyType::AutoDim, false, None, device.auto_dim)),
    ]
}
