use crate::domain::device::Device;
use crate::domain::property::{BooleanProperty, NumberProperty, Property, PropertyType, SelectProperty, TimeProperty, Unit};

pub fn map_properties(device: &Device) -> Vec<Box<dyn Property>> {
    let mut properties: Vec<Box<dyn Property>> = vec![
        Box::new(
            NumberProperty::builder("brightness".to_string(), PropertyType::Brightness, false)
                .unit(Unit::Percentage)
                .value(device.brightness, 0, 100)
                .turn_on_value(100)
                .build(),
        ),
        Box::new(
            NumberProperty::builder("night_mode_brightness".to_string(), PropertyType::NightModeBrightness, false)
                .unit(Unit::Percentage)
                .value(device.night_mode.brightness, 0, 100)
                .turn_on_value(50)
                .build(),
        ),
        Box::new(
            NumberProperty::builder("interval".to_string(), PropertyType::Interval, false)
                .unit(Unit::Seconds)
                .value(device.interval, 1, 3600)
                .build(),
        ),
        Box::new(BooleanProperty::new(
            "night_mode".to_string(),
            PropertyType::NightMode,
            false,
            None,
            device.night_mode.enabled,
        )),
    ];

    properties.extend(
        device
            .installations
            .iter()
            .filter(|installation| !installation.id.is_empty())
            .map(|installation| {
                Box::new(
                    BooleanProperty::new(
                        format!("installation_{}", installation.id),
                        PropertyType::InstallationEnabled,
                        false,
                        Some(installation.id.clone()),
                        installation.enabled,
                    )
                    .with_label(format!("Enable {}", installation.label())),
                ) as Box<dyn Property>
            }),
    );

    let times = [
        ("night_mode_start", PropertyType::NightModeStart, device.night_mode.start.as_deref()),
        ("night_mode_end", PropertyType::NightModeEnd, device.night_mode.end.as_deref()),
        ("dim_mode_start", PropertyType::DimModeStart, device.dim_mode.start.as_deref()),
    ];
    for (name, property_type, value) in times {
        properties.push(Box::new(TimeProperty::new(name.to_string(), property_type, false, value)));
    }

    let selects = [
        ("night_mode_app", PropertyType::NightModeApp, device.night_mode.app.as_deref()),
        ("pinned_app", PropertyType::PinnedApp, device.pinned_app.as_deref()),
    ];
    for (name, property_type, value) in selects {
        properties.push(Box::new(SelectProperty::from_installations(
            name.to_string(),
            property_type,
            false,
            &device.installations,
            value,
        )));
    }

    properties
}
