use crate::domain::controller::ControllerError;
use crate::domain::device::{Device, DeviceKind};
use crate::domain::property::{PatchTarget, Property};
use crate::domain::property_value::PropertyValue;
use crate::{tidbyt, tronbyt};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

pub fn map_properties(device: &Device) -> Vec<Box<dyn Property>> {
    match device.kind {
        DeviceKind::Tronbyt => tronbyt::map_properties(device),
        DeviceKind::Tidbyt => tidbyt::map_properties(device),
    }
}

/// Requested property values translated into API patches.
#[derive(PartialEq, Debug, Default)]
pub struct DevicePatches {
    pub device: Map<String, Value>,
    pub installations: BTreeMap<String, Map<String, Value>>,
}

pub fn build_patches(device: &Device, values: &HashMap<String, PropertyValue>) -> Result<DevicePatches, ControllerError> {
    let properties = map_properties(device);
    let mut patches = DevicePatches::default();

    for (name, value) in values {
        let property = properties
            .iter()
            .find(|property| property.name() == name)
            .ok_or_else(|| ControllerError::UnknownProperty {
                device: device.name.clone(),
                property: name.clone(),
            })?;
        let resolved = property.resolve(value)?;

        match property.property_type().patch_target() {
            PatchTarget::Device(keys) => {
                for key in keys {
                    patches.device.insert(key.to_string(), resolved.clone());
                }
            }
            PatchTarget::Installation(key) => {
                let installation_id = property
                    .external_id()
                    .ok_or_else(|| ControllerError::Misconfigured(format!("property '{}' has no installation", name)))?;
                patches
                    .installations
                    .entry(installation_id.to_string())
                    .or_default()
                    .insert(key.to_string(), resolved);
            }
        }
    }

    Ok(patches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Installation;
    use crate::domain::Time;
    use crate::domain::property::PropertyError;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn tronbyt_device() -> Device {
        let mut device = Device::new("dev1", "Living Room", DeviceKind::Tronbyt);
        device.brightness = Some(0);
        device.night_mode.enabled = Some(false);
        device.installations = vec![
            Installation {
                id: "477".to_string(),
                app_id: Some("Custom Clock".to_string()),
                enabled: Some(true),
                pinned: None,
            },
            Installation {
                id: "217".to_string(),
                app_id: Some("Weather".to_string()),
                enabled: Some(false),
                pinned: Some(true),
            },
        ];
        device
    }

    fn values(entries: &[(&str, PropertyValue)]) -> HashMap<String, PropertyValue> {
        entries.iter().map(|(name, value)| (name.to_string(), value.clone())).collect()
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn night_mode_sets_both_flags() -> Result<(), ControllerError> {
        let patches = build_patches(&tronbyt_device(), &values(&[("night_mode", PropertyValue::ToggleBooleanValue)]))?;

        assert_eq!(patches.device, object(json!({ "nightModeEnabled": true, "autoDim": true })));
        assert!(patches.installations.is_empty());

        Ok(())
    }

    #[test]
    fn turning_on_a_dark_display_uses_full_brightness() -> Result<(), ControllerError> {
        let patches = build_patches(&tronbyt_device(), &values(&[("brightness", PropertyValue::TurnOn)]))?;

        assert_eq!(patches.device, object(json!({ "brightness": 100 })));

        Ok(())
    }

    #[test]
    fn interval_is_clamped() -> Result<(), ControllerError> {
        let patches = build_patches(&tronbyt_device(), &values(&[("interval", PropertyValue::SetNumberValue(7200))]))?;

        assert_eq!(patches.device, object(json!({ "intervalSec": 3600 })));

        Ok(())
    }

    #[test]
    fn combines_device_and_installation_patches() -> Result<(), ControllerError> {
        let patches = build_patches(
            &tronbyt_device(),
            &values(&[
                ("installation_217", PropertyValue::SetBooleanValue(true)),
                ("night_mode_start", PropertyValue::SetTimeValue(Some(Time::new(22, 5).unwrap()))),
                ("pinned_app", PropertyValue::SelectOption("Custom Clock-477".to_string())),
            ]),
        )?;

        assert_eq!(patches.device, object(json!({ "nightModeStartTime": "22:05", "pinnedApp": "477" })));
        assert_eq!(
            patches.installations,
            BTreeMap::from([("217".to_string(), object(json!({ "set_enabled": true })))])
        );

        Ok(())
    }

    #[test]
    fn clearing_a_select_sends_an_empty_string() -> Result<(), ControllerError> {
        let patches = build_patches(&tronbyt_device(), &values(&[("night_mode_app", PropertyValue::SelectOption("None".to_string()))]))?;

        assert_eq!(patches.device, object(json!({ "nightModeApp": "" })));

        Ok(())
    }

    #[test]
    fn tidbyt_devices_patch_auto_dim() -> Result<(), ControllerError> {
        let device = Device::new("kitchen", "Kitchen", DeviceKind::Tidbyt);

        let patches = build_patches(&device, &values(&[("auto_dim", PropertyValue::SetBooleanValue(true))]))?;

        assert_eq!(patches.device, object(json!({ "autoDim": true })));

        Ok(())
    }

    #[test]
    fn unknown_property_fails() {
        let device = Device::new("kitchen", "Kitchen", DeviceKind::Tidbyt);

        let result = build_patches(&device, &values(&[("night_mode", PropertyValue::SetBooleanValue(true))]));

        assert!(matches!(result, Err(ControllerError::UnknownProperty { property, .. }) if property == "night_mode"));
    }

    #[test]
    fn unknown_option_fails() {
        let result = build_patches(&tronbyt_device(), &values(&[("pinned_app", PropertyValue::SelectOption("Clock".to_string()))]));

        assert!(matches!(result, Err(ControllerError::Property(PropertyError::UnknownOption { .. }))));
    }
}
