use crate::addon::AddonApp;
use crate::domain::commands::{ContentType, PublishType, TextType};
use crate::domain::device::MANUFACTURER;
use crate::properties::map_properties;
use crate::services::{PushRequest, Targets, TextRequest};
use crate::store::StoreSnapshot;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about = "Pushes apps to Tronbyt and Tidbyt displays and keeps track of their state", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the devices and log every change until ctrl-c
    Run,
    /// List the devices and their properties
    Devices,
    /// List the built-in apps of the add-on
    Apps,
    /// Push a built-in app or a custom .star file
    Push(PushArgs),
    /// Show a text
    Text(TextArgs),
    /// Delete a pushed app
    Delete(InstallationArgs),
    /// Enable an installed app
    EnableApp(InstallationArgs),
    /// Disable an installed app
    DisableApp(InstallationArgs),
    /// Pin an installed app
    PinApp(InstallationArgs),
    /// Unpin an installed app
    UnpinApp(InstallationArgs),
    /// Set a property, e.g. `--property brightness --value 40`
    Set(SetArgs),
}

#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Device name, may be repeated
    #[arg(short, long = "device")]
    devices: Vec<String>,
    /// Device id, may be repeated
    #[arg(long = "device-id")]
    device_ids: Vec<String>,
}

impl From<TargetArgs> for Targets {
    fn from(args: TargetArgs) -> Self {
        Targets {
            device_ids: args.device_ids,
            device_names: args.devices,
        }
    }
}

#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    targets: TargetArgs,
    #[arg(long, value_enum, default_value_t = ContentType::Builtin)]
    content_type: ContentType,
    /// Built-in app to render
    #[arg(long)]
    content: Option<String>,
    /// Path or URL of a custom .star file
    #[arg(long)]
    custom_content: Option<String>,
    #[arg(long)]
    content_id: Option<String>,
    #[arg(long, value_enum)]
    publish_type: Option<PublishType>,
    /// App arguments as key=value pairs separated by ';'
    #[arg(long)]
    arguments: Option<String>,
    #[arg(long)]
    lang: Option<String>,
}

impl From<PushArgs> for PushRequest {
    fn from(args: PushArgs) -> Self {
        PushRequest {
            targets: args.targets.into(),
            content_type: args.content_type,
            content: args.content,
            custom_content: args.custom_content,
            content_id: args.content_id,
            publish_type: args.publish_type,
            arguments: args.arguments,
            lang: args.lang,
        }
    }
}

#[derive(Args, Debug)]
pub struct TextArgs {
    #[command(flatten)]
    targets: TargetArgs,
    #[arg(long, value_enum, default_value_t = TextType::Scroll)]
    text_type: TextType,
    content: String,
    #[arg(long, default_value = "tb-8")]
    font: String,
    #[arg(long, default_value = "#ffffff")]
    color: String,
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    title_color: Option<String>,
    #[arg(long)]
    title_font: Option<String>,
    #[arg(long)]
    content_id: Option<String>,
    #[arg(long, value_enum)]
    publish_type: Option<PublishType>,
}

impl From<TextArgs> for TextRequest {
    fn from(args: TextArgs) -> Self {
        TextRequest {
            targets: args.targets.into(),
            text_type: args.text_type,
            content: args.content,
            font: args.font,
            color: args.color,
            title: args.title,
            title_color: args.title_color,
            title_font: args.title_font,
            content_id: args.content_id,
            publish_type: args.publish_type,
        }
    }
}

#[derive(Args, Debug)]
pub struct InstallationArgs {
    #[command(flatten)]
    pub targets: TargetArgs,
    /// Installation id, letters and digits only
    pub content_id: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    #[command(flatten)]
    pub targets: TargetArgs,
    #[arg(short, long)]
    pub property: String,
    /// on/off/toggle, a number, HH:MM or none, or an option label
    #[arg(long)]
    pub value: String,
}

pub fn print_devices(snapshot: &StoreSnapshot) {
    for device in snapshot.devices.iter() {
        println!("{} ({})", device.name, device.id);
        println!("  {} {}", MANUFACTURER, device.model());
        if let Some(notes) = device.notes.as_deref().filter(|notes| !notes.is_empty()) {
            println!("  notes: {}", notes);
        }
        if let Some(version) = &device.info.firmware_version {
            println!("  firmware: {} {}", version, device.info.firmware_type.as_deref().unwrap_or_default());
        }
        if let Some(mac_address) = device.info.mac_address() {
            println!("  mac: {}", mac_address);
        }

        for property in map_properties(device) {
            let label = property.label();
            let readonly = if property.readonly() { " [read-only]" } else { "" };
            if label == property.name() {
                println!("  {:<28} {}{}", property.name(), property.value_string(), readonly);
            } else {
                println!("  {:<28} {} ({}){}", property.name(), property.value_string(), label, readonly);
            }
            if let Some(options) = property.options() {
                println!("  {:<28} options: {}", "", options.join(", "));
            }
        }
    }
}

pub fn print_apps(apps: &[AddonApp]) {
    for app in apps {
        println!("{:<24} {}", app.value, app.label);
    }
}
