use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::settings::Settings;

pub enum Toggle {
    Notifications,
    Maintenance,
}

pub fn view(settings: &Settings) -> CmdResult {
    CmdResult {
        settings: Some(settings.clone()),
        ..Default::default()
    }
}

pub fn set_site_name(settings: &mut Settings, name: &str) -> Result<CmdResult> {
    settings.set_site_name(name)?;
    Ok(view(settings))
}

pub fn toggle(settings: &mut Settings, which: Toggle) -> CmdResult {
    let (label, on) = match which {
        Toggle::Notifications => ("Notifications", settings.toggle_notifications()),
        Toggle::Maintenance => ("Maintenance mode", settings.toggle_maintenance()),
    };
    let state = if on { "on" } else { "off" };
    view(settings).with_message(CmdMessage::info(format!("{} {}", label, state)))
}

pub fn save(settings: &Settings) -> CmdResult {
    view(settings).with_message(CmdMessage::success(settings.save()))
}
