//! Demo-mode system-UI override commands.
//!
//! Demo mode freezes status-bar indicators (clock, battery, network) to fixed
//! values so a recording never leaks live device state. Commands are built
//! here and handed to a [`Broadcaster`]; the wire protocol behind the
//! broadcast belongs to the platform. The enter sequence is ordered and must
//! be sent whole, followed eventually by exactly one [`exit`] command.

use tracing::info;

/// One system-UI override command: a command name plus its extras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoCommand {
    pub command: &'static str,
    pub extras: Vec<(&'static str, String)>,
}

/// Fire-and-forget broadcast transport for demo-mode commands.
pub trait Broadcaster: Send + Sync {
    fn send(&self, command: DemoCommand);
}

/// Broadcaster that records every command in the service log.
pub struct LoggingBroadcaster;

impl Broadcaster for LoggingBroadcaster {
    fn send(&self, command: DemoCommand) {
        info!("Demo-mode broadcast: {} {:?}", command.command, command.extras);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarsMode {
    Opaque,
    Translucent,
    Semitransparent,
    Transparent,
    Warning,
}

impl BarsMode {
    fn as_str(self) -> &'static str {
        match self {
            BarsMode::Opaque => "opaque",
            BarsMode::Translucent => "translucent",
            BarsMode::Semitransparent => "semi-transparent",
            BarsMode::Transparent => "transparent",
            BarsMode::Warning => "warning",
        }
    }
}

/// Status/navigation bar rendering mode.
#[derive(Default)]
pub struct BarsBuilder {
    mode: Option<BarsMode>,
}

impl BarsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: BarsMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(mode) = self.mode {
            extras.push(("mode", mode.as_str().to_string()));
        }
        DemoCommand { command: "bars", extras }
    }
}

/// Battery indicator override.
#[derive(Default)]
pub struct BatteryBuilder {
    level: Option<u8>,
    plugged: Option<bool>,
}

impl BatteryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: u8) -> Self {
        self.level = Some(level.min(100));
        self
    }

    pub fn plugged(mut self, plugged: bool) -> Self {
        self.plugged = Some(plugged);
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(level) = self.level {
            extras.push(("level", level.to_string()));
        }
        if let Some(plugged) = self.plugged {
            extras.push(("plugged", plugged.to_string()));
        }
        DemoCommand { command: "battery", extras }
    }
}

/// Status-bar clock override.
#[derive(Default)]
pub struct ClockBuilder {
    hhmm: Option<String>,
}

impl ClockBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time shown in the status bar, as a four-digit "HHMM" string.
    pub fn time_in_hours_and_minutes(mut self, hhmm: &str) -> Self {
        self.hhmm = Some(hhmm.to_string());
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(hhmm) = self.hhmm {
            extras.push(("hhmm", hhmm));
        }
        DemoCommand { command: "clock", extras }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Datatype {
    Lte,
    Hspa,
    Umts,
    Edge,
    Gprs,
}

impl Datatype {
    fn as_str(self) -> &'static str {
        match self {
            Datatype::Lte => "lte",
            Datatype::Hspa => "hspa",
            Datatype::Umts => "umts",
            Datatype::Edge => "e",
            Datatype::Gprs => "g",
        }
    }
}

/// Mobile network indicator override.
#[derive(Default)]
pub struct NetworkBuilder {
    airplane: Option<bool>,
    carrier_network_change: Option<bool>,
    mobile: Option<(bool, Datatype, u8, u8)>,
    nosim: Option<bool>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn airplane(mut self, shown: bool) -> Self {
        self.airplane = Some(shown);
        self
    }

    pub fn carrier_network_change(mut self, shown: bool) -> Self {
        self.carrier_network_change = Some(shown);
        self
    }

    pub fn mobile(mut self, shown: bool, datatype: Datatype, slot: u8, level: u8) -> Self {
        self.mobile = Some((shown, datatype, slot, level));
        self
    }

    pub fn nosim(mut self, shown: bool) -> Self {
        self.nosim = Some(shown);
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(airplane) = self.airplane {
            extras.push(("airplane", show_hide(airplane)));
        }
        if let Some(change) = self.carrier_network_change {
            extras.push(("carriernetworkchange", show_hide(change)));
        }
        if let Some((shown, datatype, slot, level)) = self.mobile {
            extras.push(("mobile", show_hide(shown)));
            extras.push(("datatype", datatype.as_str().to_string()));
            extras.push(("slot", slot.to_string()));
            extras.push(("level", level.to_string()));
        }
        if let Some(nosim) = self.nosim {
            extras.push(("nosim", show_hide(nosim)));
        }
        DemoCommand { command: "network", extras }
    }
}

/// Notification icon visibility override.
#[derive(Default)]
pub struct NotificationsBuilder {
    visible: Option<bool>,
}

impl NotificationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(visible) = self.visible {
            extras.push(("visible", visible.to_string()));
        }
        DemoCommand { command: "notifications", extras }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BluetoothMode {
    Hide,
    Connected,
    Disconnected,
}

impl BluetoothMode {
    fn as_str(self) -> &'static str {
        match self {
            BluetoothMode::Hide => "hide",
            BluetoothMode::Connected => "connected",
            BluetoothMode::Disconnected => "disconnected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZenMode {
    Hide,
    Important,
    None,
}

impl ZenMode {
    fn as_str(self) -> &'static str {
        match self {
            ZenMode::Hide => "hide",
            ZenMode::Important => "important",
            ZenMode::None => "none",
        }
    }
}

/// System status icon overrides (alarm, bluetooth, cast, ...).
#[derive(Default)]
pub struct SystemIconsBuilder {
    alarm: Option<bool>,
    bluetooth: Option<BluetoothMode>,
    cast: Option<bool>,
    hotspot: Option<bool>,
    location: Option<bool>,
    mute: Option<bool>,
    speakerphone: Option<bool>,
    tty: Option<bool>,
    vibrate: Option<bool>,
    zen: Option<ZenMode>,
}

impl SystemIconsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alarm(mut self, shown: bool) -> Self {
        self.alarm = Some(shown);
        self
    }

    pub fn bluetooth(mut self, mode: BluetoothMode) -> Self {
        self.bluetooth = Some(mode);
        self
    }

    pub fn cast(mut self, shown: bool) -> Self {
        self.cast = Some(shown);
        self
    }

    pub fn hotspot(mut self, shown: bool) -> Self {
        self.hotspot = Some(shown);
        self
    }

    pub fn location(mut self, shown: bool) -> Self {
        self.location = Some(shown);
        self
    }

    pub fn mute(mut self, shown: bool) -> Self {
        self.mute = Some(shown);
        self
    }

    pub fn speakerphone(mut self, shown: bool) -> Self {
        self.speakerphone = Some(shown);
        self
    }

    pub fn tty(mut self, shown: bool) -> Self {
        self.tty = Some(shown);
        self
    }

    pub fn vibrate(mut self, shown: bool) -> Self {
        self.vibrate = Some(shown);
        self
    }

    pub fn zen(mut self, mode: ZenMode) -> Self {
        self.zen = Some(mode);
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(alarm) = self.alarm {
            extras.push(("alarm", show_hide(alarm)));
        }
        if let Some(bluetooth) = self.bluetooth {
            extras.push(("bluetooth", bluetooth.as_str().to_string()));
        }
        if let Some(cast) = self.cast {
            extras.push(("cast", show_hide(cast)));
        }
        if let Some(hotspot) = self.hotspot {
            extras.push(("hotspot", show_hide(hotspot)));
        }
        if let Some(location) = self.location {
            extras.push(("location", show_hide(location)));
        }
        if let Some(mute) = self.mute {
            extras.push(("mute", show_hide(mute)));
        }
        if let Some(speakerphone) = self.speakerphone {
            extras.push(("speakerphone", show_hide(speakerphone)));
        }
        if let Some(tty) = self.tty {
            extras.push(("tty", show_hide(tty)));
        }
        if let Some(vibrate) = self.vibrate {
            extras.push(("vibrate", show_hide(vibrate)));
        }
        if let Some(zen) = self.zen {
            extras.push(("zen", zen.as_str().to_string()));
        }
        DemoCommand { command: "status", extras }
    }
}

/// Wifi indicator override.
#[derive(Default)]
pub struct WifiBuilder {
    fully: Option<bool>,
    wifi: Option<(bool, u8)>,
}

impl WifiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the indicator shows a fully connected network.
    pub fn fully(mut self, fully: bool) -> Self {
        self.fully = Some(fully);
        self
    }

    pub fn wifi(mut self, shown: bool, level: u8) -> Self {
        self.wifi = Some((shown, level.min(4)));
        self
    }

    pub fn build(self) -> DemoCommand {
        let mut extras = Vec::new();
        if let Some(fully) = self.fully {
            extras.push(("fully", fully.to_string()));
        }
        if let Some((shown, level)) = self.wifi {
            extras.push(("wifi", show_hide(shown)));
            extras.push(("level", level.to_string()));
        }
        DemoCommand { command: "wifi", extras }
    }
}

fn show_hide(shown: bool) -> String {
    if shown { "show" } else { "hide" }.to_string()
}

/// The full ordered override set applied before capture.
///
/// Either the whole sequence is sent or none of it; partial application would
/// leave the status bar in a mixed live/frozen state.
pub fn enter_sequence() -> Vec<DemoCommand> {
    vec![
        BarsBuilder::new().mode(BarsMode::Transparent).build(),
        BatteryBuilder::new().level(100).plugged(false).build(),
        ClockBuilder::new().time_in_hours_and_minutes("1200").build(),
        NetworkBuilder::new()
            .airplane(false)
            .carrier_network_change(false)
            .mobile(true, Datatype::Lte, 0, 4)
            .nosim(false)
            .build(),
        NotificationsBuilder::new().visible(false).build(),
        SystemIconsBuilder::new()
            .alarm(false)
            .bluetooth(BluetoothMode::Hide)
            .cast(false)
            .hotspot(false)
            .location(false)
            .mute(false)
            .speakerphone(false)
            .tty(false)
            .vibrate(false)
            .zen(ZenMode::Hide)
            .build(),
        WifiBuilder::new().fully(true).wifi(true, 4).build(),
    ]
}

/// The single restore command that ends an override set.
pub fn exit() -> DemoCommand {
    DemoCommand { command: "exit", extras: Vec::new() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_sequence_is_ordered_and_complete() {
        let commands: Vec<&str> = enter_sequence().iter().map(|c| c.command).collect();
        assert_eq!(
            commands,
            ["bars", "battery", "clock", "network", "notifications", "status", "wifi"]
        );
    }

    #[test]
    fn exit_has_no_extras() {
        let command = exit();
        assert_eq!(command.command, "exit");
        assert!(command.extras.is_empty());
    }

    #[test]
    fn battery_level_is_clamped() {
        let command = BatteryBuilder::new().level(150).build();
        assert_eq!(command.extras, [("level", "100".to_string())]);
    }
}
