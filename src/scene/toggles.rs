use serde::{Deserialize, Serialize};

use super::satellite::SatelliteKind;

/// User-facing switch on the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toggle {
    Animate,
    Ambient,
    Viewpoint,
    Satellite(SatelliteKind),
}

impl Toggle {
    /// Every toggle, in panel order
    pub const ALL: [Toggle; 8] = [
        Toggle::Animate,
        Toggle::Ambient,
        Toggle::Viewpoint,
        Toggle::Satellite(SatelliteKind::Red),
        Toggle::Satellite(SatelliteKind::Green),
        Toggle::Satellite(SatelliteKind::Blue),
        Toggle::Satellite(SatelliteKind::Yellow),
        Toggle::Satellite(SatelliteKind::Purple),
    ];

    pub fn label(self) -> &'static str {
        match self {
            Toggle::Animate => "Animate",
            Toggle::Ambient => "Global Ambient Light",
            Toggle::Viewpoint => "Viewpoint Light",
            Toggle::Satellite(SatelliteKind::Red) => "Red Light",
            Toggle::Satellite(SatelliteKind::Green) => "Green Light",
            Toggle::Satellite(SatelliteKind::Blue) => "Blue Light",
            Toggle::Satellite(SatelliteKind::Yellow) => "Yellow Light",
            Toggle::Satellite(SatelliteKind::Purple) => "Purple Light",
        }
    }
}

/// What the driver has to do after a toggle changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleEffect {
    Redraw,
    StartAnimation,
    StopAnimation,
}

/// Initial on/off state of the lights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Toggles {
    pub ambient: bool,
    pub viewpoint: bool,
    pub red: bool,
    pub green: bool,
    pub blue: bool,
    pub yellow: bool,
    pub purple: bool,
}

impl Toggles {
    pub const ALL_ON: Toggles = Toggles {
        ambient: true,
        viewpoint: true,
        red: true,
        green: true,
        blue: true,
        yellow: true,
        purple: true,
    };

    pub const ALL_OFF: Toggles = Toggles {
        ambient: false,
        viewpoint: false,
        red: false,
        green: false,
        blue: false,
        yellow: false,
        purple: false,
    };

    pub fn satellite(&self, kind: SatelliteKind) -> bool {
        match kind {
            SatelliteKind::Red => self.red,
            SatelliteKind::Green => self.green,
            SatelliteKind::Blue => self.blue,
            SatelliteKind::Yellow => self.yellow,
            SatelliteKind::Purple => self.purple,
        }
    }

    pub fn set_satellite(&mut self, kind: SatelliteKind, on: bool) {
        match kind {
            SatelliteKind::Red => self.red = on,
            SatelliteKind::Green => self.green = on,
            SatelliteKind::Blue => self.blue = on,
            SatelliteKind::Yellow => self.yellow = on,
            SatelliteKind::Purple => self.purple = on,
        }
    }
}

impl Default for Toggles {
    fn default() -> Self {
        Self::ALL_ON
    }
}
