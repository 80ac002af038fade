//! Keyboard and mouse mapping for the local controls.
//!
//! | Keys          | Action                                   |
//! |---------------|------------------------------------------|
//! | `T` / `G`     | temperature up / down                    |
//! | `Y` / `H`     | sun proximity up / down                  |
//! | `U` / `J`     | vegetation up / down                     |
//! | `I` / `K`     | sea level up / down                      |
//! | `O` / `L`     | brightness up / down                     |
//! | `1`..`5`      | select catalog planet                    |
//! | `[` / `]`     | previous / next physical slider          |
//! | `-` / `=`     | nudge the focused slider down / up       |
//! | `Esc`         | quit                                     |
//!
//! Left-drag orbits the camera and the wheel zooms.

use exo_planet::PlanetVisualParameters;
use winit::event::MouseScrollDelta;
use winit::keyboard::KeyCode;

/// Radians of orbit per pixel of drag.
pub const ORBIT_SENSITIVITY: f32 = 0.005;

/// Pixels of trackpad scroll that count as one wheel notch.
const PIXELS_PER_ZOOM_STEP: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualControl {
    Temperature,
    SunProximity,
    Vegetation,
    SeaLevel,
    Brightness,
}

impl VisualControl {
    /// `params` with this control moved by `delta`, re-clamped.
    pub fn adjust(self, params: PlanetVisualParameters, delta: f32) -> PlanetVisualParameters {
        let mut next = params;
        match self {
            Self::Temperature => next.temperature += delta,
            Self::SunProximity => next.sun_proximity += delta,
            Self::Vegetation => next.vegetation_fraction += delta,
            Self::SeaLevel => next.sea_level_fraction += delta,
            Self::Brightness => next.brightness += delta,
        }
        next.clamped()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::SunProximity => "sun proximity",
            Self::Vegetation => "vegetation",
            Self::SeaLevel => "sea level",
            Self::Brightness => "brightness",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Move a visual control by `direction` steps.
    Adjust {
        control: VisualControl,
        direction: f32,
    },
    /// Select the catalog entry at this index.
    Select(usize),
    /// Move slider focus by this many entries.
    FocusSlider(i32),
    /// Nudge the focused physical slider by this many of its steps.
    NudgeSlider(f32),
    Quit,
}

pub fn action_for_key(code: KeyCode) -> Option<ControlAction> {
    use ControlAction::*;
    use VisualControl::*;

    let adjust = |control, direction| Some(Adjust { control, direction });
    match code {
        KeyCode::KeyT => adjust(Temperature, 1.0),
        KeyCode::KeyG => adjust(Temperature, -1.0),
        KeyCode::KeyY => adjust(SunProximity, 1.0),
        KeyCode::KeyH => adjust(SunProximity, -1.0),
        KeyCode::KeyU => adjust(Vegetation, 1.0),
        KeyCode::KeyJ => adjust(Vegetation, -1.0),
        KeyCode::KeyI => adjust(SeaLevel, 1.0),
        KeyCode::KeyK => adjust(SeaLevel, -1.0),
        KeyCode::KeyO => adjust(Brightness, 1.0),
        KeyCode::KeyL => adjust(Brightness, -1.0),
        KeyCode::Digit1 => Some(Select(0)),
        KeyCode::Digit2 => Some(Select(1)),
        KeyCode::Digit3 => Some(Select(2)),
        KeyCode::Digit4 => Some(Select(3)),
        KeyCode::Digit5 => Some(Select(4)),
        KeyCode::BracketLeft => Some(FocusSlider(-1)),
        KeyCode::BracketRight => Some(FocusSlider(1)),
        KeyCode::Minus => Some(NudgeSlider(-1.0)),
        KeyCode::Equal => Some(NudgeSlider(1.0)),
        KeyCode::Escape => Some(Quit),
        _ => None,
    }
}

/// Wheel input as zoom steps; positive moves the camera closer.
pub fn scroll_steps(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_ZOOM_STEP,
    }
}

/// Tracks a left-button drag and turns cursor motion into orbit angles.
#[derive(Debug, Default)]
pub struct OrbitDrag {
    dragging: bool,
    last: Option<(f64, f64)>,
}

impl OrbitDrag {
    pub fn press(&mut self) {
        self.dragging = true;
    }

    pub fn release(&mut self) {
        self.dragging = false;
        self.last = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Cursor moved to `(x, y)`. Returns `(delta_azimuth, delta_polar)`
    /// while dragging.
    pub fn cursor_moved(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let previous = self.last.replace((x, y));
        if !self.dragging {
            return None;
        }
        let (px, py) = previous?;
        let dx = (x - px) as f32;
        let dy = (y - py) as f32;
        Some((-dx * ORBIT_SENSITIVITY, -dy * ORBIT_SENSITIVITY))
    }
}
