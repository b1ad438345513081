//! Optional settings file. Every field has a default, so `{}` is valid.
//!
//! {
//!   "viewport": { "width": 1280, "height": 720 },
//!   "layout":   { "column_width": 220, "margin": { "top": 40, "right": 40, "bottom": 40, "left": 40 } },
//!   "force":    { "steps": 300, "charge": 200.0 }
//! }

use crate::Result;
use crate::diagnostics;

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Smallest drawing area either view lays out into.
pub const MIN_WIDTH: f64 = 960.0;
pub const MIN_HEIGHT: f64 = 600.0;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub viewport: Viewport,
    pub layout: LayoutConfig,
    pub force: ForceSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            width: MIN_WIDTH,
            height: MIN_HEIGHT,
        }
    }
}

impl Viewport {
    /// Requested size, floored at the minimum drawing area.
    pub fn clamped(width: f64, height: f64) -> Viewport {
        Viewport {
            width: width.max(MIN_WIDTH),
            height: height.max(MIN_HEIGHT),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Margin {
            top: 40.0,
            right: 40.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub column_width: f64,
    pub margin: Margin,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            column_width: 220.0,
            margin: Margin::default(),
        }
    }
}

/// Parameters handed to the force solver for the reaction view.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ForceSettings {
    pub charge: f32,
    pub spring: f32,
    pub max_force: f32,
    pub node_speed: f32,
    pub damping: f32,
    pub node_mass: f32,
    /// Radius of the circle nodes start on.
    pub seed_radius: f64,
    pub steps: u32,
    pub step_dt: f32,
}

impl Default for ForceSettings {
    fn default() -> Self {
        ForceSettings {
            charge: 200.0,
            spring: 0.05,
            max_force: 100.0,
            node_speed: 3000.0,
            damping: 0.9,
            node_mass: 10.0,
            seed_radius: 180.0,
            steps: 300,
            step_dt: 0.035,
        }
    }
}

impl Settings {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Settings> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| {
            diagnostics::error_message(format!("read settings file {}", path.display()))
        })?;
        Self::parse(&text)
            .with_context(|| diagnostics::error_message(format!("settings file {}", path.display())))
    }

    /// Parse, floor the viewport and validate.
    pub fn parse(text: &str) -> Result<Settings> {
        let mut settings: Settings = serde_json::from_str(text)?;
        settings.viewport = Viewport::clamped(settings.viewport.width, settings.viewport.height);
        settings.validate()?;
        Ok(settings)
    }

    /// Columns must have room for at least one node and a positive width.
    pub fn validate(&self) -> Result<()> {
        let LayoutConfig {
            column_width,
            margin,
        } = self.layout;
        if ![margin.top, margin.right, margin.bottom, margin.left]
            .iter()
            .all(|m| m.is_finite())
        {
            bail!("{}", diagnostics::error_message("layout margins must be finite numbers"));
        }
        let usable = self.viewport.height - margin.top - margin.bottom;
        if usable <= 0.0 {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "vertical margins ({} + {}) leave no room in a viewport {} high",
                    margin.top, margin.bottom, self.viewport.height
                ))
            );
        }
        if !column_width.is_finite() || column_width <= 0.0 {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "column_width must be a positive number, got {}",
                    column_width
                ))
            );
        }
        Ok(())
    }

    /// Defaults unless a path is given.
    pub fn load_or_default(path: Option<&Path>) -> Result<Settings> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Settings::default()),
        }
    }
}
