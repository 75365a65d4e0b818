//! Configuration types for symbol rendering.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a partial (or empty) configuration file is always valid.
//!
//! - [`AppConfig`] - Root combining layout and style settings.
//! - [`LayoutConfig`] - Pin spacing and margins used by the layout algorithm.
//! - [`StyleConfig`] - Colors and sizes used when drawing.
//!
//! ```
//! # use pinline::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().pin_spacing(), 20.0);
//! assert!(config.style().background_color().is_ok());
//! ```

use serde::Deserialize;

use pinline_core::color::Color;

use crate::error::PinlineError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Spacing constants for the variable-pin layout.
///
/// `pin_spacing` applies along Left/Right sides (pins stacked vertically),
/// `bin_spacing` along Top/Bottom sides.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    margin: f32,
    pin_spacing: f32,
    bin_spacing: f32,
    trunk_thickness: f32,
}

impl LayoutConfig {
    pub fn new(margin: f32, pin_spacing: f32, bin_spacing: f32, trunk_thickness: f32) -> Self {
        Self {
            margin,
            pin_spacing,
            bin_spacing,
            trunk_thickness,
        }
    }

    pub fn margin(&self) -> f32 {
        self.margin
    }

    pub fn pin_spacing(&self) -> f32 {
        self.pin_spacing
    }

    pub fn bin_spacing(&self) -> f32 {
        self.bin_spacing
    }

    /// Thickness of the trunk band bundle fans converge into.
    pub fn trunk_thickness(&self) -> f32 {
        self.trunk_thickness
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 10.0,
            pin_spacing: 20.0,
            bin_spacing: 30.0,
            trunk_thickness: 8.0,
        }
    }
}

/// Visual styling. Color fields are kept as strings and parsed on access.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    background_color: Option<String>,
    selection_color: String,
    terminal_radius: f32,
    font_size: u16,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if not configured.
    ///
    /// # Errors
    ///
    /// Returns [`PinlineError::Config`] if the color string is invalid.
    pub fn background_color(&self) -> Result<Option<Color>, PinlineError> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| PinlineError::Config(format!("background_color: {err}")))
    }

    /// Returns the parsed selection highlight [`Color`].
    ///
    /// # Errors
    ///
    /// Returns [`PinlineError::Config`] if the color string is invalid.
    pub fn selection_color(&self) -> Result<Color, PinlineError> {
        Color::new(&self.selection_color)
            .map_err(|err| PinlineError::Config(format!("selection_color: {err}")))
    }

    pub fn terminal_radius(&self) -> f32 {
        self.terminal_radius
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            selection_color: "#1a73e8".to_string(),
            terminal_radius: 3.5,
            font_size: 11,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_approx_eq!(f32, config.layout().margin(), 10.0);
        assert_approx_eq!(f32, config.layout().bin_spacing(), 30.0);
        assert_approx_eq!(f32, config.layout().trunk_thickness(), 8.0);
        assert_approx_eq!(f32, config.style().terminal_radius(), 3.5);
        assert_eq!(config.style().font_size(), 11);
        assert!(config.style().background_color().unwrap().is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            pin_spacing = 24.0

            [style]
            background_color = "#fafafa"
            "##,
        )
        .unwrap();

        assert_approx_eq!(f32, config.layout().pin_spacing(), 24.0);
        assert_approx_eq!(f32, config.layout().margin(), 10.0);
        assert!(config.style().background_color().unwrap().is_some());
        assert!(config.style().selection_color().is_ok());
    }

    #[test]
    fn test_invalid_color_is_config_error() {
        let config: AppConfig = toml::from_str(
            r#"
            [style]
            selection_color = "not-a-color"
            "#,
        )
        .unwrap();

        let err = config.style().selection_color().unwrap_err();
        assert!(matches!(err, PinlineError::Config(_)));
        assert!(err.to_string().contains("selection_color"));
    }
}
