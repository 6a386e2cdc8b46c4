//! # Page Configuration
//!
//! Class names, attribute names, selectors and presentation tuning values.
//! Defaults reproduce the stock page markup; a TOML file overrides only the
//! keys it names.
//!
//! ```toml
//! [tooltip]
//! hide_delay_ms = 150
//! edge_margin = 12.0
//!
//! [lightbox]
//! image_selector = ".hero img"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, FolioResult};
use crate::selector::Selector;

/// Class toggled on overlays and answers to make them visible.
pub const ACTIVE_CLASS: &str = "active";

/// Tooltip behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    /// Selector for trigger elements.
    pub trigger_selector: String,
    /// Attribute holding the tooltip message.
    pub message_attribute: String,
    /// Attribute holding the optional external link.
    pub link_attribute: String,
    /// Text of the link block.
    pub link_label: String,
    /// Class of the overlay element.
    pub overlay_class: String,
    /// Class of the text block.
    pub text_class: String,
    /// Class of the link block.
    pub link_class: String,
    /// Class marking an overlay flipped below its trigger.
    pub below_class: String,
    /// Class marking the visible overlay.
    pub active_class: String,
    /// Delay between leaving a trigger and hiding its overlay.
    pub hide_delay_ms: u64,
    /// Vertical gap between trigger and overlay.
    pub gap: f32,
    /// Minimum distance kept from the viewport edges.
    pub edge_margin: f32,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            trigger_selector: ".tooltip-trigger".to_string(),
            message_attribute: "data-tooltip".to_string(),
            link_attribute: "data-link".to_string(),
            link_label: "Read more in essay →".to_string(),
            overlay_class: "tooltip".to_string(),
            text_class: "tooltip-text".to_string(),
            link_class: "tooltip-link".to_string(),
            below_class: "tooltip-below".to_string(),
            active_class: ACTIVE_CLASS.to_string(),
            hide_delay_ms: 100,
            gap: 8.0,
            edge_margin: 10.0,
        }
    }
}

impl TooltipConfig {
    /// Returns the hide delay as a duration.
    #[must_use]
    pub const fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

/// Lightbox behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightboxConfig {
    /// Selector for the source image.
    pub image_selector: String,
    /// Class of the overlay element.
    pub overlay_class: String,
    /// Class of the close control.
    pub close_class: String,
    /// Accessible label of the close control.
    pub close_label: String,
    /// Visible text of the close control.
    pub close_text: String,
    /// Class marking the open overlay.
    pub active_class: String,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            image_selector: ".figure img".to_string(),
            overlay_class: "lightbox".to_string(),
            close_class: "lightbox-close".to_string(),
            close_label: "Close lightbox".to_string(),
            close_text: "×".to_string(),
            active_class: ACTIVE_CLASS.to_string(),
        }
    }
}

/// Accordion behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccordionConfig {
    /// Selector for question headers.
    pub question_selector: String,
    /// Class marking an expanded answer.
    pub active_class: String,
}

impl Default for AccordionConfig {
    fn default() -> Self {
        Self {
            question_selector: ".faq-question".to_string(),
            active_class: ACTIVE_CLASS.to_string(),
        }
    }
}

/// Configuration for every page behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Tooltip settings.
    pub tooltip: TooltipConfig,
    /// Lightbox settings.
    pub lightbox: LightboxConfig,
    /// Accordion settings.
    pub accordion: AccordionConfig,
}

impl PageConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidConfig`] on malformed TOML or values
    /// rejected by [`PageConfig::validate`].
    pub fn from_toml_str(text: &str) -> FolioResult<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| FolioError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::Io`] if the file cannot be read, otherwise as
    /// [`PageConfig::from_toml_str`].
    pub fn from_toml(path: impl AsRef<Path>) -> FolioResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| FolioError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`FolioError::InvalidConfig`] for a zero hide delay, negative
    /// or non-finite spacing and empty names, and
    /// [`FolioError::InvalidSelector`] for unsupported selectors.
    pub fn validate(&self) -> FolioResult<()> {
        let tooltip = &self.tooltip;
        if tooltip.hide_delay_ms == 0 {
            return Err(FolioError::InvalidConfig(
                "tooltip.hide_delay_ms must be greater than zero".to_string(),
            ));
        }
        for (key, value) in [("tooltip.gap", tooltip.gap), ("tooltip.edge_margin", tooltip.edge_margin)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FolioError::InvalidConfig(format!(
                    "{key} must be a finite non-negative number, got {value}"
                )));
            }
        }

        let names = [
            ("tooltip.message_attribute", &tooltip.message_attribute),
            ("tooltip.link_attribute", &tooltip.link_attribute),
            ("tooltip.overlay_class", &tooltip.overlay_class),
            ("tooltip.text_class", &tooltip.text_class),
            ("tooltip.link_class", &tooltip.link_class),
            ("tooltip.below_class", &tooltip.below_class),
            ("tooltip.active_class", &tooltip.active_class),
            ("lightbox.overlay_class", &self.lightbox.overlay_class),
            ("lightbox.close_class", &self.lightbox.close_class),
            ("lightbox.active_class", &self.lightbox.active_class),
            ("accordion.active_class", &self.accordion.active_class),
        ];
        if let Some((key, _)) = names.iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(FolioError::InvalidConfig(format!("{key} must not be empty")));
        }

        Selector::parse(&tooltip.trigger_selector)?;
        Selector::parse(&self.lightbox.image_selector)?;
        Selector::parse(&self.accordion.question_selector)?;
        Ok(())
    }
}
