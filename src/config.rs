//! Page configuration
//!
//! Every timing and threshold used by the components, with defaults that
//! reproduce the shipped page. Loadable from JSON so the browser side can
//! override individual values:
//!
//! ```ignore
//! let config = PageConfig::from_json(r#"{"carousel": {"autoplay": true}}"#)?;
//! assert_eq!(config.carousel.autoplay_ms, 5000);
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Navigation highlighting, menu, smooth scrolling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Added to the scroll offset before matching sections
    pub offset_px: f64,
    /// Quiet period before the active link is recomputed
    pub debounce_ms: u32,
    /// Scroll offset past which the navbar is marked scrolled
    pub scrolled_threshold_px: f64,
    /// Fixed navbar allowance subtracted from smooth-scroll targets
    pub anchor_offset_px: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self { offset_px: 100.0, debounce_ms: 50, scrolled_threshold_px: 50.0, anchor_offset_px: 80.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub storage_key: String,
    pub animation_ms: u32,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { storage_key: "theme".into(), animation_ms: 500 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    pub phrases: Vec<String>,
    pub start_delay_ms: u32,
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Hold after a phrase is fully typed
    pub hold_ms: u32,
    /// Pause after a phrase is fully erased
    pub pause_ms: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            phrases: vec![
                "UI/UX Designer".into(),
                "System Analyst".into(),
                "Front End Developer".into(),
                "Critical Thinker".into(),
            ],
            start_delay_ms: 1000,
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            pause_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Fraction of the element that must be visible
    pub threshold: f64,
    /// IntersectionObserver root margin
    pub root_margin: String,
    /// Start offset between consecutive skill bars
    pub stagger_ms: u32,
    pub counter_duration_ms: u32,
    pub counter_tick_ms: u32,
    pub counter_suffix: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".into(),
            stagger_ms: 200,
            counter_duration_ms: 2000,
            counter_tick_ms: 16,
            counter_suffix: "+".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Viewports narrower than this show one card, wider ones two
    pub breakpoint_px: f64,
    pub narrow_visible: usize,
    pub wide_visible: usize,
    /// Gap between cards inside the track
    pub gap_px: f64,
    pub swipe_threshold_px: f64,
    pub autoplay: bool,
    pub autoplay_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            narrow_visible: 1,
            wide_visible: 2,
            gap_px: 30.0,
            swipe_threshold_px: 50.0,
            autoplay: false,
            autoplay_ms: 5000,
        }
    }
}

impl CarouselConfig {
    pub fn visible_for(&self, viewport_width: f64) -> usize {
        if viewport_width < self.breakpoint_px { self.narrow_visible } else { self.wide_visible }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub sending_label: String,
    pub sent_label: String,
    pub sent_background: String,
    pub send_delay_ms: u32,
    pub restore_delay_ms: u32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            sending_label: "<span>Sending...</span>".into(),
            sent_label: "<span>Message Sent! ✓</span>".into(),
            sent_background: "linear-gradient(135deg, #43e97b 0%, #38f9d7 100%)".into(),
            send_delay_ms: 1500,
            restore_delay_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    pub parallax_rate: f64,
    pub tilt_divisor: f64,
    pub orb_speed: f64,
    pub floating_stagger_s: f64,
    pub easter_egg_ms: u32,
    pub easter_egg_exit_ms: u32,
    pub load_fade_delay_ms: u32,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            parallax_rate: 0.3,
            tilt_divisor: 20.0,
            orb_speed: 20.0,
            floating_stagger_s: 0.5,
            easter_egg_ms: 3000,
            easter_egg_exit_ms: 500,
            load_fade_delay_ms: 100,
        }
    }
}

/// Page configuration. Every section defaults independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub nav: NavConfig,
    pub theme: ThemeConfig,
    pub typing: TypingConfig,
    pub reveal: RevealConfig,
    pub carousel: CarouselConfig,
    pub contact: ContactConfig,
    pub effects: EffectsConfig,
}

impl PageConfig {
    pub fn new() -> Self { Self::default() }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid page config")
    }

    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.typing.phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_autoplay(mut self, enabled: bool) -> Self { self.carousel.autoplay = enabled; self }
    pub fn with_theme_key(mut self, key: impl Into<String>) -> Self { self.theme.storage_key = key.into(); self }
    pub fn with_nav(mut self, nav: NavConfig) -> Self { self.nav = nav; self }
    pub fn with_carousel(mut self, carousel: CarouselConfig) -> Self { self.carousel = carousel; self }
    pub fn with_contact(mut self, contact: ContactConfig) -> Self { self.contact = contact; self }

    /// Short delays for tests and demos
    pub fn fast_test() -> Self {
        let mut config = Self::default();
        config.typing.start_delay_ms = 0;
        config.carousel.autoplay_ms = 100;
        config
    }
}
