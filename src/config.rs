//! Shared configuration system for desktop and ESP32.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use rs_feedz::config::{Config, ScheduleConfig, WifiConfig};
//!
//! // Use defaults (feed at 22:47 local, US Central zone)
//! let config = Config::default();
//!
//! // Or customize
//! let config = Config::default()
//!     .with_schedule(ScheduleConfig::default().with_feed_time(7, 30))
//!     .with_wifi(WifiConfig::default().with_ssid("MyNetwork"));
//! ```

use crate::civil::ZoneRule;
use heapless::String as HString;

/// Maximum length for config strings (SSIDs, device names)
pub const MAX_SHORT_STRING: usize = 64;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    // Take only what fits
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, _)| *i < take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default)]
pub struct Config {
    /// WiFi connection configuration
    pub wifi: WifiConfig,
    /// Feed schedule and polling configuration
    pub schedule: ScheduleConfig,
    /// Motor motion constants
    pub motion: MotionConfig,
    /// Device identification
    pub device: DeviceConfig,
}

impl Config {
    /// Set WiFi configuration
    pub fn with_wifi(mut self, wifi: WifiConfig) -> Self {
        self.wifi = wifi;
        self
    }

    /// Set schedule configuration
    pub fn with_schedule(mut self, schedule: ScheduleConfig) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set motion configuration
    pub fn with_motion(mut self, motion: MotionConfig) -> Self {
        self.motion = motion;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }
}

// ============================================================================
// Schedule Config
// ============================================================================

/// Feed schedule and polling configuration
#[derive(Clone, Debug)]
pub struct ScheduleConfig {
    /// Feed hour in 24-hour local time (0-23)
    pub feed_hour: u8,
    /// Feed minute (0-59)
    pub feed_minute: u8,
    /// Idle poll interval in seconds (sleep between ticks when nothing is due)
    pub idle_poll_secs: u32,
    /// Informational daily feed cap (tracked, never enforced)
    pub daily_feed_cap: u32,
    /// UTC-to-local conversion rule
    pub zone: ZoneRule,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            feed_hour: 22,
            feed_minute: 47,
            idle_poll_secs: 10,
            daily_feed_cap: 10,
            zone: ZoneRule::US_CENTRAL,
        }
    }
}

impl ScheduleConfig {
    /// Set the daily feed time (local hour and minute)
    pub fn with_feed_time(mut self, hour: u8, minute: u8) -> Self {
        self.feed_hour = hour.min(23);
        self.feed_minute = minute.min(59);
        self
    }

    /// Set the idle poll interval
    pub fn with_idle_poll_secs(mut self, secs: u32) -> Self {
        self.idle_poll_secs = secs;
        self
    }

    /// Set the informational daily cap
    pub fn with_daily_feed_cap(mut self, cap: u32) -> Self {
        self.daily_feed_cap = cap;
        self
    }

    /// Set the zone rule
    pub fn with_zone(mut self, zone: ZoneRule) -> Self {
        self.zone = zone;
        self
    }
}

// ============================================================================
// Motion Config
// ============================================================================

/// Motor motion constants
#[derive(Clone, Debug)]
pub struct MotionConfig {
    /// Steps per dispense (forward button and scheduled feed)
    pub feed_steps: u32,
    /// Steps for a full reverse jog (bounded by the limit switch)
    pub reverse_jog_steps: u32,
    /// Forward steps to back off an engaged limit switch
    pub disengage_steps: u32,
    /// Inter-step interval in milliseconds
    pub step_period_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            feed_steps: 350,
            reverse_jog_steps: 3200,
            disengage_steps: 100,
            step_period_ms: 20,
        }
    }
}

impl MotionConfig {
    /// Set the dispense step count
    pub fn with_feed_steps(mut self, steps: u32) -> Self {
        self.feed_steps = steps;
        self
    }

    /// Set the reverse jog step count
    pub fn with_reverse_jog_steps(mut self, steps: u32) -> Self {
        self.reverse_jog_steps = steps;
        self
    }

    /// Set the disengage step count
    pub fn with_disengage_steps(mut self, steps: u32) -> Self {
        self.disengage_steps = steps;
        self
    }

    /// Set the inter-step interval
    pub fn with_step_period_ms(mut self, ms: u32) -> Self {
        self.step_period_ms = ms;
        self
    }
}

// ============================================================================
// WiFi Config
// ============================================================================

/// WiFi connection configuration
#[derive(Clone, Debug)]
pub struct WifiConfig {
    /// WiFi network SSID
    pub ssid: ShortString,
    /// WiFi password
    pub password: ShortString,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u32,
    /// Whether WiFi is enabled
    pub enabled: bool,
}

impl Default for WifiConfig {
    fn default() -> Self {
        Self {
            ssid: ShortString::new(),
            password: ShortString::new(),
            connect_timeout_ms: 30_000,
            enabled: true,
        }
    }
}

impl WifiConfig {
    /// Set the SSID
    pub fn with_ssid(mut self, ssid: &str) -> Self {
        self.ssid = short_string(ssid);
        self
    }

    /// Set the password
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = short_string(password);
        self
    }

    /// Set the connection timeout
    pub fn with_connect_timeout_ms(mut self, ms: u32) -> Self {
        self.connect_timeout_ms = ms;
        self
    }

    /// Enable or disable WiFi
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Check if WiFi credentials are configured
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug)]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("rs-feedz"),
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
