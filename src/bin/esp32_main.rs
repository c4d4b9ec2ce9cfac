//! ESP32 pet feeder controller.
//!
//! This is the main entry point for the physical hardware. It bootstraps
//! the network and clock, then runs the unbounded polling loop:
//! - Polls the forward/reverse jog buttons
//! - Logs the current UTC and zone-converted local time
//! - Checks the daily feed schedule and dispenses when due
//!
//! # Build
//!
//! ```bash
//! # Motor + buttons only (clock never syncs, manual feeding only)
//! cargo build --features esp32
//!
//! # With WiFi + SNTP (scheduled feeding)
//! cargo build --features wifi
//! ```
//!
//! WiFi credentials come from compile-time env vars `WIFI_SSID` and
//! `WIFI_PASSWORD`.

use esp_idf_hal::delay::Delay;
use esp_idf_hal::peripherals::Peripherals;
use rs_feedz::hal::esp32::{Esp32Button, Esp32Coils, Esp32LimitSwitch, Esp32WallClock};
use rs_feedz::{Config, FeederController, StepSequencer, WifiConfig};

/// How long to block waiting for the first SNTP sync before giving up and
/// entering the loop with an unsynced clock.
#[cfg(feature = "wifi")]
const SNTP_SYNC_TIMEOUT_MS: u32 = 15_000;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();

    #[cfg(feature = "wifi")]
    esp_idf_svc::log::EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  rs-feedz Pet Feeder");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default().with_wifi(
        WifiConfig::default()
            .with_ssid(option_env!("WIFI_SSID").unwrap_or(""))
            .with_password(option_env!("WIFI_PASSWORD").unwrap_or("")),
    );

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Motor (ULN2003 on GPIO33/25/27/14)
    // =========================================================================
    let coils = Esp32Coils::new(
        peripherals.pins.gpio33,
        peripherals.pins.gpio25,
        peripherals.pins.gpio27,
        peripherals.pins.gpio14,
    )?;
    println!("[OK] Coil driver initialized (GPIO33/25/27/14)");

    // =========================================================================
    // Initialize Buttons and Limit Switch (GPIO22/23/26)
    // =========================================================================
    let forward_button = Esp32Button::new(peripherals.pins.gpio22)?;
    let reverse_button = Esp32Button::new(peripherals.pins.gpio23)?;
    let limit_switch = Esp32LimitSwitch::new(peripherals.pins.gpio26)?;
    println!("[OK] Buttons initialized (GPIO22/23), limit switch (GPIO26)");

    // =========================================================================
    // Initialize WiFi (required for SNTP)
    // =========================================================================
    #[cfg(feature = "wifi")]
    let _wifi = {
        use esp_idf_svc::eventloop::EspSystemEventLoop;
        use esp_idf_svc::nvs::EspDefaultNvsPartition;
        use rs_feedz::hal::esp32::Esp32Wifi;

        if config.wifi.is_configured() {
            let sysloop = EspSystemEventLoop::take()?;
            let nvs = EspDefaultNvsPartition::take()?;

            let wifi = Esp32Wifi::new(peripherals.modem, sysloop, Some(nvs), &config.wifi)?;
            println!("[OK] WiFi connected: {:?}", wifi.ip_addr());
            Some(wifi)
        } else {
            println!("[SKIP] WiFi not configured (set WIFI_SSID/WIFI_PASSWORD)");
            None
        }
    };

    // =========================================================================
    // Synchronize the clock (SNTP)
    // =========================================================================
    #[cfg(feature = "wifi")]
    let _sntp = {
        use esp_idf_svc::sntp::{EspSntp, SyncStatus};
        use std::thread;
        use std::time::Duration;

        let sntp = EspSntp::new_default()?;
        println!("[....] Waiting for SNTP time sync");

        let mut waited_ms = 0u32;
        while sntp.get_sync_status() != SyncStatus::Completed && waited_ms < SNTP_SYNC_TIMEOUT_MS {
            thread::sleep(Duration::from_millis(500));
            waited_ms += 500;
        }

        if sntp.get_sync_status() == SyncStatus::Completed {
            println!("[OK] Time synchronized via SNTP");
        } else {
            // Not fatal: the controller skips scheduled feeds until the
            // clock syncs, and SNTP keeps retrying in the background.
            println!("[WARN] SNTP sync timed out; scheduled feeds wait for clock sync");
        }
        sntp
    };

    // =========================================================================
    // Control loop
    // =========================================================================
    let sequencer = StepSequencer::new(coils).with_step_period_ms(config.motion.step_period_ms);

    let mut controller = FeederController::new(
        sequencer,
        Delay::new_default(),
        forward_button,
        reverse_button,
        limit_switch,
        Esp32WallClock::new(),
        &config,
    );

    println!(
        "[OK] Entering control loop (feed at {:02}:{:02} local, idle poll {}s)",
        config.schedule.feed_hour, config.schedule.feed_minute, config.schedule.idle_poll_secs
    );

    let never = controller.run_forever()?;
    match never {}
}
