//! ESP32-C3 SuperMini garage door controller.
//!
//! This is the main entry point for the physical hardware controller.
//! It runs a control loop that:
//! - Polls the wall push-button and requests the opposite target on each press
//! - Updates the door controller so moves get confirmed
//! - Lights the status LED while the door is moving
//!
//! # Wiring
//!
//! - Relay module IN → GPIO2, contacts across the opener's button terminals
//! - Wall button → GPIO10 and GND
//!
//! # Build
//!
//! ```bash
//! cargo build --release --bin esp32_main --features esp32
//!
//! # Simulated relay (logs instead of switching)
//! DEBUG='*' cargo build --release --bin esp32_main --features esp32
//! ```

use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use rs_garagedoor::hal::esp32::{esp32_relay, Esp32Clock, Esp32WallButton};
use rs_garagedoor::hal::DoorActuator;
use rs_garagedoor::traits::Clock;
use rs_garagedoor::{Config, DeviceConfig, GarageDoorController, LogNotifier};

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  rs-garagedoor SuperMini");
    println!("================================");
    println!();

    // =========================================================================
    // Configuration
    // =========================================================================
    let config = Config::default().with_device(
        DeviceConfig::default().with_simulate(option_env!("DEBUG") == Some("*")),
    );

    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Initialize Relay (GPIO2)
    // =========================================================================
    let relay = DoorActuator::select(config.device.simulate, || {
        esp32_relay(peripherals.pins.gpio2, config.door.trigger_hold_ms())
    })?;
    if relay.is_simulated() {
        println!("[SIM] Relay simulated, GPIO2 untouched");
    } else {
        println!(
            "[OK] Relay initialized (GPIO2, {} ms hold)",
            config.door.trigger_hold_ms()
        );
    }

    // =========================================================================
    // Initialize Wall Button (GPIO10) and Status LED (GPIO8)
    // =========================================================================
    let mut button = Esp32WallButton::new(peripherals.pins.gpio10)?;
    println!("[OK] Wall button initialized (GPIO10)");

    let mut led = PinDriver::output(peripherals.pins.gpio8)?;
    led.set_low()?;

    let clock = Esp32Clock::new();
    let mut door = GarageDoorController::new(config.door, relay, LogNotifier);

    println!();
    println!("Controls:");
    println!("  Press button: open / close / stop");
    println!();
    println!(
        "Starting control loop ({} ms tick)...",
        config.device.tick_ms
    );
    println!();

    // =========================================================================
    // Main Control Loop
    // =========================================================================
    loop {
        let now = clock.now_ms();

        if button.poll(now) {
            let target = door.target_state().toggled();
            let outcome = door.apply_target(target, now);
            println!("Button: {} -> {} ({})", target, outcome.state, outcome.action.as_str());
        }

        if let Some(confirmed) = door.update(now) {
            println!("Door {}", confirmed);
        }

        if door.current_state().is_moving() {
            led.set_high()?;
        } else {
            led.set_low()?;
        }

        FreeRtos::delay_ms(config.device.tick_ms);
    }
}
