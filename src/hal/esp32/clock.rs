//! ESP32 clock implementation using the ESP-IDF timer.

use crate::traits::Clock;

/// ESP32 clock using the hardware timer.
///
/// Milliseconds since boot from `esp_timer_get_time()`. Drives the door
/// controller's confirmation deadlines.
///
/// # Example
///
/// ```ignore
/// use rs_garagedoor::hal::esp32::Esp32Clock;
/// use rs_garagedoor::traits::Clock;
///
/// let clock = Esp32Clock::new();
/// let mut door = GarageDoorController::new(config, relay, LogNotifier);
/// loop {
///     door.update(clock.now_ms());
///     FreeRtos::delay_ms(50);
/// }
/// ```
pub struct Esp32Clock;

impl Esp32Clock {
    /// Creates a new ESP32 clock instance.
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Esp32Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // SAFETY: reads the monotonic hardware timer, microseconds since boot
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        (micros / 1000) as u64
    }
}
