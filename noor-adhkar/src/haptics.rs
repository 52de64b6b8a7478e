//! Vibration and sound feedback seams
//!
//! Counters call into these; the host platform decides whether anything
//! actually vibrates or sounds.

/// Single tap on a counter
pub const TAP_PULSE: &[u32] = &[50];
/// Single tap on the free tasbeeh counter
pub const TASBEEH_TAP_PULSE: &[u32] = &[40];
/// Tasbeeh reset
pub const RESET_PULSE: &[u32] = &[20];
/// Target reached: buzz, pause, buzz
pub const COMPLETION_PATTERN: &[u32] = &[100, 50, 100];

/// Platform vibration capability
///
/// `pattern` alternates vibrate/pause durations in milliseconds, starting
/// with a vibration.
pub trait Haptics: Send + Sync {
    fn vibrate(&self, pattern: &[u32]);
}

/// For platforms without a vibration motor
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn vibrate(&self, _pattern: &[u32]) {}
}

/// Tasbeeh cycle chime pitch (A5)
pub const CYCLE_CHIME_HZ: u32 = 880;
/// Tasbeeh cycle chime length, fading out
pub const CYCLE_CHIME_MS: u32 = 800;

/// Platform tone output
///
/// Failures to produce sound are the host's to log; the counter carries on.
pub trait Chime: Send + Sync {
    fn ring(&self, frequency_hz: u32, duration_ms: u32);
}

/// For silent hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct NoChime;

impl Chime for NoChime {
    fn ring(&self, _frequency_hz: u32, _duration_ms: u32) {}
}
