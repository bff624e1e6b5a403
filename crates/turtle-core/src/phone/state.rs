//! Power state of the phone.

/// Power/boot phase. Cycles `Off → Booting → On → Off`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhoneState {
    #[default]
    Off,
    Booting,
    On,
}

/// Power bookkeeping owned by the [`Phone`](super::Phone).
///
/// `power_button_blocked` holds for the whole of `Booting` and for the
/// cooldown after switching off; `power_button_block_time` is the cooldown
/// left in seconds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhoneData {
    pub state: PhoneState,
    pub power_button_blocked: bool,
    pub power_button_block_time: f32,
    pub videos_loaded: bool,
    /// Seconds spent in the current boot
    pub boot_elapsed: f32,
}

impl PhoneData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_on(&self) -> bool {
        self.state == PhoneState::On
    }

    /// `Off → Booting`. Blocks the power button until boot completes.
    pub fn start_boot(&mut self) {
        self.state = PhoneState::Booting;
        self.power_button_blocked = true;
        self.videos_loaded = false;
        self.boot_elapsed = 0.0;
    }

    /// `Booting → On`.
    pub fn complete_boot(&mut self) {
        self.state = PhoneState::On;
        self.videos_loaded = true;
        self.power_button_blocked = false;
    }

    /// `On → Off`, blocking the power button for `cooldown` seconds.
    pub fn shut_down(&mut self, cooldown: f32) {
        self.state = PhoneState::Off;
        self.power_button_blocked = true;
        self.power_button_block_time = cooldown;
    }

    /// Advance the boot timer and the power cooldown by `dt` seconds.
    /// Returns `true` when this tick completed the boot.
    pub fn tick(&mut self, dt: f32, boot_duration: f32) -> bool {
        match self.state {
            PhoneState::Booting => {
                self.boot_elapsed += dt;
                if self.boot_elapsed >= boot_duration {
                    self.complete_boot();
                    return true;
                }
            }
            PhoneState::Off | PhoneState::On => {
                if self.power_button_blocked {
                    self.power_button_block_time -= dt;
                    if self.power_button_block_time <= 0.0 {
                        self.power_button_block_time = 0.0;
                        self.power_button_blocked = false;
                    }
                }
            }
        }
        false
    }

    /// Boot progress in `[0, 1]`.
    pub fn boot_progress(&self, boot_duration: f32) -> f32 {
        if boot_duration <= 0.0 {
            return 1.0;
        }
        (self.boot_elapsed / boot_duration).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_completes_after_duration() {
        let mut data = PhoneData::new();
        data.start_boot();
        assert!(data.power_button_blocked);
        assert!(!data.tick(0.5, 1.0));
        assert_eq!(data.state, PhoneState::Booting);
        assert!(data.tick(0.5, 1.0));
        assert!(data.is_on());
        assert!(data.videos_loaded);
        assert!(!data.power_button_blocked);
    }

    #[test]
    fn test_cooldown_expires_while_off() {
        let mut data = PhoneData::new();
        data.start_boot();
        data.tick(1.0, 1.0);
        data.shut_down(0.3);
        data.tick(0.15, 1.0);
        assert!(data.power_button_blocked);
        data.tick(0.15, 1.0);
        assert!(!data.power_button_blocked);
        assert_eq!(data.state, PhoneState::Off);
    }

    #[test]
    fn test_boot_progress_is_capped() {
        let mut data = PhoneData::new();
        data.start_boot();
        data.boot_elapsed = 0.5;
        assert_eq!(data.boot_progress(1.0), 0.5);
        data.boot_elapsed = 3.0;
        assert_eq!(data.boot_progress(1.0), 1.0);
    }
}
