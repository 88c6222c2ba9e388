//! Boolean toggle state

/// On/off switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Toggle {
    on: bool,
}

impl Toggle {
    /// Create a toggle in the given position.
    #[must_use]
    pub const fn new(on: bool) -> Self {
        Self { on }
    }

    /// Flip the switch and return the new position.
    pub const fn toggle(&mut self) -> bool {
        self.on = !self.on;
        self.on
    }

    /// Switch on.
    pub const fn set_on(&mut self) {
        self.on = true;
    }

    /// Switch off.
    pub const fn set_off(&mut self) {
        self.on = false;
    }

    /// Set an explicit position.
    pub const fn set(&mut self, on: bool) {
        self.on = on;
    }

    /// Current position.
    #[must_use]
    pub const fn get(self) -> bool {
        self.on
    }
}

impl From<bool> for Toggle {
    fn from(on: bool) -> Self {
        Self::new(on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports() {
        let mut toggle = Toggle::default();
        assert!(!toggle.get());
        assert!(toggle.toggle());
        assert!(!toggle.toggle());
    }

    #[test]
    fn explicit_setters() {
        let mut toggle = Toggle::from(false);
        toggle.set_on();
        assert!(toggle.get());
        toggle.set_off();
        assert!(!toggle.get());
        toggle.set(true);
        assert!(toggle.get());
    }
}
