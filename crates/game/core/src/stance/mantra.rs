use crate::config::MantraOverflow;

/// Mantra counter. Always below the threshold between calls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mantra(u32);

/// Outcome of a mantra gain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MantraGain {
    pub gained: u32,
    /// The threshold was reached; the caller must enter Divinity exactly once.
    pub triggered: bool,
}

impl Mantra {
    pub const fn new() -> Self {
        Self(0)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Adds mantra, resolving at most one threshold crossing.
    ///
    /// With [`MantraOverflow::Discard`] the counter returns to 0 however far
    /// the gain overshot. [`MantraOverflow::Carry`] keeps `total - threshold`,
    /// clamped below the threshold so a single gain never queues a second
    /// transition.
    pub fn add(&mut self, amount: u32, threshold: u32, policy: MantraOverflow) -> MantraGain {
        let total = self.0.saturating_add(amount);
        if threshold == 0 || total < threshold {
            self.0 = total;
            return MantraGain {
                gained: amount,
                triggered: false,
            };
        }

        self.0 = match policy {
            MantraOverflow::Discard => 0,
            MantraOverflow::Carry => (total - threshold).min(threshold - 1),
        };
        MantraGain {
            gained: amount,
            triggered: true,
        }
    }

    /// Entering Divinity by any route clears the counter.
    pub fn reset(&mut self) {
        self.0 = 0;
    }
}
