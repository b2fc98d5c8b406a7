/*!
 * Address Generator
 * Random simulated addresses and allocation sizes for the demo
 */

use crate::core::limits::{DEMO_ADDRESS_DIGITS, DEMO_ALLOCATION_SIZES};
use crate::core::types::Size;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Largest generated address value (48 bits)
const ADDRESS_LIMIT: u64 = 0xFFFF_FFFF_FFFF;

pub struct AddressGenerator {
    rng: StdRng,
}

impl AddressGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic generator for reproducible demos and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// `0x` followed by twelve zero-padded lowercase hex digits
    pub fn address(&mut self) -> String {
        let value = self.rng.gen_range(0..ADDRESS_LIMIT);
        format!("0x{:0width$x}", value, width = DEMO_ADDRESS_DIGITS)
    }

    /// One of the demo's power-of-two allocation sizes
    pub fn size(&mut self) -> Size {
        *DEMO_ALLOCATION_SIZES
            .choose(&mut self.rng)
            .unwrap_or(&DEMO_ALLOCATION_SIZES[0])
    }
}

impl Default for AddressGenerator {
    fn default() -> Self {
        Self::new()
    }
}
