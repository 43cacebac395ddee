// Reflexbox — Pseudo-Random Prompt Selection
//
// Simple xorshift32: deterministic under test, seeded from hardware entropy
// on the device. More than enough for picking one of four prompts.

#[derive(Debug, Clone, Copy)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        // xorshift has a fixed point at zero.
        Self { state: seed.max(1) }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_does_not_stick() {
        let mut rng = XorShift32::new(0);
        assert_ne!(rng.next_u32(), 0);
        assert_ne!(rng.next_u32(), rng.next_u32());
    }

    #[test]
    fn deterministic_for_equal_seeds() {
        let mut a = XorShift32::new(42);
        let mut b = XorShift32::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }
}
