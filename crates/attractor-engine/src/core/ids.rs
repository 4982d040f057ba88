use crate::api::types::DotId;

/// Per-engine spawn counter. The serial wraps to 0 after `u64::MAX`
/// and bumps the epoch instead of failing.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
    epoch: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start issuing at `serial`. Lets harnesses exercise the wraparound.
    pub fn starting_at(serial: u64) -> Self {
        Self { next: serial, epoch: 0 }
    }

    /// Generate the next dot id.
    pub fn next_id(&mut self) -> DotId {
        let id = DotId::new(self.epoch, self.next);
        if self.next == u64::MAX {
            self.next = 0;
            self.epoch = self.epoch.wrapping_add(1);
        } else {
            self.next += 1;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase() {
        let mut ids = IdAllocator::new();
        assert_eq!(ids.next_id().serial(), 0);
        assert_eq!(ids.next_id().serial(), 1);
        assert_eq!(ids.next_id().serial(), 2);
    }

    #[test]
    fn serial_wraps_to_zero_in_new_epoch() {
        let mut ids = IdAllocator::starting_at(u64::MAX - 1);
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();
        assert_eq!((a.serial(), a.epoch()), (u64::MAX - 1, 0));
        assert_eq!((b.serial(), b.epoch()), (u64::MAX, 0));
        assert_eq!((c.serial(), c.epoch()), (0, 1));
        assert!(a < b && b < c);
    }
}
