//! Ping-pong bookkeeping for a pair of offscreen render targets.

/// Which of the two targets holds the most recent frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingPong {
    ReadyA,
    ReadyB,
}

/// Identity of one slot in the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    A,
    B,
}

impl Slot {
    pub fn index(self) -> usize {
        match self {
            Slot::A => 0,
            Slot::B => 1,
        }
    }

    pub fn other(self) -> Slot {
        match self {
            Slot::A => Slot::B,
            Slot::B => Slot::A,
        }
    }
}

impl PingPong {
    /// Slot read as the previous frame.
    pub fn current(self) -> Slot {
        match self {
            PingPong::ReadyA => Slot::A,
            PingPong::ReadyB => Slot::B,
        }
    }

    /// Slot written this frame. Never equal to [`PingPong::current`].
    pub fn next(self) -> Slot {
        self.current().other()
    }

    pub fn swapped(self) -> PingPong {
        match self {
            PingPong::ReadyA => PingPong::ReadyB,
            PingPong::ReadyB => PingPong::ReadyA,
        }
    }
}

/// Two equally sized targets plus the read/write state.
#[derive(Debug)]
pub struct TargetPair<T> {
    targets: [T; 2],
    state: PingPong,
    frames: u64,
}

impl<T> TargetPair<T> {
    /// Starts with `a` as the current (read) target.
    pub fn new(a: T, b: T) -> Self {
        Self {
            targets: [a, b],
            state: PingPong::ReadyA,
            frames: 0,
        }
    }

    pub fn state(&self) -> PingPong {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn current(&self) -> &T {
        &self.targets[self.state.current().index()]
    }

    pub fn next(&self) -> &T {
        &self.targets[self.state.next().index()]
    }

    /// Promote the target just written to current.
    pub fn swap(&mut self) {
        self.state = self.state.swapped();
        self.frames += 1;
    }

    /// Run one frame: `f` gets `(previous, write)` and the pair swaps only if
    /// it succeeds.
    pub fn frame<R, E>(&mut self, f: impl FnOnce(&T, &T) -> Result<R, E>) -> Result<R, E> {
        let out = f(self.current(), self.next())?;
        self.swap();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_write_slots_differ() {
        for state in [PingPong::ReadyA, PingPong::ReadyB] {
            assert_ne!(state.current(), state.next());
        }
    }

    #[test]
    fn failed_frame_keeps_state() {
        let mut pair = TargetPair::new("a", "b");
        let res: Result<(), &str> = pair.frame(|_, _| Err("boom"));
        assert!(res.is_err());
        assert_eq!(pair.state(), PingPong::ReadyA);
        assert_eq!(pair.frames(), 0);
    }
}
