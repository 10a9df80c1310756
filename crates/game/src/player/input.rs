use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PaddleInput: u8 {
        const UP = 1 << 0;
        const DOWN = 1 << 1;
    }
}

impl PaddleInput {
    /// -1 for up, 1 for down, 0 when idle or when both cancel out.
    pub fn direction(self) -> f32 {
        match (self.contains(Self::UP), self.contains(Self::DOWN)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
