/// Three-valued sign: `1` above zero, `-1` below it and `0` at zero.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sign;

impl Sign {
    pub fn new() -> Self {
        Self
    }

    pub fn f(&self, z: f32) -> f32 {
        if z > 0. {
            1.
        } else if z < 0. {
            -1.
        } else {
            0.
        }
    }

    /// Maps a raw output to a binary label, zero goes to the positive class.
    pub fn label(&self, z: f32) -> f32 {
        if z < 0. {
            -1.
        } else {
            1.
        }
    }
}
