/// Flattened per-tick command set. The driver fills it from whatever device
/// it reads; the simulation never sees key codes.
#[derive(Default, Clone, Copy, Debug, PartialEq)]
pub struct InputState {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub attack: bool,
    pub respawn: bool,
    /// Viewer yaw in radians; 0 looks down -z.
    pub yaw: f32,
}

impl InputState {
    pub fn is_moving(&self) -> bool {
        self.move_forward || self.move_backward || self.move_left || self.move_right
    }
}
