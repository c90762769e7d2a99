//! Frame-counted settle for rebuild requests.
//!
//! A request arms a countdown; every further request restarts it, so a storm
//! of resizes converges on one measurement (plus an optional confirmation pass
//! on the following frame).

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SettleScheduler {
    frames: u32,
    confirm: bool,
    countdown: Option<u32>,
    confirm_pending: bool,
}

impl SettleScheduler {
    pub fn new(frames: u32, confirm: bool) -> Self {
        Self {
            frames,
            confirm,
            countdown: None,
            confirm_pending: false,
        }
    }

    /// Arm (or re-arm) the countdown.
    pub fn arm(&mut self) {
        self.countdown = Some(self.frames);
        self.confirm_pending = false;
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.countdown.is_some() || self.confirm_pending
    }

    pub fn cancel(&mut self) {
        self.countdown = None;
        self.confirm_pending = false;
    }

    /// Count one frame. Returns true when a rebuild should run on this frame.
    pub fn on_frame(&mut self) -> bool {
        match self.countdown {
            Some(left) if left <= 1 => {
                self.countdown = None;
                self.confirm_pending = self.confirm;
                true
            }
            Some(left) => {
                self.countdown = Some(left - 1);
                false
            }
            None if self.confirm_pending => {
                self.confirm_pending = false;
                true
            }
            None => false,
        }
    }
}
