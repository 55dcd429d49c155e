use super::{
    commit::{CommitPolicy, SpanControl},
    message::ControlMessage,
};

/// Lowest accepted spawn interval.
pub const MIN_RATE_MS: f32 = 1.0;
/// Lowest accepted overall speed.
pub const MIN_OVERALL_SPEED: f32 = 0.1;

/// Clamp rules that differ between the spawn variants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamLimits {
    /// Lowest accepted max speed.
    pub max_speed_floor: f32,
    /// Truncate rate writes to whole milliseconds.
    pub whole_ms: bool,
}

impl ParamLimits {
    pub const GRAIN: Self = Self {
        max_speed_floor: 0.1,
        whole_ms: true,
    };

    pub const TRIGGER: Self = Self {
        max_speed_floor: 1.0,
        whole_ms: false,
    };
}

/// Control state shared by the spawn engines.
///
/// Every setter clamps on write and ignores non-finite values, so whatever
/// the control side sends, the audio side reads something usable.
#[derive(Debug, Clone, Copy)]
pub struct EngineParameters {
    span: SpanControl,
    rate_ms: f32,
    max_speed: f32,
    overall_speed: f32,
    volume_floor: f32,
    limits: ParamLimits,
}

impl EngineParameters {
    pub fn new(limits: ParamLimits) -> Self {
        Self {
            span: SpanControl::new(CommitPolicy::Immediate),
            rate_ms: 100.0,
            max_speed: 1.0,
            overall_speed: 1.0,
            volume_floor: 1.0,
            limits,
        }
    }

    /// Apply a control message. Returns `false` for messages this state does
    /// not own (notes, phasor rate).
    pub fn apply(&mut self, msg: ControlMessage, frames: usize) -> bool {
        match msg {
            ControlMessage::SpanStart(value) => self.span.set_start(value, frames),
            ControlMessage::SpanEnd(value) => self.span.set_end(value, frames),
            ControlMessage::RateMs(value) => self.set_rate_ms(value),
            ControlMessage::MaxSpeed(value) => self.set_max_speed(value),
            ControlMessage::OverallSpeed(value) => self.set_overall_speed(value),
            ControlMessage::VolumeFloor(value) => self.set_volume_floor(value),
            ControlMessage::RateHz(_)
            | ControlMessage::NoteOn { .. }
            | ControlMessage::NoteOff { .. } => return false,
        }
        true
    }

    pub fn set_rate_ms(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        let value = if self.limits.whole_ms {
            value.trunc()
        } else {
            value
        };
        self.rate_ms = value.max(MIN_RATE_MS);
    }

    pub fn set_max_speed(&mut self, value: f32) {
        if value.is_finite() {
            self.max_speed = value.max(self.limits.max_speed_floor);
        }
    }

    pub fn set_overall_speed(&mut self, value: f32) {
        if value.is_finite() {
            self.overall_speed = value.max(MIN_OVERALL_SPEED);
        }
    }

    pub fn set_volume_floor(&mut self, value: f32) {
        if value.is_finite() {
            self.volume_floor = value.clamp(0.0, 1.0);
        }
    }

    pub fn span(&self) -> &SpanControl {
        &self.span
    }

    pub fn span_mut(&mut self) -> &mut SpanControl {
        &mut self.span
    }

    #[inline]
    pub fn rate_ms(&self) -> f32 {
        self.rate_ms
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn overall_speed(&self) -> f32 {
        self.overall_speed
    }

    #[inline]
    pub fn volume_floor(&self) -> f32 {
        self.volume_floor
    }

    pub fn limits(&self) -> ParamLimits {
        self.limits
    }
}
