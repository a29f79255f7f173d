use pidtune_core::Gains;

use crate::config::{SliderConfig, SlidersConfig};

/// Controller gain adjusted by a slider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GainKind {
    /// Proportional gain.
    Proportional,
    /// Integral gain.
    Integral,
    /// Derivative gain.
    Derivative,
}

impl GainKind {
    pub const ALL: [GainKind; 3] = [
        GainKind::Proportional,
        GainKind::Integral,
        GainKind::Derivative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GainKind::Proportional => "Kp",
            GainKind::Integral => "Ki",
            GainKind::Derivative => "Kd",
        }
    }
}

impl std::fmt::Display for GainKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for GainKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kp" | "p" => Ok(GainKind::Proportional),
            "ki" | "i" => Ok(GainKind::Integral),
            "kd" | "d" => Ok(GainKind::Derivative),
            _ => Err(()),
        }
    }
}

/// Integer slider mapped onto a gain.
#[derive(Clone, Debug, PartialEq)]
pub struct GainSlider {
    kind: GainKind,
    min: i32,
    max: i32,
    position: i32,
    scale: f64,
    precision: usize,
}

impl GainSlider {
    /// Construct a slider from configuration.
    ///
    /// The initial position is clamped into the slider range.
    pub fn new(kind: GainKind, config: &SliderConfig) -> Self {
        let (min, max) = if config.min <= config.max {
            (config.min, config.max)
        } else {
            (config.max, config.min)
        };

        Self {
            kind,
            min,
            max,
            position: config.initial.clamp(min, max),
            scale: config.scale,
            precision: config
                .precision
                .unwrap_or_else(|| precision_from_scale(config.scale)),
        }
    }

    /// Move the slider, clamping into range.
    ///
    /// Returns `true` if the position changed.
    pub fn set_position(&mut self, position: i32) -> bool {
        let position = position.clamp(self.min, self.max);
        let changed = position != self.position;
        self.position = position;
        changed
    }

    /// Gain value at the current position.
    #[inline]
    pub fn value(&self) -> f64 {
        self.position as f64 / self.scale
    }

    /// Gain value formatted for display.
    pub fn label_text(&self) -> String {
        format!("{:.*}", self.precision, self.value())
    }

    #[inline]
    pub fn kind(&self) -> GainKind {
        self.kind
    }

    #[inline]
    pub fn position(&self) -> i32 {
        self.position
    }

    #[inline]
    pub fn range(&self) -> std::ops::RangeInclusive<i32> {
        self.min..=self.max
    }
}

impl std::fmt::Display for GainSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.label_text())
    }
}

/// The three gain sliders.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderBank {
    kp: GainSlider,
    ki: GainSlider,
    kd: GainSlider,
}

impl SliderBank {
    pub fn new(config: &SlidersConfig) -> Self {
        Self {
            kp: GainSlider::new(GainKind::Proportional, &config.kp),
            ki: GainSlider::new(GainKind::Integral, &config.ki),
            kd: GainSlider::new(GainKind::Derivative, &config.kd),
        }
    }

    pub fn get(&self, kind: GainKind) -> &GainSlider {
        match kind {
            GainKind::Proportional => &self.kp,
            GainKind::Integral => &self.ki,
            GainKind::Derivative => &self.kd,
        }
    }

    pub fn get_mut(&mut self, kind: GainKind) -> &mut GainSlider {
        match kind {
            GainKind::Proportional => &mut self.kp,
            GainKind::Integral => &mut self.ki,
            GainKind::Derivative => &mut self.kd,
        }
    }

    /// Controller gains at the current slider positions.
    pub fn gains(&self) -> Gains {
        Gains::new(self.kp.value(), self.ki.value(), self.kd.value())
    }

    pub fn iter(&self) -> impl Iterator<Item = &GainSlider> {
        [&self.kp, &self.ki, &self.kd].into_iter()
    }
}

impl std::fmt::Display for SliderBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.kp, self.ki, self.kd)
    }
}

/// Number of decimals needed to show one slider increment.
fn precision_from_scale(scale: f64) -> usize {
    let mut precision = 0;
    let mut step = scale;

    while step > 1.0 && precision < 9 {
        step /= 10.0;
        precision += 1;
    }

    precision
}
