//! Piecewise-linear color ramps over a scalar domain.
use crate::error::{Error, Result};

/// A single control point of a [`Colormap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    /// Domain value of the stop.
    pub weight: f32,
    /// sRGB 8-bit triplet.
    pub rgb: [u8; 3],
}

impl ColorStop {
    pub const fn new(weight: f32, rgb: [u8; 3]) -> Self {
        Self { weight, rgb }
    }
}

/// Ordered color ramp. The first and last stops clamp values outside the domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    stops: Vec<ColorStop>,
}

impl Colormap {
    /// Creates a colormap from stops with finite, non-decreasing weights.
    pub fn try_new(stops: Vec<ColorStop>) -> Result<Self> {
        if stops.is_empty() {
            return Err(Error::InvalidConfig("colormap needs at least one stop".into()));
        }
        if stops.iter().any(|s| !s.weight.is_finite()) {
            return Err(Error::InvalidConfig("colormap weights must be finite".into()));
        }
        if stops.windows(2).any(|w| w[1].weight < w[0].weight) {
            return Err(Error::InvalidConfig(
                "colormap weights must be non-decreasing".into(),
            ));
        }
        Ok(Self { stops })
    }

    /// Hypsometric ramp over normalized altitude: sea, beach, lowland greens and forest.
    pub fn terrain() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, [50, 130, 200]),
                ColorStop::new(0.005, [240, 240, 210]),
                ColorStop::new(0.05, [190, 200, 120]),
                ColorStop::new(0.2, [180, 200, 80]),
                ColorStop::new(0.75, [25, 100, 25]),
                ColorStop::new(1.0, [15, 60, 15]),
            ],
        }
    }

    /// Gray ramp for the site editor; darker means harder rock.
    pub fn erodibility() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, [149, 149, 149]),
                ColorStop::new(1.0, [221, 221, 221]),
            ],
        }
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Color for `value`, interpolating each channel between the bracketing stops and flooring.
    pub fn color_at(&self, value: f32) -> [u8; 3] {
        let first = self.stops[0];
        let last = self.stops[self.stops.len() - 1];
        if value <= first.weight {
            return first.rgb;
        }
        if value >= last.weight {
            return last.rgb;
        }
        // `value` is strictly inside the domain, so the bracket index is at least 1.
        let Some(i) = self.stops.iter().position(|s| value <= s.weight) else {
            return first.rgb;
        };
        let (lo, hi) = (self.stops[i - 1], self.stops[i]);
        let span = hi.weight - lo.weight;
        if span <= 0.0 {
            return hi.rgb;
        }
        let t = (value - lo.weight) / span;
        let mut rgb = [0u8; 3];
        for (c, out) in rgb.iter_mut().enumerate() {
            let v = lo.rgb[c] as f32 * (1.0 - t) + hi.rgb[c] as f32 * t;
            *out = v.floor().clamp(0.0, 255.0) as u8;
        }
        rgb
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::terrain()
    }
}
