use std::ops::RangeInclusive;
use std::str::FromStr;

use image::Rgb;

pub const SENSITIVITY_RANGE: RangeInclusive<u32> = 1..=500;
pub const DILATION_RANGE: RangeInclusive<u32> = 1..=10;
pub const BRUSH_SIZE_RANGE: RangeInclusive<u32> = 1..=50;

/// Colour applied to detected edges, both on screen and in the saved overlay.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum EdgeColor {
    Blue,
    Black,
    White,
    Red,
    Green,
    #[default]
    Yellow,
}

impl EdgeColor {
    pub const ALL: [EdgeColor; 6] = [
        EdgeColor::Blue,
        EdgeColor::Black,
        EdgeColor::White,
        EdgeColor::Red,
        EdgeColor::Green,
        EdgeColor::Yellow,
    ];

    /// Fixed triplet for each option.
    ///
    /// Note that Blue and Red both map to (255, 0, 0).
    pub fn rgb(self) -> Rgb<u8> {
        match self {
            EdgeColor::Blue => Rgb([255, 0, 0]),
            EdgeColor::Black => Rgb([0, 0, 0]),
            EdgeColor::White => Rgb([255, 255, 255]),
            EdgeColor::Red => Rgb([255, 0, 0]),
            EdgeColor::Green => Rgb([0, 255, 0]),
            EdgeColor::Yellow => Rgb([255, 255, 0]),
        }
    }
}

// Implement Display to show it nicely in the ComboBox
impl std::fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EdgeColor::Blue => "Blue",
            EdgeColor::Black => "Black",
            EdgeColor::White => "White",
            EdgeColor::Red => "Red",
            EdgeColor::Green => "Green",
            EdgeColor::Yellow => "Yellow",
        };
        write!(f, "{name}")
    }
}

impl FromStr for EdgeColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeColor::ALL
            .into_iter()
            .find(|color| color.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown edge colour '{s}'"))
    }
}

/// Parameters feeding the detection stage.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct EdgeParams {
    pub sensitivity: u32,
    pub dilation: u32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            sensitivity: 100,
            dilation: 1,
        }
    }
}

impl EdgeParams {
    /// Canny hysteresis thresholds derived from the single sensitivity value.
    pub fn thresholds(&self) -> (f32, f32) {
        let s = clamp_to(self.sensitivity, &SENSITIVITY_RANGE) as f32;
        (0.5 * s, 1.5 * s)
    }

    /// Side of the square structuring element used for dilation.
    pub fn kernel_side(&self) -> u32 {
        clamp_to(self.dilation, &DILATION_RANGE)
    }
}

/// Parameters of the eraser/draw brush.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct BrushParams {
    pub size: u32,
    pub color: EdgeColor,
}

impl Default for BrushParams {
    fn default() -> Self {
        Self {
            size: 5,
            color: EdgeColor::default(),
        }
    }
}

impl BrushParams {
    pub fn radius(&self) -> i32 {
        clamp_to(self.size, &BRUSH_SIZE_RANGE) as i32
    }
}

pub fn clamp_to(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_half_and_one_and_a_half_sensitivity() {
        let params = EdgeParams {
            sensitivity: 100,
            dilation: 1,
        };
        assert_eq!(params.thresholds(), (50.0, 150.0));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let params = EdgeParams {
            sensitivity: 0,
            dilation: 42,
        };
        assert_eq!(params.thresholds(), (0.5, 1.5));
        assert_eq!(params.kernel_side(), 10);

        let brush = BrushParams {
            size: 999,
            color: EdgeColor::Green,
        };
        assert_eq!(brush.radius(), 50);
    }

    #[test]
    fn defaults_match_the_sliders() {
        assert_eq!(EdgeParams::default().sensitivity, 100);
        assert_eq!(EdgeParams::default().dilation, 1);
        assert_eq!(BrushParams::default().size, 5);
        assert_eq!(BrushParams::default().color, EdgeColor::Yellow);
    }

    #[test]
    fn blue_and_red_share_a_triplet() {
        assert_eq!(EdgeColor::Blue.rgb(), EdgeColor::Red.rgb());
        assert_eq!(EdgeColor::Yellow.rgb(), Rgb([255, 255, 0]));
    }

    #[test]
    fn colour_names_round_trip_through_display() {
        for color in EdgeColor::ALL {
            assert_eq!(color.to_string().parse::<EdgeColor>(), Ok(color));
        }
        assert_eq!(" black ".parse::<EdgeColor>(), Ok(EdgeColor::Black));
        assert!("Purple".parse::<EdgeColor>().is_err());
    }
}
