use std::ops::Mul;

use derive_more::{Display, Into};

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Reps(pub(crate) u32);

impl Reps {
    pub fn new(value: u32) -> Result<Self, RepsError> {
        if !(0..1000).contains(&value) {
            return Err(RepsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Reps {
    type Error = RepsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Reps::new(parsed_value),
            Err(_) => Err(RepsError::ParseError),
        }
    }
}

impl Mul<Seconds> for Reps {
    type Output = Seconds;

    fn mul(self, rhs: Seconds) -> Self::Output {
        Seconds(self.0 * rhs.0)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepsError {
    #[error("Reps must be in the range 0 to 999")]
    OutOfRange,
    #[error("Reps must be an integer")]
    ParseError,
}

/// Duration of work or rest in whole seconds.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Seconds(pub(crate) u32);

impl Seconds {
    pub const DEFAULT_REST: Seconds = Seconds(60);
    pub const DEFAULT_SUPERSET_REST: Seconds = Seconds(90);

    pub fn new(value: u32) -> Result<Self, SecondsError> {
        if !(0..86_400).contains(&value) {
            return Err(SecondsError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl From<Seconds> for i64 {
    fn from(value: Seconds) -> Self {
        i64::from(value.0)
    }
}

impl TryFrom<&str> for Seconds {
    type Error = SecondsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Seconds::new(parsed_value),
            Err(_) => Err(SecondsError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SecondsError {
    #[error("Time must be in the range 0 to 86399 s")]
    OutOfRange,
    #[error("Time must be an integer")]
    ParseError,
}

/// Distance in meters.
#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, Eq, PartialOrd, Ord)]
pub struct Distance(pub(crate) u32);

impl Distance {
    pub fn new(value: u32) -> Result<Self, DistanceError> {
        if !(0..1_000_000).contains(&value) {
            return Err(DistanceError::OutOfRange);
        }

        Ok(Self(value))
    }
}

impl TryFrom<&str> for Distance {
    type Error = DistanceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<u32>() {
            Ok(parsed_value) => Distance::new(parsed_value),
            Err(_) => Err(DistanceError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DistanceError {
    #[error("Distance must be in the range 0 to 999999 m")]
    OutOfRange,
    #[error("Distance must be an integer")]
    ParseError,
}

#[derive(Debug, Default, Display, Clone, Copy, Into, PartialEq, PartialOrd)]
pub struct Weight(pub(crate) f32);

impl Weight {
    const KG_PER_LB: f32 = 0.453_592_37;

    pub fn new(value: f32) -> Result<Self, WeightError> {
        if !(0.0..1000.0).contains(&value) {
            return Err(WeightError::OutOfRange);
        }

        if (value * 10.0 % 1.0).abs() > f32::EPSILON {
            return Err(WeightError::InvalidResolution);
        }

        Ok(Self(value))
    }

    #[must_use]
    pub fn in_kg(self, unit: WeightUnit) -> f32 {
        match unit {
            WeightUnit::Kg => self.0,
            WeightUnit::Lbs => self.0 * Self::KG_PER_LB,
        }
    }
}

impl TryFrom<&str> for Weight {
    type Error = WeightError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().parse::<f32>() {
            Ok(parsed_value) => Weight::new(parsed_value),
            Err(_) => Err(WeightError::ParseError),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("Weight must be in the range 0.0 to 999.9")]
    OutOfRange,
    #[error("Weight must be a multiple of 0.1")]
    InvalidResolution,
    #[error("Weight must be a decimal")]
    ParseError,
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(0, Ok(Reps(0)))]
    #[case(999, Ok(Reps(999)))]
    #[case(1000, Err(RepsError::OutOfRange))]
    fn test_reps_new(#[case] input: u32, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::new(input), expected);
    }

    #[rstest]
    #[case("12", Ok(Reps(12)))]
    #[case(" 8 ", Ok(Reps(8)))]
    #[case("1000", Err(RepsError::OutOfRange))]
    #[case("4.", Err(RepsError::ParseError))]
    #[case("", Err(RepsError::ParseError))]
    fn test_reps_from_str(#[case] input: &str, #[case] expected: Result<Reps, RepsError>) {
        assert_eq!(Reps::try_from(input), expected);
    }

    #[test]
    fn test_reps_mul_seconds() {
        assert_eq!(Reps(10) * Seconds(4), Seconds(40));
    }

    #[rstest]
    #[case(0, Ok(Seconds(0)))]
    #[case(86_399, Ok(Seconds(86_399)))]
    #[case(86_400, Err(SecondsError::OutOfRange))]
    fn test_seconds_new(#[case] input: u32, #[case] expected: Result<Seconds, SecondsError>) {
        assert_eq!(Seconds::new(input), expected);
    }

    #[rstest]
    #[case("90", Ok(Seconds(90)))]
    #[case("-1", Err(SecondsError::ParseError))]
    #[case("1:30", Err(SecondsError::ParseError))]
    fn test_seconds_from_str(#[case] input: &str, #[case] expected: Result<Seconds, SecondsError>) {
        assert_eq!(Seconds::try_from(input), expected);
    }

    #[rstest]
    #[case("5000", Ok(Distance(5000)))]
    #[case("1000000", Err(DistanceError::OutOfRange))]
    #[case("5k", Err(DistanceError::ParseError))]
    fn test_distance_from_str(
        #[case] input: &str,
        #[case] expected: Result<Distance, DistanceError>,
    ) {
        assert_eq!(Distance::try_from(input), expected);
    }

    #[rstest]
    #[case(0.0, Ok(Weight(0.0)))]
    #[case(999.9, Ok(Weight(999.9)))]
    #[case(1000.0, Err(WeightError::OutOfRange))]
    #[case(-2.5, Err(WeightError::OutOfRange))]
    #[case(1.23, Err(WeightError::InvalidResolution))]
    fn test_weight_new(#[case] input: f32, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::new(input), expected);
    }

    #[rstest]
    #[case("2.5", Ok(Weight(2.5)))]
    #[case("4.", Ok(Weight(4.0)))]
    #[case("", Err(WeightError::ParseError))]
    fn test_weight_from_str(#[case] input: &str, #[case] expected: Result<Weight, WeightError>) {
        assert_eq!(Weight::try_from(input), expected);
    }

    #[test]
    fn test_weight_in_kg() {
        assert_approx_eq!(Weight(20.0).in_kg(WeightUnit::Kg), 20.0);
        assert_approx_eq!(Weight(100.0).in_kg(WeightUnit::Lbs), 45.359_237, 1e-4);
    }

    #[rstest]
    #[case(WeightUnit::Kg, "kg")]
    #[case(WeightUnit::Lbs, "lbs")]
    fn test_weight_unit_display_and_parse(#[case] unit: WeightUnit, #[case] text: &str) {
        assert_eq!(unit.to_string(), text);
        assert_eq!(text.parse::<WeightUnit>(), Ok(unit));
    }
}
