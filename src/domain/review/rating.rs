//! Star rating value object (1 to 5).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Review rating in whole stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i16", into = "i16")]
pub struct StarRating(u8);

impl StarRating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Creates a rating, returning error if outside 1..=5.
    pub fn new(value: i16) -> Result<Self, ValidationError> {
        match u8::try_from(value) {
            Ok(stars) if (Self::MIN..=Self::MAX).contains(&stars) => Ok(Self(stars)),
            _ => Err(ValidationError::out_of_range(
                "rating",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(value),
            )),
        }
    }

    /// Returns the number of stars.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i16> for StarRating {
    type Error = ValidationError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StarRating> for i16 {
    fn from(rating: StarRating) -> Self {
        i16::from(rating.0)
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_accepts_valid_values() {
        for stars in 1..=5 {
            assert_eq!(StarRating::new(stars).unwrap().value() as i16, stars);
        }
    }

    #[test]
    fn rating_rejects_out_of_range() {
        assert!(StarRating::new(0).is_err());
        assert!(StarRating::new(6).is_err());
        assert!(StarRating::new(-1).is_err());
    }

    #[test]
    fn rating_deserializes_with_validation() {
        assert!(serde_json::from_str::<StarRating>("4").is_ok());
        assert!(serde_json::from_str::<StarRating>("9").is_err());
    }

    #[test]
    fn rating_displays_as_fraction() {
        assert_eq!(StarRating::new(3).unwrap().to_string(), "3/5");
    }
}
