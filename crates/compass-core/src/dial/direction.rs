//! The sixteen points of the compass rose.

use core::fmt;

use crate::constants::HEADING_INCREMENT_DEG;

/// Compass point, clockwise from north in 22.5° sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassDirection {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassDirection {
    /// All points in clockwise order starting at north.
    pub const ALL: [CompassDirection; 16] = [
        CompassDirection::N,
        CompassDirection::NNE,
        CompassDirection::NE,
        CompassDirection::ENE,
        CompassDirection::E,
        CompassDirection::ESE,
        CompassDirection::SE,
        CompassDirection::SSE,
        CompassDirection::S,
        CompassDirection::SSW,
        CompassDirection::SW,
        CompassDirection::WSW,
        CompassDirection::W,
        CompassDirection::WNW,
        CompassDirection::NW,
        CompassDirection::NNW,
    ];

    /// Point for sector `index`, wrapping past 15.
    pub const fn from_sector(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Point nearest to `bearing` degrees; any finite bearing is accepted.
    pub fn nearest(bearing: f32) -> Self {
        if !bearing.is_finite() {
            return CompassDirection::N;
        }
        let increment = HEADING_INCREMENT_DEG as f32;
        let wrapped = bearing - 360.0 * libm::floorf(bearing / 360.0);
        let sector = libm::floorf((wrapped + increment / 2.0) / increment) as usize;
        Self::from_sector(sector)
    }

    pub const fn label(self) -> &'static str {
        match self {
            CompassDirection::N => "N",
            CompassDirection::NNE => "NNE",
            CompassDirection::NE => "NE",
            CompassDirection::ENE => "ENE",
            CompassDirection::E => "E",
            CompassDirection::ESE => "ESE",
            CompassDirection::SE => "SE",
            CompassDirection::SSE => "SSE",
            CompassDirection::S => "S",
            CompassDirection::SSW => "SSW",
            CompassDirection::SW => "SW",
            CompassDirection::WSW => "WSW",
            CompassDirection::W => "W",
            CompassDirection::WNW => "WNW",
            CompassDirection::NW => "NW",
            CompassDirection::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_order() {
        assert_eq!(CompassDirection::from_sector(0), CompassDirection::N);
        assert_eq!(CompassDirection::from_sector(4), CompassDirection::E);
        assert_eq!(CompassDirection::from_sector(15), CompassDirection::NNW);
        assert_eq!(CompassDirection::from_sector(16), CompassDirection::N);
    }

    #[test]
    fn test_nearest_handles_unwrapped_bearings() {
        assert_eq!(CompassDirection::nearest(0.0), CompassDirection::N);
        assert_eq!(CompassDirection::nearest(44.0), CompassDirection::NE);
        assert_eq!(CompassDirection::nearest(-90.0), CompassDirection::W);
        assert_eq!(CompassDirection::nearest(-180.0), CompassDirection::S);
        assert_eq!(CompassDirection::nearest(355.0), CompassDirection::N);
        assert_eq!(CompassDirection::nearest(f32::NAN), CompassDirection::N);
    }
}
