//! Segment Table - Canonical Stroke Geometry
//!
//! Only the Ones patterns are written down. Tens, Hundreds and Thousands are
//! generated from them by reflection across the stem and the mid-axis.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use crate::error::NumeralError;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static TABLE_BUILD_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_table_build_count() -> u32 {
    TABLE_BUILD_COUNT.load(Ordering::SeqCst)
}

/// Side of the normalized coordinate space all geometry is authored in.
pub const UNIT: i16 = 100;

/// The stem, shared by every glyph.
pub const STEM: [Point; 2] = [Point::new(50, 10), Point::new(50, 90)];

/// The sign stroke drawn through the center of a glyph.
pub const SIGN: [Point; 2] = [Point::new(30, 50), Point::new(70, 50)];

/// Point in the normalized 100x100 space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i16,
    pub y: i16,
}

impl Point {
    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }

    /// Mirror across the vertical stem axis (x = 50).
    pub const fn reflect_x(self) -> Self {
        Self::new(UNIT - self.x, self.y)
    }

    /// Mirror across the horizontal mid-axis (y = 50).
    pub const fn reflect_y(self) -> Self {
        Self::new(self.x, UNIT - self.y)
    }
}

/// Corner position of a digit relative to the stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Ones,
    Tens,
    Hundreds,
    Thousands,
}

impl Quadrant {
    /// Positional order: index 0 is the ones place.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::Ones,
        Quadrant::Tens,
        Quadrant::Hundreds,
        Quadrant::Thousands,
    ];

    pub fn index(self) -> usize {
        match self {
            Quadrant::Ones => 0,
            Quadrant::Tens => 1,
            Quadrant::Hundreds => 2,
            Quadrant::Thousands => 3,
        }
    }

    /// Map a Ones point into this quadrant.
    pub fn place(self, p: Point) -> Point {
        match self {
            Quadrant::Ones => p,
            Quadrant::Tens => p.reflect_x(),
            Quadrant::Hundreds => p.reflect_y(),
            Quadrant::Thousands => p.reflect_y().reflect_x(),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Quadrant::Ones => "ones",
            Quadrant::Tens => "tens",
            Quadrant::Hundreds => "hundreds",
            Quadrant::Thousands => "thousands",
        };
        f.write_str(name)
    }
}

/// A nonzero decimal digit. Zero never draws a stroke so it has no value here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Result<Self, NumeralError> {
        if (1..=9).contains(&value) {
            Ok(Self(value))
        } else {
            Err(NumeralError::InvalidDigit(value))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = NumeralError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(d: Digit) -> u8 {
        d.0
    }
}

/// Ordered polyline; consecutive points form the drawn segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeSet {
    points: Vec<Point>,
}

impl StrokeSet {
    fn from_points(points: &[Point]) -> Self {
        Self { points: points.to_vec() }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn reflect_x(&self) -> Self {
        Self { points: self.points.iter().map(|p| p.reflect_x()).collect() }
    }

    pub fn reflect_y(&self) -> Self {
        Self { points: self.points.iter().map(|p| p.reflect_y()).collect() }
    }

    fn placed(&self, quadrant: Quadrant) -> Self {
        Self { points: self.points.iter().map(|&p| quadrant.place(p)).collect() }
    }
}

const fn p(x: i16, y: i16) -> Point {
    Point::new(x, y)
}

/// Ones patterns for digits 1 through 9, upper-right of the stem.
const ONES: [&[Point]; 9] = [
    &[p(50, 10), p(70, 10)],
    &[p(50, 30), p(70, 30)],
    &[p(50, 10), p(70, 30)],
    &[p(50, 30), p(70, 10)],
    &[p(50, 10), p(70, 10), p(50, 30)],
    &[p(70, 10), p(70, 30)],
    &[p(50, 10), p(70, 10), p(70, 30)],
    &[p(50, 30), p(70, 30), p(70, 10)],
    &[p(50, 10), p(70, 10), p(70, 30), p(50, 30)],
];

/// Immutable (quadrant, digit) -> StrokeSet lookup.
#[derive(Debug)]
pub struct SegmentTable {
    strokes: [[StrokeSet; 9]; 4],
}

impl SegmentTable {
    fn build() -> Self {
        #[cfg(feature = "test-hooks")]
        TABLE_BUILD_COUNT.fetch_add(1, Ordering::SeqCst);

        let ones: [StrokeSet; 9] = ONES.map(StrokeSet::from_points);
        let strokes = Quadrant::ALL.map(|q| ones.clone().map(|s| s.placed(q)));
        tracing::debug!("segment table built");
        Self { strokes }
    }

    /// The process-wide table, built on first use and shared read-only.
    pub fn global() -> &'static SegmentTable {
        static TABLE: OnceLock<SegmentTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    pub fn stroke(&self, quadrant: Quadrant, digit: Digit) -> &StrokeSet {
        &self.strokes[quadrant.index()][usize::from(digit.get() - 1)]
    }

    /// Lookup by raw digit value. Anything outside 1..=9 is an internal defect.
    pub fn lookup(&self, quadrant: Quadrant, digit: u8) -> Result<&StrokeSet, NumeralError> {
        Ok(self.stroke(quadrant, Digit::new(digit)?))
    }
}
