use std::collections::HashSet;

use crate::error::EditorError;

/// A pixel position on the canvas, in raw image coordinates.
///
/// Coordinates are signed: a stroke may leave the image while the button is
/// still held, and those points are kept and simply clipped when painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point([i32; 2]);

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self([x, y])
    }
    pub fn x(&self) -> i32 {
        self.0[0]
    }
    pub fn y(&self) -> i32 {
        self.0[1]
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Unordered collection of marker points, duplicates collapsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSet {
    points: HashSet<Point>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the point was not already present.
    pub fn insert(&mut self, point: Point) -> bool {
        self.points.insert(point)
    }
    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn clear(&mut self) {
        self.points.clear();
    }
    pub fn iter(&self) -> impl Iterator<Item = &Point> + '_ {
        self.points.iter()
    }

    pub fn union<'a>(&'a self, other: &'a PointSet) -> impl Iterator<Item = &'a Point> + 'a {
        self.points.union(&other.points)
    }
}

impl FromIterator<Point> for PointSet {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Parses a strictly positive dimension typed into one of the size fields.
pub fn parse_dimension(field: &'static str, value: &str) -> Result<u32, EditorError> {
    match value.trim().parse::<i64>() {
        Ok(v) if v > 0 && v <= u32::MAX as i64 => Ok(v as u32),
        _ => Err(EditorError::InvalidDimension {
            field,
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_points_collapse() {
        let mut set = PointSet::new();
        assert!(set.insert(Point::new(3, 4)));
        assert!(!set.insert(Point::new(3, 4)));
        assert!(set.insert(Point::new(4, 3)));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn union_yields_each_point_once() {
        let a: PointSet = [(1, 1), (2, 2)].into_iter().map(Point::from).collect();
        let b: PointSet = [(2, 2), (3, 3)].into_iter().map(Point::from).collect();
        let mut merged: Vec<Point> = a.union(&b).copied().collect();
        merged.sort_by_key(|p| (p.x(), p.y()));
        assert_eq!(
            merged,
            vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]
        );
    }

    #[test]
    fn dimensions_must_be_positive_integers() {
        assert_eq!(parse_dimension("length", " 640 ").unwrap(), 640);
        assert!(parse_dimension("length", "0").is_err());
        assert!(parse_dimension("length", "-3").is_err());
        assert!(parse_dimension("breadth", "12.5").is_err());
        assert!(parse_dimension("breadth", "").is_err());
    }
}
