use crate::utils::constants::{LAT_MAX, LAT_MIN, LON_MAX, LON_MIN};
use ndarray::{ArrayBase, Data, Dimension};

/// Values that can be checked against a pair of inclusive coordinate bounds.
///
/// Scalars and arrays go through the same check: an array is in range only if every element
/// is. NaN is never in range.
pub trait CoordinateValues {
    fn all_within(&self, min: f64, max: f64) -> bool;
}

impl CoordinateValues for f64 {
    fn all_within(&self, min: f64, max: f64) -> bool {
        (min..=max).contains(self)
    }
}

impl CoordinateValues for [f64] {
    fn all_within(&self, min: f64, max: f64) -> bool {
        self.iter().all(|x| x.all_within(min, max))
    }
}

impl CoordinateValues for Vec<f64> {
    fn all_within(&self, min: f64, max: f64) -> bool {
        self.as_slice().all_within(min, max)
    }
}

impl<S, D> CoordinateValues for ArrayBase<S, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    fn all_within(&self, min: f64, max: f64) -> bool {
        self.iter().all(|x| x.all_within(min, max))
    }
}

/// Checks that every latitude lies within [-90, 90] degrees.
pub fn valid_lat<C: CoordinateValues + ?Sized>(lat: &C) -> bool {
    lat.all_within(LAT_MIN, LAT_MAX)
}

/// Checks that every longitude lies within [-180, 180] degrees.
pub fn valid_lon<C: CoordinateValues + ?Sized>(lon: &C) -> bool {
    lon.all_within(LON_MIN, LON_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr0, arr1, arr2};

    #[test]
    fn scalar_bounds_are_inclusive() {
        assert!(valid_lat(&90.0));
        assert!(valid_lat(&-90.0));
        assert!(!valid_lat(&90.000001));
        assert!(valid_lon(&180.0));
        assert!(valid_lon(&-180.0));
        assert!(!valid_lon(&-181.0));
    }

    #[test]
    fn one_bad_element_invalidates_array() {
        assert!(valid_lat(&arr1(&[45.0, -12.5, 0.0])));
        assert!(!valid_lat(&arr1(&[45.0, 91.0, 0.0])));
        assert!(!valid_lon(&arr2(&[[0.0, 10.0], [-200.0, 3.0]])));
        assert!(valid_lon(&vec![-125.0, 179.9]));
        assert!(!valid_lon(&[-125.0, 180.1][..]));
    }

    #[test]
    fn nan_is_out_of_range() {
        assert!(!valid_lat(&f64::NAN));
        assert!(!valid_lat(&arr1(&[10.0, f64::NAN])));
        assert!(!valid_lon(&arr0(f64::NAN)));
    }

    #[test]
    fn empty_array_is_valid() {
        let empty: Vec<f64> = vec![];
        assert!(valid_lat(&empty));
    }
}
