use std::iter::zip;
use std::ops::{Deref, DerefMut};

use thiserror::Error;

use crate::interpolation::{InterpolationRegion, InterpolationScheme, XY};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    #[error("interpolation table is empty")]
    EmptyTable,
    #[error("x={0} is outside every interpolation region")]
    OutOfRange(f64),
}

//=====================================================================
// A piecewise interpolation table: a sequence of regions, each with
// its own interpolation scheme (ENDF law 1-6), as produced by ACE's
// "NBT/INT" tabulated-function encoding.
//=====================================================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InterpolationTable(pub Vec<InterpolationRegion>);

impl Deref for InterpolationTable {
    type Target = Vec<InterpolationRegion>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for InterpolationTable {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl InterpolationTable {
    // Build a single-region table directly from parallel x/y vectors.
    pub fn from_x_and_y(x: Vec<f64>, y: Vec<f64>, interpolation_scheme: InterpolationScheme) -> Self {
        if x.len() != y.len() {
            panic!(
                "InterpolationTable: x ({}) and y ({}) vectors must be of equal length",
                x.len(),
                y.len()
            );
        }
        Self(vec![InterpolationRegion::from_x_and_y(x, y, interpolation_scheme)])
    }

    // Parse a table from raw ACE data, following the NBT/INT encoding:
    // a region-count word, then (if nonzero) NBT/INT pairs, then a
    // point-count word, then the x values, then the y values. A region
    // count of zero means "one lin-lin region, no NBT/INT pairs".
    pub fn process(data: &[f64]) -> Self {
        let num_interp_regions = data[0].to_bits() as usize;

        if num_interp_regions == 0 {
            let num_data_points = data[1].to_bits() as usize;
            let x_start = 2;
            let y_start = x_start + num_data_points;
            let x = data[x_start..y_start].to_vec();
            let y = data[y_start..y_start + num_data_points].to_vec();
            return Self::from_x_and_y(x, y, InterpolationScheme::LinLin);
        }

        let bounds_start = 1;
        let schemes_start = bounds_start + num_interp_regions;
        let schemes_end = schemes_start + num_interp_regions;
        let num_data_points = data[schemes_end].to_bits() as usize;
        let x_start = schemes_end + 1;
        let y_start = x_start + num_data_points;

        let bounds: Vec<usize> = std::iter::once(0)
            .chain(data[bounds_start..schemes_start].iter().map(|&val| val.to_bits() as usize - 1))
            .collect();
        let schemes: Vec<InterpolationScheme> = data[schemes_start..schemes_end]
            .iter()
            .map(|&val| InterpolationScheme::from(val.to_bits() as usize))
            .collect();
        let data_points: Vec<XY> = zip(data[x_start..y_start].iter(), data[y_start..].iter())
            .map(|(&x, &y)| XY { x, y })
            .collect();

        let regions = zip(bounds.iter().zip(bounds.iter().skip(1)), schemes.into_iter())
            .map(|((&start, &end), scheme)| InterpolationRegion {
                data: data_points[start..=end].to_vec(),
                interpolation_scheme: scheme,
            })
            .collect();

        Self(regions)
    }

    // How many XXS words a table starting at `table_start` occupies,
    // without fully parsing it — used by blocks that need to skip past
    // a table to find the next one (DNU, BDD, ...).
    pub fn get_table_length(table_start: usize, array_containing_table: &[f64]) -> usize {
        let mut table_length = 0;
        let num_interp_regions = array_containing_table[table_start].to_bits() as usize;
        if num_interp_regions == 0 {
            let num_data_points = array_containing_table[table_start + 1].to_bits() as usize;
            table_length += 2 + 2 * num_data_points;
        } else {
            table_length += 1 + 2 * num_interp_regions;
            let num_data_points = array_containing_table[table_start + table_length].to_bits() as usize;
            table_length += 1 + 2 * num_data_points;
        }
        table_length
    }

    pub fn interpolate(&self, x_val: f64) -> Result<f64, InterpolationError> {
        if self.is_empty() {
            return Err(InterpolationError::EmptyTable);
        }

        let region = self
            .iter()
            .find(|region| region.data[0].x <= x_val && x_val <= region.data.last().unwrap().x)
            .ok_or(InterpolationError::OutOfRange(x_val))?;

        let idx = match region
            .data
            .binary_search_by(|xy| xy.x.partial_cmp(&x_val).unwrap())
        {
            Ok(idx) => return Ok(region.data[idx].y),
            Err(idx) => idx - 1,
        };

        let start = &region.data[idx];
        let end = &region.data[idx + 1];
        let (x0, x1, y0, y1) = (start.x, end.x, start.y, end.y);

        let value = match region.interpolation_scheme {
            InterpolationScheme::Histogram => y0,
            InterpolationScheme::LinLin => y0 + (y1 - y0) * (x_val - x0) / (x1 - x0),
            InterpolationScheme::LinLog => y0 + (y1 - y0) * (x_val.ln() - x0.ln()) / (x1.ln() - x0.ln()),
            InterpolationScheme::LogLin => y0 * (((x_val - x0) / (x1 - x0)) * (y1 / y0).ln()).exp(),
            InterpolationScheme::LogLog => {
                y0 * (((x_val / x0).ln() / (x1 / x0).ln()) * (y1 / y0).ln()).exp()
            }
            InterpolationScheme::Gamow => y0 + (y1 - y0) * (x_val - x0) / (x1 - x0),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(scheme: InterpolationScheme) -> InterpolationTable {
        InterpolationTable(vec![InterpolationRegion {
            data: vec![XY { x: 1.0, y: 2.0 }, XY { x: 2.0, y: 4.0 }, XY { x: 3.0, y: 6.0 }],
            interpolation_scheme: scheme,
        }])
    }

    #[test]
    fn test_histogram_interpolation() {
        let t = table(InterpolationScheme::Histogram);
        assert_eq!(t.interpolate(1.0).unwrap(), 2.0);
        assert_eq!(t.interpolate(1.5).unwrap(), 2.0);
        assert_eq!(t.interpolate(3.0).unwrap(), 6.0);
        assert!(t.interpolate(3.1).is_err());
    }

    #[test]
    fn test_linlin_interpolation() {
        let t = table(InterpolationScheme::LinLin);
        assert_eq!(t.interpolate(1.5).unwrap(), 3.0);
        assert_eq!(t.interpolate(2.5).unwrap(), 5.0);
    }

    #[test]
    fn test_out_of_bounds_is_err() {
        let t = table(InterpolationScheme::LinLin);
        assert!(t.interpolate(0.5).is_err());
    }

    #[test]
    fn test_table_instantiation_from_x_and_y() {
        let table = InterpolationTable::from_x_and_y(
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 4.0],
            InterpolationScheme::LinLin,
        );
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].data.len(), 3);
    }

    #[test]
    fn test_get_table_length_single_region() {
        // num_regions = 0, num_points = 2, then 2 x's and 2 y's -> length 6
        let data: Vec<f64> = vec![
            f64::from_bits(0),
            f64::from_bits(2),
            1.0,
            2.0,
            10.0,
            20.0,
        ];
        assert_eq!(InterpolationTable::get_table_length(0, &data), 6);
    }
}
