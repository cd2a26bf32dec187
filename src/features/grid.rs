/// Errors raised while reading a pixel grid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FeatureError {
    #[error("grid has no pixels")]
    EmptyGrid,
    #[error("row {row} has {actual} pixels, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{height}x{width} grid cannot be split into {regions}x{regions} regions")]
    GridTooSmall {
        height: usize,
        width: usize,
        regions: usize,
    },
}

/// Smallest non-zero and largest per-line transition counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intercepts {
    /// `None` when no line contains a transition.
    pub min: Option<usize>,
    pub max: usize,
}

/// Checks that `grid` is non-empty and rectangular; returns `(height, width)`.
pub fn dimensions(grid: &[Vec<u8>]) -> Result<(usize, usize), FeatureError> {
    let width = grid.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(FeatureError::EmptyGrid);
    }
    for (row, pixels) in grid.iter().enumerate() {
        if pixels.len() != width {
            return Err(FeatureError::RaggedGrid { row, expected: width, actual: pixels.len() });
        }
    }
    Ok((grid.len(), width))
}

/// Fraction of foreground (non-zero) pixels.
pub fn density(grid: &[Vec<u8>]) -> Result<f64, FeatureError> {
    let (height, width) = dimensions(grid)?;
    let lit = grid.iter().flatten().filter(|&&px| px != 0).count();
    Ok(lit as f64 / (height * width) as f64)
}

/// Splits the grid into `regions × regions` equal blocks and returns the
/// density of each, row-major. Block sides are `height / regions` and
/// `width / regions`; leftover pixels on the bottom and right are ignored.
pub fn region_avg(grid: &[Vec<u8>], regions: usize) -> Result<Vec<f64>, FeatureError> {
    let (height, width) = dimensions(grid)?;
    if regions == 0 || height < regions || width < regions {
        return Err(FeatureError::GridTooSmall { height, width, regions });
    }

    let (block_h, block_w) = (height / regions, width / regions);
    let mut features = Vec::with_capacity(regions * regions);

    for by in 0..regions {
        for bx in 0..regions {
            let lit = grid[by * block_h..(by + 1) * block_h]
                .iter()
                .flat_map(|row| &row[bx * block_w..(bx + 1) * block_w])
                .filter(|&&px| px != 0)
                .count();
            features.push(lit as f64 / (block_h * block_w) as f64);
        }
    }

    Ok(features)
}

/// Compares each row of the top half with the row `height / 2` below it,
/// cell by cell. The match count is normalised by `height + width`.
pub fn vertical_symmetry(grid: &[Vec<u8>]) -> Result<f64, FeatureError> {
    let (height, width) = dimensions(grid)?;
    let half = height / 2;
    let matches = grid[..half]
        .iter()
        .zip(&grid[half..])
        .map(|(top, bottom)| top.iter().zip(bottom).filter(|(a, b)| a == b).count())
        .sum::<usize>();
    Ok(matches as f64 / (height + width) as f64)
}

/// Compares the left half of each row with the cells `width / 2` to the
/// right. Normalised like `vertical_symmetry`.
pub fn horizontal_symmetry(grid: &[Vec<u8>]) -> Result<f64, FeatureError> {
    let (height, width) = dimensions(grid)?;
    let half = width / 2;
    let matches = grid
        .iter()
        .map(|row| row[..half].iter().zip(&row[half..]).filter(|(a, b)| a == b).count())
        .sum::<usize>();
    Ok(matches as f64 / (height + width) as f64)
}

/// Counts foreground-to-background transitions along each row.
pub fn horizontal_intercepts(grid: &[Vec<u8>]) -> Result<Intercepts, FeatureError> {
    dimensions(grid)?;
    Ok(intercepts(grid.iter().map(|row| row.iter().copied())))
}

/// Counts foreground-to-background transitions down each column.
pub fn vertical_intercepts(grid: &[Vec<u8>]) -> Result<Intercepts, FeatureError> {
    let (_, width) = dimensions(grid)?;
    Ok(intercepts((0..width).map(move |col| grid.iter().map(move |row| row[col]))))
}

/// The previous pixel carries over from the end of one line to the start of
/// the next, so a line ending lit and the next starting dark counts as a
/// transition on the second line.
fn intercepts<L, P>(lines: L) -> Intercepts
where
    L: Iterator<Item = P>,
    P: Iterator<Item = u8>,
{
    let mut prev = 0;
    let mut min: Option<usize> = None;
    let mut max = 0;

    for line in lines {
        let mut count = 0;
        for px in line {
            if prev != 0 && px == 0 {
                count += 1;
            }
            prev = px;
        }
        if count != 0 {
            min = Some(min.map_or(count, |m| m.min(count)));
        }
        max = max.max(count);
    }

    Intercepts { min, max }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> Vec<Vec<u8>> {
        vec![vec![0; 4]; 4]
    }

    fn top_bar() -> Vec<Vec<u8>> {
        vec![vec![1, 1, 1, 1], vec![0; 4], vec![0; 4], vec![0; 4]]
    }

    fn two_strokes() -> Vec<Vec<u8>> {
        vec![
            vec![0, 0, 0, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 1, 0, 1, 0],
            vec![0, 0, 0, 0, 0],
        ]
    }

    #[test]
    fn density_counts_lit_pixels() {
        assert_eq!(density(&blank()).unwrap(), 0.0);
        assert_eq!(density(&top_bar()).unwrap(), 0.25);
    }

    #[test]
    fn region_avg_on_unit_blocks_copies_pixels() {
        let features = region_avg(&two_strokes(), 5).unwrap();
        let expected: Vec<f64> = two_strokes().iter().flatten().map(|&p| p as f64).collect();
        assert_eq!(features, expected);
    }

    #[test]
    fn region_avg_averages_blocks_and_drops_remainder() {
        let mut grid = vec![vec![0u8; 5]; 5];
        grid[0][0] = 1;
        grid[1][1] = 1;
        grid[4][4] = 1;
        // 2x2 blocks of a 5x5 grid; row 4 and column 4 fall outside
        assert_eq!(region_avg(&grid, 2).unwrap(), vec![0.5, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn twenty_by_twenty_gives_twenty_five_features() {
        let grid = vec![vec![1u8; 20]; 20];
        let features = region_avg(&grid, 5).unwrap();
        assert_eq!(features.len(), 25);
        assert!(features.iter().all(|&f| f == 1.0));
    }

    #[test]
    fn region_avg_rejects_small_grids() {
        let grid = vec![vec![0u8; 4]; 3];
        assert_eq!(
            region_avg(&grid, 5).unwrap_err(),
            FeatureError::GridTooSmall { height: 3, width: 4, regions: 5 }
        );
    }

    #[test]
    fn symmetry_scores() {
        assert_eq!(vertical_symmetry(&blank()).unwrap(), 1.0);
        assert_eq!(vertical_symmetry(&top_bar()).unwrap(), 0.5);
        assert_eq!(horizontal_symmetry(&blank()).unwrap(), 1.0);
        assert_eq!(horizontal_symmetry(&top_bar()).unwrap(), 1.0);
    }

    #[test]
    fn intercepts_along_rows_and_columns() {
        assert_eq!(
            horizontal_intercepts(&two_strokes()).unwrap(),
            Intercepts { min: Some(1), max: 2 }
        );
        assert_eq!(
            vertical_intercepts(&two_strokes()).unwrap(),
            Intercepts { min: Some(1), max: 1 }
        );
        assert_eq!(
            horizontal_intercepts(&blank()).unwrap(),
            Intercepts { min: None, max: 0 }
        );
    }

    #[test]
    fn malformed_grids_are_rejected() {
        assert_eq!(density(&[]).unwrap_err(), FeatureError::EmptyGrid);
        assert_eq!(density(&[vec![]]).unwrap_err(), FeatureError::EmptyGrid);
        assert_eq!(
            vertical_symmetry(&[vec![0, 1], vec![1]]).unwrap_err(),
            FeatureError::RaggedGrid { row: 1, expected: 2, actual: 1 }
        );
    }
}
