use crate::error::TurtleError;
use crate::geometry::Coord;

/// Fixed-size boolean matrix. Dimensions never change after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Coord,
    cells: Vec<bool>,
}

impl Grid {
    /// Allocate an all-clear grid. Callers validate that both dimensions are positive.
    ///
    /// Fails with [`TurtleError::GridTooLarge`] when the cell count overflows or
    /// the allocation cannot be satisfied.
    pub(crate) fn new(dims: Coord) -> Result<Self, TurtleError> {
        let too_large = || TurtleError::GridTooLarge { dims };
        let len = (dims.x.max(0) as usize)
            .checked_mul(dims.y.max(0) as usize)
            .ok_or_else(too_large)?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| too_large())?;
        cells.resize(len, false);
        Ok(Self { dims, cells })
    }

    pub fn dimensions(&self) -> Coord {
        self.dims
    }

    fn index(&self, at: Coord) -> Option<usize> {
        at.in_bounds(self.dims)
            .then(|| at.y as usize * self.dims.x as usize + at.x as usize)
    }

    /// Cell state, or `None` outside the grid.
    pub fn get(&self, at: Coord) -> Option<bool> {
        self.index(at).map(|i| self.cells[i])
    }

    pub(crate) fn set(&mut self, at: Coord, value: bool) -> Result<(), TurtleError> {
        let Some(i) = self.index(at) else {
            return Err(TurtleError::InternalInconsistency {
                reason: "cell write outside the grid",
            });
        };
        self.cells[i] = value;
        Ok(())
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Rows from top (`y == 0`) to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.dims.x.max(1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_clear() {
        let grid = Grid::new(Coord::new(4, 3)).unwrap();
        assert_eq!(grid.marked_count(), 0);
        assert_eq!(grid.rows().count(), 3);
        assert!(grid.rows().all(|row| row.len() == 4));
    }

    #[test]
    fn set_and_get_address_the_same_cell() {
        let mut grid = Grid::new(Coord::new(4, 3)).unwrap();
        grid.set(Coord::new(3, 1), true).unwrap();
        assert_eq!(grid.get(Coord::new(3, 1)), Some(true));
        assert_eq!(grid.get(Coord::new(1, 3)), None);
        assert!(grid.rows().nth(1).unwrap()[3]);
        grid.set(Coord::new(3, 1), false).unwrap();
        assert_eq!(grid.marked_count(), 0);
    }

    #[test]
    fn oversized_grid_is_an_error() {
        let dims = Coord::new(i32::MAX, i32::MAX);
        assert!(matches!(Grid::new(dims), Err(TurtleError::GridTooLarge { .. })));
    }

    #[test]
    fn write_outside_is_internal_error() {
        let mut grid = Grid::new(Coord::new(2, 2)).unwrap();
        let result = grid.set(Coord::new(2, 0), true);
        assert!(matches!(result, Err(TurtleError::InternalInconsistency { .. })));
    }
}
