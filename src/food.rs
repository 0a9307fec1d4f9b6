use log::debug;
use rand::Rng;

use crate::snake::Cell;

#[derive(Clone, Debug)]
pub struct Food {
    cell: Cell,
}

impl Food {
    pub fn new() -> Self {
        Food { cell: Cell::new(0, 0) }
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    /// Moves the food to a random cell in `[0, (width - cell_size) / cell_size)` on x, and
    /// likewise on y. The board must be at least two cells in each dimension.
    pub fn relocate<R: Rng + ?Sized>(&mut self, width: u32, height: u32, cell_size: u32, rng: &mut R) {
        let columns = span(width, cell_size);
        let rows = span(height, cell_size);

        self.cell = Cell::new(rng.gen_range(0..columns), rng.gen_range(0..rows));
        debug!("Food relocated to ({}, {})", self.cell.x, self.cell.y);
    }

    #[cfg(test)]
    pub fn place(&mut self, cell: Cell) {
        self.cell = cell;
    }
}

fn span(dimension: u32, cell_size: u32) -> i32 {
    (dimension.saturating_sub(cell_size) / cell_size) as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn relocate_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut food = Food::new();

        // floor(1133 / 67) = 16, floor(583 / 67) = 8
        for _ in 0..2000 {
            food.relocate(1200, 650, 67, &mut rng);
            let cell = food.cell();
            assert!((0..16).contains(&cell.x), "x out of range: {:?}", cell);
            assert!((0..8).contains(&cell.y), "y out of range: {:?}", cell);
        }
    }

    #[test]
    fn relocate_reaches_every_column_and_row() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut food = Food::new();
        let mut columns = [false; 4];
        let mut rows = [false; 2];

        for _ in 0..500 {
            food.relocate(50, 30, 10, &mut rng);
            columns[food.cell().x as usize] = true;
            rows[food.cell().y as usize] = true;
        }

        assert!(columns.iter().all(|&seen| seen));
        assert!(rows.iter().all(|&seen| seen));
    }

    #[test]
    fn smallest_board_pins_food_to_the_origin() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut food = Food::new();
        food.place(Cell::new(3, 3));

        food.relocate(20, 20, 10, &mut rng);
        assert_eq!(food.cell(), Cell::new(0, 0));
    }
}
