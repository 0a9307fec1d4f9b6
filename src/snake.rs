use std::collections::VecDeque;

use Heading::*;

/// A grid coordinate. Signed so that positions just outside the board can be represented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Cell { x, y }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right
}

impl Heading {
    #[cfg(test)]
    pub const ALL: [Heading; 4] = [Up, Down, Left, Right];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Snake {
    // Tail at the front, head at the back
    body: VecDeque<Cell>,
    heading: Heading,
}

impl Snake {
    /// Lays the snake out along the top row, tail at (0, 0), heading right.
    pub fn create(initial_length: usize) -> Self {
        assert!(initial_length >= 1, "a snake needs at least one cell");

        let body = (0..initial_length as i32).map(|x| Cell::new(x, 0)).collect();
        Snake { body, heading: Right }
    }

    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Cell {
        // The body is never empty once created
        self.body[self.body.len() - 1]
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    /// Takes effect on the next call to `advance`. Reversing into the body is allowed.
    pub fn set_heading(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Where the head goes on the next step. Not clamped to the board.
    pub fn next_head_position(&self) -> Cell {
        let head = self.head();
        let (dx, dy) = self.heading.delta();
        Cell::new(head.x + dx, head.y + dy)
    }

    pub fn advance(&mut self, grew: bool) {
        let new_head = self.next_head_position();

        if !grew {
            self.body.pop_front();
        }

        self.body.push_back(new_head);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_lays_out_a_horizontal_run() {
        let snake = Snake::create(5);

        let expected: Vec<Cell> = (0..5).map(|x| Cell::new(x, 0)).collect();
        assert_eq!(snake.body().iter().copied().collect::<Vec<_>>(), expected);
        assert_eq!(snake.head(), Cell::new(4, 0));
        assert_eq!(snake.heading(), Right);
    }

    #[test]
    #[should_panic]
    fn create_rejects_an_empty_snake() {
        Snake::create(0);
    }

    #[test]
    fn next_head_moves_one_unit_along_the_heading_axis() {
        let mut snake = Snake::create(3);
        snake.body = vec![Cell::new(7, -2), Cell::new(7, 3)].into_iter().collect();

        for heading in Heading::ALL.iter().copied() {
            snake.set_heading(heading);
            let head = snake.head();
            let next = snake.next_head_position();

            match heading {
                Up => assert_eq!(next, Cell::new(head.x, head.y - 1)),
                Down => assert_eq!(next, Cell::new(head.x, head.y + 1)),
                Left => assert_eq!(next, Cell::new(head.x - 1, head.y)),
                Right => assert_eq!(next, Cell::new(head.x + 1, head.y)),
            }
            assert_eq!((next.x - head.x).abs() + (next.y - head.y).abs(), 1);
        }
    }

    #[test]
    fn next_head_is_not_clamped() {
        let mut snake = Snake::create(1);
        snake.set_heading(Up);
        assert_eq!(snake.next_head_position(), Cell::new(0, -1));
        snake.set_heading(Left);
        assert_eq!(snake.next_head_position(), Cell::new(-1, 0));
    }

    #[test]
    fn advance_without_growth_keeps_length() {
        let mut snake = Snake::create(5);
        snake.advance(false);

        assert_eq!(snake.len(), 5);
        assert_eq!(snake.body()[0], Cell::new(1, 0));
        assert_eq!(snake.head(), Cell::new(5, 0));
    }

    #[test]
    fn advance_with_growth_adds_one_cell() {
        let mut snake = Snake::create(5);
        snake.advance(true);

        assert_eq!(snake.len(), 6);
        assert_eq!(snake.body()[0], Cell::new(0, 0));
        assert_eq!(snake.head(), Cell::new(5, 0));
    }

    #[test]
    fn single_cell_snake_moves_its_only_cell() {
        let mut snake = Snake::create(1);
        snake.set_heading(Down);
        snake.advance(false);

        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), Cell::new(0, 1));
    }

    #[test]
    fn heading_change_applies_on_next_advance() {
        let mut snake = Snake::create(2);
        snake.set_heading(Down);
        assert_eq!(snake.head(), Cell::new(1, 0));

        snake.advance(false);
        assert_eq!(snake.head(), Cell::new(1, 1));
    }

    #[test]
    fn reversal_runs_back_over_the_body() {
        let mut snake = Snake::create(3);
        snake.set_heading(Left);
        snake.advance(false);

        let cells: Vec<Cell> = snake.body().iter().copied().collect();
        assert_eq!(cells, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(1, 0)]);
    }
}
