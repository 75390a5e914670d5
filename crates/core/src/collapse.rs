//! Line collapse - slides and merges tiles for one move
//!
//! Every direction uses the same per-line procedure. A [`Line`] is a row or
//! column walked from the wall the tiles move toward: step 0 is the cell
//! against that wall.
//!
//! Per line the walk keeps a merge slot (the tile that may still absorb the
//! next one) and a `merged` flag. Once a line has merged or annihilated a
//! pair it only slides for the rest of the move, so no tile takes part in
//! two merges and a run of three equal tiles merges the first two only.

use log::trace;

use crate::codec::serialize;
use crate::grid::Grid;
use crate::merge::{try_merge, MergeOutcome};
use crate::scoring::score_for_key;
use crate::table::CombinationTable;
use crate::types::{Direction, MoveEvent, Position};

/// One row or column, walked from the leading wall
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    direction: Direction,
    /// Row index for left/right, column index for up/down
    index: usize,
    len: usize,
}

impl Line {
    pub fn new(direction: Direction, index: usize, len: usize) -> Self {
        Self {
            direction,
            index,
            len,
        }
    }

    /// Every line of a `size` x `size` grid for a move in `direction`
    pub fn all(direction: Direction, size: usize) -> impl Iterator<Item = Line> {
        (0..size).map(move |index| Line::new(direction, index, size))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Grid position of the `step`-th cell from the leading wall
    pub fn position(&self, step: usize) -> Position {
        let far = self.len - 1 - step;
        match self.direction {
            Direction::Left => Position::new(step, self.index),
            Direction::Right => Position::new(far, self.index),
            Direction::Up => Position::new(self.index, step),
            Direction::Down => Position::new(self.index, far),
        }
    }
}

/// Accumulated result of collapsing one or more lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collapse {
    pub events: Vec<MoveEvent>,
    /// Points earned by merges and annihilations
    pub points: u32,
    /// Whether any tile moved, merged or disappeared
    pub changed: bool,
}

impl Collapse {
    pub fn merges(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, MoveEvent::MergeInto { .. }))
            .count()
    }

    pub fn slides(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, MoveEvent::Slide { .. }))
            .count()
    }

    fn push(&mut self, event: MoveEvent) {
        trace!("collapse: {:?}", event);
        self.changed = true;
        self.events.push(event);
    }
}

/// Collapse every line of the grid toward `direction`.
pub fn collapse(grid: &mut Grid, table: &CombinationTable, direction: Direction) -> Collapse {
    let mut out = Collapse::default();
    for line in Line::all(direction, grid.size()) {
        collapse_line(grid, table, line, &mut out);
    }
    out
}

/// Collapse a single line, appending its events and points to `out`.
pub fn collapse_line(grid: &mut Grid, table: &CombinationTable, line: Line, out: &mut Collapse) {
    let mut merged = false;
    let mut merge_slot: Option<usize> = None;

    for step in 0..line.len() {
        let pos = line.position(step);
        if !grid.is_occupied(pos) {
            continue;
        }

        if let (false, Some(slot)) = (merged, merge_slot) {
            let target = line.position(slot);
            match resolve_cells(grid, table, pos, target) {
                MergeOutcome::Overflow(key) => {
                    grid.clear(pos);
                    grid.clear(target);
                    out.points += score_for_key(table, &key);
                    out.push(MoveEvent::Annihilate {
                        first: target,
                        second: pos,
                        key: key.to_string(),
                    });
                    merged = true;
                    continue;
                }
                MergeOutcome::Merged(value) => {
                    let rendered = serialize(&value);
                    grid.clear(pos);
                    if let Some(dest) = grid.get_mut(target) {
                        dest.value = rendered.clone();
                    }
                    out.points += score_for_key(table, value.key());
                    out.push(MoveEvent::MergeInto {
                        from: pos,
                        to: target,
                        value: rendered,
                    });
                    merged = true;
                    continue;
                }
                MergeOutcome::Incompatible => merge_slot = Some(step),
            }
        }

        if merge_slot.is_none() {
            merge_slot = Some(step);
        }

        // Rest just before the nearest occupied cell toward the wall.
        let rest = (0..step)
            .rev()
            .find(|&s| grid.is_occupied(line.position(s)))
            .map_or(0, |s| s + 1);

        if rest != step {
            let to = line.position(rest);
            grid.relocate(pos, to);
            out.push(MoveEvent::Slide { from: pos, to });
            if !merged {
                merge_slot = Some(rest);
            }
        }
    }
}

/// Resolve the tile at `moving` against the tile at `target`.
fn resolve_cells(
    grid: &Grid,
    table: &CombinationTable,
    moving: Position,
    target: Position,
) -> MergeOutcome {
    match (grid.get(moving), grid.get(target)) {
        (Some(a), Some(b)) => try_merge(table, &a.value, &b.value),
        _ => MergeOutcome::Incompatible,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HR: &str = "\u{1FAF1}";
    const HR2: &str = "\u{1FAF1}\u{1F3FC}";
    const HR3: &str = "\u{1FAF1}\u{1F3FD}";
    const HR5: &str = "\u{1FAF1}\u{1F3FF}";
    const HL: &str = "\u{1FAF2}";
    const MAN: &str = "\u{1F468}";
    const WR: &str = "\u{1F527}";
    const PAN: &str = "\u{1F373}";

    fn table() -> CombinationTable {
        CombinationTable::standard()
    }

    fn row(values: &[Option<&str>]) -> Grid {
        // A square grid whose first row is `values`, everything else empty.
        let n = values.len();
        let mut grid = Grid::new(n).unwrap();
        for (x, v) in values.iter().enumerate() {
            if let Some(v) = v {
                grid.set(Position::new(x, 0), crate::grid::Tile::new(*v));
            }
        }
        grid
    }

    fn row_values(grid: &Grid) -> Vec<Option<String>> {
        (0..grid.size())
            .map(|x| grid.get(Position::new(x, 0)).map(|t| t.value.clone()))
            .collect()
    }

    fn s(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_line_positions_start_at_leading_wall() {
        assert_eq!(Line::new(Direction::Left, 2, 4).position(0), Position::new(0, 2));
        assert_eq!(Line::new(Direction::Right, 2, 4).position(0), Position::new(3, 2));
        assert_eq!(Line::new(Direction::Up, 1, 4).position(3), Position::new(1, 3));
        assert_eq!(Line::new(Direction::Down, 1, 4).position(3), Position::new(1, 0));
    }

    #[test]
    fn test_empty_line_does_nothing() {
        let mut grid = Grid::new(4).unwrap();
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert!(!out.changed);
        assert!(out.events.is_empty());
    }

    #[test]
    fn test_single_tile_slides_to_wall() {
        let mut grid = row(&[None, None, Some(HR), None]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert_eq!(row_values(&grid), vec![s(HR), None, None, None]);
        assert_eq!(
            out.events,
            vec![MoveEvent::Slide {
                from: Position::new(2, 0),
                to: Position::new(0, 0)
            }]
        );
        assert_eq!(out.points, 0);
    }

    #[test]
    fn test_tile_already_at_wall_does_not_change_board() {
        let mut grid = row(&[Some(HR), None, None]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert!(!out.changed);
    }

    #[test]
    fn test_two_equal_tiles_merge_toward_each_other() {
        let mut grid = row(&[None, Some(HR), None, Some(HR)]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert_eq!(row_values(&grid), vec![s(HR2), None, None, None]);
        assert_eq!(
            out.events,
            vec![
                MoveEvent::Slide {
                    from: Position::new(1, 0),
                    to: Position::new(0, 0)
                },
                MoveEvent::MergeInto {
                    from: Position::new(3, 0),
                    to: Position::new(0, 0),
                    value: HR2.to_string()
                },
            ]
        );
        assert_eq!(out.points, 1);
    }

    #[test]
    fn test_three_equal_tiles_merge_first_two_only() {
        let mut grid = row(&[Some(HR), Some(HR), Some(HR), None, None]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert_eq!(row_values(&grid), vec![s(HR2), s(HR), None, None, None]);
        assert_eq!(out.merges(), 1);
        assert_eq!(out.slides(), 1);
        assert_eq!(
            out.events[0],
            MoveEvent::MergeInto {
                from: Position::new(1, 0),
                to: Position::new(0, 0),
                value: HR2.to_string()
            }
        );
    }

    #[test]
    fn test_three_equal_tiles_moving_right() {
        let mut grid = row(&[Some(HR), Some(HR), Some(HR), None, None]);
        let out = collapse(&mut grid, &table(), Direction::Right);
        assert_eq!(row_values(&grid), vec![None, None, None, s(HR), s(HR2)]);
        assert_eq!(out.merges(), 1);
        assert_eq!(out.slides(), 2);
    }

    #[test]
    fn test_at_most_one_merge_per_line() {
        let mut grid = row(&[Some(HR), Some(HR), Some(HL), Some(HL)]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert_eq!(out.merges(), 1);
        assert_eq!(row_values(&grid), vec![s(HR2), s(HL), s(HL), None]);
    }

    #[test]
    fn test_incompatible_neighbour_hands_slot_to_next_tile() {
        // cooking and wrench never merge; wrench then absorbs the man.
        let mut grid = row(&[Some(PAN), Some(WR), Some(MAN)]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        let man_with_wrench = "\u{1F468}\u{1F3FB}\u{200D}\u{1F527}";
        assert_eq!(row_values(&grid), vec![s(PAN), s(man_with_wrench), None]);
        assert_eq!(out.points, 5);
    }

    #[test]
    fn test_overflow_annihilates_both_tiles() {
        let mut grid = row(&[Some(HR5), Some(HR3), Some(HL)]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert_eq!(row_values(&grid), vec![s(HL), None, None]);
        assert_eq!(
            out.events,
            vec![
                MoveEvent::Annihilate {
                    first: Position::new(0, 0),
                    second: Position::new(1, 0),
                    key: "1FAF1".to_string()
                },
                MoveEvent::Slide {
                    from: Position::new(2, 0),
                    to: Position::new(0, 0)
                },
            ]
        );
        assert_eq!(out.points, 1);
        assert!(out.changed);
    }

    #[test]
    fn test_columns_collapse_like_rows() {
        let mut grid = Grid::new(3).unwrap();
        grid.set(Position::new(1, 0), crate::grid::Tile::new(HR));
        grid.set(Position::new(1, 2), crate::grid::Tile::new(HR));
        let out = collapse(&mut grid, &table(), Direction::Down);
        assert_eq!(grid.get(Position::new(1, 2)).map(|t| t.value.as_str()), Some(HR2));
        assert_eq!(grid.occupied(), 1);
        assert_eq!(out.merges(), 1);

        let out = collapse(&mut grid, &table(), Direction::Up);
        assert_eq!(grid.get(Position::new(1, 0)).map(|t| t.value.as_str()), Some(HR2));
        assert_eq!(out.slides(), 1);
    }

    #[test]
    fn test_every_line_is_collapsed() {
        let mut grid = Grid::from_rows(&[
            &[None, Some(HR), None],
            &[None, None, Some(HL)],
            &[Some(WR), None, Some(WR)],
        ]);
        let out = collapse(&mut grid, &table(), Direction::Left);
        assert_eq!(
            grid,
            Grid::from_rows(&[
                &[Some(HR), None, None],
                &[Some(HL), None, None],
                &[Some(WR), Some(WR), None],
            ])
        );
        assert_eq!(out.slides(), 3);
        assert_eq!(out.merges(), 0);
    }
}
