use itertools::iproduct;
use serde::Serialize;

use crate::resolver::NormalizedRange;

/// A materialized multiplication table.
///
/// Rows are labelled by the v pair and columns by the h pair, both
/// ascending. `cells[r][c] == row_labels[r] * col_labels[c]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Grid {
    row_labels: Vec<i64>,
    col_labels: Vec<i64>,
    cells: Vec<Vec<i64>>,
}

/// The body cells lit while a single body cell is hovered: its whole row
/// and its whole column. Header cells never light up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    pub row: usize,
    pub col: usize,
}

impl Highlight {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row == self.row || col == self.col
    }
}

/// Endpoints of a resolved range lie within `MAX_DOMAIN_MAGNITUDE`, so no
/// product overflows.
pub fn materialize(range: &NormalizedRange) -> Grid {
    let row_labels: Vec<i64> = (range.v_low()..=range.v_high()).collect();
    let col_labels: Vec<i64> = (range.h_low()..=range.h_high()).collect();
    let cells = row_labels
        .iter()
        .map(|r| col_labels.iter().map(|c| r * c).collect())
        .collect();
    Grid {
        row_labels,
        col_labels,
        cells,
    }
}

impl Grid {
    pub fn row_labels(&self) -> &[i64] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[i64] {
        &self.col_labels
    }

    pub fn cells(&self) -> &[Vec<i64>] {
        &self.cells
    }

    pub fn width(&self) -> usize {
        self.col_labels.len()
    }

    pub fn height(&self) -> usize {
        self.row_labels.len()
    }

    pub fn len(&self) -> usize {
        self.width() * self.height()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<i64> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Each row paired with its label.
    pub fn rows(&self) -> impl Iterator<Item = (i64, &[i64])> + '_ {
        self.row_labels
            .iter()
            .copied()
            .zip(self.cells.iter().map(|r| r.as_slice()))
    }

    /// Hovering outside the body (header row, label column, out of bounds)
    /// highlights nothing.
    pub fn hover(&self, row: usize, col: usize) -> Option<Highlight> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        Some(Highlight { row, col })
    }

    pub fn lit_cells(&self, highlight: Highlight) -> Vec<(usize, usize)> {
        iproduct!(0..self.height(), 0..self.width())
            .filter(|&(r, c)| highlight.contains(r, c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{
        resolve, Domain, RangeInput, DEFAULT_DOMAIN, DEFAULT_MAX_CELLS, MAX_DOMAIN_MAGNITUDE,
    };

    fn grid(h_start: i64, h_end: i64, v_start: i64, v_end: i64) -> Grid {
        let range = resolve(
            RangeInput::new(h_start, h_end, v_start, v_end),
            DEFAULT_DOMAIN,
            DEFAULT_MAX_CELLS,
        )
        .unwrap();
        materialize(&range)
    }

    #[test]
    fn rows_follow_v_and_columns_follow_h() {
        let g = grid(1, 2, 10, 12);
        assert_eq!(g.row_labels(), &[10, 11, 12]);
        assert_eq!(g.col_labels(), &[1, 2]);
        assert_eq!(g.height(), 3);
        assert_eq!(g.width(), 2);
        assert_eq!(g.get(2, 1), Some(24));
        assert_eq!(g.get(3, 0), None);
    }

    #[test]
    fn negative_labels_multiply_with_sign() {
        let g = grid(-2, 0, -1, 1);
        assert_eq!(g.cells(), &[vec![2, 1, 0], vec![0, 0, 0], vec![-2, -1, 0]]);
    }

    #[test]
    fn products_at_the_widest_domain_fit() {
        let edge = MAX_DOMAIN_MAGNITUDE;
        let wide = Domain::new(-edge, edge).unwrap();
        let corner = |h: i64, v: i64| {
            let range = resolve(RangeInput::new(h, h, v, v), wide, 1).unwrap();
            materialize(&range).get(0, 0)
        };
        assert_eq!(corner(edge, edge), Some(edge * edge));
        assert_eq!(corner(-edge, edge), Some(-(edge * edge)));
        assert_eq!(corner(-edge, -edge), Some(edge * edge));
    }

    #[test]
    fn hover_lights_row_and_column_only() {
        let g = grid(1, 3, 1, 3);
        let h = g.hover(1, 2).unwrap();
        let lit = g.lit_cells(h);
        assert_eq!(lit, vec![(0, 2), (1, 0), (1, 1), (1, 2), (2, 2)]);
        assert!(g.hover(3, 0).is_none());
        assert!(g.hover(0, 3).is_none());
    }

    #[test]
    fn rows_iterator_pairs_labels() {
        let g = grid(2, 3, 4, 5);
        let rows: Vec<(i64, Vec<i64>)> = g.rows().map(|(l, r)| (l, r.to_vec())).collect();
        assert_eq!(rows, vec![(4, vec![8, 12]), (5, vec![10, 15])]);
    }
}
