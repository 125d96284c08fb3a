/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts, total-cell counts, and linear indices.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Row-major linear index, `row * cols + col`.
pub type CellIndex = CellCount;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a board of `size`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// Linear index of `coords` on a board of `size`, caller guarantees bounds.
pub const fn to_linear_index((row, col): Coord2, (_, cols): Coord2) -> CellIndex {
    mult(row, cols) + col as CellIndex
}

/// Inverse of [`to_linear_index`], `None` when `index` is past the last cell.
pub fn from_linear_index(index: CellIndex, size: Coord2) -> Option<Coord2> {
    let (rows, cols) = size;
    if cols == 0 || index >= mult(rows, cols) {
        return None;
    }
    let cols = CellIndex::from(cols);
    let row = (index / cols).try_into().ok()?;
    let col = (index % cols).try_into().ok()?;
    Some((row, col))
}

/// Moore neighborhood of a cell clipped to the board, in row-major order.
///
/// Walks the 3x3 window around `center` and skips the center itself.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    first_col: Coord,
    last: Coord2,
    next: Option<Coord2>,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        let (row, col) = center;
        let (rows, cols) = bounds;
        let first = (row.saturating_sub(1), col.saturating_sub(1));
        let last = (
            row.saturating_add(1).min(rows.saturating_sub(1)),
            col.saturating_add(1).min(cols.saturating_sub(1)),
        );

        Self {
            center,
            first_col: first.1,
            last,
            next: in_bounds(center, bounds).then_some(first),
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current = self.next?;
            self.next = if current.1 < self.last.1 {
                Some((current.0, current.1 + 1))
            } else if current.0 < self.last.0 {
                Some((current.0 + 1, self.first_col))
            } else {
                None
            };

            if current != self.center {
                return Some(current);
            }
        }
    }
}
