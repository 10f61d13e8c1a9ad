use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, each with a [`Content`] and a [`Cover`].
///
/// Cells are addressed either by `(x, y)` or by their row-major [`CellIndex`]. Index based
/// accessors panic when given an index outside the board, coordinate based queries return
/// `None` instead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    content: Array2<Content>,
    cover: Array2<Cover>,
}

impl Board {
    /// All cells covered and empty.
    pub fn new(size: Coord2) -> Self {
        let shape = size.to_nd_index();
        Self {
            content: Array2::default(shape),
            cover: Array2::default(shape),
        }
    }

    pub fn size(&self) -> Coord2 {
        (self.width(), self.height())
    }

    pub fn width(&self) -> Coord {
        self.content.ncols().try_into().unwrap_or(Coord::MAX)
    }

    pub fn height(&self) -> Coord {
        self.content.nrows().try_into().unwrap_or(Coord::MAX)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width(), self.height())
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        x < self.width() && y < self.height()
    }

    pub fn index(&self, coords: Coord2) -> Option<CellIndex> {
        self.contains(coords)
            .then(|| usize::from(coords.1) * usize::from(self.width()) + usize::from(coords.0))
    }

    pub fn coords(&self, index: CellIndex) -> Option<Coord2> {
        let width = usize::from(self.width());
        if index >= self.content.len() {
            return None;
        }
        let x = (index % width).try_into().ok()?;
        let y = (index / width).try_into().ok()?;
        Some((x, y))
    }

    pub fn content(&self, index: CellIndex) -> Content {
        self.content[self.nd_index(index)]
    }

    pub fn set_content(&mut self, index: CellIndex, content: Content) {
        let pos = self.nd_index(index);
        self.content[pos] = content;
    }

    pub fn cover(&self, index: CellIndex) -> Cover {
        self.cover[self.nd_index(index)]
    }

    pub fn set_cover(&mut self, index: CellIndex, cover: Cover) {
        let pos = self.nd_index(index);
        self.cover[pos] = cover;
    }

    pub fn visible_kind(&self, coords: Coord2) -> Option<VisibleKind> {
        let index = self.index(coords)?;
        Some(VisibleKind::from_cell(self.content(index), self.cover(index)))
    }

    pub fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// Indices of the neighbors of `coords` matching `predicate`, and whether there was any.
    ///
    /// Pure query: used for hover highlighting as well as flag counting.
    pub fn neighbors_of_type<F>(&self, coords: Coord2, mut predicate: F) -> (Vec<CellIndex>, bool)
    where
        F: FnMut(Content, Cover) -> bool,
    {
        let matching: Vec<_> = self
            .neighbor_indices(coords)
            .filter(|&index| predicate(self.content(index), self.cover(index)))
            .collect();
        let non_empty = !matching.is_empty();
        (matching, non_empty)
    }

    pub fn count_neighbors<F>(&self, coords: Coord2, mut predicate: F) -> u8
    where
        F: FnMut(Content, Cover) -> bool,
    {
        let count = self
            .neighbor_indices(coords)
            .filter(|&index| predicate(self.content(index), self.cover(index)))
            .count();
        // at most 8 neighbors
        count as u8
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |content, _| content.is_mine())
    }

    /// Every cell as `(index, content, cover)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (CellIndex, Content, Cover)> + '_ {
        self.content
            .iter()
            .zip(self.cover.iter())
            .enumerate()
            .map(|(index, (&content, &cover))| (index, content, cover))
    }

    pub fn mine_count(&self) -> CellCount {
        let count = self
            .content
            .iter()
            .filter(|content| content.is_mine())
            .count();
        count.try_into().unwrap_or(CellCount::MAX)
    }

    pub(crate) fn clear_content(&mut self) {
        self.content.fill(Content::ZERO);
    }

    pub(crate) fn reveal_all(&mut self) {
        self.cover.fill(Cover::Revealed);
    }

    pub(crate) fn map_content<F>(&mut self, mut f: F)
    where
        F: FnMut(Content, Cover) -> Content,
    {
        for (content, &cover) in self.content.iter_mut().zip(self.cover.iter()) {
            *content = f(*content, cover);
        }
    }

    fn neighbor_indices(&self, coords: Coord2) -> impl Iterator<Item = CellIndex> + '_ {
        self.neighbors(coords)
            .filter_map(|pos| self.index(pos))
    }

    fn nd_index(&self, index: CellIndex) -> [usize; 2] {
        let width = self.content.ncols();
        [index / width, index % width]
    }
}
