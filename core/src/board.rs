use alloc::collections::BTreeSet;
use ndarray::Array2;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// The tile grid, its adjacency graph, and the current mine layout.
///
/// Tiles live in one dense `width × height` buffer; tile `(x, y)` sits at
/// index `x * height + y`. Adjacency and positions are computed once in
/// [`Board::new`] and survive every round reset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    tiles: Array2<Tile>,
    layout: Layout,
    mine_count: CellCount,
}

impl Board {
    pub fn new(size: Coord2) -> Result<Self> {
        Self::with_layout(size, Layout::CLASSIC)
    }

    pub fn with_layout(size: Coord2, layout: Layout) -> Result<Self> {
        let (width, height) = size;
        if width == 0 || height == 0 {
            return Err(GameError::InvalidSize);
        }

        let tiles = Array2::from_shape_fn(size.to_nd_index(), |(x, y)| {
            // both fit in Coord, the shape came from a Coord2
            let coords = (x as Coord, y as Coord);
            let mut neighbors = [None; 6];
            for (dir, pos) in iter_hex_neighbors(coords, size) {
                neighbors[dir.index()] = Some(linear_index(pos, height));
            }
            Tile {
                neighbors,
                position: layout.tile_center(coords),
                ..Tile::default()
            }
        });
        log::debug!("Built {}x{} hex board", width, height);

        Ok(Self {
            tiles,
            layout,
            mine_count: 0,
        })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.tiles.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn len(&self) -> TileIndex {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn total_tiles(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn validate_index(&self, index: TileIndex) -> Result<TileIndex> {
        if index < self.len() {
            Ok(index)
        } else {
            Err(GameError::InvalidTile)
        }
    }

    pub fn index_of(&self, coords: Coord2) -> Result<TileIndex> {
        let (width, height) = self.size();
        if coords.0 < width && coords.1 < height {
            Ok(linear_index(coords, height))
        } else {
            Err(GameError::InvalidTile)
        }
    }

    pub fn coords_of(&self, index: TileIndex) -> Result<Coord2> {
        let index = self.validate_index(index)?;
        Ok(self.coords_unchecked(index))
    }

    pub fn tile(&self, index: TileIndex) -> Result<&Tile> {
        let index = self.validate_index(index)?;
        Ok(self.at(index))
    }

    /// Tiles in dense-index order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Clears every tile, then marks `mine_count` distinct random tiles as mines.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, mine_count: CellCount, rng: &mut R) -> Result<()> {
        if mine_count >= self.total_tiles() {
            return Err(GameError::TooManyMines);
        }

        self.clear_round();
        let len = self.len();
        let mut placed = 0;
        while placed < mine_count {
            let index = rng.random_range(0..len);
            let tile = self.at_mut(index);
            if tile.is_mine {
                continue;
            }
            tile.is_mine = true;
            placed += 1;
        }
        self.mine_count = mine_count;
        log::debug!("Placed {} mines on {} tiles", mine_count, len);
        Ok(())
    }

    /// Clears every tile, then marks exactly the given tiles as mines.
    pub fn place_mines_at(&mut self, mines: &[TileIndex]) -> Result<()> {
        let mut distinct = BTreeSet::new();
        for &index in mines {
            distinct.insert(self.validate_index(index)?);
        }
        if distinct.len() >= self.len() {
            return Err(GameError::TooManyMines);
        }

        self.clear_round();
        for &index in &distinct {
            self.at_mut(index).is_mine = true;
        }
        self.mine_count = distinct.len() as CellCount;
        Ok(())
    }

    pub fn neighbor_mine_count(&self, index: TileIndex) -> Result<u8> {
        let index = self.validate_index(index)?;
        Ok(self.count_neighbors(index, |tile| tile.is_mine))
    }

    pub fn neighbor_flag_count(&self, index: TileIndex) -> Result<u8> {
        let index = self.validate_index(index)?;
        Ok(self.count_neighbors(index, |tile| tile.is_flagged))
    }

    pub fn flag_count(&self) -> CellCount {
        self.tiles.iter().filter(|tile| tile.is_flagged).count() as CellCount
    }

    /// Mines minus flags; negative once the player over-flags.
    pub fn mines_remaining(&self) -> isize {
        (self.mine_count as isize) - (self.flag_count() as isize)
    }

    pub fn all_safe_discovered(&self) -> bool {
        self.tiles
            .iter()
            .all(|tile| tile.is_mine || tile.is_discovered)
    }

    /// Nearest tile whose centre is within the layout's tile radius of `point`.
    pub fn tile_at_point(&self, point: Point) -> Option<TileIndex> {
        let (index, distance) = self
            .tiles
            .iter()
            .map(|tile| tile.position.distance_squared(point))
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;
        (distance < self.layout.hit_radius_squared()).then_some(index)
    }

    pub(crate) fn at(&self, index: TileIndex) -> &Tile {
        &self.tiles[self.coords_unchecked(index).to_nd_index()]
    }

    pub(crate) fn at_mut(&mut self, index: TileIndex) -> &mut Tile {
        let nd_index = self.coords_unchecked(index).to_nd_index();
        &mut self.tiles[nd_index]
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    pub(crate) fn count_neighbors(&self, index: TileIndex, pred: impl Fn(&Tile) -> bool) -> u8 {
        let mut count = 0;
        for neighbor in self.at(index).neighbors() {
            if pred(self.at(neighbor)) {
                count += 1;
            }
        }
        count
    }

    fn coords_unchecked(&self, index: TileIndex) -> Coord2 {
        let height = self.tiles.dim().1;
        ((index / height) as Coord, (index % height) as Coord)
    }

    fn clear_round(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.clear();
        }
        self.mine_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    fn board(size: Coord2) -> Board {
        Board::new(size).unwrap()
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(Board::new((0, 4)), Err(GameError::InvalidSize));
        assert_eq!(Board::new((4, 0)), Err(GameError::InvalidSize));
    }

    #[test]
    fn dense_index_is_column_major_by_x() {
        let board = board((4, 3));

        assert_eq!(board.index_of((0, 2)).unwrap(), 2);
        assert_eq!(board.index_of((2, 1)).unwrap(), 7);
        assert_eq!(board.coords_of(7).unwrap(), (2, 1));
        assert_eq!(board.index_of((4, 0)), Err(GameError::InvalidTile));
        assert_eq!(board.coords_of(12), Err(GameError::InvalidTile));
    }

    #[test]
    fn adjacency_is_symmetric_with_opposite_directions() {
        let board = board((7, 6));

        for index in 0..board.len() {
            let tile = board.tile(index).unwrap();
            for dir in Direction::ALL {
                if let Some(neighbor) = tile.neighbor(dir) {
                    let back = board.tile(neighbor).unwrap().neighbor(dir.opposite());
                    assert_eq!(back, Some(index));
                }
            }
        }
    }

    #[test]
    fn neighbor_counts_match_position() {
        let board = board((5, 4));
        let degree = |coords| board.tile(board.index_of(coords).unwrap()).unwrap().neighbors().count();

        // even-row corners lean right, odd-row corners lean left
        assert_eq!(degree((0, 0)), 3);
        assert_eq!(degree((4, 0)), 2);
        assert_eq!(degree((0, 3)), 2);
        assert_eq!(degree((4, 3)), 3);
        assert_eq!(degree((2, 1)), 6);
        assert_eq!(degree((2, 0)), 4);

        for tile in board.tiles() {
            let count = tile.neighbors().count();
            assert!((2..=6).contains(&count));
        }
    }

    #[test]
    fn place_mines_marks_exact_distinct_count() {
        let mut board = board((6, 5));
        let mut rng = SmallRng::seed_from_u64(7);

        board.place_mines(12, &mut rng).unwrap();
        assert_eq!(board.tiles().filter(|tile| tile.is_mine()).count(), 12);
        assert_eq!(board.mine_count(), 12);

        board.place_mines(29, &mut rng).unwrap();
        assert_eq!(board.tiles().filter(|tile| tile.is_mine()).count(), 29);
    }

    #[test]
    fn place_mines_clears_previous_round() {
        let mut board = board((3, 3));
        let mut rng = SmallRng::seed_from_u64(1);
        board.place_mines_at(&[0, 1]).unwrap();
        board.at_mut(4).is_discovered = true;
        board.at_mut(5).is_flagged = true;

        board.place_mines(0, &mut rng).unwrap();

        assert!(board.tiles().all(|tile| !tile.is_mine() && !tile.is_discovered() && !tile.is_flagged()));
    }

    #[test]
    fn place_mines_refuses_full_board() {
        let mut board = board((2, 2));
        let mut rng = SmallRng::seed_from_u64(3);

        assert_eq!(board.place_mines(4, &mut rng), Err(GameError::TooManyMines));
        assert_eq!(board.place_mines_at(&[0, 1, 2, 3]), Err(GameError::TooManyMines));
        assert_eq!(board.place_mines_at(&[9]), Err(GameError::InvalidTile));
    }

    #[test]
    fn rejected_placement_keeps_previous_layout() {
        let mut board = board((2, 2));
        board.place_mines_at(&[0]).unwrap();
        board.at_mut(3).is_discovered = true;

        assert_eq!(board.place_mines_at(&[0, 1, 2, 3, 3]), Err(GameError::TooManyMines));

        assert_eq!(board.mine_count(), 1);
        assert!(board.tile(0).unwrap().is_mine());
        assert!(board.tile(3).unwrap().is_discovered());
    }

    #[test]
    fn place_mines_at_ignores_duplicates() {
        let mut board = board((3, 3));

        board.place_mines_at(&[4, 4, 2]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert!(board.tile(4).unwrap().is_mine());
    }

    #[test]
    fn neighbor_counts_only_look_at_present_neighbors() {
        let mut board = board((3, 3));
        // (1, 1) is the only tile with a full ring
        board.place_mines_at(&[0, 1, 2]).unwrap();
        board.at_mut(3).is_flagged = true;

        let center = board.index_of((1, 1)).unwrap();
        assert_eq!(board.neighbor_mine_count(center).unwrap(), 3);
        assert_eq!(board.neighbor_flag_count(center).unwrap(), 1);
        assert_eq!(board.neighbor_mine_count(9), Err(GameError::InvalidTile));
    }

    #[test]
    fn mines_remaining_goes_negative_when_over_flagged() {
        let mut board = board((3, 3));
        board.place_mines_at(&[0]).unwrap();
        for index in [1, 2, 3] {
            board.at_mut(index).is_flagged = true;
        }

        assert_eq!(board.flag_count(), 3);
        assert_eq!(board.mines_remaining(), -2);
    }

    #[test]
    fn tile_at_point_picks_nearest_within_radius() {
        let board = board((4, 4));
        let target = board.index_of((2, 1)).unwrap();
        let center = board.tile(target).unwrap().position();

        assert_eq!(board.tile_at_point(center), Some(target));
        assert_eq!(board.tile_at_point(Point::new(center.x + 5.0, center.y - 5.0)), Some(target));
        assert_eq!(board.tile_at_point(Point::new(-100.0, -100.0)), None);
    }

    #[test]
    fn positions_follow_layout() {
        let board = board((3, 3));
        let positions: Vec<_> = board.tiles().map(|tile| tile.position()).collect();

        assert_eq!(positions[board.index_of((1, 1)).unwrap()], Layout::CLASSIC.tile_center((1, 1)));
    }
}
