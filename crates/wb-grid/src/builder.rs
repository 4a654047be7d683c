//! Incremental grid construction.

use wb_core::config::DEFAULT_MAX_LOAD;
use wb_core::Position;

use crate::{Grid, GridError, GridResult};

/// Construct a [`Grid`] incrementally, then call [`build`](Self::build).
///
/// Edges may be added in any order; `build()` validates every endpoint and
/// weight and names the offending cell on failure.
///
/// # Example
///
/// ```
/// use wb_core::Position;
/// use wb_grid::GridBuilder;
///
/// let mut b = GridBuilder::new(2, 1);
/// b.add_link(Position::new(0, 0), Position::new(1, 0), 3);
/// let grid = b.build().unwrap();
/// assert_eq!(grid.cell_count(), 2);
/// assert_eq!(grid.connection_count(), 2); // both directions
/// ```
pub struct GridBuilder {
    width:     u32,
    height:    u32,
    max_load:  usize,
    loads:     Vec<(Position, usize)>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:   Position,
    to:     Position,
    weight: u32,
}

impl GridBuilder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_load: DEFAULT_MAX_LOAD,
            loads: Vec::new(),
            raw_edges: Vec::new(),
        }
    }

    /// A grid where every cell links to its in-bounds left, right, up and
    /// down neighbours in both directions with weight 1.
    pub fn cardinal(width: u32, height: u32) -> Self {
        let mut b = Self::new(width, height);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let here = Position::new(x, y);
                for next in here.cardinal_neighbors() {
                    if next.x >= 0 && next.y >= 0 && (next.x as u32) < width && (next.y as u32) < height {
                        b.add_directed_edge(here, next, 1);
                    }
                }
            }
        }
        b
    }

    /// Package capacity for every cell without an explicit override.
    pub fn max_load(mut self, max_load: usize) -> Self {
        self.max_load = max_load;
        self
    }

    /// Override the package capacity of a single cell.
    pub fn cell_max_load(&mut self, pos: Position, max_load: usize) {
        self.loads.push((pos, max_load));
    }

    /// Add a **directed** edge from `from` to `to`.
    pub fn add_directed_edge(&mut self, from: Position, to: Position, weight: u32) {
        self.raw_edges.push(RawEdge { from, to, weight });
    }

    /// Convenience: add edges in **both directions**.
    pub fn add_link(&mut self, a: Position, b: Position, weight: u32) {
        self.add_directed_edge(a, b, weight);
        self.add_directed_edge(b, a, weight);
    }

    /// Consume the builder and produce a [`Grid`].
    pub fn build(self) -> GridResult<Grid> {
        let mut grid = Grid::new(self.width, self.height, self.max_load);

        for (pos, load) in self.loads {
            grid.set_max_load(pos, load).map_err(|_| GridError::Validation {
                cell:   pos,
                reason: "capacity override outside the grid".into(),
            })?;
        }

        for e in self.raw_edges {
            if !grid.is_within_bounds(e.from) {
                return Err(GridError::Validation {
                    cell:   e.from,
                    reason: "connection source outside the grid".into(),
                });
            }
            if !grid.is_within_bounds(e.to) {
                return Err(GridError::Validation {
                    cell:   e.from,
                    reason: format!("connection target {} does not exist", e.to),
                });
            }
            grid.connect(e.from, e.to, e.weight)?;
        }

        Ok(grid)
    }
}
