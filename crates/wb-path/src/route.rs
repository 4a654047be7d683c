//! Helpers over finished routes.

use wb_core::Position;
use wb_grid::Grid;

/// Ordered positions from start to end inclusive.  Empty means "no route".
pub type Path = Vec<Position>;

/// Sum of connection weights along `path`, or `None` if some hop has no
/// connection.  A single-position path costs 0.
pub fn path_cost(grid: &Grid, path: &[Position]) -> Option<u64> {
    path.windows(2).try_fold(0u64, |acc, hop| {
        let conn = grid.get_cell(hop[0]).ok()?.connection_to(hop[1])?;
        Some(acc + u64::from(conn.weight))
    })
}

/// `true` if every consecutive pair of `path` is joined by a connection.
pub fn is_connected_route(grid: &Grid, path: &[Position]) -> bool {
    path_cost(grid, path).is_some()
}

/// Append `segment` to `total`, dropping the segment's first position when it
/// repeats the current last position.
pub fn append_segment(total: &mut Path, segment: Path) {
    let skip = match (total.last(), segment.first()) {
        (Some(last), Some(first)) if last == first => 1,
        _ => 0,
    };
    total.extend(segment.into_iter().skip(skip));
}
