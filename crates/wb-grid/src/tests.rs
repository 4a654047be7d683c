//! Unit tests for wb-grid.
//!
//! All tests build small grids by hand so they run without map files, except
//! the loader tests, which write to a temp dir.

#[cfg(test)]
mod helpers {
    use crate::{Grid, GridBuilder};

    /// 3×3 grid, every cell linked to its cardinal neighbours, unit weight.
    pub fn cardinal_3x3() -> Grid {
        GridBuilder::cardinal(3, 3).build().unwrap()
    }
}

// ── Construction & connections ────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use wb_core::Position;

    use crate::{GridBuilder, GridError};

    #[test]
    fn empty_grid_has_cells_but_no_edges() {
        let grid = GridBuilder::new(4, 2).build().unwrap();
        assert_eq!(grid.cell_count(), 8);
        assert_eq!(grid.connection_count(), 0);
        assert_eq!((grid.width(), grid.height()), (4, 2));
    }

    #[test]
    fn cardinal_edge_count() {
        // 3x3: 12 undirected adjacencies → 24 directed connections.
        let grid = super::helpers::cardinal_3x3();
        assert_eq!(grid.connection_count(), 24);
        let centre = grid.get_cell(Position::new(1, 1)).unwrap();
        assert_eq!(centre.connections().len(), 4);
        let corner = grid.get_cell(Position::new(0, 0)).unwrap();
        assert_eq!(corner.connections().len(), 2);
    }

    #[test]
    fn cardinal_neighbor_order_is_left_right_up_down() {
        let grid = super::helpers::cardinal_3x3();
        let n: Vec<_> = grid.get_cell(Position::new(1, 1)).unwrap().neighbors().collect();
        assert_eq!(
            n,
            vec![Position::new(0, 1), Position::new(2, 1), Position::new(1, 0), Position::new(1, 2)]
        );
    }

    #[test]
    fn edge_to_missing_cell_names_source() {
        let mut b = GridBuilder::new(2, 2);
        b.add_directed_edge(Position::new(1, 1), Position::new(2, 1), 1);
        match b.build() {
            Err(GridError::Validation { cell, .. }) => assert_eq!(cell, Position::new(1, 1)),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn max_load_override() {
        let mut b = GridBuilder::new(2, 1).max_load(3);
        b.cell_max_load(Position::new(1, 0), 1);
        let grid = b.build().unwrap();
        assert_eq!(grid.get_cell(Position::new(0, 0)).unwrap().max_load(), 3);
        assert_eq!(grid.get_cell(Position::new(1, 0)).unwrap().max_load(), 1);
    }
}

#[cfg(test)]
mod connections {
    use wb_core::Position;

    use crate::{Grid, GridError};

    #[test]
    fn connect_appends_directed_edge() {
        let mut grid = Grid::new(2, 1, 10);
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        grid.connect(a, b, 4).unwrap();
        let conn = grid.get_cell(a).unwrap().connection_to(b).copied().unwrap();
        assert_eq!((conn.from, conn.to, conn.weight), (a, b, 4));
        // No automatic reverse edge.
        assert!(grid.connections(b).is_empty());
    }

    #[test]
    fn disconnect_removes_only_that_direction() {
        let mut grid = Grid::new(2, 1, 10);
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        grid.connect_both(a, b, 1).unwrap();
        assert!(grid.disconnect(a, b).unwrap());
        assert!(!grid.get_cell(a).unwrap().neighbors().any(|p| p == b));
        assert!(grid.get_cell(b).unwrap().neighbors().any(|p| p == a));
        // Second disconnect is a no-op.
        assert!(!grid.disconnect(a, b).unwrap());
    }

    #[test]
    fn zero_weight_rejected() {
        let mut grid = Grid::new(2, 1, 10);
        let err = grid.connect(Position::new(0, 0), Position::new(1, 0), 0);
        assert!(matches!(err, Err(GridError::InvalidWeight { .. })));
    }

    #[test]
    fn connect_off_grid_is_out_of_bounds() {
        let mut grid = Grid::new(2, 1, 10);
        let err = grid.connect(Position::new(0, 0), Position::new(5, 0), 1);
        assert!(matches!(err, Err(GridError::OutOfBounds(p)) if p == Position::new(5, 0)));
    }
}

// ── Bounds & occupancy ────────────────────────────────────────────────────────

#[cfg(test)]
mod occupancy {
    use wb_core::{GoalId, PackageId, Position, RobotId};

    use crate::{Grid, GridError};

    #[test]
    fn bounds() {
        let grid = Grid::new(3, 2, 10);
        assert!(grid.is_within_bounds(Position::new(0, 0)));
        assert!(grid.is_within_bounds(Position::new(2, 1)));
        assert!(!grid.is_within_bounds(Position::new(3, 0)));
        assert!(!grid.is_within_bounds(Position::new(0, -1)));
    }

    #[test]
    fn get_cell_out_of_bounds_does_not_wrap() {
        let grid = Grid::new(3, 3, 10);
        let err = grid.get_cell(Position::new(-1, 0)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds(p) if p == Position::new(-1, 0)));
        assert!(grid.get_cell(Position::new(3, 0)).is_err());
    }

    #[test]
    fn one_robot_per_cell() {
        let mut grid = Grid::new(2, 2, 10);
        let p = Position::new(1, 1);
        assert!(grid.add_robot(p, RobotId(0)));
        assert!(!grid.add_robot(p, RobotId(1)));
        assert_eq!(grid.get_cell(p).unwrap().robot(), Some(RobotId(0)));
        assert!(!grid.is_passable(p));
        assert!(grid.is_passable_for(p, Some(RobotId(0))));
        assert!(!grid.is_passable_for(p, Some(RobotId(1))));
        assert_eq!(grid.remove_robot(p), Some(RobotId(0)));
        assert_eq!(grid.remove_robot(p), None);
        assert!(grid.is_passable(p));
    }

    #[test]
    fn off_grid_add_fails_quietly() {
        let mut grid = Grid::new(2, 2, 10);
        let off = Position::new(9, 9);
        assert!(!grid.add_robot(off, RobotId(0)));
        assert!(!grid.add_package(off, PackageId(0)));
        assert!(!grid.add_goal(off, GoalId(0)));
        assert!(!grid.is_passable(off));
    }

    #[test]
    fn package_capacity_respected() {
        let mut grid = Grid::new(1, 1, 2);
        let p = Position::new(0, 0);
        assert!(grid.add_package(p, PackageId(0)));
        assert!(grid.add_package(p, PackageId(1)));
        assert!(!grid.add_package(p, PackageId(2)));
        assert_eq!(grid.get_cell(p).unwrap().packages().len(), 2);
        assert!(!grid.get_cell(p).unwrap().can_load_package());
    }

    #[test]
    fn capacity_cannot_drop_below_current_load() {
        let mut grid = Grid::new(1, 1, 3);
        let p = Position::new(0, 0);
        grid.add_package(p, PackageId(0));
        grid.add_package(p, PackageId(1));

        assert!(matches!(grid.set_max_load(p, 1), Err(GridError::Validation { .. })));
        assert_eq!(grid.get_cell(p).unwrap().max_load(), 3);

        grid.set_max_load(p, 2).unwrap();
        assert_eq!(grid.get_cell(p).unwrap().max_load(), 2);
        assert!(!grid.get_cell(p).unwrap().can_load_package());
    }

    #[test]
    fn packages_pop_fifo() {
        let mut grid = Grid::new(1, 1, 5);
        let p = Position::new(0, 0);
        grid.add_package(p, PackageId(4));
        grid.add_package(p, PackageId(2));
        assert_eq!(grid.pop_package(p), Some(PackageId(4)));
        assert!(grid.remove_package(p, PackageId(2)));
        assert!(!grid.remove_package(p, PackageId(2)));
        assert_eq!(grid.pop_package(p), None);
    }

    #[test]
    fn one_goal_per_cell() {
        let mut grid = Grid::new(1, 1, 5);
        let p = Position::new(0, 0);
        assert!(grid.add_goal(p, GoalId(0)));
        assert!(!grid.add_goal(p, GoalId(1)));
        assert_eq!(grid.remove_goal(p), Some(GoalId(0)));
        assert!(!grid.get_cell(p).unwrap().has_goal());
    }

    #[test]
    fn reset_clears_occupants_keeps_connections() {
        let mut grid = super::helpers::cardinal_3x3();
        let p = Position::new(1, 1);
        grid.add_robot(p, RobotId(0));
        grid.add_package(p, PackageId(0));
        grid.add_goal(p, GoalId(0));
        let edges = grid.connection_count();

        grid.reset();

        let cell = grid.get_cell(p).unwrap();
        assert!(!cell.has_robot() && !cell.has_package() && !cell.has_goal());
        assert_eq!(grid.connection_count(), edges);
    }
}

// ── Map descriptors ───────────────────────────────────────────────────────────

#[cfg(test)]
mod descriptor {
    use std::io::Write;

    use wb_core::{GoalId, PackageId, Position, RobotId};

    use crate::{load_map_json, load_map_reader, GridError, MapDescriptor, Placements};

    const SMALL_MAP: &str = r#"{
        "width": 2,
        "height": 1,
        "cells": [
            {
                "position": { "x": 0, "y": 0 },
                "connections": [ { "to_cell": { "x": 1, "y": 0 }, "weight": 2 } ],
                "robot": { "id": 7 },
                "goal": null,
                "max_load": 4,
                "packages": []
            },
            {
                "position": { "x": 1, "y": 0 },
                "connections": [ { "toCell": { "x": 0, "y": 0 }, "weight": 2 } ],
                "robot": null,
                "goal": { "id": 1 },
                "maxLoad": 3,
                "packages": [ { "id": 5 }, { "id": 6 } ]
            }
        ]
    }"#;

    #[test]
    fn parses_both_spellings() {
        let map = MapDescriptor::from_json_str(SMALL_MAP).unwrap();
        assert_eq!(map.cells[0].max_load, 4);
        assert_eq!(map.cells[1].max_load, 3);
        assert_eq!(map.cells[1].connections[0].to_cell, Position::new(0, 0));
    }

    #[test]
    fn into_grid_builds_connections_and_placements() {
        let (grid, placements) = MapDescriptor::from_json_str(SMALL_MAP).unwrap().into_grid().unwrap();
        let a = Position::new(0, 0);
        let b = Position::new(1, 0);
        assert_eq!(grid.get_cell(a).unwrap().connection_to(b).unwrap().weight, 2);
        assert_eq!(grid.get_cell(b).unwrap().max_load(), 3);
        assert_eq!(placements.robots, vec![(RobotId(7), a, None)]);
        assert_eq!(placements.goals, vec![(GoalId(1), b)]);
        assert_eq!(placements.packages, vec![(PackageId(5), b), (PackageId(6), b)]);
        // Occupancy is left to the scheduler.
        assert!(!grid.get_cell(a).unwrap().has_robot());
    }

    #[test]
    fn dangling_connection_is_validation_error() {
        let json = r#"{ "width": 1, "height": 1, "cells": [
            { "position": {"x":0,"y":0}, "connections": [ {"to_cell": {"x":3,"y":0}, "weight": 1} ],
              "max_load": 10, "packages": [] } ] }"#;
        let err = MapDescriptor::from_json_str(json).unwrap().into_grid().unwrap_err();
        match err {
            GridError::Validation { cell, reason } => {
                assert_eq!(cell, Position::new(0, 0));
                assert!(reason.contains("(3, 0)"), "{reason}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn duplicate_cell_record_rejected() {
        let mut map = MapDescriptor::cardinal(2, 1);
        let dup = map.cells[0].clone();
        map.cells.push(dup);
        assert!(matches!(map.into_grid(), Err(GridError::Validation { .. })));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = load_map_reader("{ not json".as_bytes()).unwrap_err();
        assert!(matches!(err, GridError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_map_json(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, GridError::Io(_)));
    }

    #[test]
    fn generator_output_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default_map.json");
        let generated = MapDescriptor::cardinal(4, 3);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(generated.to_json_string().unwrap().as_bytes()).unwrap();
        drop(f);

        let loaded = load_map_json(&path).unwrap();
        assert_eq!(loaded, generated);
        let (grid, placements) = loaded.into_grid().unwrap();
        assert_eq!(grid.connection_count(), 2 * (3 * 3 + 4 * 2));
        assert_eq!(placements, Placements::default());
    }
}
