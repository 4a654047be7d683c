//! Task planning for robots without a path.
//!
//! Planning only reads the grid and the entity store.  The scheduler applies
//! the resulting [`Assignment`] (path + reservations) in one step, so a plan
//! that cannot be routed never leaves a package reserved.

use wb_core::{GoalId, PackageId, Position, SimConfig};
use wb_entity::{EntityStore, Robot};
use wb_grid::Grid;
use wb_path::{append_segment, finder_for, Path};

use crate::SimResult;

/// A routed task for one robot.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    /// Waypoints after the robot's current cell.  Starts with the current cell
    /// only when the first pickup lies underneath the robot.
    pub path:    Path,
    /// Packages to pick up, in visiting order.  Empty for a carrier heading
    /// straight to a goal.
    pub targets: Vec<PackageId>,
    pub goal:    GoalId,
}

/// Plan the next task for `robot`, or `None` when there is nothing to do or
/// no route exists right now.
pub fn plan(
    grid:     &Grid,
    entities: &EntityStore,
    config:   &SimConfig,
    robot:    &Robot,
) -> SimResult<Option<Assignment>> {
    if robot.is_carrying() {
        let Some(goal) = entities.nearest_goal(robot.position, config.goal_metric) else {
            return Ok(None);
        };
        return route_task(grid, entities, config, robot, &[], &[], goal);
    }

    let Some((mut targets, mut checkpoints)) = pick_targets(entities, config, robot) else {
        return Ok(None);
    };

    // An unreachable chained stop cuts the chain there; the goal is then
    // chosen from the last stop that is kept.
    while let Some(&last) = checkpoints.last() {
        let Some(goal) = entities.nearest_goal(last, config.goal_metric) else {
            return Ok(None);
        };
        if let Some(task) = route_task(grid, entities, config, robot, &targets, &checkpoints, goal)? {
            return Ok(Some(task));
        }
        targets.pop();
        checkpoints.pop();
    }
    Ok(None)
}

/// Route `robot` via `checkpoints` to `goal` and package the result.
fn route_task(
    grid:        &Grid,
    entities:    &EntityStore,
    config:      &SimConfig,
    robot:       &Robot,
    targets:     &[PackageId],
    checkpoints: &[Position],
    goal:        GoalId,
) -> SimResult<Option<Assignment>> {
    let Some(goal_pos) = entities.goal(goal).map(|g| g.position) else {
        return Ok(None);
    };

    let stops: Vec<Position> = checkpoints.iter().copied().chain([goal_pos]).collect();
    let Some(path) = route_through(grid, config, robot, &stops)? else {
        log::debug!("{}: no route via {} stop(s) to {}", robot.id, stops.len(), goal);
        return Ok(None);
    };

    Ok(Some(Assignment { path, targets: targets.to_vec(), goal }))
}

/// Choose pickups: the nearest package, then chained ones while each is
/// closer than the nearest goal.
fn pick_targets(
    entities: &EntityStore,
    config:   &SimConfig,
    robot:    &Robot,
) -> Option<(Vec<PackageId>, Vec<Position>)> {
    if robot.room() == 0 {
        return None;
    }
    let first = entities.nearest_searchable_package(robot.position, config.package_metric, &[])?;
    let mut last = entities.package(first)?.position;
    let mut targets = vec![first];
    let mut checkpoints = vec![last];

    if config.chain_pickups {
        while targets.len() < robot.room() {
            let Some(next) =
                entities.nearest_searchable_package(last, config.package_metric, &targets)
            else {
                break;
            };
            let Some(next_pos) = entities.package(next).map(|p| p.position) else {
                break;
            };
            let package_dist = config.package_metric.distance(last, next_pos);
            let goal_dist = entities
                .nearest_goal_with_distance(last, config.package_metric)
                .map_or(f64::INFINITY, |(_, d)| d);
            if package_dist >= goal_dist {
                break;
            }
            targets.push(next);
            checkpoints.push(next_pos);
            last = next_pos;
        }
    }

    Some((targets, checkpoints))
}

/// Route `robot` through every stop in order.  `None` if any leg is
/// unreachable.
fn route_through(
    grid:   &Grid,
    config: &SimConfig,
    robot:  &Robot,
    stops:  &[Position],
) -> SimResult<Option<Path>> {
    let finder = finder_for(config.algorithm);
    let start = robot.position;

    let mut full: Path = vec![start];
    let mut from = start;
    for &stop in stops {
        let leg = finder.search(grid, from, stop, Some(robot.id))?;
        if leg.is_empty() {
            return Ok(None);
        }
        append_segment(&mut full, leg);
        from = stop;
    }

    // `full[0]` is where the robot stands.  Keep it as an "act here" waypoint
    // only when the first stop is that very cell.
    let keep_start = stops.first() == Some(&start);
    let skip = if keep_start { 0 } else { 1 };
    Ok(Some(full.into_iter().skip(skip).collect()))
}
