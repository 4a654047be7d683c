//! Unit tests for wb-entity.

#[cfg(test)]
mod robot_status {
    use std::time::{Duration, Instant};

    use wb_core::{Position, RobotId};

    use crate::{Robot, RobotStatus};

    fn robot(now: Instant) -> Robot {
        Robot::new(RobotId(0), Position::new(0, 0), 2, 3, now)
    }

    #[test]
    fn starts_idle_with_no_task() {
        let r = robot(Instant::now());
        assert_eq!(r.status(), RobotStatus::Idle);
        assert!(!r.has_task());
        assert!(!r.is_carrying());
        assert_eq!(r.block_count(), 0);
        assert!(!r.is_agitated());
    }

    #[test]
    fn time_accrues_to_outgoing_status() {
        let t0 = Instant::now();
        let mut r = robot(t0);
        r.set_status(RobotStatus::Active, t0 + Duration::from_millis(30));
        r.set_status(RobotStatus::Idle, t0 + Duration::from_millis(100));

        assert_eq!(r.times().idle, Duration::from_millis(30));
        assert_eq!(r.times().active, Duration::from_millis(70));
    }

    #[test]
    fn status_time_includes_running_stretch() {
        let t0 = Instant::now();
        let mut r = robot(t0);
        r.set_status(RobotStatus::Active, t0 + Duration::from_millis(10));
        let later = t0 + Duration::from_millis(50);
        assert_eq!(r.status_time(RobotStatus::Active, later), Duration::from_millis(40));
        assert_eq!(r.status_time(RobotStatus::Idle, later), Duration::from_millis(10));
        assert_eq!(r.status_time(RobotStatus::Off, later), Duration::ZERO);
    }

    #[test]
    fn same_status_is_noop() {
        let t0 = Instant::now();
        let mut r = robot(t0);
        r.set_status(RobotStatus::Idle, t0 + Duration::from_millis(20));
        assert_eq!(r.times().idle, Duration::ZERO);
        assert_eq!(r.status_time(RobotStatus::Idle, t0 + Duration::from_millis(20)),
                   Duration::from_millis(20));
    }

    #[test]
    fn agitation_after_threshold() {
        // Threshold 3: the fourth consecutive block raises the flag.
        let mut r = robot(Instant::now());
        assert!(!r.record_block());
        assert!(!r.record_block());
        assert!(!r.record_block());
        assert_eq!(r.block_count(), 3);
        assert!(r.record_block());
        assert!(r.is_agitated());
        assert_eq!(r.block_count(), 0);
    }

    #[test]
    fn display_names() {
        assert_eq!(RobotStatus::Blocked.to_string(), "blocked");
        assert_eq!(RobotStatus::default(), RobotStatus::Idle);
    }
}

#[cfg(test)]
mod cargo {
    use std::time::Instant;

    use wb_core::{GoalId, PackageId, Position, RobotId};

    use crate::{Package, PackageState, Robot};

    #[test]
    fn load_respects_capacity() {
        let mut r = Robot::new(RobotId(0), Position::new(0, 0), 1, 10, Instant::now());
        let mut a = Package::new(PackageId(0), Position::new(0, 0));
        let mut b = Package::new(PackageId(1), Position::new(0, 0));

        assert!(r.load(&mut a));
        assert!(!r.load(&mut b));
        assert_eq!(r.carried(), &[PackageId(0)]);
        assert!(a.is_moving());
        assert!(!a.is_searchable());
        assert!(b.is_searchable());
        assert!(!b.is_moving());
    }

    #[test]
    fn reserved_package_only_loads_for_its_robot() {
        let mut owner = Robot::new(RobotId(0), Position::new(0, 0), 2, 10, Instant::now());
        let mut other = Robot::new(RobotId(1), Position::new(0, 0), 2, 10, Instant::now());
        let mut p = Package::new(PackageId(4), Position::new(0, 0));

        assert!(p.reserve(RobotId(0)));
        assert!(!p.is_searchable());
        assert!(!p.reserve(RobotId(1)));
        owner.set_targets(vec![PackageId(4)]);

        assert!(!other.load(&mut p));
        assert!(owner.load(&mut p));
        assert_eq!(p.state(), PackageState::Carried(RobotId(0)));
        assert!(owner.targets().is_empty());
    }

    #[test]
    fn release_only_affects_reservations() {
        let mut p = Package::new(PackageId(0), Position::new(1, 1));
        p.reserve(RobotId(2));
        p.release();
        assert_eq!(p.state(), PackageState::Waiting);

        p.deliver(GoalId(0));
        p.release();
        assert_eq!(p.state(), PackageState::Delivered(GoalId(0)));
        assert!(!p.is_available_to(RobotId(2)));
    }

    #[test]
    fn drop_returns_package_to_grid() {
        let mut r = Robot::new(RobotId(0), Position::new(2, 2), 3, 10, Instant::now());
        let mut p = Package::new(PackageId(0), Position::new(2, 2));
        r.load(&mut p);
        let dropped = r.take_carried();
        assert_eq!(dropped, vec![PackageId(0)]);
        p.drop_at(Position::new(3, 2));
        assert!(p.is_searchable());
        assert_eq!(p.position, Position::new(3, 2));
        assert!(!r.is_carrying());
    }

    #[test]
    fn room_tracks_free_capacity() {
        let mut r = Robot::new(RobotId(0), Position::new(0, 0), 3, 10, Instant::now());
        assert_eq!(r.room(), 3);
        let mut p = Package::new(PackageId(0), Position::new(0, 0));
        r.load(&mut p);
        assert_eq!(r.room(), 2);
        assert!(!r.is_full());
    }
}

#[cfg(test)]
mod goal {
    use wb_core::{GoalId, PackageId, Position};

    use crate::Goal;

    #[test]
    fn accept_is_append_only() {
        let mut g = Goal::new(GoalId(0), Position::new(4, 4));
        g.accept(PackageId(3));
        g.accept(PackageId(1));
        assert_eq!(g.delivered_count(), 2);
        assert_eq!(g.delivered(), &[PackageId(3), PackageId(1)]);
    }
}

#[cfg(test)]
mod store {
    use std::time::Instant;

    use wb_core::{DistanceMetric, GoalId, PackageId, Position, RobotId};

    use crate::{EntityStore, Goal, Package};

    #[test]
    fn spawned_ids_are_monotonic() {
        let mut s = EntityStore::new();
        let now = Instant::now();
        let a = s.spawn_robot(Position::new(0, 0), 5, 10, now);
        let b = s.spawn_robot(Position::new(1, 0), 5, 10, now);
        assert_eq!((a, b), (RobotId(0), RobotId(1)));

        s.remove_robot(b);
        let c = s.spawn_robot(Position::new(2, 0), 5, 10, now);
        assert_eq!(c, RobotId(2), "ids are never reused");
    }

    #[test]
    fn explicit_ids_bump_allocator() {
        let mut s = EntityStore::new();
        assert!(s.insert_package(Package::new(PackageId(7), Position::new(0, 0))));
        assert!(!s.insert_package(Package::new(PackageId(7), Position::new(1, 0))));
        assert_eq!(s.spawn_package(Position::new(2, 0)), PackageId(8));
        assert_eq!(s.package_count(), 2);
    }

    #[test]
    fn robot_ids_ascending() {
        let mut s = EntityStore::new();
        let now = Instant::now();
        s.insert_robot(crate::Robot::new(RobotId(5), Position::new(0, 0), 1, 1, now));
        s.insert_robot(crate::Robot::new(RobotId(2), Position::new(1, 0), 1, 1, now));
        s.insert_robot(crate::Robot::new(RobotId(9), Position::new(2, 0), 1, 1, now));
        assert_eq!(s.robot_ids(), vec![RobotId(2), RobotId(5), RobotId(9)]);
    }

    #[test]
    fn nearest_package_skips_unsearchable_and_excluded() {
        let mut s = EntityStore::new();
        let near = s.spawn_package(Position::new(1, 0));
        let mid = s.spawn_package(Position::new(2, 0));
        let far = s.spawn_package(Position::new(5, 0));
        let from = Position::new(0, 0);
        let m = DistanceMetric::Manhattan;

        assert_eq!(s.nearest_searchable_package(from, m, &[]), Some(near));
        s.package_mut(near).unwrap().reserve(RobotId(0));
        assert_eq!(s.nearest_searchable_package(from, m, &[]), Some(mid));
        assert_eq!(s.nearest_searchable_package(from, m, &[mid]), Some(far));
        assert_eq!(s.nearest_searchable_package(from, m, &[mid, far]), None);
    }

    #[test]
    fn ties_break_towards_lower_id() {
        let mut s = EntityStore::new();
        s.insert_goal(Goal::new(GoalId(3), Position::new(2, 0)));
        s.insert_goal(Goal::new(GoalId(1), Position::new(0, 2)));
        for metric in [DistanceMetric::Manhattan, DistanceMetric::SqrtManhattan, DistanceMetric::Euclidean] {
            assert_eq!(s.nearest_goal(Position::new(0, 0), metric), Some(GoalId(1)));
        }
    }

    #[test]
    fn metric_changes_the_winner() {
        // (3,0) is Manhattan 3 / Euclidean 3; (2,2) is Manhattan 4 / Euclidean ~2.83.
        let mut s = EntityStore::new();
        let straight = s.spawn_goal(Position::new(3, 0));
        let diagonal = s.spawn_goal(Position::new(2, 2));
        let from = Position::new(0, 0);
        assert_eq!(s.nearest_goal(from, DistanceMetric::Manhattan), Some(straight));
        assert_eq!(s.nearest_goal(from, DistanceMetric::Euclidean), Some(diagonal));
    }

    #[test]
    fn empty_store_has_no_nearest() {
        let s = EntityStore::new();
        assert_eq!(s.nearest_goal(Position::new(0, 0), DistanceMetric::Manhattan), None);
        assert_eq!(
            s.nearest_searchable_package(Position::new(0, 0), DistanceMetric::Manhattan, &[]),
            None
        );
    }

    #[test]
    fn clear_restarts_allocation() {
        let mut s = EntityStore::new();
        s.spawn_goal(Position::new(0, 0));
        s.spawn_goal(Position::new(1, 0));
        s.clear();
        assert_eq!(s.goal_count(), 0);
        assert_eq!(s.spawn_goal(Position::new(0, 0)), GoalId(0));
    }

    #[test]
    fn delivered_count_sums_goals() {
        let mut s = EntityStore::new();
        let a = s.spawn_goal(Position::new(0, 0));
        let b = s.spawn_goal(Position::new(1, 0));
        s.goal_mut(a).unwrap().accept(PackageId(0));
        s.goal_mut(b).unwrap().accept(PackageId(1));
        s.goal_mut(b).unwrap().accept(PackageId(2));
        assert_eq!(s.delivered_count(), 3);
    }
}

#[cfg(test)]
mod store_operations {
    use std::time::Instant;

    use wb_core::{PackageId, Position, RobotId};

    use crate::{EntityStore, PackageState};

    fn store_with_robot() -> (EntityStore, RobotId) {
        let mut s = EntityStore::new();
        let r = s.spawn_robot(Position::new(0, 0), 2, 10, Instant::now());
        (s, r)
    }

    #[test]
    fn reserve_skips_unavailable_packages() {
        let (mut s, r) = store_with_robot();
        let a = s.spawn_package(Position::new(1, 0));
        let b = s.spawn_package(Position::new(2, 0));
        s.package_mut(b).unwrap().reserve(RobotId(99));

        let got = s.reserve_for(r, &[a, b]);
        assert_eq!(got, vec![a]);
        assert_eq!(s.robot(r).unwrap().targets(), &[a]);
        assert_eq!(s.package(a).unwrap().state(), PackageState::Reserved(r));
    }

    #[test]
    fn release_makes_targets_searchable() {
        let (mut s, r) = store_with_robot();
        let a = s.spawn_package(Position::new(1, 0));
        s.reserve_for(r, &[a]);
        assert!(!s.package(a).unwrap().is_searchable());
        assert_eq!(s.grid_package_count(), 1);

        assert_eq!(s.release_targets(r), vec![a]);
        assert!(s.package(a).unwrap().is_searchable());
        assert!(s.robot(r).unwrap().targets().is_empty());
    }

    #[test]
    fn deliver_counts_each_package_once() {
        let (mut s, r) = store_with_robot();
        let g = s.spawn_goal(Position::new(0, 0));
        let a = s.spawn_package(Position::new(0, 0));
        let b = s.spawn_package(Position::new(0, 0));
        assert!(s.load_package(r, a));
        assert!(s.load_package(r, b));
        assert_eq!(s.grid_package_count(), 0);

        let delivered = s.deliver_carried(r, g);
        assert_eq!(delivered, vec![a, b]);
        assert_eq!(s.goal(g).unwrap().delivered_count(), 2);
        assert!(!s.robot(r).unwrap().is_carrying());
        assert_eq!(s.package(a).unwrap().state(), PackageState::Delivered(g));

        // Nothing left to hand over.
        assert!(s.deliver_carried(r, g).is_empty());
        assert_eq!(s.goal(g).unwrap().delivered_count(), 2);
    }

    #[test]
    fn load_with_missing_records_fails() {
        let (mut s, r) = store_with_robot();
        assert!(!s.load_package(r, PackageId(42)));
        assert!(!s.load_package(RobotId(42), PackageId(0)));
    }

    #[test]
    fn carried_packages_follow_robot() {
        let (mut s, r) = store_with_robot();
        let a = s.spawn_package(Position::new(0, 0));
        s.load_package(r, a);
        s.robot_mut(r).unwrap().position = Position::new(3, 1);
        s.sync_carried_positions(r);
        assert_eq!(s.package(a).unwrap().position, Position::new(3, 1));
    }
}
