//! Portal frame under combined gravity and lateral loading. The individual
//! reactions have no simple closed form, so the checks are global:
//! equilibrium, symmetry, and response to support changes.

use approx::assert_relative_eq;
use frame2d::prelude::*;

const SPAN: f64 = 20.0;
const HEIGHT: f64 = 12.0;
const E: f64 = 29000.0;
const I: f64 = 510.0;
const A: f64 = 14.6;

//     3 -------- 4
//     |          |
//     1          2
fn portal_frame() -> StructureDefinition {
    let mut def = StructureDefinition::new();
    def.add_node(1, 0.0, 0.0);
    def.add_node(2, SPAN, 0.0);
    def.add_node(3, 0.0, HEIGHT);
    def.add_node(4, SPAN, HEIGHT);
    def.add_member(1, 1, 3, E, I, A);
    def.add_member(2, 2, 4, E, I, A);
    def.add_member(3, 3, 4, E, I, A);
    def.add_support(Support::fixed(1));
    def.add_support(Support::fixed(2));
    def
}

#[test]
fn reactions_balance_combined_loading() {
    let mut def = portal_frame();
    def.add_distributed_load(DistributedLoad::new(3, -2.0));
    def.add_point_load(PointLoad::new(3, 5.0, 0.0, LoadDirection::X));

    let results = frame2d::solve(&def).unwrap();

    let [fx, fy, _] = results.total_reaction();
    assert_relative_eq!(fx, -5.0, epsilon = 1e-8);
    assert_relative_eq!(fy, 2.0 * SPAN, epsilon = 1e-8);
}

#[test]
fn symmetric_gravity_load_gives_symmetric_reactions() {
    let mut def = portal_frame();
    def.add_distributed_load(DistributedLoad::new(3, -2.0));

    let results = frame2d::solve(&def).unwrap();
    let r1 = results.reaction(1).unwrap();
    let r2 = results.reaction(2).unwrap();

    assert_relative_eq!(r1.fy, r2.fy, epsilon = 1e-8);
    assert_relative_eq!(r1.fy, SPAN, epsilon = 1e-8); // half of 2 * 20
    // Horizontal thrusts oppose each other.
    assert_relative_eq!(r1.fx, -r2.fx, epsilon = 1e-8);
    assert_relative_eq!(r1.m, -r2.m, epsilon = 1e-8);

    // Symmetric load: roof nodes deflect down equally, no sway.
    let d3 = results.displacement(3).unwrap();
    let d4 = results.displacement(4).unwrap();
    assert_relative_eq!(d3.dy, d4.dy, epsilon = 1e-10);
    assert_relative_eq!(d3.dx, -d4.dx, epsilon = 1e-10);
    assert!(d3.dy < 0.0);
}

#[test]
fn lateral_load_sways_the_roof_and_base_shears_resist_it() {
    let mut def = portal_frame();
    def.add_point_load(PointLoad::new(3, 5.0, 0.0, LoadDirection::X));

    let results = frame2d::solve(&def).unwrap();
    let d3 = results.displacement(3).unwrap();
    let d4 = results.displacement(4).unwrap();

    // Both roof nodes move with the load; the loaded node moves furthest
    // because the girder shortens axially along the way.
    assert!(d3.dx > 0.0);
    assert!(d4.dx > 0.0);
    assert!(d3.dx >= d4.dx);

    // The base shears take the entire lateral load.
    let r1 = results.reaction(1).unwrap();
    let r2 = results.reaction(2).unwrap();
    assert_relative_eq!(r1.fx + r2.fx, -5.0, epsilon = 1e-8);
    assert!(r1.fx < 0.0);
    assert!(r2.fx < 0.0);
}

#[test]
fn pinned_bases_carry_no_moment() {
    let mut def = StructureDefinition::new();
    def.add_node(1, 0.0, 0.0);
    def.add_node(2, SPAN, 0.0);
    def.add_node(3, 0.0, HEIGHT);
    def.add_node(4, SPAN, HEIGHT);
    def.add_member(1, 1, 3, E, I, A);
    def.add_member(2, 2, 4, E, I, A);
    def.add_member(3, 3, 4, E, I, A);
    def.add_support(Support::pinned(1));
    def.add_support(Support::pinned(2));
    def.add_distributed_load(DistributedLoad::new(3, -2.0));

    let results = frame2d::solve(&def).unwrap();
    let r1 = results.reaction(1).unwrap();
    let r2 = results.reaction(2).unwrap();
    assert_relative_eq!(r1.m, 0.0, epsilon = 1e-8);
    assert_relative_eq!(r2.m, 0.0, epsilon = 1e-8);
    assert_relative_eq!(r1.fy + r2.fy, 2.0 * SPAN, epsilon = 1e-8);
}

#[test]
fn results_survive_a_json_round_trip() {
    let mut def = portal_frame();
    def.add_distributed_load(DistributedLoad::new(3, -2.0));

    let results = frame2d::solve(&def).unwrap();
    let json = results.to_json().unwrap();
    let restored: ResultRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.reactions.len(), results.reactions.len());
    assert_relative_eq!(
        restored.diagram(3).unwrap().max_abs_moment(),
        results.diagram(3).unwrap().max_abs_moment(),
        epsilon = 1e-12
    );
}
