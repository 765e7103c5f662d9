//! frame2d example - simply supported beam and a portal frame

use anyhow::Result;
use frame2d::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    beam_example()?;
    portal_frame_example()?;
    Ok(())
}

/// 20 ft simply supported beam, 1 k/ft uniform downward load
fn beam_example() -> Result<()> {
    println!("=== Simply Supported Beam ===\n");

    let mut structure = StructureDefinition::new();
    structure.add_node(1, 0.0, 0.0);
    structure.add_node(2, 20.0, 0.0);
    structure.add_member(1, 1, 2, 29000.0, 510.0, 14.6);
    structure.add_support(Support::pinned(1));
    structure.add_support(Support::roller(2));
    structure.add_distributed_load(DistributedLoad::new(1, -1.0));

    let results = frame2d::solve(&structure)?;

    println!("Reactions:");
    for r in &results.reactions {
        println!("  node {}: Fx={:.3}, Fy={:.3}, M={:.3}", r.node_id, r.fx, r.fy, r.m);
    }

    let diagram = results.diagram(1).expect("diagram for member 1");
    println!("Max |M| = {:.3} (expected wL^2/8 = 50)", diagram.max_abs_moment());
    println!("Max |V| = {:.3} (expected wL/2 = 10)\n", diagram.max_abs_shear());
    Ok(())
}

/// Portal frame, fixed column bases, gravity load on the beam plus a
/// lateral point load at roof level
fn portal_frame_example() -> Result<()> {
    println!("=== Portal Frame ===\n");

    //     3 -------- 4
    //     |          |
    //     |          |
    //     1          2
    //   fixed      fixed
    let (span, height) = (20.0, 12.0);
    let (e, i, a) = (29000.0, 510.0, 14.6);

    let mut structure = StructureDefinition::new();
    structure.add_node(1, 0.0, 0.0);
    structure.add_node(2, span, 0.0);
    structure.add_node(3, 0.0, height);
    structure.add_node(4, span, height);
    structure.add_member(1, 1, 3, e, i, a);
    structure.add_member(2, 2, 4, e, i, a);
    structure.add_member(3, 3, 4, e, i, a);
    structure.add_support(Support::fixed(1));
    structure.add_support(Support::fixed(2));
    structure.add_distributed_load(DistributedLoad::new(3, -2.0));
    structure.add_point_load(PointLoad::new(3, 5.0, 0.0, LoadDirection::X));

    let results = frame2d::solve(&structure)?;

    println!("Roof displacements:");
    for node_id in [3, 4] {
        let d = results.displacement(node_id).expect("roof node");
        println!(
            "  node {}: dx={:.5}, dy={:.5}, rot={:.6}",
            node_id, d.dx, d.dy, d.rotation
        );
    }

    println!("\nReactions:");
    for r in &results.reactions {
        println!("  node {}: Fx={:.3}, Fy={:.3}, M={:.3}", r.node_id, r.fx, r.fy, r.m);
    }

    let [fx, fy, _] = results.total_reaction();
    println!("\nTotal reaction: Fx={:.3} (applied 5), Fy={:.3} (applied -40)", fx, fy);

    for member_id in [1, 2, 3] {
        let diagram = results.diagram(member_id).expect("member diagram");
        println!(
            "member {}: max |M|={:.3}, max |V|={:.3}",
            member_id,
            diagram.max_abs_moment(),
            diagram.max_abs_shear()
        );
    }
    Ok(())
}
