//! Post-processing: internal force diagrams and deflected shape
//!
//! Element end forces are recovered as `f = k_local * d_local - q_local`,
//! where `q_local` is the equivalent nodal load vector of any distributed
//! load the element carries. Axial, shear and moment then follow in closed
//! form along the element, and the deflected shape combines the Hermite
//! interpolation of the end displacements with the fixed-end particular
//! solution of the uniform load.

use crate::math::{self, Vec as FVec, Vec6};
use crate::mesh::{Element, Mesh};
use crate::model::StructureDefinition;
use crate::results::{
    DiagramSample, MemberDiagram, NodeDisplacement, Reaction, ResultRecord,
};

use super::SolveOptions;

/// Assemble the immutable result record from the solved system
pub(crate) fn collect_results(
    def: &StructureDefinition,
    mesh: &Mesh,
    u: &FVec,
    r: &FVec,
    options: &SolveOptions,
) -> ResultRecord {
    let displacements = def
        .nodes
        .iter()
        .map(|node| {
            let idx = mesh.user_nodes[&node.id];
            NodeDisplacement {
                node_id: node.id,
                dx: u[3 * idx],
                dy: u[3 * idx + 1],
                rotation: u[3 * idx + 2],
            }
        })
        .collect();

    let mut seen = std::collections::HashSet::new();
    let reactions = def
        .supports
        .iter()
        .filter(|s| seen.insert(s.node_id))
        .map(|support| {
            let idx = mesh.user_nodes[&support.node_id];
            Reaction {
                node_id: support.node_id,
                fx: r[3 * idx],
                fy: r[3 * idx + 1],
                m: r[3 * idx + 2],
            }
        })
        .collect();

    let samples = options.samples_per_element.max(2);
    let member_diagrams = def
        .members
        .iter()
        .map(|member| {
            let mut all = Vec::new();
            let mut offset = 0.0;
            if let Some(ids) = mesh.elements_of(member.id) {
                for &eid in ids {
                    let el = &mesh.elements[eid];
                    sample_element(el, u, samples, offset, &mut all);
                    offset += el.length;
                }
            }
            MemberDiagram {
                member_id: member.id,
                samples: all,
            }
        })
        .collect();

    ResultRecord {
        displacements,
        reactions,
        member_diagrams,
    }
}

/// Sample one element's internal force and deflection curves, appending
/// samples with positions measured from the parent member's start.
fn sample_element(
    el: &Element,
    u: &FVec,
    samples: usize,
    offset: f64,
    out: &mut Vec<DiagramSample>,
) {
    let t = math::transformation_matrix(el.cos, el.sin);
    let dofs = el.dof_indices();
    let d_global = Vec6::from_iterator(dofs.iter().map(|&d| u[d]));
    let d_local = t * d_global;

    let k_local = math::local_stiffness(el.e, el.i, el.a, el.length);
    let q_local = math::equivalent_uniform_load(el.w, el.length);
    let f_local = k_local * d_local - q_local;

    let l = el.length;
    let w = el.w;
    let ei = el.e * el.i;

    for s in 0..samples {
        let x = l * s as f64 / (samples - 1) as f64;
        out.push(DiagramSample {
            position_from_start: offset + x,
            axial: -f_local[0],
            shear: -f_local[1] - w * x,
            moment: f_local[2] - f_local[1] * x - w * x * x / 2.0,
            deflection: hermite_deflection(&d_local, x, l)
                + w * x * x * (l - x) * (l - x) / (24.0 * ei),
        });
    }
}

/// Transverse deflection from the cubic beam shape functions applied to the
/// local end displacements. Includes the rigid translation/rotation of the
/// end nodes since those are part of the end displacements.
fn hermite_deflection(d_local: &Vec6, x: f64, l: f64) -> f64 {
    let xi = x / l;
    let n1 = 1.0 - 3.0 * xi * xi + 2.0 * xi * xi * xi;
    let n2 = l * xi * (1.0 - xi) * (1.0 - xi);
    let n3 = 3.0 * xi * xi - 2.0 * xi * xi * xi;
    let n4 = l * xi * xi * (xi - 1.0);
    n1 * d_local[1] + n2 * d_local[2] + n3 * d_local[4] + n4 * d_local[5]
}
