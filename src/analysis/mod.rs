//! Analysis pipeline: assembly, boundary conditions, linear solve
//!
//! The pipeline is a pure function of the structure definition. Stages run
//! strictly forward: validate, discretize, formulate/assemble, partition,
//! solve, back-compute reactions, check equilibrium, post-process.

pub mod postprocess;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{FrameError, FrameResult};
use crate::math::{self, Mat, Vec as FVec};
use crate::mesh::{self, Mesh};
use crate::model::StructureDefinition;
use crate::results::ResultRecord;

/// Options for a solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveOptions {
    /// Node coincidence tolerance; coordinates within this distance are the
    /// same node, and members shorter than this are rejected
    pub epsilon: f64,
    /// Relative tolerance for the post-solve global equilibrium check
    pub equilibrium_tolerance: f64,
    /// Pivot-ratio threshold below which the free-DOF stiffness matrix is
    /// treated as singular
    pub condition_threshold: f64,
    /// Diagram samples per element (minimum 2)
    pub samples_per_element: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            equilibrium_tolerance: 1e-6,
            condition_threshold: 1e-12,
            samples_per_element: 20,
        }
    }
}

impl SolveOptions {
    /// Set the node coincidence tolerance
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the equilibrium check tolerance
    pub fn with_equilibrium_tolerance(mut self, tolerance: f64) -> Self {
        self.equilibrium_tolerance = tolerance;
        self
    }

    /// Set the diagram sampling resolution
    pub fn with_samples_per_element(mut self, samples: usize) -> Self {
        self.samples_per_element = samples;
        self
    }
}

/// Free/restrained DOF bookkeeping
#[derive(Debug, Clone)]
pub(crate) struct DofPartition {
    pub free: Vec<usize>,
    pub restrained: Vec<usize>,
    pub is_restrained: Vec<bool>,
}

/// Solve a structure with default options
pub fn solve(def: &StructureDefinition) -> FrameResult<ResultRecord> {
    solve_with_options(def, &SolveOptions::default())
}

/// Solve a structure for nodal displacements, support reactions and member
/// diagrams.
///
/// Fails with [`FrameError::InvalidGeometry`] / [`FrameError::InvalidLoad`]
/// on a malformed definition, [`FrameError::Underconstrained`] when the
/// structure is kinematically unstable, and
/// [`FrameError::NumericalInstability`] when the solution fails the global
/// equilibrium check. No partial result is ever returned.
pub fn solve_with_options(
    def: &StructureDefinition,
    options: &SolveOptions,
) -> FrameResult<ResultRecord> {
    def.validate(options.epsilon)?;
    let mesh = mesh::discretize(def, options.epsilon)?;

    let (k, f) = assemble(&mesh);
    let partition = partition_dofs(def, &mesh);
    let u = solve_displacements(&k, &f, &partition, options)?;
    let r = reactions(&k, &f, &u, &partition);
    check_equilibrium(&mesh, &f, &r, options)?;

    info!(
        "solved {} free DOFs ({} nodes, {} elements)",
        partition.free.len(),
        mesh.nodes.len(),
        mesh.elements.len()
    );

    Ok(postprocess::collect_results(def, &mesh, &u, &r, options))
}

/// Accumulate element stiffness and load contributions into the global
/// system. Purely additive, so element order is irrelevant.
pub(crate) fn assemble(mesh: &Mesh) -> (Mat, FVec) {
    let n = mesh.dof_count();
    let mut k = Mat::zeros(n, n);
    let mut f = FVec::zeros(n);

    for el in &mesh.elements {
        let t = math::transformation_matrix(el.cos, el.sin);
        let k_local = math::local_stiffness(el.e, el.i, el.a, el.length);
        let k_global = t.transpose() * k_local * t;

        let dofs = el.dof_indices();
        for (a, &da) in dofs.iter().enumerate() {
            for (b, &db) in dofs.iter().enumerate() {
                k[(da, db)] += k_global[(a, b)];
            }
        }

        if el.w != 0.0 {
            let q_global = t.transpose() * math::equivalent_uniform_load(el.w, el.length);
            for (a, &da) in dofs.iter().enumerate() {
                f[da] += q_global[a];
            }
        }
    }

    for &(node, [fx, fy]) in &mesh.nodal_forces {
        f[3 * node] += fx;
        f[3 * node + 1] += fy;
    }

    (k, f)
}

/// Map support definitions onto the mesh DOFs. A DOF not referenced by any
/// support is free.
pub(crate) fn partition_dofs(def: &StructureDefinition, mesh: &Mesh) -> DofPartition {
    let mut is_restrained = vec![false; mesh.dof_count()];

    for support in &def.supports {
        // Supports were validated against the node list.
        let idx = mesh.user_nodes[&support.node_id];
        for local in support.restrained_dofs() {
            is_restrained[3 * idx + local] = true;
        }
    }

    let mut free = Vec::new();
    let mut restrained = Vec::new();
    for (dof, &r) in is_restrained.iter().enumerate() {
        if r {
            restrained.push(dof);
        } else {
            free.push(dof);
        }
    }

    DofPartition {
        free,
        restrained,
        is_restrained,
    }
}

/// Solve `K_ff * U_f = F_f` and scatter into the full displacement vector
/// (restrained DOFs are prescribed zero).
fn solve_displacements(
    k: &Mat,
    f: &FVec,
    partition: &DofPartition,
    options: &SolveOptions,
) -> FrameResult<FVec> {
    let n = k.nrows();
    let n_free = partition.free.len();
    let mut u = FVec::zeros(n);
    if n_free == 0 {
        return Ok(u);
    }

    let mut k_ff = Mat::zeros(n_free, n_free);
    let mut f_f = FVec::zeros(n_free);
    for (a, &da) in partition.free.iter().enumerate() {
        f_f[a] = f[da];
        for (b, &db) in partition.free.iter().enumerate() {
            k_ff[(a, b)] = k[(da, db)];
        }
    }

    let (u_f, condition) = math::solve_with_condition(&k_ff, &f_f).ok_or_else(|| {
        FrameError::Underconstrained(
            "singular free-DOF stiffness matrix; check for missing supports, mechanisms or \
             disconnected components"
                .to_string(),
        )
    })?;
    debug!("free-DOF pivot ratio {:.3e}", condition);
    if condition < options.condition_threshold {
        return Err(FrameError::Underconstrained(format!(
            "free-DOF stiffness matrix is near-singular (pivot ratio {:.3e}); the structure is \
             kinematically unstable",
            condition
        )));
    }

    for (a, &da) in partition.free.iter().enumerate() {
        u[da] = u_f[a];
    }
    Ok(u)
}

/// Back-compute reactions `R = K * U - F`, masked to restrained DOFs
fn reactions(k: &Mat, f: &FVec, u: &FVec, partition: &DofPartition) -> FVec {
    let mut r = k * u - f;
    for (dof, &restrained) in partition.is_restrained.iter().enumerate() {
        if !restrained {
            r[dof] = 0.0;
        }
    }
    r
}

/// Mandatory post-solve check: applied loads plus reactions must sum to zero
/// in both force components and in moment about the origin.
fn check_equilibrium(
    mesh: &Mesh,
    f: &FVec,
    r: &FVec,
    options: &SolveOptions,
) -> FrameResult<()> {
    let mut sum_fx = 0.0;
    let mut sum_fy = 0.0;
    let mut sum_m = 0.0;

    for (idx, node) in mesh.nodes.iter().enumerate() {
        let fx = f[3 * idx] + r[3 * idx];
        let fy = f[3 * idx + 1] + r[3 * idx + 1];
        let mz = f[3 * idx + 2] + r[3 * idx + 2];
        sum_fx += fx;
        sum_fy += fy;
        sum_m += mz + node.x * fy - node.y * fx;
    }

    let residual = sum_fx.abs().max(sum_fy.abs()).max(sum_m.abs());
    let load_scale = f.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
    let tolerance = options.equilibrium_tolerance * (1.0 + load_scale);

    if residual > tolerance {
        return Err(FrameError::NumericalInstability {
            residual,
            tolerance,
        });
    }
    Ok(())
}
