use crate::core::forcefield::nonbonded::{coulomb, coulomb_force, lennard_jones, lj_force};
use crate::core::forcefield::params::LjParams;
use crate::core::forcefield::term::NonbondedEnergy;
use crate::core::models::atom::Atom;
use crate::core::models::ids::AtomId;
use crate::core::models::space::SimulationSpace;
use crate::core::neighbors::search::{BruteForceSearch, KdTreeSearch, NeighborSearch};
use crate::core::topology::exclusions::ExclusionTable;
use crate::core::utils::parallel::map_ordered;
use crate::engine::config::{EvaluationConfig, NeighborSearchKind};
use crate::engine::error::EngineError;
use nalgebra::Vector3;
use tracing::{debug, instrument};

/// Total nonbonded energy of a system and the nonbonded force on every atom.
#[derive(Debug, Clone, PartialEq)]
pub struct NonbondedResult {
    pub energy: NonbondedEnergy,
    /// Indexed by atom id; ids absent from the space hold zero.
    pub forces: Vec<Vector3<f64>>,
}

struct PairContribution {
    a: AtomId,
    b: AtomId,
    energy: NonbondedEnergy,
    force_on_a: Vector3<f64>,
}

/// Accumulates Lennard-Jones and Coulomb energies and forces over every unique,
/// non-excluded atom pair within the configured cutoffs.
///
/// `params` holds the Lennard-Jones parameters of each atom, indexed by id; pair
/// parameters follow the Lorentz–Berthelot rules.
#[instrument(skip_all, name = "nonbonded_forces_task")]
pub fn run(
    space: &SimulationSpace,
    params: &[Option<LjParams>],
    exclusions: &ExclusionTable,
    config: &EvaluationConfig,
) -> Result<NonbondedResult, EngineError> {
    match config.neighbor_search {
        NeighborSearchKind::BruteForce => {
            run_with(&BruteForceSearch::new(space), params, exclusions, config)
        }
        NeighborSearchKind::KdTree => {
            run_with(&KdTreeSearch::new(space), params, exclusions, config)
        }
    }
}

/// [`run`] with an explicit neighbor search over the space to evaluate.
///
/// Each unordered pair is evaluated once, by the atom with the lower id. Pair
/// contributions are gathered per atom in space order and reduced sequentially,
/// so the result is identical with and without the `parallel` feature.
///
/// # Errors
///
/// - [`EngineError::DuplicateAtomId`] if two atoms share an id.
/// - [`EngineError::MissingParameters`] if an atom in a Lennard-Jones pair has no
///   entry in `params`.
pub fn run_with<'a, S: NeighborSearch<'a>>(
    search: &S,
    params: &[Option<LjParams>],
    exclusions: &ExclusionTable,
    config: &EvaluationConfig,
) -> Result<NonbondedResult, EngineError> {
    let space = search.space();
    space
        .index_by_id()
        .map_err(|atom_id| EngineError::DuplicateAtomId { atom_id })?;

    let atoms: Vec<&Atom> = space.atoms_iter().map(|(_, atom)| atom).collect();
    let lj_params = |atom_id: AtomId| {
        params
            .get(atom_id)
            .copied()
            .flatten()
            .ok_or(EngineError::MissingParameters { atom_id })
    };

    let per_atom = map_ordered(&atoms, |&atom| -> Result<Vec<PairContribution>, EngineError> {
        let neighbors = search.neighbors(atom, config.search_cutoff());
        let owns = |other: &Atom| {
            atom.id < other.id
                && !exclusions.is_excluded(atom.id, other.id, config.exclusion_horizon)
        };

        let mut pairs = Vec::new();
        for (_, other) in neighbors.electrostatic_list(atom, config.coulomb_cutoff).iter() {
            if !owns(other) {
                continue;
            }
            pairs.push(PairContribution {
                a: atom.id,
                b: other.id,
                energy: NonbondedEnergy::new(0.0, coulomb(atom, other, config.dielectric)),
                force_on_a: coulomb_force(atom, other, config.dielectric),
            });
        }
        for (_, other) in neighbors.vdw_list(atom, config.vdw_cutoff).iter() {
            if !owns(other) {
                continue;
            }
            let pair = lj_params(atom.id)?.combine(&lj_params(other.id)?);
            pairs.push(PairContribution {
                a: atom.id,
                b: other.id,
                energy: NonbondedEnergy::new(
                    lennard_jones(atom, other, pair.sigma, pair.epsilon),
                    0.0,
                ),
                force_on_a: lj_force(atom, other, pair.sigma, pair.epsilon),
            });
        }
        Ok(pairs)
    });

    let len = atoms.iter().map(|atom| atom.id + 1).max().unwrap_or(0);
    let mut forces = vec![Vector3::zeros(); len];
    let mut energy = NonbondedEnergy::default();
    let mut pair_count = 0usize;

    for pairs in per_atom {
        for pair in pairs? {
            energy += pair.energy;
            forces[pair.a] += pair.force_on_a;
            forces[pair.b] -= pair.force_on_a;
            pair_count += 1;
        }
    }

    debug!(
        atoms = atoms.len(),
        pair_terms = pair_count,
        lennard_jones = energy.lennard_jones,
        coulomb = energy.coulomb,
        "Accumulated nonbonded interactions."
    );

    Ok(NonbondedResult { energy, forces })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::nonbonded::nonbonded_energy;
    use crate::core::models::space::Molecule;
    use crate::core::models::topology::Bond;
    use crate::core::topology::exclusions::build_exclusion_table;
    use crate::engine::config::EvaluationConfigBuilder;
    use nalgebra::Point3;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn three_molecules() -> SimulationSpace {
        SimulationSpace::new(vec![
            Molecule::new(vec![
                Atom::new(0, "O", Point3::new(0.0, 0.0, 0.0)).with_charge(-0.8),
                Atom::new(1, "H", Point3::new(0.96, 0.0, 0.0)).with_charge(0.4),
                Atom::new(2, "H", Point3::new(-0.24, 0.93, 0.0)).with_charge(0.4),
            ]),
            Molecule::new(vec![
                Atom::new(3, "O", Point3::new(2.8, 0.3, 0.1)).with_charge(-0.8),
                Atom::new(4, "H", Point3::new(3.7, 0.5, -0.2)).with_charge(0.4),
                Atom::new(5, "H", Point3::new(2.5, 1.1, 0.6)).with_charge(0.4),
            ]),
            Molecule::new(vec![
                Atom::new(6, "Na", Point3::new(1.2, -2.6, 0.4)).with_charge(1.0),
            ]),
        ])
    }

    fn water_bonds() -> Vec<Bond> {
        vec![
            Bond::new(0, 1, 0.96, 500.0),
            Bond::new(0, 2, 0.96, 500.0),
            Bond::new(3, 4, 0.96, 500.0),
            Bond::new(3, 5, 0.96, 500.0),
        ]
    }

    fn params() -> Vec<Option<LjParams>> {
        vec![
            Some(LjParams::new(3.15, 0.15)),
            Some(LjParams::new(0.4, 0.046)),
            Some(LjParams::new(0.4, 0.046)),
            Some(LjParams::new(3.15, 0.15)),
            Some(LjParams::new(0.4, 0.046)),
            Some(LjParams::new(0.4, 0.046)),
            Some(LjParams::new(2.4, 0.1)),
        ]
    }

    fn wide_config() -> EvaluationConfig {
        EvaluationConfigBuilder::new()
            .coulomb_cutoff(50.0)
            .vdw_cutoff(50.0)
            .build()
            .unwrap()
    }

    fn total(space: &SimulationSpace, exclusions: &ExclusionTable, config: &EvaluationConfig) -> f64 {
        run(space, &params(), exclusions, config).unwrap().energy.total
    }

    #[test]
    fn energy_equals_sum_over_non_excluded_pairs() {
        let space = three_molecules();
        let exclusions = build_exclusion_table(7, &water_bonds(), 3);
        let config = wide_config();
        let result = run(&space, &params(), &exclusions, &config).unwrap();

        let atoms: Vec<&Atom> = space.atoms_iter().map(|(_, a)| a).collect();
        let p = params();
        let mut expected = NonbondedEnergy::default();
        for (i, a) in atoms.iter().enumerate() {
            for b in &atoms[i + 1..] {
                if exclusions.is_excluded(a.id, b.id, 3) {
                    continue;
                }
                let pair = p[a.id].unwrap().combine(&p[b.id].unwrap());
                expected += nonbonded_energy(a, b, pair.sigma, pair.epsilon, 1.0);
            }
        }

        assert!(f64_approx_equal(result.energy.lennard_jones, expected.lennard_jones));
        assert!(f64_approx_equal(result.energy.coulomb, expected.coulomb));
        assert!(f64_approx_equal(result.energy.total, expected.total));
    }

    #[test]
    fn excluded_pairs_contribute_nothing() {
        let space = SimulationSpace::new(vec![Molecule::new(vec![
            Atom::new(0, "O", Point3::origin()).with_charge(-0.8),
            Atom::new(1, "H", Point3::new(0.96, 0.0, 0.0)).with_charge(0.4),
        ])]);
        let exclusions = build_exclusion_table(2, &[Bond::new(0, 1, 0.96, 500.0)], 3);
        let result = run(&space, &params(), &exclusions, &wide_config()).unwrap();
        assert_eq!(result.energy, NonbondedEnergy::default());
        assert!(result.forces.iter().all(|f| *f == Vector3::zeros()));

        let included = run(&space, &params(), &ExclusionTable::default(), &wide_config()).unwrap();
        assert!(included.energy.coulomb < 0.0);
    }

    #[test]
    fn forces_obey_newtons_third_law() {
        let space = three_molecules();
        let exclusions = build_exclusion_table(7, &water_bonds(), 3);
        let result = run(&space, &params(), &exclusions, &wide_config()).unwrap();
        assert_eq!(result.forces.len(), 7);
        let net: Vector3<f64> = result.forces.iter().sum();
        assert!(net.norm() < 1e-9);
    }

    #[test]
    fn forces_match_finite_difference_of_total_energy() {
        let space = three_molecules();
        let exclusions = build_exclusion_table(7, &water_bonds(), 3);
        let config = wide_config();
        let result = run(&space, &params(), &exclusions, &config).unwrap();

        let h = 1e-6;
        for (index, atom) in space.atoms_iter() {
            for axis in 0..3 {
                let displaced = |delta: f64| {
                    let mut molecules = space.molecules().to_vec();
                    molecules[index.molecule].atoms[index.atom].position[axis] += delta;
                    SimulationSpace::new(molecules)
                };
                let numeric = -(total(&displaced(h), &exclusions, &config)
                    - total(&displaced(-h), &exclusions, &config))
                    / (2.0 * h);
                assert!(
                    (numeric - result.forces[atom.id][axis]).abs() < 1e-4,
                    "atom {}, axis {axis}",
                    atom.id
                );
            }
        }
    }

    #[test]
    fn cutoffs_limit_each_interaction_separately() {
        let space = SimulationSpace::new(vec![
            Molecule::new(vec![Atom::new(0, "O", Point3::origin()).with_charge(1.0)]),
            Molecule::new(vec![
                Atom::new(1, "O", Point3::new(5.0, 0.0, 0.0)).with_charge(1.0),
            ]),
        ]);
        let no_exclusions = ExclusionTable::default();

        let coulomb_only = EvaluationConfigBuilder::new()
            .coulomb_cutoff(6.0)
            .vdw_cutoff(4.0)
            .build()
            .unwrap();
        let result = run(&space, &params(), &no_exclusions, &coulomb_only).unwrap();
        assert_eq!(result.energy.lennard_jones, 0.0);
        assert!(f64_approx_equal(result.energy.coulomb, 332.06 / 5.0));

        let lj_only = EvaluationConfigBuilder::new()
            .coulomb_cutoff(4.0)
            .vdw_cutoff(5.0)
            .build()
            .unwrap();
        let result = run(&space, &params(), &no_exclusions, &lj_only).unwrap();
        assert_eq!(result.energy.coulomb, 0.0);
        assert!(result.energy.lennard_jones != 0.0);
    }

    #[test]
    fn kd_tree_and_brute_force_agree() {
        let space = three_molecules();
        let exclusions = build_exclusion_table(7, &water_bonds(), 3);
        let brute = EvaluationConfigBuilder::new()
            .coulomb_cutoff(3.0)
            .vdw_cutoff(2.5)
            .build()
            .unwrap();
        let tree = EvaluationConfig {
            neighbor_search: NeighborSearchKind::KdTree,
            ..brute.clone()
        };
        assert_eq!(
            run(&space, &params(), &exclusions, &brute).unwrap(),
            run(&space, &params(), &exclusions, &tree).unwrap()
        );
    }

    #[test]
    fn missing_parameters_are_reported() {
        let space = three_molecules();
        let mut p = params();
        p[6] = None;
        let result = run(&space, &p, &ExclusionTable::default(), &wide_config());
        assert!(matches!(
            result,
            Err(EngineError::MissingParameters { atom_id: 6 })
        ));

        let result = run(&space, &p[..3], &ExclusionTable::default(), &wide_config());
        assert!(matches!(result, Err(EngineError::MissingParameters { .. })));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let space = SimulationSpace::new(vec![
            Molecule::new(vec![Atom::new(0, "O", Point3::origin())]),
            Molecule::new(vec![Atom::new(0, "O", Point3::new(1.0, 0.0, 0.0))]),
        ]);
        let result = run(&space, &params(), &ExclusionTable::default(), &wide_config());
        assert!(matches!(
            result,
            Err(EngineError::DuplicateAtomId { atom_id: 0 })
        ));
    }
}
