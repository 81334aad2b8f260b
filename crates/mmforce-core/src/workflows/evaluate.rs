use crate::core::forcefield::bonded::{bonded_forces, total_bonded_energy};
use crate::core::forcefield::params::LjParamTable;
use crate::core::forcefield::term::{BondedEnergy, NonbondedEnergy};
use crate::core::models::space::SimulationSpace;
use crate::core::models::topology::Topology;
use crate::core::topology::exclusions::build_exclusion_table;
use crate::engine::config::EvaluationConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::tasks;
use nalgebra::Vector3;
use tracing::{info, instrument};

/// Everything needed to evaluate one snapshot of a system.
#[derive(Debug, Clone, Default)]
pub struct SystemSnapshot {
    pub space: SimulationSpace,
    pub topology: Topology,
    pub lj_params: LjParamTable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    pub bonded: BondedEnergy,
    pub nonbonded: NonbondedEnergy,
    /// Sum of the bonded and nonbonded totals.
    pub total: f64,
    /// Net force on every atom, indexed by atom id.
    pub forces: Vec<Vector3<f64>>,
}

#[instrument(skip_all, name = "evaluation_workflow")]
pub fn run(
    system: &SystemSnapshot,
    config: &EvaluationConfig,
    reporter: &ProgressReporter,
) -> Result<EvaluationReport, EngineError> {
    // === Phase 0: Validation ===
    reporter.report(Progress::PhaseStart {
        name: "Validation",
    });
    config.validate()?;
    let space = &system.space;
    let topology = &system.topology;
    let atom_count = space
        .index_by_id()
        .map_err(|atom_id| EngineError::DuplicateAtomId { atom_id })?
        .len();
    // Forces and positions are indexed by id, so every id below the count must exist.
    if let Some(max_id) = space.max_id().filter(|&max_id| max_id >= atom_count) {
        return Err(EngineError::SparseAtomIds { max_id, atom_count });
    }
    topology.validate(atom_count)?;
    let positions = space.positions_by_id();
    reporter.report(Progress::PhaseFinish);

    info!(
        atoms = space.atom_count(),
        bonds = topology.bonds.len(),
        angles = topology.angles.len(),
        dihedrals = topology.dihedrals.len(),
        impropers = topology.impropers.len(),
        "Starting system evaluation."
    );

    // === Phase 1: Bonded terms ===
    reporter.report(Progress::PhaseStart {
        name: "Bonded Terms",
    });
    reporter.tally(
        "bonded records",
        topology.bonds.len()
            + topology.angles.len()
            + topology.dihedrals.len()
            + topology.impropers.len(),
    );
    let bonded = total_bonded_energy(
        &topology.bonds,
        &topology.angles,
        &topology.dihedrals,
        &positions,
    )?
    .with_impropers(&topology.impropers);
    let mut forces = bonded_forces(
        &topology.bonds,
        &topology.angles,
        &topology.dihedrals,
        &positions,
    )?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Nonbonded terms ===
    reporter.report(Progress::PhaseStart {
        name: "Nonbonded Terms",
    });
    let exclusions = build_exclusion_table(positions.len(), &topology.bonds, config.exclusion_depth);
    reporter.tally("excluded pairs", exclusions.len());
    let params = system.lj_params.per_atom(space)?;
    let nonbonded = tasks::nonbonded_forces::run(space, &params, &exclusions, config)?;
    for (force, extra) in forces.iter_mut().zip(&nonbonded.forces) {
        *force += extra;
    }
    reporter.report(Progress::PhaseFinish);

    let total = bonded.total + nonbonded.energy.total;
    info!(
        bonded = bonded.total,
        nonbonded = nonbonded.energy.total,
        total,
        "Evaluation complete."
    );

    Ok(EvaluationReport {
        bonded,
        nonbonded: nonbonded.energy,
        total,
        forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::forcefield::params::LjParams;
    use crate::core::models::atom::Atom;
    use crate::core::models::space::Molecule;
    use crate::core::models::topology::{Angle, Bond, Dihedral, Improper};
    use crate::engine::config::EvaluationConfigBuilder;
    use nalgebra::Point3;
    use std::sync::Mutex;

    fn ethanol_like() -> SystemSnapshot {
        let space = SimulationSpace::new(vec![
            Molecule::new(vec![
                Atom::new(0, "C", Point3::new(0.0, 0.0, 0.0)).with_charge(-0.18),
                Atom::new(1, "C", Point3::new(1.52, 0.0, 0.0)).with_charge(0.14),
                Atom::new(2, "O", Point3::new(2.0, 1.35, 0.0)).with_charge(-0.68),
                Atom::new(3, "H", Point3::new(2.95, 1.3, 0.3)).with_charge(0.42),
            ]),
            Molecule::new(vec![
                Atom::new(4, "O", Point3::new(4.5, 2.5, 0.8)).with_charge(-0.8),
            ]),
        ]);
        let topology = Topology {
            bonds: vec![
                Bond::new(0, 1, 1.53, 310.0),
                Bond::new(1, 2, 1.41, 320.0),
                Bond::new(2, 3, 0.96, 553.0),
            ],
            angles: vec![
                Angle::new([0, 1, 2], 109.5f64.to_radians(), 50.0),
                Angle::new([1, 2, 3], 108.5f64.to_radians(), 55.0),
            ],
            dihedrals: vec![Dihedral::new([0, 1, 2, 3], 3.0, 0.16, 0.0)],
            impropers: vec![Improper::new(1, 0.05, 10.0)],
        };
        let mut lj_params = LjParamTable::default();
        lj_params.insert("C", LjParams::new(3.4, 0.086));
        lj_params.insert("O", LjParams::new(3.0, 0.17));
        lj_params.insert("H", LjParams::new(1.0, 0.01));
        SystemSnapshot {
            space,
            topology,
            lj_params,
        }
    }

    fn config() -> EvaluationConfig {
        EvaluationConfigBuilder::new()
            .coulomb_cutoff(12.0)
            .vdw_cutoff(10.0)
            .build()
            .unwrap()
    }

    #[test]
    fn report_combines_bonded_and_nonbonded_totals() {
        let system = ethanol_like();
        let report = run(&system, &config(), &ProgressReporter::new()).unwrap();

        assert!((report.total - (report.bonded.total + report.nonbonded.total)).abs() < 1e-12);
        assert!(report.bonded.improper > 0.0);
        assert!(report.bonded.bond > 0.0);
        assert!(report.nonbonded.coulomb != 0.0);
        assert_eq!(report.forces.len(), 5);
    }

    #[test]
    fn net_force_vanishes() {
        let report = run(&ethanol_like(), &config(), &ProgressReporter::new()).unwrap();
        let net: Vector3<f64> = report.forces.iter().sum();
        assert!(net.norm() < 1e-9);
    }

    #[test]
    fn forces_match_finite_difference_of_total_energy() {
        let system = ethanol_like();
        let report = run(&system, &config(), &ProgressReporter::new()).unwrap();
        let h = 1e-6;

        for (index, atom) in system.space.atoms_iter() {
            for axis in 0..3 {
                let energy_at = |delta: f64| {
                    let mut displaced = system.clone();
                    let mut molecules = displaced.space.molecules().to_vec();
                    molecules[index.molecule].atoms[index.atom].position[axis] += delta;
                    displaced.space = SimulationSpace::new(molecules);
                    run(&displaced, &config(), &ProgressReporter::new())
                        .unwrap()
                        .total
                };
                let numeric = -(energy_at(h) - energy_at(-h)) / (2.0 * h);
                assert!(
                    (numeric - report.forces[atom.id][axis]).abs() < 1e-4,
                    "atom {}, axis {axis}: numeric {numeric}, analytic {}",
                    atom.id,
                    report.forces[atom.id][axis]
                );
            }
        }
    }

    #[test]
    fn out_of_range_topology_is_rejected() {
        let mut system = ethanol_like();
        system.topology.bonds.push(Bond::new(4, 9, 1.0, 1.0));
        let result = run(&system, &config(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Topology { .. })));
    }

    #[test]
    fn bond_to_an_absent_id_in_a_sparse_system_is_rejected() {
        let system = SystemSnapshot {
            space: SimulationSpace::new(vec![Molecule::new(vec![
                Atom::new(0, "C", Point3::new(0.0, 0.0, 0.0)),
                Atom::new(4, "C", Point3::new(1.5, 0.0, 0.0)),
            ])]),
            topology: Topology {
                bonds: vec![Bond::new(0, 2, 1.5, 300.0)],
                ..Topology::default()
            },
            lj_params: ethanol_like().lj_params,
        };
        let result = run(&system, &config(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::SparseAtomIds {
                max_id: 4,
                atom_count: 2
            })
        ));
    }

    #[test]
    fn very_large_atom_id_is_rejected_before_allocation() {
        let mut system = ethanol_like();
        system.space = SimulationSpace::new(vec![Molecule::new(vec![Atom::new(
            usize::MAX,
            "C",
            Point3::origin(),
        )])]);
        system.topology = Topology::default();
        let result = run(&system, &config(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::SparseAtomIds { atom_count: 1, .. })
        ));
    }

    #[test]
    fn duplicate_atom_ids_are_rejected() {
        let mut system = ethanol_like();
        system.space = SimulationSpace::new(vec![
            system.space.molecules()[0].clone(),
            Molecule::new(vec![Atom::new(3, "O", Point3::new(4.5, 2.5, 0.8))]),
        ]);
        let result = run(&system, &config(), &ProgressReporter::new());
        assert!(matches!(
            result,
            Err(EngineError::DuplicateAtomId { atom_id: 3 })
        ));
    }

    #[test]
    fn missing_element_parameters_are_rejected() {
        let mut system = ethanol_like();
        system.lj_params = LjParamTable::default();
        let result = run(&system, &config(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Parameters { .. })));
    }

    #[test]
    fn coincident_angle_atoms_surface_as_geometry_error() {
        let mut system = ethanol_like();
        let mut molecules = system.space.molecules().to_vec();
        molecules[0].atoms[0].position = molecules[0].atoms[1].position;
        system.space = SimulationSpace::new(molecules);
        let result = run(&system, &config(), &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Geometry { .. })));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = EvaluationConfig {
            dielectric: -1.0,
            ..EvaluationConfig::default()
        };
        let result = run(&ethanol_like(), &config, &ProgressReporter::new());
        assert!(matches!(result, Err(EngineError::Config { .. })));
    }

    #[test]
    fn phases_are_reported_in_order() {
        let names = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::PhaseStart { name } = event {
                names.lock().unwrap().push(name);
            }
        }));
        run(&ethanol_like(), &config(), &reporter).unwrap();
        drop(reporter);
        assert_eq!(
            names.into_inner().unwrap(),
            vec!["Validation", "Bonded Terms", "Nonbonded Terms"]
        );
    }

    #[test]
    fn tallies_count_records_and_excluded_pairs() {
        let tallies = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event: Progress| {
            if let Progress::Tally { what, count } = event {
                tallies.lock().unwrap().push((what, count));
            }
        }));
        run(&ethanol_like(), &config(), &reporter).unwrap();
        drop(reporter);
        // Chain 0-1-2-3 within three bonds: three 1-2, two 1-3 and one 1-4 pair.
        assert_eq!(
            tallies.into_inner().unwrap(),
            vec![("bonded records", 7), ("excluded pairs", 6)]
        );
    }

    #[test]
    fn empty_system_evaluates_to_zero() {
        let report = run(
            &SystemSnapshot::default(),
            &EvaluationConfig::default(),
            &ProgressReporter::new(),
        )
        .unwrap();
        assert_eq!(report.total, 0.0);
        assert_eq!(report.bonded, BondedEnergy::default());
        assert_eq!(report.nonbonded, NonbondedEnergy::default());
        assert!(report.forces.is_empty());
    }
}
