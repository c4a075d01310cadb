use crate::cli::InfoArgs;
use crate::commands::SPAN_TOLERANCE;
use crate::error::{CliError, Result};
use std::io::{self, Write};
use tracing::info;
use xsfshift::core::io::{
    traits::VolumetricFile,
    xsf::{XsfFile, XsfMetadata},
};
use xsfshift::core::models::system::PeriodicSystem;
use xsfshift::engine::shift::strip_periodic_boundary;

pub fn run(args: InfoArgs) -> Result<()> {
    run_to(args, &mut io::stdout().lock())
}

fn run_to(args: InfoArgs, out: &mut impl Write) -> Result<()> {
    info!("Inspecting {:?}", &args.input);
    let (system, metadata) =
        XsfFile::read_from_path(&args.input).map_err(|e| CliError::FileParsing {
            path: args.input.clone(),
            source: e.into(),
        })?;
    describe(&system, &metadata, out)
}

fn describe(system: &PeriodicSystem, metadata: &XsfMetadata, out: &mut impl Write) -> Result<()> {
    let grid = &system.grid;
    let interior = strip_periodic_boundary(grid)?;

    writeln!(out, "Structure: {}", metadata.dimensionality)?;
    writeln!(out, "Lattice vectors (Å):")?;
    for row in system.lattice.matrix().row_iter() {
        writeln!(out, "  {:12.6} {:12.6} {:12.6}", row[0], row[1], row[2])?;
    }
    writeln!(out, "Cell volume: {:.6}", system.lattice.determinant().abs())?;

    writeln!(out, "Atoms: {}", system.atoms.len())?;
    for atom in &system.atoms {
        let p = atom.position;
        writeln!(out, "  {:<4} {:12.6} {:12.6} {:12.6}", atom.label, p.x, p.y, p.z)?;
    }
    if let Some(c) = system.atoms.centroid() {
        writeln!(out, "Atom centroid: {:.6} {:.6} {:.6}", c.x, c.y, c.z)?;
    }

    let [nx, ny, nz] = grid.counts();
    let origin = grid.origin();
    writeln!(
        out,
        "Grid '{}' in block '{}': {} x {} x {} samples",
        metadata.grid_name, metadata.block_name, nx, ny, nz
    )?;
    writeln!(out, "Grid origin: {:.6} {:.6} {:.6}", origin.x, origin.y, origin.z)?;
    writeln!(
        out,
        "Grid spans lattice: {}",
        yes_no(system.grid_matches_lattice(SPAN_TOLERANCE))
    )?;
    writeln!(out, "Periodic boundary: {}", yes_no(grid.is_periodic()))?;

    let [mx, my, mz] = interior.dims();
    let stats = interior.statistics();
    writeln!(out, "Independent samples: {} x {} x {} = {}", mx, my, mz, stats.count)?;
    writeln!(
        out,
        "Values: min {:.8}  max {:.8}  mean {:.8}",
        stats.min,
        stats.max,
        stats.mean().unwrap_or(0.0)
    )?;
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Matrix3, Point3, Vector3};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use xsfshift::core::models::{atom::AtomSet, grid::DataGrid, lattice::Lattice};

    const SLAB: &str = " SLAB\n PRIMVEC\n 2 0 0\n 0 2 0\n 0 0 2\n PRIMCOORD\n 2 1\n \
8 0.5 0.25 0.0\n 1 1.5 0.75 1.0\n BEGIN_BLOCK_DATAGRID_3D\n spin\n BEGIN_DATAGRID_3D_up\n \
3 2 2\n 0 0 0\n 2 0 0\n 0 2 0\n 0 0 2\n 1 3 1 1 3 1 1 3 1 1 3 1\n END_DATAGRID_3D_up\n \
END_BLOCK_DATAGRID_3D\n";

    fn sample_system() -> PeriodicSystem {
        let mut atoms = AtomSet::new();
        atoms.add_atom("8", Point3::new(0.5, 0.25, 0.0));
        let grid = DataGrid::new(
            [3, 2, 2],
            Vector3::zeros(),
            Matrix3::from_diagonal_element(2.0),
            vec![1.0, 3.0, 1.0, 1.0, 3.0, 1.0, 1.0, 3.0, 1.0, 1.0, 3.0, 1.0],
        )
        .unwrap();
        PeriodicSystem::new(Lattice::cubic(2.0), atoms, grid)
    }

    fn render(system: &PeriodicSystem) -> Result<String> {
        let mut out = Vec::new();
        describe(system, &XsfMetadata::default(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn describe_lists_lattice_atoms_and_grid() {
        let text = render(&sample_system()).unwrap();
        assert!(text.contains("Structure: CRYSTAL"));
        assert!(text.contains("Cell volume: 8.000000"));
        assert!(text.contains("Atoms: 1"));
        assert!(text.contains("Atom centroid: 0.500000 0.250000 0.000000"));
        assert!(text.contains("3 x 2 x 2 samples"));
        assert!(text.contains("Grid spans lattice: yes"));
        assert!(text.contains("Periodic boundary: yes"));
        assert!(text.contains("Independent samples: 2 x 1 x 1 = 2"));
        assert!(text.contains("mean 2.00000000"));
    }

    #[test]
    fn describe_rejects_grid_without_interior() {
        let mut system = sample_system();
        system.grid = DataGrid::new([1, 1, 1], Vector3::zeros(), Matrix3::identity(), vec![0.5])
            .unwrap();
        assert!(matches!(render(&system), Err(CliError::Engine(_))));
    }

    #[test]
    fn info_reads_file_and_reports_names() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("spin.xsf");
        fs::write(&input, SLAB).unwrap();

        let mut out = Vec::new();
        run_to(InfoArgs { input }, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Structure: SLAB"));
        assert!(text.contains("Grid 'up' in block 'spin': 3 x 2 x 2 samples"));
        assert!(text.contains("Atoms: 2"));
        assert!(text.contains("Atom centroid: 1.000000 0.500000 0.500000"));
        assert!(text.contains("Values: min 1.00000000  max 3.00000000  mean 2.00000000"));
    }

    #[test]
    fn info_on_missing_file_names_the_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.xsf");
        match run(InfoArgs {
            input: input.clone(),
        }) {
            Err(CliError::FileParsing { path, .. }) => assert_eq!(path, input),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn info_output_goes_to_stdout_writer() {
        let dir = tempdir().unwrap();
        let input: PathBuf = dir.path().join("rho.xsf");
        fs::write(&input, SLAB.replace(" SLAB", " CRYSTAL")).unwrap();
        assert!(run(InfoArgs { input }).is_ok());
    }
}
