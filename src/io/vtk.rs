//! VTK XML unstructured grid output.
//!
//! Every element is written as its own quad with duplicated corner
//! points, so the discontinuous nodal data appears unsmoothed in
//! ParaView. Snapshots carry the free surface, depth and velocity; the
//! bed goes into a separate one-off file.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::mesh::Mesh2D;
use crate::operators::{Operators2D, N_NODES_2D};
use crate::state::{FlowField2D, ScalarField2D};

#[derive(Debug, Error)]
pub enum VtkError {
    #[error("I/O error writing VTK file: {0}")]
    Io(#[from] std::io::Error),

    #[error("field covers {field} elements but the mesh has {mesh}")]
    SizeMismatch { field: usize, mesh: usize },
}

/// Writes a numbered series of VTU snapshots into one directory.
///
/// The directory is created on the first write if it does not exist.
pub struct SnapshotWriter {
    dir: PathBuf,
    prefix: String,
    counter: usize,
}

impl SnapshotWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn snapshots_written(&self) -> usize {
        self.counter
    }

    /// Write the bed elevation once, as `<prefix>_bed.vtu`.
    pub fn write_bed(&self, mesh: &Mesh2D, bed: &ScalarField2D) -> Result<PathBuf, VtkError> {
        check_size(bed.n_elements(), mesh.n_elements())?;
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(format!("{}_bed.vtu", self.prefix));
        let file = BufWriter::new(File::create(&path)?);
        write_vtu(file, mesh, |out| {
            write_scalar(out, "bed", mesh, |k, i| bed.get(k, i, 0))
        })?;
        Ok(path)
    }

    /// Write the next numbered flow snapshot.
    pub fn write_flow(
        &mut self,
        mesh: &Mesh2D,
        w: &FlowField2D,
        bed: &ScalarField2D,
        time: f64,
    ) -> Result<PathBuf, VtkError> {
        check_size(w.n_elements(), mesh.n_elements())?;
        check_size(bed.n_elements(), mesh.n_elements())?;
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}_{:05}.vtu", self.prefix, self.counter));
        let file = BufWriter::new(File::create(&path)?);
        write_vtu(file, mesh, |out| {
            writeln!(
                out,
                "      <DataArray type=\"Float64\" Name=\"time\" NumberOfTuples=\"1\" format=\"ascii\">{time:.12e}</DataArray>"
            )?;
            write_scalar(out, "depth", mesh, |k, i| w.get(k, i, 0))?;
            write_scalar(out, "free_surface", mesh, |k, i| {
                w.get(k, i, 0) + bed.get(k, i, 0)
            })?;
            write_vector(out, "velocity", mesh, |k, i| w.flow(k, i).velocity())
        })?;
        self.counter += 1;
        Ok(path)
    }
}

fn check_size(field: usize, mesh: usize) -> Result<(), VtkError> {
    if field == mesh {
        Ok(())
    } else {
        Err(VtkError::SizeMismatch { field, mesh })
    }
}

fn write_vtu<W: Write>(
    mut out: W,
    mesh: &Mesh2D,
    point_data: impl FnOnce(&mut W) -> Result<(), VtkError>,
) -> Result<(), VtkError> {
    let ops = Operators2D::new();
    let n_cells = mesh.n_elements();
    let n_points = n_cells * N_NODES_2D;

    writeln!(out, "<?xml version=\"1.0\"?>")?;
    writeln!(
        out,
        "<VTKFile type=\"UnstructuredGrid\" version=\"0.1\" byte_order=\"LittleEndian\">"
    )?;
    writeln!(out, "  <UnstructuredGrid>")?;
    writeln!(
        out,
        "    <Piece NumberOfPoints=\"{n_points}\" NumberOfCells=\"{n_cells}\">"
    )?;

    writeln!(out, "      <Points>")?;
    writeln!(
        out,
        "        <DataArray type=\"Float64\" NumberOfComponents=\"3\" format=\"ascii\">"
    )?;
    for k in 0..n_cells {
        for &(r, s) in &ops.nodes {
            let (x, y) = mesh.map_to_physical(k, r, s);
            writeln!(out, "          {x:.12e} {y:.12e} 0.0")?;
        }
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(out, "      </Points>")?;

    writeln!(out, "      <Cells>")?;
    writeln!(
        out,
        "        <DataArray type=\"Int64\" Name=\"connectivity\" format=\"ascii\">"
    )?;
    for k in 0..n_cells {
        // VTK_QUAD wants counter-clockwise corner order
        let p = k * N_NODES_2D;
        writeln!(out, "          {} {} {} {}", p, p + 1, p + 3, p + 2)?;
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(
        out,
        "        <DataArray type=\"Int64\" Name=\"offsets\" format=\"ascii\">"
    )?;
    for k in 0..n_cells {
        writeln!(out, "          {}", (k + 1) * N_NODES_2D)?;
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(
        out,
        "        <DataArray type=\"UInt8\" Name=\"types\" format=\"ascii\">"
    )?;
    for _ in 0..n_cells {
        writeln!(out, "          9")?;
    }
    writeln!(out, "        </DataArray>")?;
    writeln!(out, "      </Cells>")?;

    writeln!(out, "      <PointData>")?;
    point_data(&mut out)?;
    writeln!(out, "      </PointData>")?;

    writeln!(out, "    </Piece>")?;
    writeln!(out, "  </UnstructuredGrid>")?;
    writeln!(out, "</VTKFile>")?;
    Ok(())
}

fn write_scalar<W: Write>(
    out: &mut W,
    name: &str,
    mesh: &Mesh2D,
    value: impl Fn(usize, usize) -> f64,
) -> Result<(), VtkError> {
    writeln!(
        out,
        "      <DataArray type=\"Float64\" Name=\"{name}\" format=\"ascii\">"
    )?;
    for k in 0..mesh.n_elements() {
        for i in 0..N_NODES_2D {
            writeln!(out, "          {:.12e}", value(k, i))?;
        }
    }
    writeln!(out, "      </DataArray>")?;
    Ok(())
}

fn write_vector<W: Write>(
    out: &mut W,
    name: &str,
    mesh: &Mesh2D,
    value: impl Fn(usize, usize) -> (f64, f64),
) -> Result<(), VtkError> {
    writeln!(
        out,
        "      <DataArray type=\"Float64\" Name=\"{name}\" NumberOfComponents=\"3\" format=\"ascii\">"
    )?;
    for k in 0..mesh.n_elements() {
        for i in 0..N_NODES_2D {
            let (u, v) = value(k, i);
            writeln!(out, "          {u:.12e} {v:.12e} 0.0")?;
        }
    }
    writeln!(out, "      </DataArray>")?;
    Ok(())
}
