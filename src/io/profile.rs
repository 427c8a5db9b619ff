//! CSV profile output for 1D runs.
//!
//! One file per dump with a row per node: coordinate, depth, free
//! surface, bed and momentum. Plots directly with any spreadsheet or
//! matplotlib.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use super::VtkError;
use crate::mesh::Mesh1D;
use crate::operators::{Operators1D, N_NODES_1D};
use crate::state::{FlowField1D, ScalarField1D};

/// Writes a numbered series of CSV profiles into one directory.
///
/// The directory is created on the first write if it does not exist.
pub struct ProfileWriter {
    dir: PathBuf,
    prefix: String,
    counter: usize,
}

impl ProfileWriter {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            counter: 0,
        }
    }

    pub fn profiles_written(&self) -> usize {
        self.counter
    }

    pub fn write_profile(
        &mut self,
        mesh: &Mesh1D,
        w: &FlowField1D,
        bed: &ScalarField1D,
        time: f64,
    ) -> Result<PathBuf, VtkError> {
        let ops = Operators1D::new();
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}_{:05}.csv", self.prefix, self.counter));
        let mut out = BufWriter::new(File::create(&path)?);
        writeln!(out, "# t = {time:.12e}")?;
        writeln!(out, "x,depth,free_surface,bed,momentum")?;
        for k in 0..mesh.n_elements() {
            for i in 0..N_NODES_1D {
                let x = mesh.map_to_physical(k, ops.nodes[i]);
                let h = w.get(k, i, 0);
                let b = bed.get(k, i, 0);
                let mu = w.get(k, i, 1);
                writeln!(out, "{x:.12e},{h:.12e},{:.12e},{b:.12e},{mu:.12e}", h + b)?;
            }
        }
        self.counter += 1;
        Ok(path)
    }
}
