//! Tab-separated text output.

use std::io::{self, Write};

use crate::metadata::RunMetadata;

/// Write the metadata comment block, a blank line, then one row per
/// parameter: the parameter followed by its eigenvalues, 8 decimals each.
pub(crate) fn write_table<W: Write>(
    out: &mut W,
    parameters: &[f64],
    energies: &[Vec<f64>],
    metadata: &RunMetadata,
) -> io::Result<()> {
    for (name, value) in metadata.fields() {
        writeln!(out, "# {name} : {value}")?;
    }
    writeln!(out)?;

    for (parameter, row) in parameters.iter().zip(energies) {
        write!(out, "{parameter:.8}")?;
        for e in row {
            write!(out, "\t{e:.8}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
