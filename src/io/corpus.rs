//! # Variant Corpus Loading
//!
//! Reads the gzip-compressed, tab-delimited list of test variants into a
//! [`VariantCatalog`]. The first line is a header and is discarded; any
//! malformed line after it aborts the load.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::info;

use crate::data::{Variant, VariantCatalog};
use crate::error::{GtBenchError, Result};

/// Column offsets in the corpus file; field 0 carries an unused leading column.
const RSID_FIELD: usize = 1;
const CHROM_FIELD: usize = 2;
const POS_FIELD: usize = 3;

/// Load the variant corpus from a gzip-compressed file
pub fn load_catalog(path: &Path) -> Result<VariantCatalog> {
    let file = File::open(path)?;
    let reader = BufReader::new(GzDecoder::new(file));

    let catalog = read_catalog(reader)?;

    info!(
        "loaded {} variants across {} chromosomes from {}",
        catalog.n_variants(),
        catalog.n_chromosomes(),
        path.display()
    );

    Ok(catalog)
}

/// Parse corpus records from any line-oriented source
pub fn read_catalog(reader: impl BufRead) -> Result<VariantCatalog> {
    let mut catalog = VariantCatalog::new();

    for (line_idx, line) in reader.lines().enumerate() {
        let line = line?;

        // First line is the column header.
        if line_idx == 0 {
            continue;
        }
        let line_number = line_idx + 1;

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(GtBenchError::malformed(
                line_number,
                format!("expected at least 4 tab-separated fields, got {}", fields.len()),
            ));
        }

        let pos: u32 = fields[POS_FIELD].parse().map_err(|_| {
            GtBenchError::malformed(
                line_number,
                format!("invalid position {:?}", fields[POS_FIELD]),
            )
        })?;

        catalog.push(Variant::new(fields[RSID_FIELD], fields[CHROM_FIELD], pos));
    }

    Ok(catalog)
}
