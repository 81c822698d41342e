use std::fs;
use std::path::{Path, PathBuf};

use ditherator::{DitherAlgorithm, DitherResult, Ditherator, PatternPreset, PatternTable};

use crate::cli::DitherArgs;

/// Build a Ditherator from the dither arguments, committing the selected
/// pattern table to its shared slot.
pub fn build_ditherator(args: &DitherArgs) -> DitherResult<Ditherator> {
    let ditherator = Ditherator::new()
        .with_source_settings(args.into())
        .with_algorithm(args.algorithm.into())
        .with_threshold(args.threshold);

    if let Some(table) = resolve_pattern(args)? {
        if pattern_is_ignored(args) {
            tracing::warn!(
                algorithm = %DitherAlgorithm::from(args.algorithm),
                "pattern table only affects horizontal-line dithering"
            );
        }
        ditherator.pattern().set(table);
    }
    Ok(ditherator)
}

/// Whether a table was requested for an algorithm that never reads one.
pub fn pattern_is_ignored(args: &DitherArgs) -> bool {
    let requested = args.pattern.is_some() || args.preset.is_some();
    requested && !DitherAlgorithm::from(args.algorithm).uses_pattern()
}

/// The table requested on the command line, if any.
pub fn resolve_pattern(args: &DitherArgs) -> DitherResult<Option<PatternTable>> {
    match (&args.pattern, args.preset) {
        (Some(path), _) => load_pattern(path).map(Some),
        (None, Some(preset)) => Ok(Some(PatternPreset::from(preset).table())),
        (None, None) => Ok(None),
    }
}

/// Read a JSON pattern table from disk.
pub fn load_pattern(path: &Path) -> DitherResult<PatternTable> {
    let json = fs::read_to_string(path)?;
    PatternTable::from_json(&json)
}

/// Render a table as JSON with one row per line.
///
/// `serde_json`'s pretty printer would put every cell on its own line, so
/// each row is serialized compactly and the rows are stacked.
pub fn format_pattern(table: &PatternTable) -> DitherResult<String> {
    let rows = table
        .rows()
        .iter()
        .map(|row| serde_json::to_string(row).map(|json| format!("  {json}")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("[\n{}\n]", rows.join(",\n")))
}

/// Derive a variant file path by appending a suffix before the extension.
pub fn derive_variant_path(input: &Path, suffix: &str, extension: &str) -> PathBuf {
    let mut derived = input.to_path_buf();
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| suffix.to_string());
    let filename = format!("{}-{}.{}", stem, suffix, extension);
    derived.set_file_name(filename);
    derived
}
