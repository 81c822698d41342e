use ditherator::DitherError;

pub fn report_error(err: &DitherError) {
    match err {
        DitherError::SourceUnavailable { path, reason } => {
            eprintln!("Could not read image {}: {reason}", path.display());
            eprintln!();
            eprintln!("Supported inputs are the formats enabled in the `image` crate (PNG, JPEG, GIF, WebP, ...).");
        }
        DitherError::InvalidPattern(_) | DitherError::Json(_) => {
            eprintln!("{err}");
            eprintln!();
            eprintln!("A pattern table is a JSON array of 4 or 8 rows, each with as many integers (0-255).");
            eprintln!("Run `ditherator pattern show` for an example.");
        }
        _ => {
            eprintln!("{err}");
        }
    }
}
