use ditherator::{DitherAlgorithm, DitherResult};

/// Print every algorithm key with its name and description.
pub fn run() -> DitherResult<()> {
    for algorithm in DitherAlgorithm::ALL {
        println!(
            "{:<16} {:<16} {}",
            algorithm.key(),
            algorithm.name(),
            algorithm.description()
        );
    }
    Ok(())
}
