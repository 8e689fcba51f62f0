use cei_core::error::CeiError;
use cei_core::extraction::camelot::CamelotExtractor;
use cei_core::extraction::ocr::TesseractOcr;
use cei_core::ExtractOptions;
use std::path::PathBuf;

pub fn run(input_dir: PathBuf, output_dir: PathBuf) -> Result<(), CeiError> {
    let opts = ExtractOptions {
        input_dir,
        output_dir,
    };
    let tables = CamelotExtractor::new();
    let ocr = TesseractOcr::new();

    let (succeeded, failed) = cei_core::process_missing_years(&opts, &tables, &ocr);

    println!(
        "processed {} year(s), {} failed",
        succeeded.len(),
        failed.len()
    );
    for year in &failed {
        eprintln!("  year {year}: no data extracted");
    }

    if succeeded.is_empty() && !failed.is_empty() {
        return Err(CeiError::Extraction(
            "no missing year produced any data".into(),
        ));
    }
    Ok(())
}
