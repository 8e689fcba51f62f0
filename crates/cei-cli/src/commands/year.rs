use cei_core::error::CeiError;
use cei_core::extraction::camelot::CamelotExtractor;
use cei_core::extraction::ocr::TesseractOcr;
use cei_core::ExtractOptions;
use std::path::PathBuf;

pub fn run(year: u16, input_dir: PathBuf, output_dir: PathBuf) -> Result<(), CeiError> {
    let opts = ExtractOptions {
        input_dir,
        output_dir,
    };
    let tables = CamelotExtractor::new();
    let ocr = TesseractOcr::new();

    let path = cei_core::process_year(&opts, year, &tables, &ocr)?;
    println!("wrote {}", path.display());
    Ok(())
}
