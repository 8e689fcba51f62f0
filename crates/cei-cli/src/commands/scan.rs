use cei_core::error::CeiError;
use std::path::PathBuf;

pub fn run(input_dir: PathBuf) -> Result<(), CeiError> {
    let pdfs = cei_core::locate::find_report_pdfs(&input_dir);
    if pdfs.is_empty() {
        println!("no report PDFs found under {}", input_dir.display());
        return Ok(());
    }
    for (path, year) in &pdfs {
        println!("{year}  {}", path.display());
    }
    Ok(())
}
