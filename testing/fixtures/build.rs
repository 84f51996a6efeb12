fn main() -> Result<(), Box<dyn std::error::Error>> {
    sheetease::build!("workbooks");

    Ok(())
}
