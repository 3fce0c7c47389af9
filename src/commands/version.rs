use anyhow::Result;

pub fn execute() -> Result<()> {
    println!("solar-guardian version {}", env!("CARGO_PKG_VERSION"));
    Ok(())
}
