pub fn run() -> anyhow::Result<()> {
    println!("matchwatch {}", env!("CARGO_PKG_VERSION"));
    println!("Live match alerts for tracked League of Legends players");
    Ok(())
}
