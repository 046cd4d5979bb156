use claritycoach_core::Dialog;

/// Batch classification. Never touches the stored chat session.
pub fn run(texts: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let results = Dialog::default().classify_batch(texts);
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
