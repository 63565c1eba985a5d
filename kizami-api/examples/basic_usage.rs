//! Basic usage example for the kizami chunking API

use kizami_api::{chunk_text, ChunkProcessor, Config, Input};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: Simplest usage with the convenience function
    println!("=== Method 1: Convenience Function ===");
    let output = chunk_text("Hello world. This short text fits in one chunk.")?;

    println!("Produced {} chunk(s):", output.chunks.len());
    for (i, chunk) in output.chunks.iter().enumerate() {
        println!(
            "  Chunk {}: bytes {}..{} (~{} tokens)",
            i + 1,
            chunk.start_index,
            chunk.end_index,
            chunk.estimated_tokens
        );
    }
    println!(
        "Processing took {:.2}ms\n",
        output.metadata.processing_time_ms
    );

    // Method 2: Configuration presets
    println!("=== Method 2: Embedding Preset ===");
    let long_text = "Every document gets split into pieces sized for the embedding model. "
        .repeat(50);
    let mut processor = ChunkProcessor::with_config(Config::embedding());
    let output = processor.process_text(&long_text)?;
    println!("Embedding preset produced {} chunk(s)", output.chunks.len());

    // Method 3: Custom configuration
    println!("\n=== Method 3: Custom Configuration ===");
    let config = Config::builder()
        .chunk_size(120)
        .characters()
        .overlap_percentage(0.2)
        .build()?;
    let mut processor = ChunkProcessor::with_config(config);
    let output = processor.process_text(&long_text)?;
    println!(
        "Character mode produced {} chunk(s) of ~120 characters",
        output.chunks.len()
    );

    // Method 4: Multi-page documents
    println!("\n=== Method 4: Multi-Page Document ===");
    let pages = vec![
        "First page of the report with its own paragraphs.".to_string(),
        "Second page continuing the discussion in more detail.".to_string(),
        "Third page wrapping everything up.".to_string(),
    ];
    let mut processor = ChunkProcessor::new();
    let output = processor.process(Input::from_pages(pages))?;
    for chunk in &output.chunks {
        println!("  page {}: {:?}", chunk.page_number, chunk.content);
    }

    Ok(())
}
