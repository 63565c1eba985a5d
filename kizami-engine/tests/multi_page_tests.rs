//! Page tracking across multi-page documents

use kizami_engine::{Chunker, ChunkingOptions};

fn page(tag: &str, words: usize) -> String {
    let mut text = String::new();
    for i in 0..words {
        if i > 0 {
            text.push(' ');
        }
        text.push_str(&format!("{tag}{i}"));
    }
    text
}

#[test]
fn test_three_page_document_tagging() {
    let pages = [page("alpha", 60), page("beta", 60), page("gamma", 60)];
    let mut chunker = Chunker::new();

    for options in [
        ChunkingOptions::characters(120).with_overlap(0.1),
        ChunkingOptions::characters(80).with_overlap(0.3),
        ChunkingOptions::tokens(40).with_overlap(0.1),
        ChunkingOptions::tokens(25).with_overlap(0.0),
    ] {
        let chunks = chunker.chunk_document(&pages, &options).unwrap();
        assert!(chunks.len() >= 3, "expected several chunks per document");

        let mut last_start = 0;
        let mut last_page = 0;
        for chunk in &chunks {
            assert!(chunk.page_number < pages.len(), "page out of range");
            assert!(chunk.start_index >= last_start, "chunks must be ordered");
            assert!(
                chunk.page_number >= last_page,
                "page numbers must be monotonically non-decreasing"
            );
            last_start = chunk.start_index;
            last_page = chunk.page_number;
        }
        assert_eq!(chunks[0].page_number, 0);
        assert!(
            chunks.iter().any(|c| c.page_number == 2),
            "tail chunks should land on the last page"
        );
    }
}

#[test]
fn test_chunk_content_matches_owning_page() {
    let pages = [page("first", 40), page("second", 40)];
    let mut chunker = Chunker::new();
    let options = ChunkingOptions::characters(90).with_overlap(0.0);
    let chunks = chunker.chunk_document(&pages, &options).unwrap();

    for chunk in &chunks {
        if chunk.page_number == 1 {
            // A chunk tagged with the second page starts past the separator,
            // so nothing from the first page can appear in it
            assert!(
                chunk.content.split_whitespace().all(|w| w.starts_with("second")),
                "page-1 chunk leaked first-page content: {:?}",
                chunk.content
            );
        }
        if chunk.content.split_whitespace().any(|w| w.starts_with("first")) {
            assert_eq!(chunk.page_number, 0, "first-page content must be tagged page 0");
        }
    }
}

#[test]
fn test_single_page_is_page_zero() {
    let mut chunker = Chunker::new();
    let chunks = chunker
        .chunk_document(&[page("only", 80)], &ChunkingOptions::characters(100))
        .unwrap();
    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|c| c.page_number == 0));
}

#[test]
fn test_offsets_span_page_separators() {
    // Offsets index into the page concatenation, separator bytes included
    let pages = ["aa".to_string(), "bb".to_string()];
    let mut chunker = Chunker::new();
    let options = ChunkingOptions::characters(100);
    let chunks = chunker.chunk_document(&pages, &options).unwrap();

    // "aa\n\nbb" fits one chunk; the whole logical document is covered
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].start_index, 0);
    assert_eq!(chunks[0].end_index, 6);
    assert_eq!(chunks[0].content, "aa\n\nbb");
    assert_eq!(chunks[0].page_number, 0);
}

#[test]
fn test_statistics_count_page_bytes() {
    let pages = [page("one", 30), page("two", 30)];
    let total: usize = pages.iter().map(String::len).sum();
    let mut chunker = Chunker::new();
    chunker
        .chunk_document(&pages, &ChunkingOptions::tokens(20))
        .unwrap();
    assert_eq!(chunker.total_characters(), total);
    assert!(chunker.chunk_count() > 0);
}
