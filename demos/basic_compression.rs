use huffarc::{compress, decompress, HuffmanCodec};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    println!("📝 Sample text: {} bytes", sample_text.len());

    let codec = HuffmanCodec::from_bytes(sample_text.as_bytes())?;
    for symbol in [b'e', b' ', b'z'] {
        if let Some(code) = codec.code_for(symbol) {
            println!("   {:?} -> {}", symbol as char, code);
        }
    }

    let archive = compress(sample_text.as_bytes())?;
    let compression_ratio = archive.len() as f64 / sample_text.len() as f64;
    println!(
        "🗜️  Compressed to: {} bytes ({:.1}% of original)",
        archive.len(),
        compression_ratio * 100.0
    );

    let decoded = decompress(&archive)?.into_result()?;
    if decoded == sample_text.as_bytes() {
        println!("✅ Decompression successful! Data matches exactly.");
    } else {
        println!("❌ Decompression failed! Data mismatch.");
        return Err("Decompression verification failed".into());
    }

    Ok(())
}
