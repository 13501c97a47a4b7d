use huffarc::{
    build_code_table, build_frequency_table, build_tree, compress, decode, decompress,
    deserialize_histogram, encode, header_size, serialize_histogram, BitVec, CompressedData,
    FrequencyTable, HuffmanCodec,
};
use rand::Rng;

fn roundtrip(input: &[u8]) {
    let tree = build_tree(&build_frequency_table(input).unwrap()).unwrap();
    let table = build_code_table(&tree).unwrap();
    let bits = encode(input, &table).unwrap();
    let decoded = decode(&bits, &tree);
    assert!(decoded.aligned);
    assert_eq!(decoded.bytes, input);
}

#[test]
fn test_roundtrip_fixed_inputs() {
    roundtrip(b"");
    roundtrip(b"a");
    roundtrip(b"aaaaaaaaaaaaaaaa");
    roundtrip(b"aaab");
    roundtrip(&(0..=u8::MAX).collect::<Vec<u8>>());
    roundtrip("Hello, wörld! ünïcödé".as_bytes());
}

#[test]
fn test_roundtrip_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..20 {
        let len = rng.gen_range(0..4000);
        let alphabet = rng.gen_range(1..=256u32);
        let input: Vec<u8> = (0..len).map(|_| rng.gen_range(0..alphabet) as u8).collect();
        roundtrip(&input);
        assert_eq!(
            decompress(&compress(&input).unwrap()).unwrap().into_result().unwrap(),
            input
        );
    }
}

#[test]
fn test_histogram_roundtrip_random() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let mut table = FrequencyTable::new();
        let distinct = rng.gen_range(0..=256usize);
        for symbol in 0..distinct {
            table.set(symbol as u8, rng.gen_range(1..=u32::MAX));
        }
        let bytes = serialize_histogram(&table);
        assert_eq!(header_size(&bytes).unwrap(), bytes.len());
        assert_eq!(deserialize_histogram(&bytes).unwrap(), table);
        assert!(deserialize_histogram(&bytes[..bytes.len() - 1]).is_err());
    }
}

#[test]
fn test_bitvec_roundtrip_random() {
    let mut rng = rand::thread_rng();
    for len in 0..100 {
        let bits: BitVec = (0..len).map(|_| rng.gen_bool(0.5)).collect();
        let mut restored = BitVec::new();
        restored.deserialize(&bits.serialize().unwrap()).unwrap();
        assert_eq!(restored, bits);
    }
}

#[test]
fn test_independent_builds_agree() {
    // many equal weights so every tie rule is exercised
    let input: Vec<u8> = (0..=u8::MAX).cycle().take(256 * 3 + 17).collect();
    let a = HuffmanCodec::from_bytes(&input).unwrap();
    let b = HuffmanCodec::new(deserialize_histogram(&serialize_histogram(a.histogram())).unwrap())
        .unwrap();
    assert_eq!(a.tree(), b.tree());
    assert_eq!(a.code_table(), b.code_table());
    assert_eq!(a.encode(&input).unwrap(), b.encode(&input).unwrap());
}

#[test]
fn test_archive_splits_at_header_size() {
    let input = b"split me at the histogram boundary";
    let archive = compress(input).unwrap();
    let split = header_size(&archive).unwrap();

    let histogram = deserialize_histogram(&archive[..split]).unwrap();
    let mut payload = BitVec::new();
    let consumed = payload.deserialize(&archive[split..]).unwrap();
    assert_eq!(split + consumed, archive.len());

    let tree = build_tree(&histogram).unwrap();
    assert_eq!(decode(&payload, &tree).into_result().unwrap(), input);
    assert_eq!(
        CompressedData::deserialize(&archive).unwrap(),
        CompressedData { histogram, payload }
    );
}

#[test]
fn test_truncated_archive_decodes_partially() {
    let input = b"abcdefghabcdefgh";
    let codec = HuffmanCodec::from_bytes(input).unwrap();
    let mut bits = codec.encode(input).unwrap();
    bits.pop_bit().unwrap();

    let decoded = codec.decode(&bits);
    assert!(!decoded.aligned);
    assert!(!decoded.bytes.is_empty());
    assert!(input.starts_with(&decoded.bytes));
}
