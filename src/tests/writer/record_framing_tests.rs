//! Tests for the bytes a writer produces.

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::config::{WriterContext, WriterProperties};
use crate::constants::ROW_SEPARATOR_KEY;
use crate::sink::MemoryFileSystem;
use crate::tests::utils::{expected_stream, init_logging, split_records, write_to_memory};
use crate::writer::RecordWriter;

#[test]
fn test_default_separator_is_newline() {
    init_logging();
    let output = write_to_memory(
        &WriterProperties::new(),
        &WriterContext::default(),
        false,
        &["ab", "cd"],
    )
    .unwrap();

    assert_eq!(output, vec![0x61, 0x62, 0x0A, 0x63, 0x64, 0x0A]);
}

#[test]
fn test_numeric_separator() {
    let properties = WriterProperties::new().with(ROW_SEPARATOR_KEY, "44");
    let output = write_to_memory(&properties, &WriterContext::default(), false, &["x"]).unwrap();

    assert_eq!(output, vec![0x78, 0x2C]);
}

#[test]
fn test_character_separator() {
    let properties = WriterProperties::new().with(ROW_SEPARATOR_KEY, "|");
    let output =
        write_to_memory(&properties, &WriterContext::default(), false, &["a", "b"]).unwrap();

    assert_eq!(output, b"a|b|");
}

#[test]
fn test_numeric_separator_is_not_first_character() {
    let properties = WriterProperties::new().with(ROW_SEPARATOR_KEY, "1");
    let output = write_to_memory(&properties, &WriterContext::default(), false, &["a"]).unwrap();

    assert_eq!(output, vec![b'a', 0x01]);
}

#[test]
fn test_negative_separator() {
    let properties = WriterProperties::new().with(ROW_SEPARATOR_KEY, "-1");
    let output = write_to_memory(&properties, &WriterContext::default(), false, &["a"]).unwrap();

    assert_eq!(output, vec![b'a', 0xFF]);
}

#[test]
fn test_empty_record_writes_only_separator() {
    let output = write_to_memory(
        &WriterProperties::new(),
        &WriterContext::default(),
        false,
        &[""],
    )
    .unwrap();
    assert_eq!(output, b"\n");

    let output = write_to_memory(
        &WriterProperties::new(),
        &WriterContext::default(),
        false,
        &["a", "", "", "b"],
    )
    .unwrap();
    assert_eq!(output, b"a\n\n\nb\n");
}

#[test]
fn test_no_records_writes_nothing() {
    let records: [&[u8]; 0] = [];
    let output = write_to_memory(
        &WriterProperties::new(),
        &WriterContext::default(),
        false,
        &records,
    )
    .unwrap();

    assert!(output.is_empty());
}

#[test]
fn test_binary_records_are_written_verbatim() {
    let records: Vec<Vec<u8>> = vec![vec![0x00, 0x01, 0xFE], vec![0x80; 300], vec![0x0D]];
    let output = write_to_memory(
        &WriterProperties::new(),
        &WriterContext::default().with_buffer_size(16),
        false,
        &records,
    )
    .unwrap();

    assert_eq!(output, expected_stream(&records, b'\n'));
}

#[test]
fn test_random_records_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..20 {
        let separator: u8 = rng.gen();
        let num_records = rng.gen_range(0..50);
        let records: Vec<Vec<u8>> = (0..num_records)
            .map(|_| {
                let len = rng.gen_range(0..200);
                (0..len)
                    .map(|_| loop {
                        let b: u8 = rng.gen();
                        if b != separator {
                            break b;
                        }
                    })
                    .collect()
            })
            .collect();

        let properties =
            WriterProperties::new().with(ROW_SEPARATOR_KEY, (separator as i8).to_string());
        let context = WriterContext::default().with_buffer_size(rng.gen_range(1..128));
        let output = write_to_memory(&properties, &context, false, &records).unwrap();

        assert_eq!(output, expected_stream(&records, separator));
        assert_eq!(split_records(&output, separator), records);
    }
}

#[test]
fn test_written_bytes_is_monotonic_and_bounded() {
    let fs = MemoryFileSystem::new();
    let context = WriterContext::default().with_buffer_size(7);
    let mut writer =
        RecordWriter::create("part", &context, &WriterProperties::new(), false, &fs).unwrap();

    let mut last = writer.written_bytes().unwrap();
    assert_eq!(last, 0);

    for i in 0..100 {
        writer.write_record(format!("record-{}", i).as_bytes()).unwrap();
        let current = writer.written_bytes().unwrap();
        assert!(current >= last, "written_bytes decreased: {} -> {}", last, current);
        last = current;
    }

    writer.close(false).unwrap();
    let final_size = fs.contents("part").unwrap().len() as u64;
    assert!(last <= final_size);
}

#[test]
fn test_written_bytes_lags_until_flush() {
    let fs = MemoryFileSystem::new();
    let context = WriterContext::default().with_buffer_size(1024);
    let mut writer =
        RecordWriter::create("part", &context, &WriterProperties::new(), false, &fs).unwrap();

    writer.write_record(b"abc").unwrap();
    assert_eq!(writer.written_bytes().unwrap(), 0);

    writer.flush().unwrap();
    assert_eq!(writer.written_bytes().unwrap(), 4);

    writer.close(false).unwrap();
    assert_eq!(fs.contents("part").unwrap().as_ref(), b"abc\n");
}
