//! Tests for writers created with compression requested.

use crate::compression::CompressionType;
use crate::config::{WriterContext, WriterProperties};
use crate::error::WriterError;
use crate::sink::MemoryFileSystem;
use crate::writer::RecordWriter;

#[test]
fn test_none_codec_writes_plain_bytes() {
    let fs = MemoryFileSystem::new();
    let context = WriterContext::default().with_codec(CompressionType::None);
    let mut writer =
        RecordWriter::create("part", &context, &WriterProperties::new(), true, &fs).unwrap();

    writer.write_record(b"ab").unwrap();
    writer.close(false).unwrap();

    assert_eq!(fs.contents("part").unwrap().as_ref(), b"ab\n");
}

#[cfg(feature = "zstd")]
mod zstd_tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::compression::ZstdSink;
    use crate::constants::ROW_SEPARATOR_KEY;
    use crate::tests::utils::{expected_stream, FailingSink};

    fn zstd_context() -> WriterContext {
        WriterContext::default().with_codec(CompressionType::Zstd)
    }

    fn decompress(data: &[u8]) -> Vec<u8> {
        zstd::stream::decode_all(data).expect("Failed to decode zstd frame")
    }

    #[test]
    fn test_commit_round_trip() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            RecordWriter::create("part", &zstd_context(), &WriterProperties::new(), true, &fs)
                .unwrap();

        writer.write_record(b"ab").unwrap();
        writer.write_record(b"cd").unwrap();
        writer.close(false).unwrap();

        let compressed = fs.contents("part").unwrap();
        assert_ne!(compressed.as_ref(), b"ab\ncd\n");
        assert_eq!(decompress(&compressed), b"ab\ncd\n");
    }

    #[test]
    fn test_abort_leaves_valid_frame() {
        let fs = MemoryFileSystem::new();
        let properties = WriterProperties::new().with(ROW_SEPARATOR_KEY, "|");
        let mut writer =
            RecordWriter::create("part", &zstd_context(), &properties, true, &fs).unwrap();

        writer.write_record(b"a").unwrap();
        writer.write_record(b"b").unwrap();
        writer.close(true).unwrap();

        let compressed = fs.contents("part").unwrap();
        assert_eq!(decompress(&compressed), b"a|b|");
    }

    #[test]
    fn test_abort_without_records_leaves_valid_frame() {
        let fs = MemoryFileSystem::new();
        let mut writer =
            RecordWriter::create("part", &zstd_context(), &WriterProperties::new(), true, &fs)
                .unwrap();
        writer.close(true).unwrap();

        let compressed = fs.contents("part").unwrap();
        assert!(!compressed.is_empty());
        assert!(decompress(&compressed).is_empty());
    }

    #[test]
    fn test_written_bytes_counts_compressed_output() {
        let fs = MemoryFileSystem::new();
        let context = zstd_context().with_buffer_size(1 << 20);
        let mut writer =
            RecordWriter::create("part", &context, &WriterProperties::new(), true, &fs).unwrap();

        let records: Vec<Vec<u8>> = (0..1000).map(|i| format!("row {}", i % 10).into_bytes()).collect();
        for record in &records {
            writer.write_record(record).unwrap();
        }
        // Everything is still buffered in the encoder or the raw sink.
        assert_eq!(writer.written_bytes().unwrap(), 0);

        writer.flush().unwrap();
        let flushed = writer.written_bytes().unwrap();
        assert!(flushed > 0);

        writer.close(false).unwrap();
        let compressed = fs.contents("part").unwrap();
        assert!(flushed <= compressed.len() as u64);
        assert!(compressed.len() < expected_stream(&records, b'\n').len());
        assert_eq!(decompress(&compressed), expected_stream(&records, b'\n'));
    }

    #[test]
    fn test_invalid_level_fails_before_sink_is_created() {
        let fs = MemoryFileSystem::new();
        let context = zstd_context().with_compression_level(0);

        let result = RecordWriter::create("part", &context, &WriterProperties::new(), true, &fs);
        assert!(matches!(result, Err(WriterError::InvalidConfiguration(_))));
        assert!(fs.destinations().is_empty());
    }

    #[test]
    fn test_raw_sink_released_when_compressed_close_fails() {
        let raw = FailingSink::new().with_failing_close();
        let close_calls = raw.close_calls();
        let sink = ZstdSink::with_level(Box::new(raw), 3).unwrap();
        let mut writer = RecordWriter::with_sink(Box::new(sink), b'\n');

        writer.write_record(b"abc").unwrap();
        assert!(matches!(writer.close(true), Err(WriterError::Io(_))));
        assert_eq!(close_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_raw_sink_released_when_frame_cannot_be_finished() {
        // The raw sink rejects everything, so the frame epilogue cannot be written.
        let raw = FailingSink::new().with_write_limit(0);
        let close_calls = raw.close_calls();
        let sink = ZstdSink::with_level(Box::new(raw), 3).unwrap();
        let mut writer = RecordWriter::with_sink(Box::new(sink), b'\n');

        // The encoder buffers small inputs, so this write does not reach the raw sink.
        writer.write_record(b"abc").unwrap();
        assert!(matches!(writer.close(true), Err(WriterError::Io(_))));
        assert_eq!(close_calls.load(Ordering::SeqCst), 1);
    }
}
