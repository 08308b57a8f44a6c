//! Cross-backend write/read series.
//!
//! Every backend must hand back exactly the bytes it was given, in order,
//! under arbitrary write/read interleavings. The series below runs random
//! payloads at doubling sizes through each backend, with partial drains and
//! re-writes in between.

use streambuf::{
    Buffer, BufferError, Capacity, FileBuffer, MemoryBuffer, MultiBuffer, PartitionBuffer,
    file_chunk, memory_chunk, spill, spill_unbounded,
};

/// Payload cap for unbounded backends. Bounded backends use their own
/// capacity, which must stay at or below 1024 here: the partial-drain phase
/// holds up to `2 * (size - 512)` bytes at once.
const UNBOUNDED_LIMIT: usize = 1 << 20;

fn rand_payload(size: usize) -> Vec<u8> {
    let mut data = vec![0u8; size];
    getrandom::fill(&mut data).expect("random payload");
    data
}

fn write_all<B: Buffer>(buf: &mut B, data: &[u8]) {
    let n = buf.write(data).expect("write within capacity");
    assert_eq!(n, data.len());
}

fn read_all<B: Buffer>(buf: &mut B) -> Vec<u8> {
    let mut out = Vec::new();
    let mut scratch = [0u8; 512];
    loop {
        match buf.read(&mut scratch) {
            Ok(n) => out.extend_from_slice(&scratch[..n]),
            Err(BufferError::Empty) => return out,
            Err(err) => panic!("read failed: {err}"),
        }
    }
}

fn series_limit<B: Buffer>(buf: &B) -> usize {
    match buf.capacity() {
        Capacity::Bounded(n) => n,
        Capacity::Unbounded => UNBOUNDED_LIMIT,
    }
}

/// Write `size` random bytes, read them all back, then replay the tail of
/// the payload through a partial drain.
fn perfect_match<B: Buffer>(buf: &mut B, size: usize) {
    let wrote = rand_payload(size);
    write_all(buf, &wrote);
    let read = read_all(buf);
    assert_eq!(wrote, read, "{size}-byte round trip out of order");

    back_and_forth(buf, &wrote);
}

/// Partial-drain replay: write the payload, read up to 512 bytes, compare
/// the halves, re-write the unread suffix and expect it twice on drain.
fn back_and_forth<B: Buffer>(buf: &mut B, payload: &[u8]) {
    write_all(buf, payload);

    let mut half = [0u8; 512];
    let n = match buf.read(&mut half) {
        Ok(n) => n,
        Err(BufferError::Empty) => 0,
        Err(err) => panic!("read failed: {err}"),
    };
    assert_eq!(&half[..n], &payload[..n]);

    write_all(buf, &payload[n..]);
    let rest = read_all(buf);

    let mut expected = payload[n..].to_vec();
    expected.extend_from_slice(&payload[n..]);
    assert_eq!(rest, expected);
}

/// The "hello world" interleaving: drain, refill, partial read, append,
/// drain across the seam.
fn simple_interleave<B: Buffer>(buf: &mut B) {
    write_all(buf, b"hello world");
    assert_eq!(read_all(buf), b"hello world");

    write_all(buf, b"hello world");
    let mut three = [0u8; 3];
    assert_eq!(buf.read(&mut three).unwrap(), 3);
    assert_eq!(&three, b"hel");
    assert_eq!(buf.len(), 8);

    write_all(buf, b" yolo");
    assert_eq!(read_all(buf), b"lo world yolo");
}

fn perfect_series<B: Buffer>(buf: &mut B) {
    assert_eq!(buf.len(), 0, "buffer should start empty");
    assert!(matches!(buf.read(&mut [0u8; 1]), Err(BufferError::Empty)));

    simple_interleave(buf);

    let max = series_limit(buf);
    perfect_match(buf, 0);
    let mut size = 1;
    while size < max {
        perfect_match(buf, size);
        size *= 2;
    }
    perfect_match(buf, max);
}

#[test]
fn test_memory_series() {
    let mut buf = MemoryBuffer::new(1024);
    assert_eq!(buf.capacity(), Capacity::Bounded(1024));
    perfect_series(&mut buf);
}

#[test]
fn test_file_series() {
    let mut buf = FileBuffer::new(1024);
    assert_eq!(buf.capacity(), Capacity::Bounded(1024));
    perfect_series(&mut buf);
}

#[test]
fn test_memory_partition_series() {
    let mut buf = PartitionBuffer::new(1024, memory_chunk);
    assert_eq!(buf.capacity(), Capacity::Unbounded);
    perfect_series(&mut buf);
}

#[test]
fn test_file_partition_series() {
    // 64KB chunks keep the pool's open-file count modest at the series peak.
    let mut buf = PartitionBuffer::new(65536, file_chunk);
    assert_eq!(buf.capacity(), Capacity::Unbounded);
    perfect_series(&mut buf);
}

#[test]
fn test_multi_series() {
    let mut buf = MultiBuffer::new(vec![
        Box::new(MemoryBuffer::new(5)),
        Box::new(MemoryBuffer::new(5)),
        Box::new(FileBuffer::new(500)),
        Box::new(PartitionBuffer::new(1024, memory_chunk)),
    ]);
    assert_eq!(buf.capacity(), Capacity::Unbounded);
    perfect_series(&mut buf);
}

#[test]
fn test_spill_series() {
    let mut buf = spill_unbounded(4096, 65536);
    assert_eq!(buf.capacity(), Capacity::Unbounded);
    perfect_series(&mut buf);
}

#[test]
fn test_wraparound_traffic_exceeds_capacity() {
    // Cumulative traffic many times the capacity, running len never above
    // it; order must survive the physical wrap point. A 13-byte residue
    // stays buffered throughout so the rings actually wrap instead of
    // draining back to their start offsets every round.
    fn stream(i: usize) -> u8 {
        (i % 251) as u8
    }

    for mut buf in [
        Box::new(MemoryBuffer::new(97)) as Box<dyn Buffer>,
        Box::new(FileBuffer::new(97)),
    ] {
        let prime: Vec<u8> = (0..13).map(stream).collect();
        write_all(&mut buf, &prime);
        let mut wrote = 13;
        let mut consumed = 0;

        let mut out = [0u8; 29];
        for _ in 0..200 {
            let chunk: Vec<u8> = (wrote..wrote + 29).map(stream).collect();
            write_all(&mut buf, &chunk);
            wrote += 29;

            assert_eq!(buf.read(&mut out).unwrap(), 29);
            let want: Vec<u8> = (consumed..consumed + 29).map(stream).collect();
            assert_eq!(out.as_slice(), want);
            consumed += 29;
        }
        assert_eq!(buf.len(), 13);
    }
}

#[test]
fn test_memory_overflow_vector() {
    let mut buf = MemoryBuffer::new(1024);
    let data = rand_payload(2048);

    match buf.write(&data) {
        Err(BufferError::CapacityExceeded { accepted, requested }) => {
            assert_eq!(accepted, 1024);
            assert_eq!(requested, 2048);
        }
        other => panic!("expected capacity overflow, got {other:?}"),
    }
    assert_eq!(buf.len(), 1024);
    assert_eq!(read_all(&mut buf), data[..1024]);
}

#[test]
fn test_partition_growth_vector() {
    let mut buf = PartitionBuffer::new(1024, memory_chunk);
    let data = rand_payload(2048);

    write_all(&mut buf, &data);
    assert_eq!(buf.chunk_count(), 2);
    assert_eq!(read_all(&mut buf), data);
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.chunk_count(), 0);
}

#[test]
fn test_multi_capacity_vectors() {
    let unbounded = MultiBuffer::new(vec![
        Box::new(MemoryBuffer::new(5)),
        Box::new(MemoryBuffer::new(5)),
        Box::new(FileBuffer::new(500)),
        Box::new(PartitionBuffer::new(1024, memory_chunk)),
    ]);
    assert_eq!(unbounded.capacity(), Capacity::Unbounded);

    let mut bounded = MultiBuffer::new(vec![
        Box::new(MemoryBuffer::new(5)),
        Box::new(MemoryBuffer::new(5)),
    ]);
    assert_eq!(bounded.capacity(), Capacity::Bounded(10));
    match bounded.write(b"hello world") {
        Err(BufferError::CapacityExceeded { accepted, requested }) => {
            assert_eq!(accepted, 10);
            assert_eq!(requested, 11);
        }
        other => panic!("expected capacity overflow, got {other:?}"),
    }
}

#[test]
fn test_freshness_all_backends() {
    let mut backends: Vec<Box<dyn Buffer>> = vec![
        Box::new(MemoryBuffer::new(16)),
        Box::new(FileBuffer::new(16)),
        Box::new(PartitionBuffer::new(16, memory_chunk)),
        Box::new(PartitionBuffer::new(16, file_chunk)),
        Box::new(spill(8, 8)),
    ];
    for buf in &mut backends {
        assert_eq!(buf.len(), 0);
        assert!(matches!(buf.read(&mut [0u8; 4]), Err(BufferError::Empty)));
    }
}
