use crate::{error::CodecError, level::CompressionLevel};

use flate2::{Compress, Decompress, FlushCompress, FlushDecompress, Status};

/// Upper bound on the compressed size of `len` input bytes for the miniz
/// deflate backend, using the formula of miniz's `mz_compressBound`. A buffer
/// this large always fits the output of [compress](fn.compress.html) at any
/// level.
pub fn compress_bound(len: usize) -> usize {
    let proportional = 128 + len + len / 10;
    let per_block = 128 + len + (len / (31 * 1024) + 1) * 5;
    proportional.max(per_block)
}

/// Compresses `input` into `output` as a complete zlib stream and returns the
/// number of bytes written. `output.len()` is the capacity: if the stream does
/// not fit, this fails with `BufferTooSmall` and the contents of `output` are
/// unspecified, though nothing outside it is touched.
pub fn compress(
    input: &[u8],
    output: &mut [u8],
    level: CompressionLevel,
) -> Result<usize, CodecError> {
    let mut stream = Compress::new(level.into(), true);

    loop {
        let consumed = stream.total_in() as usize;
        let produced = stream.total_out() as usize;
        let status = stream.compress(
            &input[consumed..],
            &mut output[produced..],
            FlushCompress::Finish,
        )?;
        let written = stream.total_out() as usize;

        match status {
            Status::StreamEnd => {
                tracing::debug!(
                    input_len = input.len(),
                    output_len = written,
                    %level,
                    "compressed"
                );
                return Ok(written);
            }

            Status::Ok | Status::BufError => {
                let stalled = written == produced && stream.total_in() as usize == consumed;
                if written == output.len() || stalled {
                    tracing::debug!(
                        input_len = input.len(),
                        capacity = output.len(),
                        "compressed output does not fit"
                    );
                    return Err(CodecError::BufferTooSmall {
                        capacity: output.len(),
                    });
                }
            }
        }
    }
}

/// Restores the bytes of the zlib stream in `input` into `output` and returns
/// how many were written. Fails with `BufferTooSmall` when the original data
/// is longer than `output`, and with `CorruptData` when `input` is malformed,
/// fails its checksum or ends early.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
    let mut stream = Decompress::new(true);

    loop {
        let consumed = stream.total_in() as usize;
        let produced = stream.total_out() as usize;
        let status = inflate(&mut stream, &input[consumed..], &mut output[produced..])?;
        let read = stream.total_in() as usize;
        let written = stream.total_out() as usize;

        if status == Status::StreamEnd {
            tracing::debug!(input_len = read, output_len = written, "decompressed");
            return Ok(written);
        }

        if written == output.len() {
            return settle_full_output(&mut stream, input, output.len());
        }

        // Input ran out before the end of the stream
        if read == input.len() || (read == consumed && written == produced) {
            return Err(truncated(read, input.len()));
        }
    }
}

/// `output` is full but the stream has not ended. Inflating on into a
/// one-byte scratch buffer tells the two cases apart: any further byte means
/// the data did not fit, running out of input means the stream was cut short.
fn settle_full_output(
    stream: &mut Decompress,
    input: &[u8],
    capacity: usize,
) -> Result<usize, CodecError> {
    let mut scratch = [0u8; 1];

    loop {
        let consumed = stream.total_in() as usize;
        let produced = stream.total_out();
        let status = inflate(stream, &input[consumed..], &mut scratch)?;

        if stream.total_out() > produced {
            tracing::debug!(
                input_len = input.len(),
                capacity,
                "decompressed output does not fit"
            );
            return Err(CodecError::BufferTooSmall { capacity });
        }

        if status == Status::StreamEnd {
            tracing::debug!(input_len = input.len(), output_len = capacity, "decompressed");
            return Ok(capacity);
        }

        if stream.total_in() as usize == consumed {
            return Err(truncated(consumed, input.len()));
        }
    }
}

/// One incremental inflate step. The stream is never told to finish, so it
/// can be resumed after the output runs out.
fn inflate(
    stream: &mut Decompress,
    input: &[u8],
    output: &mut [u8],
) -> Result<Status, CodecError> {
    stream
        .decompress(input, output, FlushDecompress::None)
        .map_err(|err| {
            tracing::warn!(error = %err, "rejected compressed input");
            CodecError::CorruptData(err.to_string())
        })
}

fn truncated(read: usize, input_len: usize) -> CodecError {
    tracing::warn!(input_len, "truncated compressed input");
    CodecError::CorruptData(format!("stream ends early after {} of {} bytes", read, input_len))
}

/// Like [compress](fn.compress.html), but allocates a buffer of exactly
/// `capacity` bytes and returns it trimmed to the compressed length.
pub fn compress_to_vec(
    input: &[u8],
    capacity: usize,
    level: CompressionLevel,
) -> Result<Vec<u8>, CodecError> {
    let mut buffer = vec![0; capacity];
    let len = compress(input, &mut buffer, level)?;
    buffer.truncate(len);
    Ok(buffer)
}

/// Like [decompress](fn.decompress.html), but allocates a buffer of exactly
/// `capacity` bytes and returns it trimmed to the restored length.
pub fn decompress_to_vec(input: &[u8], capacity: usize) -> Result<Vec<u8>, CodecError> {
    let mut buffer = vec![0; capacity];
    let len = decompress(input, &mut buffer)?;
    buffer.truncate(len);
    Ok(buffer)
}
