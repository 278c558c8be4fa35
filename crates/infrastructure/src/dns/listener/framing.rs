use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Reads one length-prefixed DNS frame.
///
/// Returns `Ok(None)` when the peer closed the stream, whether between frames
/// or part way through one.
pub async fn read_frame<S>(stream: &mut S) -> io::Result<Option<Vec<u8>>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    match stream.read_exact(&mut len_buf).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(e),
    }

    let mut frame = vec![0u8; u16::from_be_bytes(len_buf) as usize];
    match stream.read_exact(&mut frame).await {
        Ok(_) => Ok(Some(frame)),
        Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
        Err(e) => Err(e),
    }
}

pub async fn write_frame<S>(stream: &mut S, message: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} bytes do not fit a length prefix", message.len()),
        )
    })?;

    stream.write_all(&length.to_be_bytes()).await?;
    stream.write_all(message).await?;
    stream.flush().await
}
