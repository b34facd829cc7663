//! Length-prefixed packet framing over any async byte stream.
//!
//! Each frame is a `u32` little-endian length followed by that many bytes
//! of bincode-encoded [`Packet`]. Decode failures and oversized frames
//! surface as `InvalidData` I/O errors so callers can treat transport and
//! protocol damage uniformly.

use crate::Packet;
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame. Anything larger is protocol damage.
pub const MAX_FRAME_LEN: usize = 64 * 1024;

pub async fn write_packet<W>(writer: &mut W, packet: &Packet) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let data = bincode::serialize(packet)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    if data.len() > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("outgoing frame of {} bytes exceeds cap", data.len()),
        ));
    }
    writer.write_u32_le(data.len() as u32).await?;
    writer.write_all(&data).await?;
    writer.flush().await
}

pub async fn read_packet<R>(reader: &mut R) -> io::Result<Packet>
where
    R: AsyncRead + Unpin,
{
    let len = reader.read_u32_le().await? as usize;
    if len > MAX_FRAME_LEN {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("incoming frame of {} bytes exceeds cap", len),
        ));
    }
    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await?;
    bincode::deserialize(&buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
