//! The versioned binary layout.
//!
//! All scalars are little-endian. A payload starts with its encoding
//! version; the decoder switches on that value to pick the layout, so new
//! versions can change everything after the first four bytes.
//!
//! Version 1:
//!
//! ```text
//! u32  encoding_version
//! f64  timestamp (unix seconds)
//! f32×3 center, f32×3 extent
//! u32  station count
//!      per station: 16-byte id, 16×f32 transform (column-major),
//!                   u8 name flag, [u32 len + utf-8 name] if flag == 1
//! u32  line count
//!      per line: 16-byte start id, 16-byte end id, u32 len + utf-8 name
//! u64  mesh blob length + bytes
//! u8   start snapshot flag, [u64 len + bytes]
//! u8   end snapshot flag, [u64 len + bytes]
//! ```
//!
//! A station's name is written only when it differs from the id's
//! canonical string form; the decoder synthesizes the id string otherwise.
//! This keeps legacy unnamed stations and freshly tapped stations compact
//! and round-trips both exactly.

use defect_survey_core::Pose;
use defect_survey_graph::{Line, Station};
use nalgebra::{Matrix4, Point3, Vector3};
use uuid::Uuid;

use crate::error::DecodeError;
use crate::scan_file::{ScanFile, CURRENT_ENCODING_VERSION};

// Cheapest possible per-record sizes, used to reject impossible counts
// before allocating.
const MIN_STATION_BYTES: usize = 16 + 64 + 1;
const MIN_LINE_BYTES: usize = 16 + 16 + 4;

/// Encode a scan into a self-describing byte stream.
pub fn encode(scan: &ScanFile) -> Vec<u8> {
    let mut out = Vec::with_capacity(
        64 + scan.stations.len() * 128 + scan.lines.len() * 64 + scan.mesh.len(),
    );

    out.extend_from_slice(&CURRENT_ENCODING_VERSION.to_le_bytes());
    out.extend_from_slice(&scan.timestamp.to_le_bytes());
    for v in [
        scan.center.x,
        scan.center.y,
        scan.center.z,
        scan.extent.x,
        scan.extent.y,
        scan.extent.z,
    ] {
        out.extend_from_slice(&v.to_le_bytes());
    }

    out.extend_from_slice(&(scan.stations.len() as u32).to_le_bytes());
    for station in &scan.stations {
        write_station(&mut out, station);
    }

    out.extend_from_slice(&(scan.lines.len() as u32).to_le_bytes());
    for line in &scan.lines {
        write_line(&mut out, line);
    }

    write_blob(&mut out, &scan.mesh);
    write_optional_blob(&mut out, scan.start_snapshot.as_deref());
    write_optional_blob(&mut out, scan.end_snapshot.as_deref());

    out
}

/// Decode a byte stream produced by any known encoder version.
pub fn decode(bytes: &[u8]) -> Result<ScanFile, DecodeError> {
    let mut r = Reader::new(bytes);
    let version = r.read_u32("encoding version")?;
    match version {
        1 => decode_v1(&mut r),
        other => Err(DecodeError::VersionMismatch { found: other }),
    }
}

fn decode_v1(r: &mut Reader<'_>) -> Result<ScanFile, DecodeError> {
    let timestamp = r.read_f64("timestamp")?;
    let center = Point3::new(
        r.read_f32("center")?,
        r.read_f32("center")?,
        r.read_f32("center")?,
    );
    let extent = Vector3::new(
        r.read_f32("extent")?,
        r.read_f32("extent")?,
        r.read_f32("extent")?,
    );

    let station_count = r.read_count("station count", MIN_STATION_BYTES)?;
    let mut stations = Vec::with_capacity(station_count);
    for _ in 0..station_count {
        stations.push(read_station(r)?);
    }

    let line_count = r.read_count("line count", MIN_LINE_BYTES)?;
    let mut lines = Vec::with_capacity(line_count);
    for _ in 0..line_count {
        lines.push(read_line(r)?);
    }

    let mesh = r.read_blob("mesh blob")?.to_vec();
    let start_snapshot = read_optional_blob(r, "start snapshot")?;
    let end_snapshot = read_optional_blob(r, "end snapshot")?;

    if !r.is_empty() {
        return Err(DecodeError::corrupt("trailing bytes after payload"));
    }

    Ok(ScanFile {
        encoding_version: 1,
        timestamp,
        center,
        extent,
        stations,
        lines,
        mesh,
        start_snapshot,
        end_snapshot,
    })
}

fn write_station(out: &mut Vec<u8>, station: &Station) {
    out.extend_from_slice(station.id.as_bytes());
    for v in station.pose.matrix().iter() {
        out.extend_from_slice(&v.to_le_bytes());
    }
    if station.name == station.id.to_string() {
        out.push(0);
    } else {
        out.push(1);
        write_string(out, &station.name);
    }
}

fn read_station(r: &mut Reader<'_>) -> Result<Station, DecodeError> {
    let id = r.read_uuid("station id")?;

    let mut floats = [0f32; 16];
    for v in floats.iter_mut() {
        *v = r.read_f32("station transform")?;
    }
    let pose = Pose::from_matrix(Matrix4::from_column_slice(&floats));

    let name = match r.read_u8("station name flag")? {
        0 => id.to_string(),
        1 => r.read_string("station name")?,
        _ => return Err(DecodeError::corrupt("invalid station name flag")),
    };

    Ok(Station { id, name, pose })
}

fn write_line(out: &mut Vec<u8>, line: &Line) {
    out.extend_from_slice(line.start_id.as_bytes());
    out.extend_from_slice(line.end_id.as_bytes());
    write_string(out, &line.name);
}

fn read_line(r: &mut Reader<'_>) -> Result<Line, DecodeError> {
    let start_id = r.read_uuid("line start id")?;
    let end_id = r.read_uuid("line end id")?;
    let name = r.read_string("line name")?;
    Ok(Line::new(start_id, end_id, name))
}

fn write_string(out: &mut Vec<u8>, s: &str) {
    out.extend_from_slice(&(s.len() as u32).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
}

fn write_blob(out: &mut Vec<u8>, blob: &[u8]) {
    out.extend_from_slice(&(blob.len() as u64).to_le_bytes());
    out.extend_from_slice(blob);
}

fn write_optional_blob(out: &mut Vec<u8>, blob: Option<&[u8]>) {
    match blob {
        Some(blob) => {
            out.push(1);
            write_blob(out, blob);
        }
        None => out.push(0),
    }
}

fn read_optional_blob(
    r: &mut Reader<'_>,
    context: &'static str,
) -> Result<Option<Vec<u8>>, DecodeError> {
    match r.read_u8(context)? {
        0 => Ok(None),
        1 => Ok(Some(r.read_blob(context)?.to_vec())),
        _ => Err(DecodeError::corrupt("invalid blob flag")),
    }
}

/// Bounds-checked cursor over the encoded payload.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn is_empty(&self) -> bool {
        self.pos == self.buf.len()
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::corrupt(context));
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_u8(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        Ok(self.take(1, context)?[0])
    }

    fn read_array<const N: usize>(
        &mut self,
        context: &'static str,
    ) -> Result<[u8; N], DecodeError> {
        let bytes = self.take(N, context)?;
        bytes.try_into().map_err(|_| DecodeError::corrupt(context))
    }

    fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.read_array(context)?))
    }

    fn read_u64(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        Ok(u64::from_le_bytes(self.read_array(context)?))
    }

    fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        Ok(f32::from_le_bytes(self.read_array(context)?))
    }

    fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        Ok(f64::from_le_bytes(self.read_array(context)?))
    }

    fn read_uuid(&mut self, context: &'static str) -> Result<Uuid, DecodeError> {
        Ok(Uuid::from_bytes(self.read_array(context)?))
    }

    /// Read a record count and reject values that could not possibly fit
    /// in the remaining bytes, so corrupt counts fail before allocation.
    fn read_count(
        &mut self,
        context: &'static str,
        min_record_bytes: usize,
    ) -> Result<usize, DecodeError> {
        let count = self.read_u32(context)? as usize;
        if count > self.remaining() / min_record_bytes {
            return Err(DecodeError::corrupt(context));
        }
        Ok(count)
    }

    fn read_string(&mut self, context: &'static str) -> Result<String, DecodeError> {
        let len = self.read_u32(context)? as usize;
        let bytes = self.take(len, context)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::corrupt(context))
    }

    fn read_blob(&mut self, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.read_u64(context)? as usize;
        self.take(len, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reader_rejects_overrun() {
        let mut r = Reader::new(&[1, 2, 3]);
        assert!(r.read_u32("short").is_err());
    }

    #[test]
    fn read_count_rejects_impossible_counts() {
        // Claims 1000 stations with only 8 bytes left.
        let mut buf = 1000u32.to_le_bytes().to_vec();
        buf.extend_from_slice(&[0; 8]);
        let mut r = Reader::new(&buf);
        assert_eq!(
            r.read_count("station count", MIN_STATION_BYTES),
            Err(DecodeError::corrupt("station count"))
        );
    }

    #[test]
    fn string_round_trip() {
        let mut out = Vec::new();
        write_string(&mut out, "1_paint crack_pt2");
        let mut r = Reader::new(&out);
        assert_eq!(r.read_string("name").unwrap(), "1_paint crack_pt2");
        assert!(r.is_empty());
    }
}
