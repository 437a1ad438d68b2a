//! ISO-BMFF walk: moov → trak → tkhd, reading the 16.16 fixed-point size.

use shirabe_core::Dimensions;

/// Offset of the width field inside a `tkhd` body, by box version.
const TKHD_WIDTH_OFFSET_V0: usize = 76;
const TKHD_WIDTH_OFFSET_V1: usize = 88;

/// Dimensions of the first track with a non-zero size. `None` if `moov` is
/// not within the sample (it may sit at the end of the file).
#[must_use]
pub fn video_dimensions(data: &[u8]) -> Option<Dimensions> {
    Boxes::new(data)
        .filter(|b| &b.kind == b"moov")
        .flat_map(|moov| Boxes::new(moov.body).filter(|b| &b.kind == b"trak"))
        .flat_map(|trak| Boxes::new(trak.body).filter(|b| &b.kind == b"tkhd"))
        .find_map(|tkhd| track_header_dimensions(tkhd.body))
}

fn track_header_dimensions(body: &[u8]) -> Option<Dimensions> {
    let offset = match *body.first()? {
        0 => TKHD_WIDTH_OFFSET_V0,
        1 => TKHD_WIDTH_OFFSET_V1,
        _ => return None,
    };
    let width = be_u32(body, offset)? >> 16;
    let height = be_u32(body, offset + 4)? >> 16;
    let dims = Dimensions::new(width, height);
    dims.complete().map(|_| dims)
}

fn be_u32(data: &[u8], at: usize) -> Option<u32> {
    let bytes: [u8; 4] = data.get(at..at + 4)?.try_into().ok()?;
    Some(u32::from_be_bytes(bytes))
}

struct IsoBox<'a> {
    kind: [u8; 4],
    body: &'a [u8],
}

struct Boxes<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Boxes<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Boxes<'a> {
    type Item = IsoBox<'a>;

    fn next(&mut self) -> Option<IsoBox<'a>> {
        let rest = self.data.get(self.pos..)?;
        let size = be_u32(rest, 0)? as u64;
        let kind: [u8; 4] = rest.get(4..8)?.try_into().ok()?;
        let (header, total) = match size {
            0 => (8, rest.len() as u64),
            1 => {
                let hi = be_u32(rest, 8)? as u64;
                let lo = be_u32(rest, 12)? as u64;
                (16, (hi << 32) | lo)
            }
            n => (8, n),
        };
        if total < header as u64 {
            return None;
        }
        // Clamp boxes that run past the sample.
        let end = total.min(rest.len() as u64) as usize;
        self.pos += end.max(header);
        Some(IsoBox {
            kind,
            body: rest.get(header..end).unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bx(kind: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut out = ((body.len() + 8) as u32).to_be_bytes().to_vec();
        out.extend_from_slice(kind);
        out.extend_from_slice(body);
        out
    }

    fn tkhd(version: u8, width: u32, height: u32) -> Vec<u8> {
        let offset = if version == 0 {
            TKHD_WIDTH_OFFSET_V0
        } else {
            TKHD_WIDTH_OFFSET_V1
        };
        let mut body = vec![0u8; offset + 8];
        body[0] = version;
        body[offset..offset + 4].copy_from_slice(&(width << 16).to_be_bytes());
        body[offset + 4..offset + 8].copy_from_slice(&(height << 16).to_be_bytes());
        bx(b"tkhd", &body)
    }

    fn movie(traks: &[Vec<u8>]) -> Vec<u8> {
        let ftyp = bx(b"ftyp", b"isom\x00\x00\x02\x00isomiso2mp41");
        let traks: Vec<u8> = traks.iter().flat_map(|t| bx(b"trak", t)).collect();
        [ftyp, bx(b"moov", &traks)].concat()
    }

    #[test]
    fn reads_v0_track_header() {
        let data = movie(&[tkhd(0, 1280, 720)]);
        assert_eq!(video_dimensions(&data), Some(Dimensions::new(1280, 720)));
    }

    #[test]
    fn reads_v1_track_header() {
        let data = movie(&[tkhd(1, 3840, 1600)]);
        assert_eq!(video_dimensions(&data), Some(Dimensions::new(3840, 1600)));
    }

    #[test]
    fn audio_track_is_skipped() {
        let data = movie(&[tkhd(0, 0, 0), tkhd(0, 1920, 800)]);
        assert_eq!(video_dimensions(&data), Some(Dimensions::new(1920, 800)));
    }

    #[test]
    fn moov_outside_sample() {
        let ftyp = bx(b"ftyp", b"isom\x00\x00\x02\x00");
        let mut data = ftyp;
        data.extend_from_slice(&(1_000_000u32).to_be_bytes());
        data.extend_from_slice(b"mdat");
        data.extend_from_slice(&[0u8; 64]);
        assert_eq!(video_dimensions(&data), None);
    }
}
