//! Minimal EBML walk: Segment → Tracks → TrackEntry → Video → PixelWidth/Height.

use shirabe_core::Dimensions;

pub const EBML_MAGIC: [u8; 4] = [0x1A, 0x45, 0xDF, 0xA3];

const ID_SEGMENT: u32 = 0x1853_8067;
const ID_TRACKS: u32 = 0x1654_AE6B;
const ID_CLUSTER: u32 = 0x1F43_B675;
const ID_TRACK_ENTRY: u32 = 0xAE;
const ID_VIDEO: u32 = 0xE0;
const ID_PIXEL_WIDTH: u32 = 0xB0;
const ID_PIXEL_HEIGHT: u32 = 0xBA;

/// Dimensions of the first video track whose header fits in `data`.
#[must_use]
pub fn video_dimensions(data: &[u8]) -> Option<Dimensions> {
    if !data.starts_with(&EBML_MAGIC) {
        return None;
    }
    Elements::new(data)
        .find(|e| e.id == ID_SEGMENT)
        .and_then(|segment| from_segment(segment.body))
}

fn from_segment(body: &[u8]) -> Option<Dimensions> {
    for element in Elements::new(body) {
        match element.id {
            ID_TRACKS => {
                if let Some(dims) = from_tracks(element.body) {
                    return Some(dims);
                }
            }
            // Track headers precede the first cluster.
            ID_CLUSTER => break,
            _ => {}
        }
    }
    None
}

fn from_tracks(body: &[u8]) -> Option<Dimensions> {
    Elements::new(body)
        .filter(|e| e.id == ID_TRACK_ENTRY)
        .flat_map(|entry| Elements::new(entry.body).filter(|e| e.id == ID_VIDEO))
        .find_map(|video| {
            let mut dims = Dimensions::default();
            for field in Elements::new(video.body) {
                match field.id {
                    ID_PIXEL_WIDTH => dims.width = read_uint(field.body),
                    ID_PIXEL_HEIGHT => dims.height = read_uint(field.body),
                    _ => {}
                }
            }
            dims.complete().map(|_| dims)
        })
}

struct Element<'a> {
    id: u32,
    body: &'a [u8],
}

/// Sequential element reader. Unknown or oversized lengths are clamped to
/// the bytes available, so a truncated master element still yields its
/// leading children.
struct Elements<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Elements<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = Element<'a>;

    fn next(&mut self) -> Option<Element<'a>> {
        let rest = self.data.get(self.pos..)?;
        let (id, id_len) = read_id(rest)?;
        let (size, size_len) = read_size(rest.get(id_len..)?)?;
        let start = id_len + size_len;
        let available = rest.len() - start;
        let len = match size {
            Some(s) if s <= available as u64 => s as usize,
            _ => available,
        };
        self.pos += start + len;
        Some(Element {
            id,
            body: &rest[start..start + len],
        })
    }
}

/// Element id with its length-marker bits kept (`0x1A45DFA3`, not `0x0A45DFA3`).
fn read_id(data: &[u8]) -> Option<(u32, usize)> {
    let first = *data.first()?;
    let len = first.leading_zeros() as usize + 1;
    if len > 4 {
        return None;
    }
    let bytes = data.get(..len)?;
    Some((bytes.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b)), len))
}

/// Variable-length size. `None` in the first slot means "unknown size".
fn read_size(data: &[u8]) -> Option<(Option<u64>, usize)> {
    let first = *data.first()?;
    let len = first.leading_zeros() as usize + 1;
    if len > 8 {
        return None;
    }
    let bytes = data.get(..len)?;
    let mask = (1u64 << (8 - len)) - 1;
    let value = bytes[1..]
        .iter()
        .fold(u64::from(first) & mask, |acc, b| (acc << 8) | u64::from(*b));
    let unknown = (1u64 << (7 * len)) - 1;
    Some(((value != unknown).then_some(value), len))
}

fn read_uint(body: &[u8]) -> Option<u32> {
    if body.is_empty() || body.len() > 8 {
        return None;
    }
    let value = body.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    u32::try_from(value).ok()
}
