//! Gallery items.
//!
//! An item is immutable once created. Only the aspect ratio of
//! `width`/`height` matters to the lightbox; the absolute values are the
//! card's footprint in world units on the globe.

use std::sync::Arc;

/// Where an item's pixels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaRef {
    /// Remote image fetched over HTTP(S)
    Url(String),
    /// Encoded image bytes handed over by the generation service. `key` is
    /// derived from the payload once, in [`MediaRef::inline`].
    Inline {
        bytes: Arc<[u8]>,
        mime: String,
        key: String,
    },
}

impl MediaRef {
    pub fn inline(bytes: impl Into<Arc<[u8]>>, mime: &str) -> Self {
        let bytes = bytes.into();
        let key = inline_key(&bytes, mime);
        MediaRef::Inline {
            bytes,
            mime: mime.to_string(),
            key,
        }
    }

    /// Stable key for texture caches and load bookkeeping. Called per card
    /// per frame, so it never touches the payload.
    pub fn cache_key(&self) -> &str {
        match self {
            MediaRef::Url(url) => url,
            MediaRef::Inline { key, .. } => key,
        }
    }
}

// FNV-1a over the payload; enough to tell generated images apart
fn inline_key(bytes: &[u8], mime: &str) -> String {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    format!("inline:{}:{:016x}", mime, hash)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// Part of the deterministic starting catalogue
    Seeded,
    /// Added later from the image-generation service
    Generated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: String,
    pub media: MediaRef,
    pub title: String,
    pub kind: ItemKind,
    /// Footprint width (world units)
    pub width: f32,
    /// Footprint height (world units)
    pub height: f32,
}

impl Item {
    /// Width over height.
    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

// ── Seeded catalogue ──

const LANDSCAPE: (f32, f32) = (2.4, 1.6);
const PORTRAIT: (f32, f32) = (1.6, 2.4);
const SQUARE: (f32, f32) = (1.8, 1.8);

/// Texture pixels requested per world unit of footprint.
const PIXELS_PER_UNIT: f32 = 300.0;

/// Build the deterministic starting catalogue: a mix of landscape, portrait
/// and square cards with remote placeholder photography.
pub fn seeded_items(count: usize) -> Vec<Item> {
    (0..count)
        .map(|i| {
            let seed = (i as f64 + 1.0) * 0.123;
            let r = seed - seed.floor();

            let (width, height) = if r < 0.3 {
                LANDSCAPE
            } else if r < 0.6 {
                PORTRAIT
            } else {
                SQUARE
            };

            let w_px = (width * PIXELS_PER_UNIT).floor() as u32;
            let h_px = (height * PIXELS_PER_UNIT).floor() as u32;

            Item {
                id: format!("init-{}", i),
                media: MediaRef::Url(format!(
                    "https://picsum.photos/seed/{}/{}/{}",
                    i + 700,
                    w_px,
                    h_px
                )),
                title: format!("Image {}", i + 1),
                kind: ItemKind::Seeded,
                width,
                height,
            }
        })
        .collect()
}

// ── ItemSet ──

/// The fixed set of items for one layout pass.
///
/// `revision` increments whenever membership changes, which is the signal
/// for the scene to relayout.
#[derive(Debug, Clone, Default)]
pub struct ItemSet {
    items: Vec<Item>,
    revision: u64,
}

impl ItemSet {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items, revision: 0 }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Append an item produced by the image-generation service.
    ///
    /// Generated images are square; the footprint matches the seeded
    /// square cards.
    pub fn push_generated(&mut self, title: &str, bytes: Vec<u8>, mime: &str) -> &Item {
        let index = self.items.len();
        self.items.push(Item {
            id: format!("gen-{}-{}", self.revision + 1, index),
            media: MediaRef::inline(bytes, mime),
            title: title.to_string(),
            kind: ItemKind::Generated,
            width: SQUARE.0,
            height: SQUARE.1,
        });
        self.revision += 1;
        &self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_items_are_deterministic() {
        let a = seeded_items(20);
        let b = seeded_items(20);
        assert_eq!(a, b);
        assert_eq!(a.len(), 20);
    }

    #[test]
    fn seeded_sizes_follow_seed_fraction() {
        let items = seeded_items(3);
        // i=0: frac(0.123) < 0.3 → landscape
        assert_eq!((items[0].width, items[0].height), LANDSCAPE);
        // i=2: frac(0.369) in [0.3, 0.6) → portrait
        assert_eq!((items[2].width, items[2].height), PORTRAIT);
        // i=4: frac(0.615) ≥ 0.6 → square
        let more = seeded_items(5);
        assert_eq!((more[4].width, more[4].height), SQUARE);
    }

    #[test]
    fn seeded_urls_encode_seed_and_pixel_size() {
        let items = seeded_items(1);
        assert_eq!(
            items[0].media,
            MediaRef::Url("https://picsum.photos/seed/700/720/480".to_string())
        );
        assert_eq!(items[0].id, "init-0");
        assert_eq!(items[0].title, "Image 1");
        assert_eq!(items[0].kind, ItemKind::Seeded);
    }

    #[test]
    fn push_generated_bumps_revision() {
        let mut set = ItemSet::new(seeded_items(4));
        assert_eq!(set.revision(), 0);
        let item = set.push_generated("Dune at dusk", vec![1, 2, 3], "image/png");
        assert_eq!(item.kind, ItemKind::Generated);
        assert!((item.aspect() - 1.0).abs() < 1e-6);
        assert_eq!(set.len(), 5);
        assert_eq!(set.revision(), 1);
    }

    #[test]
    fn inline_cache_keys_differ_by_payload() {
        let a = MediaRef::inline(vec![1u8, 2], "image/png");
        let b = MediaRef::inline(vec![2u8, 1], "image/png");
        assert_ne!(a.cache_key(), b.cache_key());
        assert_eq!(a.cache_key(), a.clone().cache_key());
    }

    #[test]
    fn inline_cache_key_is_fixed_at_creation() {
        let mut set = ItemSet::new(Vec::new());
        let payload = vec![7u8; 4096];
        let expected = inline_key(&payload, "image/png");
        let item = set.push_generated("Tide pools", payload, "image/png");
        assert_eq!(item.media.cache_key(), expected);
        match &item.media {
            MediaRef::Inline { key, .. } => {
                assert!(std::ptr::eq(item.media.cache_key(), key.as_str()));
            }
            other => panic!("expected inline media, got {:?}", other),
        }
    }
}
