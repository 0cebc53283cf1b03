use rand::Rng;

pub const DEFAULT_GLYPHS: usize = 50;

/// Falling glyphs travel this far past the bottom edge before looping.
const FALL_OVERSHOOT_PX: f32 = 100.0;

/// One decorative number. Positions are viewport fractions so the same
/// glyph can be laid out again after a resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub value: u8,
    pub size_px: f32,
    pub start_x: f32,
    pub start_y: f32,
    pub target_x: f32,
    pub duration_secs: f32,
}

/// A glyph placed in a concrete viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    pub value: u8,
    pub size_px: f32,
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub duration_secs: f32,
}

#[derive(Debug, Clone, Default)]
pub struct Backdrop {
    glyphs: Vec<Glyph>,
}

impl Backdrop {
    /// Draws every random value up front; layout never touches the rng.
    pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let glyphs = (0..count)
            .map(|_| Glyph {
                value: rng.random_range(0..100),
                size_px: rng.random_range(20.0..70.0),
                start_x: rng.random(),
                start_y: rng.random(),
                target_x: rng.random(),
                duration_secs: rng.random_range(10.0..30.0),
            })
            .collect();

        Self { glyphs }
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Positions the glyphs for a `width` x `height` viewport. An unknown
    /// (zero-sized) viewport places nothing.
    pub fn layout(&self, width: u32, height: u32) -> Vec<PlacedGlyph> {
        if width == 0 || height == 0 {
            return Vec::new();
        }

        let (w, h) = (width as f32, height as f32);
        self.glyphs
            .iter()
            .map(|g| {
                let x = g.start_x * w;
                PlacedGlyph {
                    value: g.value,
                    size_px: g.size_px,
                    x,
                    y: g.start_y * h,
                    dx: g.target_x * w - x,
                    dy: h + FALL_OVERSHOOT_PX,
                    duration_secs: g.duration_secs,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn backdrop(seed: u64) -> Backdrop {
        Backdrop::generate(DEFAULT_GLYPHS, &mut StdRng::seed_from_u64(seed))
    }

    #[test]
    fn glyph_parameters_are_in_range() {
        let b = backdrop(7);
        assert_eq!(b.glyphs().len(), DEFAULT_GLYPHS);
        for g in b.glyphs() {
            assert!(g.value < 100);
            assert!((20.0..70.0).contains(&g.size_px));
            assert!((10.0..30.0).contains(&g.duration_secs));
            assert!((0.0..1.0).contains(&g.start_x));
            assert!((0.0..1.0).contains(&g.start_y));
            assert!((0.0..1.0).contains(&g.target_x));
        }
    }

    #[test]
    fn same_seed_same_glyphs() {
        assert_eq!(backdrop(42).glyphs(), backdrop(42).glyphs());
    }

    #[test]
    fn resize_repositions_without_regenerating() {
        let b = backdrop(3);
        let small = b.layout(400, 300);
        let large = b.layout(800, 600);

        assert_eq!(small.len(), large.len());
        for (s, l) in small.iter().zip(&large) {
            assert_eq!(s.value, l.value);
            assert_eq!(s.size_px, l.size_px);
            assert!((l.x - 2.0 * s.x).abs() < 1e-3);
            assert!((l.y - 2.0 * s.y).abs() < 1e-3);
        }
        assert_eq!(b.layout(400, 300), small);
    }

    #[test]
    fn glyphs_fall_past_the_bottom_edge() {
        for p in backdrop(11).layout(640, 480) {
            assert_eq!(p.dy, 580.0);
            assert!((-0.01..640.01).contains(&(p.x + p.dx)));
        }
    }

    #[test]
    fn zero_viewport_places_nothing() {
        let b = backdrop(1);
        assert!(b.layout(0, 480).is_empty());
        assert!(b.layout(640, 0).is_empty());
    }
}
