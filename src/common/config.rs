//! Parser-wide configuration.
//!
//! Threaded explicitly through parser entry points rather than held as
//! global mutable state: a [`ParserConfig`] is a plain value callers build
//! once and pass down, so two concurrent parses on the same process never
//! share or race over tunables.

/// Resource bounds and validation strictness for the PDF and CFB parsers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParserConfig {
    /// Maximum raster extent (width or height, in pixels) for shading-fill
    /// rasterization. `0` disables shading rasterization entirely — a
    /// `Shading` content element is then recorded but never painted.
    pub shading_max_size: usize,
    /// Maximum raster extent for rasterizing a soft mask whose form XObject
    /// contains only vector content (paths/text, no images). `0` disables
    /// vector-only mask rasterization; image-backed masks are unaffected.
    pub soft_mask_vector_max_size: usize,
    /// Whether this parse should fail fast on a MUST-level schema violation
    /// (missing required attribute, illegal enum value) instead of
    /// substituting a default. A caller building strict handling on top of
    /// this flag today picks [`crate::ole::OleFile::open_strict`] over
    /// `open` for CFB containers; the OOXML reader family has no
    /// corresponding dispatch yet.
    pub strict: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            shading_max_size: 2048,
            soft_mask_vector_max_size: 2048,
            strict: false,
        }
    }
}

impl ParserConfig {
    /// Clamp a requested raster `(width, height)` to this config's
    /// `soft_mask_vector_max_size`, preserving aspect as closely as integer
    /// dimensions allow.
    pub fn clamp_mask_size(&self, width: usize, height: usize) -> (usize, usize) {
        let cap = self.soft_mask_vector_max_size;
        if cap == 0 || (width <= cap && height <= cap) {
            return (width, height);
        }
        let scale = cap as f64 / width.max(height) as f64;
        (
            ((width as f64 * scale).round() as usize).max(1),
            ((height as f64 * scale).round() as usize).max(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_non_strict_with_nonzero_bounds() {
        let cfg = ParserConfig::default();
        assert!(!cfg.strict);
        assert!(cfg.shading_max_size > 0);
        assert!(cfg.soft_mask_vector_max_size > 0);
    }

    #[test]
    fn clamp_mask_size_passes_through_within_bounds() {
        let cfg = ParserConfig {
            shading_max_size: 100,
            soft_mask_vector_max_size: 100,
            strict: false,
        };
        assert_eq!(cfg.clamp_mask_size(50, 80), (50, 80));
    }

    #[test]
    fn clamp_mask_size_scales_down_oversized_request() {
        let cfg = ParserConfig {
            shading_max_size: 100,
            soft_mask_vector_max_size: 100,
            strict: false,
        };
        let (w, h) = cfg.clamp_mask_size(400, 200);
        assert_eq!(w, 100);
        assert_eq!(h, 50);
    }

    #[test]
    fn clamp_mask_size_zero_cap_disables_clamping() {
        let cfg = ParserConfig {
            shading_max_size: 100,
            soft_mask_vector_max_size: 0,
            strict: false,
        };
        assert_eq!(cfg.clamp_mask_size(4000, 3000), (4000, 3000));
    }
}
