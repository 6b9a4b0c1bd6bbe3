//! Minimal rasterization for soft-mask evaluation (ISO 32000-1 §11.6.5.2).
//!
//! This is deliberately not a general-purpose rendering engine: masks are
//! rasterized into small bitmaps bounded by
//! [`ParserConfig::soft_mask_vector_max_size`], which is all the soft-mask
//! evaluation rules actually need. Scanline polygon fill plus a handful of
//! blending helpers cover it.
//! `shading_max_size` is reserved for shading-pattern fills; this module
//! doesn't evaluate shading function dictionaries yet, so a `Shading`
//! content element inside a mask is recorded but never painted regardless
//! of the configured bound.

use crate::common::ParserConfig;
use crate::pdf::content::{
    apply_matrix, matrix_multiply, Color, ContentInterpreter, Element, Matrix, ParsedPath, PathSegment, Resolver,
    IDENTITY,
};
use crate::pdf::error::Result;
use crate::pdf::object::{Dict, Object};

/// An 8-bit RGBA pixel buffer, row-major, origin at the top-left.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[u8; 4]>,
}

impl Raster {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; width.max(1) * height.max(1)],
        }
    }

    pub fn filled(width: usize, height: usize, color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width.max(1) * height.max(1)],
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0, 0];
        }
        self.pixels[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = self.idx(x, y);
        self.pixels[i] = color;
    }

    /// Composite `color` over the existing pixel using `Normal`-mode
    /// source-over alpha blending.
    pub fn blend(&mut self, x: usize, y: usize, color: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let dst = self.get(x, y);
        let sa = color[3] as f32 / 255.0;
        let da = dst[3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            self.set(x, y, [0, 0, 0, 0]);
            return;
        }
        let mut out = [0u8; 4];
        for c in 0..3 {
            let s = color[c] as f32 / 255.0;
            let d = dst[c] as f32 / 255.0;
            let v = (s * sa + d * da * (1.0 - sa)) / out_a;
            out[c] = (v * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
        self.set(x, y, out);
    }

    /// Alpha channel, luminosity-weighted per ITU-R BT.601 when the mask
    /// subtype is `Luminosity` (the mode used for `apply_mode`).
    pub fn luminosity_at(&self, x: usize, y: usize) -> u8 {
        let p = self.get(x, y);
        let l = 0.299 * p[0] as f32 + 0.587 * p[1] as f32 + 0.114 * p[2] as f32;
        l.round().clamp(0.0, 255.0) as u8
    }
}

fn color_to_rgb(c: Color) -> [u8; 3] {
    let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    match c {
        Color::Gray(g) => [to_u8(g), to_u8(g), to_u8(g)],
        Color::Rgb(r, g, b) => [to_u8(r), to_u8(g), to_u8(b)],
        Color::Cmyk(c, m, y, k) => [
            to_u8((1.0 - c) * (1.0 - k)),
            to_u8((1.0 - m) * (1.0 - k)),
            to_u8((1.0 - y) * (1.0 - k)),
        ],
    }
}

/// Fill a closed polygonal path (already flattened to line segments; curves
/// are approximated by their control-polygon, adequate at mask resolution)
/// using the standard scanline/even-odd or nonzero-winding test, sampling
/// at pixel centres.
fn fill_path(raster: &mut Raster, path: &ParsedPath, ctm: Matrix, color: [u8; 3], alpha: f64) {
    let mut edges: Vec<(f64, f64, f64, f64)> = Vec::new();
    for subpath in &path.subpaths {
        let mut start: Option<(f64, f64)> = None;
        let mut prev: Option<(f64, f64)> = None;
        for seg in subpath {
            match *seg {
                PathSegment::MoveTo(x, y) => {
                    let p = apply_matrix(ctm, x, y);
                    start = Some(p);
                    prev = Some(p);
                },
                PathSegment::LineTo(x, y) => {
                    let p = apply_matrix(ctm, x, y);
                    if let Some(pv) = prev {
                        edges.push((pv.0, pv.1, p.0, p.1));
                    }
                    prev = Some(p);
                },
                PathSegment::CurveTo(_, _, _, _, x3, y3) => {
                    let p = apply_matrix(ctm, x3, y3);
                    if let Some(pv) = prev {
                        edges.push((pv.0, pv.1, p.0, p.1));
                    }
                    prev = Some(p);
                },
                PathSegment::Close => {
                    if let (Some(pv), Some(s)) = (prev, start) {
                        edges.push((pv.0, pv.1, s.0, s.1));
                    }
                    prev = start;
                },
            }
        }
    }
    if edges.is_empty() {
        return;
    }

    let alpha_u8 = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    for y in 0..raster.height {
        let sample_y = y as f64 + 0.5;
        let mut xs: Vec<f64> = Vec::new();
        for &(x0, y0, x1, y1) in &edges {
            if (y0 <= sample_y && y1 > sample_y) || (y1 <= sample_y && y0 > sample_y) {
                let t = (sample_y - y0) / (y1 - y0);
                xs.push(x0 + t * (x1 - x0));
            }
        }
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        for pair in xs.chunks(2) {
            let [x0, x1] = pair else { continue };
            let start_x = (x0.ceil().max(0.0)) as isize;
            let end_x = (x1.floor()) as isize;
            for x in start_x..=end_x {
                if x >= 0 && (x as usize) < raster.width {
                    raster.blend(x as usize, y, [color[0], color[1], color[2], alpha_u8]);
                }
            }
        }
    }
}

/// The backdrop a non-isolated Luminosity-mode group starts from.
pub enum Backdrop {
    /// Isolated group: transparent black.
    Transparent,
    /// `/BC` colour for a non-isolated Luminosity mask.
    Color([u8; 3]),
}

/// Rasterize a soft mask's `/G` form XObject into an alpha-only raster
/// (one channel replicated into RGB, per [`Raster::luminosity_at`] reading
/// it back out). `matrix` is the form's `/Matrix` pre-concatenated with the
/// CTM in force at the `gs` operator. `group` is the resolved form XObject
/// stream object (dict + raw body) — callers pass the `SoftMask::group`
/// field straight through.
pub fn rasterize_soft_mask<R: Resolver>(
    resolver: &R,
    group_obj: &Object,
    subtype: &str,
    ctm: Matrix,
    width: usize,
    height: usize,
    config: &ParserConfig,
) -> Result<Raster> {
    let (width, height) = config.clamp_mask_size(width, height);
    let empty = Dict::new();
    let group = group_obj.as_dict().unwrap_or(&empty);
    let isolated = group.get("I").and_then(|o| o.as_bool()).unwrap_or(false);
    let backdrop = if isolated {
        Backdrop::Transparent
    } else {
        match group.get("BC").and_then(|o| o.as_array()) {
            Some(comps) => {
                let nums: Vec<f64> = comps.iter().filter_map(|o| o.as_f64()).collect();
                let color = match nums.len() {
                    1 => Color::Gray(nums[0]),
                    3 => Color::Rgb(nums[0], nums[1], nums[2]),
                    4 => Color::Cmyk(nums[0], nums[1], nums[2], nums[3]),
                    _ => Color::Gray(0.0),
                };
                Backdrop::Color(color_to_rgb(color))
            },
            None => Backdrop::Transparent,
        }
    };

    let base = match (&backdrop, subtype) {
        (Backdrop::Color(rgb), "Luminosity") => Raster::filled(width, height, [rgb[0], rgb[1], rgb[2], 255]),
        _ => Raster::new(width, height),
    };
    let mut raster = base;

    let Some((content_dict, raw)) = group_obj.as_stream() else {
        return Ok(raster);
    };
    let decoded = crate::pdf::filters::decode_stream(content_dict, raw)?;
    let form_matrix = group
        .get("Matrix")
        .and_then(|o| o.as_array())
        .map(|a| {
            let n: Vec<f64> = a.iter().filter_map(|o| o.as_f64()).collect();
            if n.len() == 6 {
                [n[0], n[1], n[2], n[3], n[4], n[5]]
            } else {
                IDENTITY
            }
        })
        .unwrap_or(IDENTITY);
    let resources = group
        .get("Resources")
        .cloned()
        .and_then(|r| resolver.resolve(&r).ok())
        .and_then(|r| r.as_dict().cloned())
        .unwrap_or_default();

    let effective_ctm = matrix_multiply(form_matrix, ctm);
    let interp = ContentInterpreter::new(resolver, resources);
    let elements = interp.run(&decoded);
    for el in elements {
        match el {
            Element::Path(p) => {
                let color = color_to_rgb(p.gfx.fill_color);
                fill_path(&mut raster, &p, effective_ctm, color, p.gfx.fill_alpha);
            },
            Element::Image(img) => {
                draw_image(resolver, &mut raster, &img.xobject, &img.data, matrix_multiply(img.ctm, effective_ctm));
            },
            Element::Shading(_) => {
                // Shading fills within a mask would require evaluating the
                // function dictionary; out of scope at this resolution.
            },
            _ => {},
        }
    }
    Ok(raster)
}

/// Paint an (already filter-decoded) image XObject's samples into `raster`,
/// mapping the unit square `[0,1]x[0,1]` (row 0 = top, per PDF image space)
/// through `ctm` and sampling forward at each source-pixel centre — adequate
/// at mask resolution, matching [`fill_path`]'s own pixel-centre sampling.
fn draw_image<R: Resolver>(resolver: &R, raster: &mut Raster, xobject: &Dict, data: &[u8], ctm: Matrix) {
    let width = xobject.get("Width").and_then(|o| o.as_int()).unwrap_or(0).max(0) as usize;
    let height = xobject.get("Height").and_then(|o| o.as_int()).unwrap_or(0).max(0) as usize;
    if width == 0 || height == 0 {
        return;
    }
    let bpc = xobject.get("BitsPerComponent").and_then(|o| o.as_int()).unwrap_or(8).clamp(1, 16) as u32;
    let is_mask = xobject.get("ImageMask").and_then(|o| o.as_bool()).unwrap_or(false);
    let cs_name = xobject.get("ColorSpace").and_then(|cs| {
        cs.as_name().map(str::to_string).or_else(|| {
            resolver.resolve(cs).ok().and_then(|r| r.as_name().map(str::to_string))
        })
    });
    let components: usize = if is_mask {
        1
    } else {
        match cs_name.as_deref() {
            Some("DeviceGray") | Some("CalGray") => 1,
            Some("DeviceCMYK") => 4,
            _ => 3,
        }
    };
    let row_bits = width * components * bpc as usize;
    let row_bytes = row_bits.div_ceil(8);
    let max_val = ((1u64 << bpc) - 1) as f64;

    let sample = |row: usize, col: usize, comp: usize| -> f64 {
        let bit_offset = row * row_bytes * 8 + (col * components + comp) * bpc as usize;
        let mut value: u64 = 0;
        for i in 0..bpc as usize {
            let idx = bit_offset + i;
            let byte = data.get(idx / 8).copied().unwrap_or(0);
            let bit = (byte >> (7 - (idx % 8))) & 1;
            value = (value << 1) | bit as u64;
        }
        value as f64 / max_val
    };

    for row in 0..height {
        for col in 0..width {
            let rgb = match components {
                1 => {
                    let g = (sample(row, col, 0) * 255.0).round() as u8;
                    [g, g, g]
                },
                4 => color_to_rgb(Color::Cmyk(
                    sample(row, col, 0),
                    sample(row, col, 1),
                    sample(row, col, 2),
                    sample(row, col, 3),
                )),
                _ => [
                    (sample(row, col, 0) * 255.0).round() as u8,
                    (sample(row, col, 1) * 255.0).round() as u8,
                    (sample(row, col, 2) * 255.0).round() as u8,
                ],
            };
            let u = (col as f64 + 0.5) / width as f64;
            let v = 1.0 - (row as f64 + 0.5) / height as f64;
            let (dx, dy) = apply_matrix(ctm, u, v);
            let (rx, ry) = (dx.floor(), dy.floor());
            if rx >= 0.0 && ry >= 0.0 {
                raster.blend(rx as usize, ry as usize, [rgb[0], rgb[1], rgb[2], 255]);
            }
        }
    }
}

/// Multiply mask alpha into a painted raster's own alpha channel in place
/// (e.g. applying a soft mask, or compositing a nested image `/SMask`).
pub fn multiply_alpha(target: &mut Raster, mask: &Raster, mask_is_luminosity: bool) {
    for y in 0..target.height.min(mask.height) {
        for x in 0..target.width.min(mask.width) {
            let m = if mask_is_luminosity {
                mask.luminosity_at(x, y)
            } else {
                mask.get(x, y)[3]
            };
            let mut p = target.get(x, y);
            p[3] = ((p[3] as u16 * m as u16) / 255) as u8;
            target.set(x, y, p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::content::GraphicsState;

    #[test]
    fn fill_path_of_full_rect_sets_all_pixels_opaque() {
        let mut raster = Raster::new(2, 1);
        let path = ParsedPath {
            subpaths: vec![vec![
                PathSegment::MoveTo(0.0, 0.0),
                PathSegment::LineTo(2.0, 0.0),
                PathSegment::LineTo(2.0, 1.0),
                PathSegment::LineTo(0.0, 1.0),
                PathSegment::Close,
            ]],
            fill_rule: None,
            stroke: false,
            gfx: GraphicsState::default(),
        };
        fill_path(&mut raster, &path, IDENTITY, [255, 255, 255], 1.0);
        assert_eq!(raster.get(0, 0), [255, 255, 255, 255]);
        assert_eq!(raster.get(1, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn luminosity_reads_back_white_as_255_and_black_as_0() {
        let raster = Raster::filled(1, 1, [255, 255, 255, 255]);
        assert_eq!(raster.luminosity_at(0, 0), 255);
        let raster = Raster::filled(1, 1, [0, 0, 0, 255]);
        assert_eq!(raster.luminosity_at(0, 0), 0);
    }

    #[test]
    fn multiply_alpha_scales_target_by_mask_luminosity() {
        let mut target = Raster::filled(1, 1, [255, 0, 0, 255]);
        let mask = Raster::filled(1, 1, [128, 128, 128, 255]);
        multiply_alpha(&mut target, &mask, true);
        assert_eq!(target.get(0, 0)[3], 128);
    }

    #[test]
    fn non_isolated_luminosity_backdrop_fills_unpainted_pixels() {
        let mut group = Dict::new();
        group.insert("BC".to_string(), Object::Array(vec![Object::Real(0.5)]));
        struct StubResolver;
        impl Resolver for StubResolver {
            fn resolve(&self, obj: &Object) -> Result<Object> {
                Ok(obj.clone())
            }
        }
        let group = Object::Dict(group);
        let raster = rasterize_soft_mask(&StubResolver, &group, "Luminosity", IDENTITY, 2, 1, &ParserConfig::default()).unwrap();
        assert_eq!(raster.luminosity_at(0, 0), 128);
        assert_eq!(raster.luminosity_at(1, 0), 128);
    }

    /// A 2×1 mask image `[black, white]` placed with the identity matrix
    /// yields alpha `[0, 255]`; flipping the image's placement matrix on X
    /// gives `[255, 0]`.
    #[test]
    fn luminosity_mask_image_identity_and_flipped() {
        struct StubResolver;
        impl Resolver for StubResolver {
            fn resolve(&self, obj: &Object) -> Result<Object> {
                Ok(obj.clone())
            }
        }

        let mut image_dict = Dict::new();
        image_dict.insert("Subtype".to_string(), Object::Name("Image".to_string()));
        image_dict.insert("Width".to_string(), Object::Int(2));
        image_dict.insert("Height".to_string(), Object::Int(1));
        image_dict.insert("BitsPerComponent".to_string(), Object::Int(8));
        image_dict.insert("ColorSpace".to_string(), Object::Name("DeviceGray".to_string()));
        let image = Object::Stream(image_dict, vec![0x00, 0xFF]);

        let mut xobjects = Dict::new();
        xobjects.insert("Im0".to_string(), image);
        let mut resources = Dict::new();
        resources.insert("XObject".to_string(), Object::Dict(xobjects));

        let mut form_dict = Dict::new();
        form_dict.insert("Resources".to_string(), Object::Dict(resources));
        let form = Object::Stream(form_dict, b"/Im0 Do".to_vec());

        let raster = rasterize_soft_mask(&StubResolver, &form, "Luminosity", IDENTITY, 2, 1, &ParserConfig::default()).unwrap();
        assert_eq!(raster.luminosity_at(0, 0), 0);
        assert_eq!(raster.luminosity_at(1, 0), 255);

        let flip_x: Matrix = [-1.0, 0.0, 0.0, 1.0, 2.0, 0.0];
        let raster = rasterize_soft_mask(&StubResolver, &form, "Luminosity", flip_x, 2, 1, &ParserConfig::default()).unwrap();
        assert_eq!(raster.luminosity_at(0, 0), 255);
        assert_eq!(raster.luminosity_at(1, 0), 0);
    }
}
