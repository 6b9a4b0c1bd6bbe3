//! Content-stream interpreter: turns a decoded content stream into a flat
//! list of painted elements (paths, text runs, images, shadings), honouring
//! the graphics-state stack (ISO 32000-1 §8-9).
//!
//! Same dispatch idiom used elsewhere in this crate for token-driven
//! parsing (see `ooxml::pptx::transitions::TransitionType::from_token`):
//! one token type, a mutable accumulator, explicit per-keyword dispatch —
//! except the tokens here are PDF operators rather than XML events, and
//! operator handlers read from an explicit [`GraphicsState`] snapshot
//! rather than mutating a shared tree.

use crate::pdf::error::{PdfError, Result};
use crate::pdf::object::{Dict, Object};
use crate::pdf::tokenizer::{Token, Tokenizer};

/// A 2D affine transform `[a b c d e f]` mapping `(x, y)` to
/// `(a*x + c*y + e, b*x + d*y + f)`.
pub type Matrix = [f64; 6];

pub const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// Concatenate `m1` onto `m2` (`m1` applied first), PDF's `cm`/`Tm` order.
pub fn matrix_multiply(m1: Matrix, m2: Matrix) -> Matrix {
    [
        m1[0] * m2[0] + m1[1] * m2[2],
        m1[0] * m2[1] + m1[1] * m2[3],
        m1[2] * m2[0] + m1[3] * m2[2],
        m1[2] * m2[1] + m1[3] * m2[3],
        m1[4] * m2[0] + m1[5] * m2[2] + m2[4],
        m1[4] * m2[1] + m1[5] * m2[3] + m2[5],
    ]
}

pub fn apply_matrix(m: Matrix, x: f64, y: f64) -> (f64, f64) {
    (m[0] * x + m[2] * y + m[4], m[1] * x + m[3] * y + m[5])
}

/// Any object graph that can resolve an indirect reference. Implemented by
/// [`crate::pdf::document::PdfDocument`]; a separate trait rather than a
/// direct dependency keeps this module testable with a stub resolver.
pub trait Resolver {
    fn resolve(&self, obj: &Object) -> Result<Object>;
}

impl Resolver for crate::pdf::document::PdfDocument {
    fn resolve(&self, obj: &Object) -> Result<Object> {
        crate::pdf::document::PdfDocument::resolve(self, obj)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Gray(f64),
    Rgb(f64, f64, f64),
    Cmyk(f64, f64, f64, f64),
}

impl Default for Color {
    fn default() -> Self {
        Color::Gray(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillRule {
    NonZero,
    EvenOdd,
}

/// A resolved soft mask installed by `gs` from an ExtGState's `/SMask` entry.
/// `group` is the resolved `/G` form XObject — a stream, since rasterizing
/// it means running its content stream.
#[derive(Debug, Clone)]
pub struct SoftMask {
    pub subtype: String,
    pub group: Object,
}

/// Everything a paint operator needs to reproduce how a mark was made.
/// Every emitted [`Element`] carries one of these by value so downstream
/// consumers need no access to interpreter-internal state.
#[derive(Debug, Clone)]
pub struct GraphicsState {
    pub ctm: Matrix,
    pub fill_color: Color,
    pub stroke_color: Color,
    pub fill_alpha: f64,
    pub stroke_alpha: f64,
    pub line_width: f64,
    pub dash_pattern: Vec<f64>,
    pub dash_phase: f64,
    pub blend_mode: String,
    pub soft_mask: Option<SoftMask>,
    pub font_name: Option<String>,
    pub font_size: f64,
    pub char_spacing: f64,
    pub word_spacing: f64,
    pub leading: f64,
    pub text_rise: f64,
    pub h_scale: f64,
    pub render_mode: i64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            fill_color: Color::default(),
            stroke_color: Color::default(),
            fill_alpha: 1.0,
            stroke_alpha: 1.0,
            line_width: 1.0,
            dash_pattern: Vec::new(),
            dash_phase: 0.0,
            blend_mode: "Normal".to_string(),
            soft_mask: None,
            font_name: None,
            font_size: 0.0,
            char_spacing: 0.0,
            word_spacing: 0.0,
            leading: 0.0,
            text_rise: 0.0,
            h_scale: 1.0,
            render_mode: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    CurveTo(f64, f64, f64, f64, f64, f64),
    Close,
}

#[derive(Debug, Clone)]
pub struct ParsedPath {
    pub subpaths: Vec<Vec<PathSegment>>,
    /// `None` when the path was only stroked (`S`/`s`) or discarded (`n`).
    pub fill_rule: Option<FillRule>,
    pub stroke: bool,
    pub gfx: GraphicsState,
}

/// One `Tj`/`TJ`/`'`/`"` call, snapshotting the text-rendering matrix
/// (`Tm` concatenated with the CTM) and full graphics state at the moment
/// of the show operator.
#[derive(Debug, Clone)]
pub struct TextRun {
    pub bytes: Vec<u8>,
    pub matrix: Matrix,
    /// Baseline Y in page space: `Tm.f + Ts` transformed by the CTM.
    pub y: f64,
    pub end_x: f64,
    pub gfx: GraphicsState,
}

#[derive(Debug, Clone)]
pub struct ImageElement {
    pub ctm: Matrix,
    /// The (possibly inline) image dictionary, abbreviated keys expanded.
    pub xobject: Dict,
    /// Already decoded per the xobject dict's `/Filter` chain (falls back to
    /// the raw stream bytes if a filter is unsupported).
    pub data: Vec<u8>,
    pub gfx: GraphicsState,
}

#[derive(Debug, Clone)]
pub struct ShadingElement {
    pub name: String,
    pub dict: Option<Dict>,
    pub ctm: Matrix,
    pub gfx: GraphicsState,
}

#[derive(Debug, Clone)]
pub enum Element {
    Path(ParsedPath),
    Text(TextRun),
    Image(ImageElement),
    Shading(ShadingElement),
}

const MAX_FORM_DEPTH: usize = 12;

/// Drives the operand stack and dispatches one operator at a time. `run`
/// consumes the interpreter and returns the flat element list; nested form
/// XObjects recurse into the same accumulator with a pushed resources
/// scope and graphics state.
pub struct ContentInterpreter<'a, R: Resolver> {
    resolver: &'a R,
    resources_stack: Vec<Dict>,
    state_stack: Vec<GraphicsState>,
    state: GraphicsState,
    elements: Vec<Element>,
    current_path: Vec<Vec<PathSegment>>,
    current_subpath: Vec<PathSegment>,
    path_start: (f64, f64),
    operands: Vec<Object>,
    text_matrix: Matrix,
    text_line_matrix: Matrix,
    depth: usize,
}

impl<'a, R: Resolver> ContentInterpreter<'a, R> {
    pub fn new(resolver: &'a R, resources: Dict) -> Self {
        Self {
            resolver,
            resources_stack: vec![resources],
            state_stack: Vec::new(),
            state: GraphicsState::default(),
            elements: Vec::new(),
            current_path: Vec::new(),
            current_subpath: Vec::new(),
            path_start: (0.0, 0.0),
            operands: Vec::new(),
            text_matrix: IDENTITY,
            text_line_matrix: IDENTITY,
            depth: 0,
        }
    }

    pub fn run(mut self, bytes: &[u8]) -> Vec<Element> {
        self.interpret(bytes);
        self.elements
    }

    fn resources(&self) -> &Dict {
        self.resources_stack.last().expect("resources stack is never empty")
    }

    fn interpret(&mut self, bytes: &[u8]) {
        let mut t = Tokenizer::new(bytes);
        loop {
            let tok = match t.next_token() {
                Ok(Token::Eof) => break,
                Ok(tok) => tok,
                Err(_) => {
                    // Unrecoverable lexical error for the remainder of this
                    // stream; stop rather than loop on the same byte.
                    self.operands.clear();
                    break;
                },
            };
            match tok {
                Token::Keyword(k) if k == "BI" => {
                    if self.handle_inline_image(&mut t).is_err() {
                        self.operands.clear();
                    }
                },
                Token::Keyword(op) => {
                    if self.dispatch(&op).is_err() {
                        tracing::warn!(operator = %op, "content stream operator failed, recovering");
                    }
                    self.operands.clear();
                },
                other => {
                    if let Some(v) = parse_operand(&mut t, other) {
                        self.operands.push(v);
                    }
                },
            }
        }
    }

    fn nums(&self) -> Vec<f64> {
        self.operands.iter().filter_map(|o| o.as_f64()).collect()
    }

    fn dispatch(&mut self, op: &str) -> Result<()> {
        match op {
            // --- graphics state ---
            "q" => {
                self.state_stack.push(self.state.clone());
                Ok(())
            },
            "Q" => {
                if let Some(s) = self.state_stack.pop() {
                    self.state = s;
                }
                Ok(())
            },
            "cm" => {
                let n = self.nums();
                if n.len() == 6 {
                    self.state.ctm = matrix_multiply([n[0], n[1], n[2], n[3], n[4], n[5]], self.state.ctm);
                }
                Ok(())
            },
            "w" => {
                if let Some(&v) = self.nums().first() {
                    self.state.line_width = v;
                }
                Ok(())
            },
            "d" => {
                if let (Some(Object::Array(arr)), Some(phase)) =
                    (self.operands.first().cloned(), self.operands.get(1).and_then(|o| o.as_f64()))
                {
                    self.state.dash_pattern = arr.iter().filter_map(|o| o.as_f64()).collect();
                    self.state.dash_phase = phase;
                }
                Ok(())
            },
            "gs" => self.apply_ext_gstate(),

            // --- color ---
            "g" => {
                if let Some(&v) = self.nums().first() {
                    self.state.fill_color = Color::Gray(v);
                }
                Ok(())
            },
            "G" => {
                if let Some(&v) = self.nums().first() {
                    self.state.stroke_color = Color::Gray(v);
                }
                Ok(())
            },
            "rg" => {
                let n = self.nums();
                if n.len() == 3 {
                    self.state.fill_color = Color::Rgb(n[0], n[1], n[2]);
                }
                Ok(())
            },
            "RG" => {
                let n = self.nums();
                if n.len() == 3 {
                    self.state.stroke_color = Color::Rgb(n[0], n[1], n[2]);
                }
                Ok(())
            },
            "k" => {
                let n = self.nums();
                if n.len() == 4 {
                    self.state.fill_color = Color::Cmyk(n[0], n[1], n[2], n[3]);
                }
                Ok(())
            },
            "K" => {
                let n = self.nums();
                if n.len() == 4 {
                    self.state.stroke_color = Color::Cmyk(n[0], n[1], n[2], n[3]);
                }
                Ok(())
            },
            "sc" | "scn" => {
                self.set_color(false);
                Ok(())
            },
            "SC" | "SCN" => {
                self.set_color(true);
                Ok(())
            },
            "cs" | "CS" => Ok(()),

            // --- path construction ---
            "m" => {
                let n = self.nums();
                if n.len() == 2 {
                    self.move_to(n[0], n[1]);
                }
                Ok(())
            },
            "l" => {
                let n = self.nums();
                if n.len() == 2 {
                    self.current_subpath.push(PathSegment::LineTo(n[0], n[1]));
                }
                Ok(())
            },
            "c" => {
                let n = self.nums();
                if n.len() == 6 {
                    self.current_subpath
                        .push(PathSegment::CurveTo(n[0], n[1], n[2], n[3], n[4], n[5]));
                }
                Ok(())
            },
            "v" => {
                let n = self.nums();
                if n.len() == 4 {
                    let (cx, cy) = self.current_point();
                    self.current_subpath
                        .push(PathSegment::CurveTo(cx, cy, n[0], n[1], n[2], n[3]));
                }
                Ok(())
            },
            "y" => {
                let n = self.nums();
                if n.len() == 4 {
                    self.current_subpath
                        .push(PathSegment::CurveTo(n[0], n[1], n[2], n[3], n[2], n[3]));
                }
                Ok(())
            },
            "h" => {
                self.current_subpath.push(PathSegment::Close);
                Ok(())
            },
            "re" => {
                let n = self.nums();
                if n.len() == 4 {
                    self.append_rect(n[0], n[1], n[2], n[3]);
                }
                Ok(())
            },

            // --- path painting ---
            "S" => {
                self.flush_path(None, true);
                Ok(())
            },
            "s" => {
                self.current_subpath.push(PathSegment::Close);
                self.flush_path(None, true);
                Ok(())
            },
            "f" | "F" => {
                self.flush_path(Some(FillRule::NonZero), false);
                Ok(())
            },
            "f*" => {
                self.flush_path(Some(FillRule::EvenOdd), false);
                Ok(())
            },
            "B" => {
                self.flush_path(Some(FillRule::NonZero), true);
                Ok(())
            },
            "B*" => {
                self.flush_path(Some(FillRule::EvenOdd), true);
                Ok(())
            },
            "b" => {
                self.current_subpath.push(PathSegment::Close);
                self.flush_path(Some(FillRule::NonZero), true);
                Ok(())
            },
            "b*" => {
                self.current_subpath.push(PathSegment::Close);
                self.flush_path(Some(FillRule::EvenOdd), true);
                Ok(())
            },
            "n" => {
                self.flush_path(None, false);
                Ok(())
            },
            "W" | "W*" => Ok(()),

            // --- text ---
            "BT" => {
                self.text_matrix = IDENTITY;
                self.text_line_matrix = IDENTITY;
                Ok(())
            },
            "ET" => Ok(()),
            "Tf" => {
                if let (Some(Object::Name(name)), Some(size)) =
                    (self.operands.first().cloned(), self.operands.get(1).and_then(|o| o.as_f64()))
                {
                    self.state.font_name = Some(name);
                    self.state.font_size = size;
                }
                Ok(())
            },
            "Tc" => {
                if let Some(v) = self.operands.first().and_then(|o| o.as_f64()) {
                    self.state.char_spacing = v;
                }
                Ok(())
            },
            "Tw" => {
                if let Some(v) = self.operands.first().and_then(|o| o.as_f64()) {
                    self.state.word_spacing = v;
                }
                Ok(())
            },
            "Tz" => {
                if let Some(v) = self.operands.first().and_then(|o| o.as_f64()) {
                    self.state.h_scale = v / 100.0;
                }
                Ok(())
            },
            "TL" => {
                if let Some(v) = self.operands.first().and_then(|o| o.as_f64()) {
                    self.state.leading = v;
                }
                Ok(())
            },
            "Ts" => {
                if let Some(v) = self.operands.first().and_then(|o| o.as_f64()) {
                    self.state.text_rise = v;
                }
                Ok(())
            },
            "Tr" => {
                if let Some(v) = self.operands.first().and_then(|o| o.as_int()) {
                    self.state.render_mode = v;
                }
                Ok(())
            },
            "Td" => {
                let n = self.nums();
                if n.len() == 2 {
                    self.text_line_matrix =
                        matrix_multiply([1.0, 0.0, 0.0, 1.0, n[0], n[1]], self.text_line_matrix);
                    self.text_matrix = self.text_line_matrix;
                }
                Ok(())
            },
            "TD" => {
                let n = self.nums();
                if n.len() == 2 {
                    self.state.leading = -n[1];
                    self.text_line_matrix =
                        matrix_multiply([1.0, 0.0, 0.0, 1.0, n[0], n[1]], self.text_line_matrix);
                    self.text_matrix = self.text_line_matrix;
                }
                Ok(())
            },
            "Tm" => {
                let n = self.nums();
                if n.len() == 6 {
                    let m = [n[0], n[1], n[2], n[3], n[4], n[5]];
                    self.text_line_matrix = m;
                    self.text_matrix = m;
                }
                Ok(())
            },
            "T*" => {
                self.move_to_next_line();
                Ok(())
            },
            "Tj" => {
                if let Some(Object::String(s)) = self.operands.first().cloned() {
                    self.show_text(&s);
                }
                Ok(())
            },
            "'" => {
                self.move_to_next_line();
                if let Some(Object::String(s)) = self.operands.first().cloned() {
                    self.show_text(&s);
                }
                Ok(())
            },
            "\"" => {
                let n: Vec<f64> = self.operands.iter().take(2).filter_map(|o| o.as_f64()).collect();
                if n.len() == 2 {
                    self.state.word_spacing = n[0];
                    self.state.char_spacing = n[1];
                }
                self.move_to_next_line();
                if let Some(Object::String(s)) = self.operands.get(2).cloned() {
                    self.show_text(&s);
                }
                Ok(())
            },
            "TJ" => {
                if let Some(Object::Array(items)) = self.operands.first().cloned() {
                    for item in items {
                        match item {
                            Object::String(s) => self.show_text(&s),
                            Object::Int(n) => self.apply_text_adjustment(n as f64),
                            Object::Real(n) => self.apply_text_adjustment(n),
                            _ => {},
                        }
                    }
                }
                Ok(())
            },

            // --- xobjects / shading ---
            "Do" => self.handle_do(),
            "sh" => self.handle_shading(),

            // Marked content (BMC/BDC/EMC/MP/DP) and compatibility sections
            // (BX/EX) carry no graphics-state effect for element extraction.
            _ => Ok(()),
        }
    }

    fn current_point(&self) -> (f64, f64) {
        match self.current_subpath.last() {
            Some(PathSegment::MoveTo(x, y) | PathSegment::LineTo(x, y)) => (*x, *y),
            Some(PathSegment::CurveTo(_, _, _, _, x, y)) => (*x, *y),
            _ => self.path_start,
        }
    }

    fn move_to(&mut self, x: f64, y: f64) {
        if !self.current_subpath.is_empty() {
            self.current_path.push(std::mem::take(&mut self.current_subpath));
        }
        self.current_subpath.push(PathSegment::MoveTo(x, y));
        self.path_start = (x, y);
    }

    fn append_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        if !self.current_subpath.is_empty() {
            self.current_path.push(std::mem::take(&mut self.current_subpath));
        }
        self.current_path.push(vec![
            PathSegment::MoveTo(x, y),
            PathSegment::LineTo(x + w, y),
            PathSegment::LineTo(x + w, y + h),
            PathSegment::LineTo(x, y + h),
            PathSegment::Close,
        ]);
        self.path_start = (x, y);
    }

    fn flush_path(&mut self, fill_rule: Option<FillRule>, stroke: bool) {
        if !self.current_subpath.is_empty() {
            self.current_path.push(std::mem::take(&mut self.current_subpath));
        }
        if self.current_path.is_empty() {
            return;
        }
        let subpaths = std::mem::take(&mut self.current_path);
        self.elements.push(Element::Path(ParsedPath {
            subpaths,
            fill_rule,
            stroke,
            gfx: self.state.clone(),
        }));
    }

    fn set_color(&mut self, stroke: bool) {
        let nums: Vec<f64> = self.operands.iter().filter_map(|o| o.as_f64()).collect();
        let color = match nums.len() {
            1 => Some(Color::Gray(nums[0])),
            3 => Some(Color::Rgb(nums[0], nums[1], nums[2])),
            4 => Some(Color::Cmyk(nums[0], nums[1], nums[2], nums[3])),
            _ => None,
        };
        if let Some(c) = color {
            if stroke {
                self.state.stroke_color = c;
            } else {
                self.state.fill_color = c;
            }
        }
    }

    fn move_to_next_line(&mut self) {
        let leading = self.state.leading;
        self.text_line_matrix = matrix_multiply([1.0, 0.0, 0.0, 1.0, 0.0, -leading], self.text_line_matrix);
        self.text_matrix = self.text_line_matrix;
    }

    fn apply_text_adjustment(&mut self, amount: f64) {
        let tx = -(amount / 1000.0) * self.state.font_size * self.state.h_scale;
        self.text_matrix = matrix_multiply([1.0, 0.0, 0.0, 1.0, tx, 0.0], self.text_matrix);
    }

    fn show_text(&mut self, bytes: &[u8]) {
        let font_info = self.state.font_name.clone().and_then(|n| self.resolve_font(&n));
        let two_byte = font_info.as_ref().map(|f| f.two_byte).unwrap_or(false);
        let fs = self.state.font_size;
        let hscale = self.state.h_scale;
        let tc = self.state.char_spacing;
        let tw = self.state.word_spacing;

        let start_matrix = matrix_multiply(self.text_matrix, self.state.ctm);
        let (_, start_y) = apply_matrix(start_matrix, 0.0, self.state.text_rise);

        let codes: Vec<u32> = if two_byte {
            bytes
                .chunks(2)
                .map(|c| if c.len() == 2 { ((c[0] as u32) << 8) | c[1] as u32 } else { c[0] as u32 })
                .collect()
        } else {
            bytes.iter().map(|&b| b as u32).collect()
        };

        let mut tx = 0.0f64;
        for &code in &codes {
            let w0 = font_info.as_ref().map(|f| f.width_for(code)).unwrap_or(0.5);
            let is_space = !two_byte && code == 32;
            let advance = (w0 * fs + tc + if is_space { tw } else { 0.0 }) * hscale;
            tx += advance;
        }
        self.text_matrix = matrix_multiply([1.0, 0.0, 0.0, 1.0, tx, 0.0], self.text_matrix);

        let end_matrix = matrix_multiply(self.text_matrix, self.state.ctm);
        let (end_x, _) = apply_matrix(end_matrix, 0.0, self.state.text_rise);

        self.elements.push(Element::Text(TextRun {
            bytes: bytes.to_vec(),
            matrix: start_matrix,
            y: start_y,
            end_x,
            gfx: self.state.clone(),
        }));
    }

    fn resolve_font(&self, name: &str) -> Option<FontInfo> {
        let fonts = self.resources().get("Font")?.clone();
        let fonts = self.resolver.resolve(&fonts).ok()?;
        let fonts_dict = fonts.as_dict()?;
        let font_ref = fonts_dict.get(name)?.clone();
        let font = self.resolver.resolve(&font_ref).ok()?;
        let font_dict = font.as_dict()?;
        let subtype = font_dict.get("Subtype").and_then(|o| o.as_name()).unwrap_or("");

        if subtype == "Type0" {
            let descendants = self.resolver.resolve(font_dict.get("DescendantFonts")?).ok()?;
            let desc = self.resolver.resolve(descendants.as_array()?.first()?).ok()?;
            let desc_dict = desc.as_dict()?;
            let dw = desc_dict.get("DW").and_then(|o| o.as_f64()).unwrap_or(1000.0);
            return Some(FontInfo {
                first_char: 0,
                widths: Vec::new(),
                missing_width: dw,
                two_byte: true,
                default_width: dw,
            });
        }

        let first_char = font_dict.get("FirstChar").and_then(|o| o.as_int()).unwrap_or(0);
        let widths = font_dict
            .get("Widths")
            .cloned()
            .and_then(|w| self.resolver.resolve(&w).ok())
            .and_then(|w| w.as_array().map(|a| a.iter().filter_map(|o| o.as_f64()).collect()))
            .unwrap_or_default();
        let missing_width = font_dict
            .get("FontDescriptor")
            .cloned()
            .and_then(|fd| self.resolver.resolve(&fd).ok())
            .and_then(|fd| fd.as_dict().and_then(|d| d.get("MissingWidth")).and_then(|o| o.as_f64()))
            .unwrap_or(0.0);
        Some(FontInfo {
            first_char,
            widths,
            missing_width,
            two_byte: false,
            default_width: 500.0,
        })
    }

    fn apply_ext_gstate(&mut self) -> Result<()> {
        let Some(Object::Name(name)) = self.operands.first().cloned() else {
            return Ok(());
        };
        let Some(ext_gstates) = self.resources().get("ExtGState").cloned() else {
            return Ok(());
        };
        let ext_gstates = self.resolver.resolve(&ext_gstates)?;
        let Some(dict) = ext_gstates.as_dict() else {
            return Ok(());
        };
        let Some(gs_ref) = dict.get(&name).cloned() else {
            return Ok(());
        };
        let gs = self.resolver.resolve(&gs_ref)?;
        let Some(gs_dict) = gs.as_dict() else {
            return Ok(());
        };

        if let Some(ca) = gs_dict.get("ca").and_then(|o| o.as_f64()) {
            self.state.fill_alpha = ca;
        }
        if let Some(ca) = gs_dict.get("CA").and_then(|o| o.as_f64()) {
            self.state.stroke_alpha = ca;
        }
        if let Some(lw) = gs_dict.get("LW").and_then(|o| o.as_f64()) {
            self.state.line_width = lw;
        }
        if let Some(bm) = gs_dict.get("BM") {
            let name = match bm {
                Object::Name(n) => Some(n.clone()),
                Object::Array(items) => items.first().and_then(|o| o.as_name()).map(str::to_string),
                _ => None,
            };
            if let Some(n) = name {
                self.state.blend_mode = n;
            }
        }
        if let Some(Object::Array(dash)) = gs_dict.get("D") {
            if let (Some(Object::Array(arr)), Some(phase)) = (dash.first(), dash.get(1).and_then(|o| o.as_f64())) {
                self.state.dash_pattern = arr.iter().filter_map(|o| o.as_f64()).collect();
                self.state.dash_phase = phase;
            }
        }

        match gs_dict.get("SMask") {
            Some(Object::Name(n)) if n == "None" => self.state.soft_mask = None,
            Some(other) => {
                let resolved = self.resolver.resolve(other)?;
                let mask = resolved.as_dict().and_then(|mask_dict| {
                    let subtype = mask_dict.get("S").and_then(|o| o.as_name()).unwrap_or("Alpha").to_string();
                    let group = mask_dict.get("G").cloned().and_then(|g| self.resolver.resolve(&g).ok())?;
                    if group.as_stream().is_none() {
                        return None;
                    }
                    Some(SoftMask { subtype, group })
                });
                // An unsupported or differently-keyed mask clears whatever
                // soft mask was previously installed.
                self.state.soft_mask = mask;
            },
            None => {},
        }
        Ok(())
    }

    fn handle_do(&mut self) -> Result<()> {
        let Some(Object::Name(name)) = self.operands.first().cloned() else {
            return Ok(());
        };
        let Some(xobjects) = self.resources().get("XObject").cloned() else {
            return Ok(());
        };
        let xobjects = self.resolver.resolve(&xobjects)?;
        let Some(dict) = xobjects.as_dict() else {
            return Ok(());
        };
        let Some(xobj_ref) = dict.get(&name).cloned() else {
            return Ok(());
        };
        let xobj = self.resolver.resolve(&xobj_ref)?;
        let Some((xdict, raw)) = xobj.as_stream() else {
            return Ok(());
        };
        let subtype = xdict.get("Subtype").and_then(|o| o.as_name()).unwrap_or("").to_string();
        match subtype.as_str() {
            "Image" => {
                let data = crate::pdf::filters::decode_stream(xdict, raw).unwrap_or_else(|_| raw.to_vec());
                self.elements.push(Element::Image(ImageElement {
                    ctm: self.state.ctm,
                    xobject: xdict.clone(),
                    data,
                    gfx: self.state.clone(),
                }));
                Ok(())
            },
            "Form" => {
                if self.depth >= MAX_FORM_DEPTH {
                    return Err(PdfError::parse(0, "form XObject recursion too deep"));
                }
                let matrix = xdict
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
                let form_resources = match xdict.get("Resources").cloned() {
                    Some(r) => self
                        .resolver
                        .resolve(&r)?
                        .as_dict()
                        .cloned()
                        .unwrap_or_else(|| self.resources().clone()),
                    None => self.resources().clone(),
                };
                let decoded = crate::pdf::filters::decode_stream(xdict, raw)?;

                let saved_state = self.state.clone();
                self.state.ctm = matrix_multiply(matrix, self.state.ctm);
                self.resources_stack.push(form_resources);
                self.depth += 1;
                self.interpret(&decoded);
                self.depth -= 1;
                self.resources_stack.pop();
                self.state = saved_state;
                Ok(())
            },
            _ => Ok(()),
        }
    }

    fn handle_shading(&mut self) -> Result<()> {
        let Some(Object::Name(name)) = self.operands.first().cloned() else {
            return Ok(());
        };
        let dict = match self.resources().get("Shading").cloned() {
            Some(s) => self
                .resolver
                .resolve(&s)?
                .as_dict()
                .and_then(|d| d.get(&name).cloned())
                .map(|s| self.resolver.resolve(&s))
                .transpose()?
                .and_then(|s| s.as_dict().cloned()),
            None => None,
        };
        self.elements.push(Element::Shading(ShadingElement {
            name,
            dict,
            ctm: self.state.ctm,
            gfx: self.state.clone(),
        }));
        Ok(())
    }

    fn handle_inline_image(&mut self, t: &mut Tokenizer<'_>) -> Result<()> {
        let mut dict = Dict::new();
        loop {
            match t.next_token()? {
                Token::Keyword(k) if k == "ID" => break,
                Token::Name(key) => {
                    let val_tok = t.next_token()?;
                    if let Some(v) = parse_operand(t, val_tok) {
                        dict.insert(expand_inline_key(&key), v);
                    }
                },
                Token::Eof => return Err(PdfError::parse(t.pos(), "unterminated inline image dictionary")),
                _ => {},
            }
        }
        let mut start = t.pos();
        let rem = t.remaining();
        if rem.first().is_some_and(|b| b.is_ascii_whitespace()) {
            start += 1;
        }
        let base = t.pos();
        let rel_start = start.saturating_sub(base);
        let haystack = &rem[rel_start.min(rem.len())..];
        let end = find_ei(haystack).ok_or_else(|| PdfError::parse(start, "missing 'EI'"))?;
        let data = haystack[..end].to_vec();
        t.seek(start + end);
        // consume the trailing `EI` keyword
        let save = t.pos();
        match t.next_token()? {
            Token::Keyword(k) if k == "EI" => {},
            _ => t.seek(save),
        }
        self.elements.push(Element::Image(ImageElement {
            ctm: self.state.ctm,
            xobject: dict,
            data,
            gfx: self.state.clone(),
        }));
        Ok(())
    }
}

struct FontInfo {
    first_char: i64,
    widths: Vec<f64>,
    missing_width: f64,
    two_byte: bool,
    default_width: f64,
}

impl FontInfo {
    /// Glyph width in text-space units (font metrics are in 1/1000 em).
    fn width_for(&self, code: u32) -> f64 {
        if self.two_byte {
            return self.default_width / 1000.0;
        }
        let idx = code as i64 - self.first_char;
        if idx >= 0 && (idx as usize) < self.widths.len() {
            self.widths[idx as usize] / 1000.0
        } else {
            self.missing_width / 1000.0
        }
    }
}

/// Parse one operand value (everything a content stream can push that is
/// not itself a keyword). Content streams never contain indirect
/// references, so this is a simpler recursive descent than the object
/// layer's `parse_value`.
fn parse_operand(t: &mut Tokenizer<'_>, tok: Token) -> Option<Object> {
    match tok {
        Token::Int(n) => Some(Object::Int(n)),
        Token::Real(n) => Some(Object::Real(n)),
        Token::Name(n) => Some(Object::Name(n)),
        Token::String(s) => Some(Object::String(s)),
        Token::ArrayStart => {
            let mut items = Vec::new();
            loop {
                match t.next_token() {
                    Ok(Token::ArrayEnd) | Ok(Token::Eof) | Err(_) => break,
                    Ok(inner) => {
                        if let Some(v) = parse_operand(t, inner) {
                            items.push(v);
                        }
                    },
                }
            }
            Some(Object::Array(items))
        },
        Token::DictStart => {
            let mut dict = Dict::new();
            loop {
                match t.next_token() {
                    Ok(Token::DictEnd) | Ok(Token::Eof) | Err(_) => break,
                    Ok(Token::Name(key)) => match t.next_token() {
                        Ok(val_tok) => {
                            if let Some(v) = parse_operand(t, val_tok) {
                                dict.insert(key, v);
                            }
                        },
                        Err(_) => break,
                    },
                    _ => {},
                }
            }
            Some(Object::Dict(dict))
        },
        _ => None,
    }
}

fn expand_inline_key(key: &str) -> String {
    match key {
        "BPC" => "BitsPerComponent",
        "CS" => "ColorSpace",
        "D" => "Decode",
        "DP" => "DecodeParms",
        "F" => "Filter",
        "H" => "Height",
        "IM" => "ImageMask",
        "I" => "Interpolate",
        "W" => "Width",
        "L" => "Length",
        other => other,
    }
    .to_string()
}

/// Scan for a whitespace-delimited `EI` marker, the inline-image data
/// terminator. Content streams rarely encode raw `EI` bytes inside image
/// data, but requiring whitespace on both sides avoids the common false
/// match inside binary payloads.
fn find_ei(haystack: &[u8]) -> Option<usize> {
    let mut i = 0;
    while i + 1 < haystack.len() {
        if &haystack[i..i + 2] == b"EI" {
            let before_ok = i == 0 || haystack[i - 1].is_ascii_whitespace();
            let after_ok = i + 2 >= haystack.len() || haystack[i + 2].is_ascii_whitespace();
            if before_ok && after_ok {
                let end = if i > 0 && haystack[i - 1].is_ascii_whitespace() { i - 1 } else { i };
                return Some(end);
            }
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::object::ObjRef;

    struct NullResolver;
    impl Resolver for NullResolver {
        fn resolve(&self, obj: &Object) -> Result<Object> {
            match obj {
                Object::Reference(_) => Ok(Object::Null),
                other => Ok(other.clone()),
            }
        }
    }

    fn elements_for(stream: &[u8]) -> Vec<Element> {
        let interp = ContentInterpreter::new(&NullResolver, Dict::new());
        interp.run(stream)
    }

    #[test]
    fn simple_rect_fill_produces_one_path_element() {
        let els = elements_for(b"q 1 0 0 1 0 0 cm 0 0 10 10 re f Q");
        assert_eq!(els.len(), 1);
        match &els[0] {
            Element::Path(p) => {
                assert_eq!(p.fill_rule, Some(FillRule::NonZero));
                assert!(!p.stroke);
                assert_eq!(p.subpaths.len(), 1);
                assert_eq!(p.subpaths[0].len(), 5);
            },
            other => panic!("expected path, got {other:?}"),
        }
    }

    #[test]
    fn q_big_q_restores_prior_graphics_state() {
        let els = elements_for(b"1 0 0 rg q 0 1 0 rg 0 0 1 1 re f Q 0 0 2 2 re f");
        assert_eq!(els.len(), 2);
        let Element::Path(first) = &els[0] else { panic!() };
        let Element::Path(second) = &els[1] else { panic!() };
        assert_eq!(first.gfx.fill_color, Color::Rgb(0.0, 1.0, 0.0));
        assert_eq!(second.gfx.fill_color, Color::Rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn text_show_operator_produces_one_run_per_call() {
        let els = elements_for(b"BT /F1 12 Tf 100 700 Td (Hello) Tj (World) Tj ET");
        let runs: Vec<_> = els
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].bytes, b"Hello");
        assert_eq!(runs[1].bytes, b"World");
        // default glyph width (0.5em) * 12pt * 5 chars moves the cursor forward
        assert!(runs[1].matrix[4] > runs[0].matrix[4]);
    }

    #[test]
    fn tj_array_numeric_adjustment_shifts_position() {
        let els = elements_for(b"BT /F1 10 Tf 0 0 Td [(A) -500 (B)] TJ ET");
        let runs: Vec<_> = els
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].bytes, b"A");
        assert_eq!(runs[1].bytes, b"B");
    }

    #[test]
    fn ext_gstate_alpha_is_applied_to_subsequent_path() {
        struct GsResolver;
        impl Resolver for GsResolver {
            fn resolve(&self, obj: &Object) -> Result<Object> {
                match obj {
                    Object::Reference(r) if *r == ObjRef::new(1, 0) => {
                        let mut gs = Dict::new();
                        gs.insert("ca".to_string(), Object::Real(0.5));
                        gs.insert("CA".to_string(), Object::Real(0.25));
                        let mut gstates = Dict::new();
                        gstates.insert("GS1".to_string(), Object::Dict(gs));
                        Ok(Object::Dict(gstates))
                    },
                    other => Ok(other.clone()),
                }
            }
        }
        let mut resources = Dict::new();
        resources.insert("ExtGState".to_string(), Object::Reference(ObjRef::new(1, 0)));
        let interp = ContentInterpreter::new(&GsResolver, resources);
        let els = interp.run(b"q /GS1 gs 0 0 10 10 re f Q");
        let Element::Path(p) = &els[0] else { panic!() };
        assert_eq!(p.gfx.fill_alpha, 0.5);
        assert_eq!(p.gfx.stroke_alpha, 0.25);
    }

    #[test]
    fn recovers_from_malformed_operator_and_continues() {
        // `re` with too few operands is simply ignored; parsing resumes.
        let els = elements_for(b"1 2 re 0 0 10 10 re f");
        assert_eq!(els.len(), 1);
    }
}
