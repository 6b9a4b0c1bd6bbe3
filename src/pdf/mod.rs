//! PDF object/content-stream interpreter.
//!
//! Two layers, run independently of the OOXML side: an object layer
//! ([`object`], [`tokenizer`], [`parser`], [`xref`], [`filters`]) that
//! resolves a byte range into a typed [`object::Object`] graph, and a
//! content-stream layer ([`content`]) that replays a page's operator
//! stream against a stacked [`content::GraphicsState`] into a flat list of
//! [`content::Element`]s. [`document::PdfDocument`] ties the two together
//! (xref resolution, page-tree flattening, inherited-attribute merging).
//! [`raster`] evaluates soft masks and shading fills on demand, bounded by
//! the caller-supplied raster size ([`crate::common::ParserConfig`]).

mod content;
mod document;
mod error;
mod filters;
mod object;
mod parser;
mod raster;
mod tokenizer;
mod xref;

pub use content::{
    apply_matrix, matrix_multiply, Color, ContentInterpreter, Element, FillRule, GraphicsState, ImageElement, Matrix,
    ParsedPath, PathSegment, Resolver, ShadingElement, SoftMask, TextRun, IDENTITY,
};
pub use document::PdfDocument;
pub use error::{PdfError, Result};
pub use filters::decode_stream;
pub use object::{Dict, ObjRef, Object};
pub use parser::{parse_indirect_object_at, parse_object_at};
pub use raster::{rasterize_soft_mask, multiply_alpha, Backdrop, Raster};
pub use tokenizer::{Token, Tokenizer};
pub use xref::{parse_object_stream, XrefEntry, XrefTable};
