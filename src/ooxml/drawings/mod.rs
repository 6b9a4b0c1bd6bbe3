//! DrawingML (DML) support for OOXML documents.
//!
//! DrawingML is the namespace for the DrawingML schema, which defines the
//! structure and content of the drawing elements in an OOXML document.
//!
//! This module provides support for reading and writing DrawingML elements,
//! including shapes, images, and other drawing elements.

pub mod blip;
pub mod ext;
pub mod fill;
pub mod xfrm;
