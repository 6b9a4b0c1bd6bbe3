//! DrawingML fill helpers (`a:blipFill`/`a:solidFill` stretch and tile modes).

/// Write the `<a:stretch><a:fillRect/></a:stretch>` element that tells a
/// `p:blipFill`/`a:blipFill` to stretch its image to fill the shape bounds
/// (the default, and only, fill mode this writer emits).
pub fn write_a_stretch_fill_rect(xml: &mut String) {
    xml.push_str("<a:stretch><a:fillRect/></a:stretch>");
}
