//! UGX (UG4 grid) reading and writing
//!
//! A UGX file is an XML document rooted at `<grid>`:
//!
//! ```text
//! <grid name="defGrid">
//!   <vertices coords="3">x y z x y z ...</vertices>
//!   <edges>v0 v1 ...</edges>
//!   <triangles>v0 v1 v2 ...</triangles>
//!   <quads>v0 v1 v2 v3 ...</quads>
//!   <subset_handler name="defSH">
//!     <subset name="..." color="r g b a" state="393216">
//!       <vertices>..</vertices> <edges>..</edges> <faces>..</faces>
//!     </subset>
//!   </subset_handler>
//!   <subset_handler name="markSH">...</subset_handler>
//!   <selector name="defSel">...</selector>
//!   <projection_handler name="defPH">...</projection_handler>
//! </grid>
//! ```
//!
//! Subset and selector `<faces>` lists use the combined face numbering:
//! triangles first, then quads.

mod element;
mod reader;
mod tokens;
mod writer;

pub use element::Element;
pub use reader::{UgxReader, UgxReaderConfiguration};
pub use tokens::format_number;
pub use writer::{UgxWriter, UgxWriterConfiguration};

use crate::document::MeshDocument;
use crate::error::Result;
use crate::types::Color;

/// Name of the subset handler holding the grid's subsets
pub const DEFAULT_SUBSET_HANDLER: &str = "defSH";
/// Name of the mark subset handler
pub const MARK_SUBSET_HANDLER: &str = "markSH";
pub const DEFAULT_SELECTOR: &str = "defSel";
pub const DEFAULT_PROJECTION_HANDLER: &str = "defPH";
/// `state` attribute written on every subset of the default handler
pub const SUBSET_STATE: &str = "393216";

/// Encode a document as UGX text.
pub fn encode(document: &MeshDocument) -> Result<String> {
    UgxWriter::new(document).write_to_string()
}

/// Decode UGX text into a document.
pub fn decode(text: &str) -> Result<MeshDocument> {
    UgxReader::from_string(text).read()
}

/// The mark subset handler written when the document carries none.
pub fn default_mark_handler() -> Element {
    let mark = |name: &str| {
        Element::new("subset")
            .with_attribute("name", name)
            .with_attribute("color", tokens::join_numbers(Color::WHITE.to_array()))
            .with_attribute("state", "0")
    };
    Element::new("subset_handler")
        .with_attribute("name", MARK_SUBSET_HANDLER)
        .with_child(mark("crease"))
        .with_child(mark("fixed"))
}

/// The projection handler written when the document carries none.
pub fn default_projection_handler() -> Element {
    Element::new("projection_handler")
        .with_attribute("name", DEFAULT_PROJECTION_HANDLER)
        .with_child(
            Element::new("default")
                .with_attribute("type", "default")
                .with_text("0 0"),
        )
}
