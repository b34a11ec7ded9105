//! DOM construction and serialization helpers
//!
//! Fragments are lists of detached `markup5ever_rcdom` handles. Markup that
//! must pass through unescaped (math tool output) is stood in for by a comment
//! node during construction and swapped in after serialization.

use crate::error::FormatError;
use html5ever::{
    ns, serialize, serialize::SerializeOpts, serialize::TraversalScope, Attribute, LocalName,
    QualName,
};
use markup5ever_rcdom::{Handle, Node, NodeData, SerializableHandle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

const RAW_SLOT_PREFIX: &str = "qtext-raw-";

/// Create an HTML element with attributes and children.
pub fn element(tag: &str, attrs: Vec<(&str, &str)>, children: Vec<Handle>) -> Handle {
    let qual_name = QualName::new(None, ns!(html), LocalName::from(tag));
    let attributes = attrs
        .into_iter()
        .map(|(name, value)| Attribute {
            name: QualName::new(None, ns!(), LocalName::from(name)),
            value: value.to_string().into(),
        })
        .collect();

    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(children),
        data: NodeData::Element {
            name: qual_name,
            attrs: RefCell::new(attributes),
            template_contents: Default::default(),
            mathml_annotation_xml_integration_point: false,
        },
    })
}

pub fn text(contents: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Text {
            contents: RefCell::new(contents.to_string().into()),
        },
    })
}

fn comment(contents: &str) -> Handle {
    Rc::new(Node {
        parent: Cell::new(None),
        children: RefCell::new(Vec::new()),
        data: NodeData::Comment {
            contents: contents.to_string().into(),
        },
    })
}

/// Raw markup collected during one render.
#[derive(Debug, Default)]
pub struct RawSlots {
    markup: Vec<String>,
}

impl RawSlots {
    /// A placeholder node that [`RawSlots::fill`] replaces with `markup`.
    pub fn slot(&mut self, markup: String) -> Handle {
        let id = self.markup.len();
        self.markup.push(markup);
        comment(&format!("{RAW_SLOT_PREFIX}{id}"))
    }

    pub fn fill(&self, serialized: String) -> String {
        self.markup
            .iter()
            .enumerate()
            .fold(serialized, |html, (id, markup)| {
                html.replace(&format!("<!--{RAW_SLOT_PREFIX}{id}-->"), markup)
            })
    }
}

/// Serialize detached nodes, each including itself.
pub fn serialize_nodes(nodes: &[Handle]) -> Result<String, FormatError> {
    let mut output = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };

    for node in nodes {
        let serializable = SerializableHandle::from(node.clone());
        serialize(&mut output, &serializable, opts.clone()).map_err(|e| {
            FormatError::SerializationError(format!("HTML serialization failed: {e}"))
        })?;
    }

    String::from_utf8(output)
        .map_err(|e| FormatError::SerializationError(format!("UTF-8 conversion failed: {e}")))
}
