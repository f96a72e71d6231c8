//! Instrument definition fragments
//!
//! A small element tree that renders well-formed XML for the location
//! part of an instrument definition. Documents are built as typed nodes and
//! serialized through [`std::fmt::Display`], never by pasting strings.
//!
//! ```rust
//! use panelgeom::idf::XmlElement;
//!
//! let element = XmlElement::new("component")
//!     .attr("type", "panel<1>")
//!     .child(XmlElement::new("location").attr("x", 1.5));
//! assert_eq!(
//!     element.to_string(),
//!     "<component type=\"panel&lt;1&gt;\">\n  <location x=\"1.5\"/>\n</component>\n"
//! );
//! ```

use std::fmt;

use crate::location::{Location, NestedRotation};

/// Decimal places kept when writing coordinates and angles
const DECIMALS: i32 = 9;

/// XML element with ordered attributes and child elements
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Adds an attribute; values are escaped on output
    pub fn attr(mut self, name: &str, value: impl fmt::Display) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Adds a numeric attribute rounded for output
    pub fn number(self, name: &str, value: f64) -> Self {
        self.attr(name, format_number(value))
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[XmlElement] {
        &self.children
    }

    /// Value of the first attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        write!(f, "{}<{}", indent, self.name)?;
        for (name, value) in &self.attributes {
            write!(f, " {}=\"{}\"", name, escape(value))?;
        }
        if self.children.is_empty() {
            return writeln!(f, "/>");
        }
        writeln!(f, ">")?;
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        writeln!(f, "{}</{}>", indent, self.name)
    }
}

impl fmt::Display for XmlElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Rounds to [`DECIMALS`] places and drops the sign of zero
fn format_number(value: f64) -> String {
    let scale = 10f64.powi(DECIMALS);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

impl NestedRotation {
    /// `<rot val=".." axis-x=".." axis-y=".." axis-z="..">` with nested rotations
    pub fn to_xml(&self) -> XmlElement {
        let element = XmlElement::new("rot")
            .number("val", self.angle.to_degrees())
            .number("axis-x", self.axis.x)
            .number("axis-y", self.axis.y)
            .number("axis-z", self.axis.z);
        match &self.inner {
            Some(inner) => element.child(inner.to_xml()),
            None => element,
        }
    }
}

impl Location {
    /// `<location x=".." y=".." z="..">` with the rotation chain nested inside
    pub fn to_xml(&self) -> XmlElement {
        let element = XmlElement::new("location")
            .number("x", self.position.x)
            .number("y", self.position.y)
            .number("z", self.position.z);
        match &self.rotation {
            Some(rot) => element.child(rot.to_xml()),
            None => element,
        }
    }
}
