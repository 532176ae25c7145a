//! Remove editor-specific data from SVG documents.
//!
//! Vector graphics editors such as Inkscape, Sodipodi and Adobe Illustrator store their own
//! metadata in private namespaces. None of it is needed to render the image, so this module
//! deletes every element and attribute that belongs to one of those namespaces, together with
//! the `xmlns:` declarations that bind them.
//!
//! ```
//! use tinydom::strip::{NoProgress, StripOptions, scour_string};
//!
//! let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:sodipodi="http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd"><sodipodi:namedview/><rect/></svg>"#;
//! let out = scour_string(svg, &StripOptions::default(), &mut NoProgress)?;
//! assert_eq!(out, r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#);
//! # Ok::<(), tinydom::strip::StripError>(())
//! ```

use std::fmt;

use const_format::concatcp;

use crate::{
    dom::{
        DOMException,
        document::DocumentRef,
        node::{Node, NodeRef},
        node_list::NodeList,
    },
    error::XmlParseError,
    parser::parse_document,
    save::serialize_to_string,
};

pub const NS_SVG: &str = "http://www.w3.org/2000/svg";
pub const NS_XLINK: &str = "http://www.w3.org/1999/xlink";
pub const NS_SODIPODI: &str = "http://sodipodi.sourceforge.net/DTD/sodipodi-0.dtd";
pub const NS_INKSCAPE: &str = "http://www.inkscape.org/namespaces/inkscape";

const ADOBE_NS_BASE: &str = "http://ns.adobe.com/";
pub const NS_ADOBE_ILLUSTRATOR: &str = concatcp!(ADOBE_NS_BASE, "AdobeIllustrator/10.0/");
pub const NS_ADOBE_GRAPHS: &str = concatcp!(ADOBE_NS_BASE, "Graphs/1.0/");
pub const NS_ADOBE_SVG_VIEWER: &str = concatcp!(ADOBE_NS_BASE, "AdobeSVGViewerExtensions/3.0/");
pub const NS_ADOBE_VARIABLES: &str = concatcp!(ADOBE_NS_BASE, "Variables/1.0/");
pub const NS_ADOBE_SFW: &str = concatcp!(ADOBE_NS_BASE, "SaveForWeb/1.0/");
pub const NS_ADOBE_EXTENSIBILITY: &str = concatcp!(ADOBE_NS_BASE, "Extensibility/1.0/");
pub const NS_ADOBE_FLOWS: &str = concatcp!(ADOBE_NS_BASE, "Flows/1.0/");
pub const NS_ADOBE_IMAGE_REPLACEMENT: &str = concatcp!(ADOBE_NS_BASE, "ImageReplacement/1.0/");
pub const NS_ADOBE_CUSTOM: &str = concatcp!(ADOBE_NS_BASE, "GenericCustomNamespace/1.0/");
pub const NS_ADOBE_XPATH: &str = concatcp!(ADOBE_NS_BASE, "XPath/1.0/");

/// Namespaces removed by default.
pub const UNWANTED_NAMESPACES: &[&str] = &[
    NS_SODIPODI,
    NS_INKSCAPE,
    NS_ADOBE_ILLUSTRATOR,
    NS_ADOBE_GRAPHS,
    NS_ADOBE_SVG_VIEWER,
    NS_ADOBE_VARIABLES,
    NS_ADOBE_SFW,
    NS_ADOBE_EXTENSIBILITY,
    NS_ADOBE_FLOWS,
    NS_ADOBE_IMAGE_REPLACEMENT,
    NS_ADOBE_CUSTOM,
    NS_ADOBE_XPATH,
];

/// Receiver of progress notifications.
///
/// Notifications are advisory. They never change the result of the processing.
/// All methods do nothing by default.
pub trait ProgressReporter {
    /// `loaded` out of `total` is done.
    fn progress(&mut self, _loaded: u32, _total: u32) {}
    /// A new step starts.
    fn message(&mut self, _message: &str) {}
    /// Something happened within the current step.
    fn update(&mut self, _update: &str) {}
}

/// A [`ProgressReporter`] that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripOptions {
    /// Elements and attributes in these namespaces are removed.
    pub namespaces: Vec<String>,
    /// If `true`, nothing is removed.
    pub keep_editor_data: bool,
}

impl StripOptions {
    /// Add `uri` to the namespaces to remove.
    pub fn with_namespace(mut self, uri: impl Into<String>) -> Self {
        let uri = uri.into();
        if !self.namespaces.contains(&uri) {
            self.namespaces.push(uri);
        }
        self
    }

    pub fn keep_editor_data(mut self, keep: bool) -> Self {
        self.keep_editor_data = keep;
        self
    }
}

impl Default for StripOptions {
    fn default() -> Self {
        Self {
            namespaces: UNWANTED_NAMESPACES.iter().map(|ns| ns.to_string()).collect(),
            keep_editor_data: false,
        }
    }
}

/// The number of nodes removed by [`strip_document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StripReport {
    pub removed_elements: usize,
    pub removed_attributes: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StripError {
    /// The input is not well-formed.
    Parse(XmlParseError),
    /// The stripped tree could not be written.
    Serialize(DOMException),
}

impl fmt::Display for StripError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "failed to parse document: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize document: {err}"),
        }
    }
}

impl std::error::Error for StripError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<XmlParseError> for StripError {
    fn from(value: XmlParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<DOMException> for StripError {
    fn from(value: DOMException) -> Self {
        Self::Serialize(value)
    }
}

fn is_unwanted(uri: Option<&str>, namespaces: &[impl AsRef<str>]) -> bool {
    uri.is_some_and(|uri| namespaces.iter().any(|ns| ns.as_ref() == uri))
}

/// Remove the descendants of `node` whose namespace is one of `namespaces`.
///
/// Children of an element are checked first, then the remaining children are processed
/// recursively. Nothing happens if `node` is not an element.
///
/// Return the number of removed nodes. Descendants of a removed node are not counted.
pub fn remove_namespaced_elements<P: ProgressReporter + ?Sized>(
    node: &NodeRef,
    namespaces: &[impl AsRef<str>],
    progress: &mut P,
) -> usize {
    let Some(mut elem) = node.as_element() else {
        return 0;
    };

    let children = elem.child_nodes();
    let mut to_remove = vec![];
    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            if is_unwanted(child.namespace_uri().as_deref(), namespaces) {
                tracing::debug!(name = %child.node_name(), "remove element");
                progress.update(".");
                to_remove.push(child);
            }
        }
    }

    let mut removed = 0;
    for child in to_remove {
        match elem.remove_child(child) {
            Ok(_) => removed += 1,
            Err(err) => tracing::warn!(%err, "failed to remove element"),
        }
    }

    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            removed += remove_namespaced_elements(&child, namespaces, progress);
        }
    }
    removed
}

/// Remove the attributes of `node` and its descendants whose namespace is one of
/// `namespaces`, and the `xmlns:` declarations that bind one of `namespaces`.
///
/// Nothing happens if `node` is not an element.
///
/// Return the number of removed attributes.
pub fn remove_namespaced_attributes<P: ProgressReporter + ?Sized>(
    node: &NodeRef,
    namespaces: &[impl AsRef<str>],
    progress: &mut P,
) -> usize {
    let Some(mut elem) = node.as_element() else {
        return 0;
    };

    let mut to_remove = vec![];
    if let Some(attrs) = elem.attributes() {
        for i in 0..attrs.len() {
            let Some(attr) = attrs.item(i) else {
                continue;
            };
            let name = attr.name();
            let declares_unwanted =
                name.starts_with("xmlns:") && is_unwanted(Some(&*attr.value()), namespaces);
            if declares_unwanted || is_unwanted(attr.namespace_uri().as_deref(), namespaces) {
                tracing::debug!(element = %elem.tag_name(), name = %name, "remove attribute");
                progress.update(".");
                to_remove.push(name);
            }
        }
    }
    let mut removed = to_remove.len();
    for name in to_remove {
        elem.remove_attribute(&name);
    }

    let children = elem.child_nodes();
    for i in 0..children.length() {
        if let Some(child) = children.item(i) {
            removed += remove_namespaced_attributes(&child, namespaces, progress);
        }
    }
    removed
}

/// Remove editor data from `doc` according to `options`.
pub fn strip_document<P: ProgressReporter + ?Sized>(
    doc: &DocumentRef,
    options: &StripOptions,
    progress: &mut P,
) -> StripReport {
    let mut report = StripReport::default();
    if options.keep_editor_data {
        tracing::debug!("keep editor data");
        return report;
    }
    let Some(root) = doc.document_element() else {
        tracing::warn!("document has no document element");
        return report;
    };
    let root: NodeRef = root.into();

    progress.message("Removing namespaced elements ");
    report.removed_elements = remove_namespaced_elements(&root, &options.namespaces, progress);
    progress.update(" done!");
    progress.progress(45, 100);

    progress.message("Removing namespaced attributes ");
    report.removed_attributes =
        remove_namespaced_attributes(&root, &options.namespaces, progress);
    progress.update(" done!");
    progress.progress(90, 100);

    tracing::info!(
        removed_elements = report.removed_elements,
        removed_attributes = report.removed_attributes,
        "stripped editor data"
    );
    report
}

/// Parse `text`, remove editor data and serialize the result.
pub fn scour_string<P: ProgressReporter + ?Sized>(
    text: &str,
    options: &StripOptions,
    progress: &mut P,
) -> Result<String, StripError> {
    progress.progress(0, 100);
    let doc = parse_document(text)?;
    strip_document(&doc, options, progress);
    let out = serialize_to_string(&doc)?;
    progress.progress(100, 100);
    Ok(out)
}
