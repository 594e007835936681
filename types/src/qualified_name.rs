use crate::node_id::NamespaceIndex;

/// A browse name: a namespace-qualified, case-sensitive name. Stored as an owned `String`
/// rather than a wire-level string type, since this crate never encodes/decodes browse names
/// to bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedName {
    pub namespace_index: NamespaceIndex,
    pub name: String,
}

impl QualifiedName {
    pub fn new<S: Into<String>>(namespace_index: NamespaceIndex, name: S) -> QualifiedName {
        QualifiedName { namespace_index, name: name.into() }
    }
}

impl<'a> From<&'a str> for QualifiedName {
    fn from(name: &'a str) -> QualifiedName {
        QualifiedName::new(0, name)
    }
}

/// A localized display name. This crate only ever reads/writes the default locale so it
/// keeps a single text field rather than the wire-level locale/text pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalizedText {
    pub locale: String,
    pub text: String,
}

impl LocalizedText {
    pub fn new<S: Into<String>>(text: S) -> LocalizedText {
        LocalizedText { locale: String::new(), text: text.into() }
    }
}

impl<'a> From<&'a str> for LocalizedText {
    fn from(text: &'a str) -> LocalizedText {
        LocalizedText::new(text)
    }
}
