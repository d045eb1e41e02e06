//! Small helpers around quick-xml events.

use quick_xml::events::BytesStart;

/// Extract the local name from a potentially namespaced XML element name.
pub fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of an unprefixed attribute.
pub fn attr_value(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| {
            attr.unescape_value()
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| String::from_utf8_lossy(&attr.value).to_string())
        })
}

/// Value of a namespaced attribute by its local name, e.g. `r:embed`.
pub fn prefixed_attr_value(e: &BytesStart, local: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| {
            let key = attr.key.as_ref();
            key.contains(&b':') && local_name(key) == local
        })
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// OOXML boolean attribute (`1`, `true`, `on`).
pub fn is_true(value: &str) -> bool {
    matches!(value, "1" | "true" | "on")
}
