// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Namespace/QName resolution: splitting an IRI into `(namespace, localName)`,
//! looking up or synthesizing a prefix for it, and validating/escaping the local
//! name into a legal Turtle `PN_LOCAL` / XML `NCName`.

use std::collections::{BTreeMap, HashMap, HashSet};

/// A resolved qualified name: `prefix:localName`, relative to some namespace IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QName {
    pub prefix: String,
    pub local_name: String,
    pub namespace: String,
}

/// Prefix table plus its reverse index, with on-demand generated-prefix synthesis.
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    /// prefix -> namespace
    prefixes: BTreeMap<String, String>,
    /// namespace -> prefix (one winner per namespace)
    reverse: HashMap<String, String>,
    /// Prefixes created by this table rather than supplied by the caller.
    generated: HashSet<String>,
    /// Prefixes actually handed out by a successful `resolve()` call, so the header
    /// writer can emit only the prefixes the output actually uses.
    used: HashSet<String>,
    next_generated: u32,
    allow_generated: bool,
}

impl NamespaceTable {
    #[must_use]
    pub fn new(prefixes: &BTreeMap<String, String>, allow_generated: bool) -> Self {
        let mut reverse: HashMap<String, String> = HashMap::new();
        for (prefix, namespace) in prefixes {
            reverse
                .entry(namespace.clone())
                .and_modify(|existing| {
                    if prefix.len() < existing.len()
                        || (prefix.len() == existing.len() && prefix < existing)
                    {
                        *existing = prefix.clone();
                    }
                })
                .or_insert_with(|| prefix.clone());
        }
        Self {
            prefixes: prefixes.clone(),
            reverse,
            generated: HashSet::new(),
            used: HashSet::new(),
            next_generated: 1,
            allow_generated,
        }
    }

    /// Splits `iri` at the last `#`, `/`, or `:`, keeping the separator with the
    /// namespace half.
    #[must_use]
    pub fn split(iri: &str) -> Option<(&str, &str)> {
        let split_at = iri.rfind(['#', '/', ':'])?;
        Some((&iri[..=split_at], &iri[split_at + 1..]))
    }

    /// Resolves `iri` to a QName, registering and returning a freshly generated
    /// prefix if none is registered yet and generation is allowed.
    pub fn resolve(&mut self, iri: &str) -> Option<QName> {
        let (namespace, local_name) = Self::split(iri)?;
        if local_name.is_empty() || escape_local_name(local_name).is_none() {
            return None;
        }
        if let Some(prefix) = self.reverse.get(namespace) {
            self.used.insert(prefix.clone());
            return Some(QName {
                prefix: prefix.clone(),
                local_name: local_name.to_string(),
                namespace: namespace.to_string(),
            });
        }
        if !self.allow_generated {
            return None;
        }
        let prefix = format!("ns{}", self.next_generated);
        self.next_generated += 1;
        self.prefixes.insert(prefix.clone(), namespace.to_string());
        self.reverse.insert(namespace.to_string(), prefix.clone());
        self.generated.insert(prefix.clone());
        self.used.insert(prefix.clone());
        Some(QName {
            prefix,
            local_name: local_name.to_string(),
            namespace: namespace.to_string(),
        })
    }

    #[must_use]
    pub fn prefixes(&self) -> &BTreeMap<String, String> {
        &self.prefixes
    }

    /// The prefix table restricted to prefixes actually handed out by `resolve()`,
    /// in prefix order; this is what the header writer emits.
    #[must_use]
    pub fn used_prefixes(&self) -> BTreeMap<String, String> {
        self.prefixes
            .iter()
            .filter(|(prefix, _)| self.used.contains(*prefix))
            .map(|(p, n)| (p.clone(), n.clone()))
            .collect()
    }

    #[must_use]
    pub fn is_generated(&self, prefix: &str) -> bool {
        self.generated.contains(prefix)
    }
}

// [157s] PN_CHARS_BASE ::= [A-Z] | [a-z] | [#x00C0-#x00D6] | ... | [#x10000-#xEFFFF]
const fn is_possible_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

// [158s] PN_CHARS_U ::= PN_CHARS_BASE | '_'
const fn is_possible_pn_chars_u(c: char) -> bool {
    is_possible_pn_chars_base(c) || c == '_'
}

// [160s] PN_CHARS ::= PN_CHARS_U | '-' | [0-9] | #x00B7 | [#x0300-#x036F] | [#x203F-#x2040]
pub(crate) const fn is_possible_pn_chars(c: char) -> bool {
    is_possible_pn_chars_u(c)
        || matches!(c,
        '-' | '0'..='9' | '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}

const fn can_be_escaped_in_local_name(c: char) -> bool {
    matches!(
        c,
        '_' | '~'
            | '.'
            | '-'
            | '!'
            | '$'
            | '&'
            | '\''
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | ';'
            | '='
            | '/'
            | '?'
            | '#'
            | '@'
            | '%'
    )
}

/// Escapes `value` into a legal Turtle `PN_LOCAL`, or returns `None` when a
/// character can neither be used bare nor escaped.
#[must_use]
pub fn escape_local_name(value: &str) -> Option<String> {
    let mut output = String::with_capacity(value.len());
    let mut chars = value.chars();
    let first = chars.next()?;
    if is_possible_pn_chars_u(first) || first == ':' || first.is_ascii_digit() {
        output.push(first);
    } else if can_be_escaped_in_local_name(first) {
        output.push('\\');
        output.push(first);
    } else {
        return None;
    }

    while let Some(c) = chars.next() {
        if is_possible_pn_chars(c) || c == ':' || (c == '.' && !chars.as_str().is_empty()) {
            output.push(c);
        } else if can_be_escaped_in_local_name(c) {
            output.push('\\');
            output.push(c);
        } else {
            return None;
        }
    }

    Some(output)
}

/// Whether `value` is already a legal XML `NCName` with no escaping needed
/// (required for RDF/XML element and attribute names, which have no escape syntax).
#[must_use]
pub fn is_valid_ncname(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if is_possible_pn_chars_u(c) => (),
        _ => return false,
    }
    chars.all(is_possible_pn_chars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_at_last_hash() {
        assert_eq!(
            NamespaceTable::split("http://schema.org/Person#name"),
            Some(("http://schema.org/Person#", "name"))
        );
    }

    #[test]
    fn splits_at_last_slash_when_no_hash() {
        assert_eq!(
            NamespaceTable::split("http://schema.org/Person"),
            Some(("http://schema.org/", "Person"))
        );
    }

    #[test]
    fn no_split_point_yields_none() {
        assert_eq!(NamespaceTable::split("urn:isbn"), Some(("urn:", "isbn")));
        assert_eq!(NamespaceTable::split("nosplit"), None);
    }

    #[test]
    fn resolves_against_a_known_prefix() {
        let mut prefixes = BTreeMap::new();
        prefixes.insert("ex".to_string(), "http://ex/".to_string());
        let mut table = NamespaceTable::new(&prefixes, false);
        let qname = table.resolve("http://ex/a").unwrap();
        assert_eq!(qname.prefix, "ex");
        assert_eq!(qname.local_name, "a");
    }

    #[test]
    fn generates_a_prefix_when_allowed() {
        let mut table = NamespaceTable::new(&BTreeMap::new(), true);
        let qname = table.resolve("http://unknown.example/x").unwrap();
        assert_eq!(qname.prefix, "ns1");
        assert!(table.is_generated("ns1"));
    }

    #[test]
    fn refuses_to_generate_when_disallowed() {
        let mut table = NamespaceTable::new(&BTreeMap::new(), false);
        assert!(table.resolve("http://unknown.example/x").is_none());
    }

    #[test]
    fn escapes_reserved_local_name_characters() {
        assert_eq!(escape_local_name("a.b"), Some("a.b".to_string()));
        assert_eq!(escape_local_name("a~b"), Some("a\\~b".to_string()));
    }
}
