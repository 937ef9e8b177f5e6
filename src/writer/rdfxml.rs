// SPDX-FileCopyrightText: 2025 Robin Vobruba <hoijui.quaero@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0

//! RDF/XML format hooks: prologue, optional DTD subset, element naming from the
//! preferred `rdf:type`, and nested/collection rendering atop the indenting XML
//! stream emitter.

use std::collections::{BTreeMap, HashMap};

use oxrdf::vocab::{rdf, xsd};

use crate::collection::Collections;
use crate::error::SerializeResult;
use crate::index::{SortedIndex, SortedPredicate};
use crate::namespace::NamespaceTable;
use crate::options::{SerializerOptions, StringDataType};
use crate::relabel::InlinePlan;
use crate::term::{BlankNode, Literal, NamedNode, Subject, Term};
use crate::vocab::owl;

use super::xml_emitter::XmlWriter;

pub struct Renderer<'a> {
    options: &'a SerializerOptions,
    namespaces: NamespaceTable,
    labels: &'a HashMap<BlankNode, String>,
    inline_plan: &'a InlinePlan,
    collections: &'a Collections,
    blank_node_predicates: HashMap<BlankNode, Vec<SortedPredicate>>,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub fn new(
        options: &'a SerializerOptions,
        prefixes: &BTreeMap<String, String>,
        labels: &'a HashMap<BlankNode, String>,
        inline_plan: &'a InlinePlan,
        collections: &'a Collections,
        index: &SortedIndex,
    ) -> Self {
        let blank_node_predicates = index
            .subjects
            .iter()
            .filter_map(|s| match &s.subject {
                Subject::BlankNode(b) => Some((b.clone(), s.predicates.clone())),
                Subject::NamedNode(_) => None,
            })
            .collect();
        Self {
            options,
            namespaces: NamespaceTable::new(prefixes, true),
            labels,
            inline_plan,
            collections,
            blank_node_predicates,
        }
    }

    pub fn write_document(
        &mut self,
        out: &mut String,
        index: &SortedIndex,
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        // Pre-resolve every IRI that will appear so the namespace table (and hence
        // the set of declared prefixes / DTD entities) is final before the root
        // element's attributes are written.
        self.preresolve(index);

        let mut w = XmlWriter::new(out, self.options.indent.clone(), self.options.line_end.clone());
        w.write_decl()?;

        let entities: Vec<(String, String)> = if self.options.use_dtd_subset {
            self.namespaces
                .prefixes()
                .iter()
                .map(|(prefix, namespace)| (prefix.clone(), namespace.clone()))
                .collect()
        } else {
            Vec::new()
        };
        w.write_doctype("rdf:RDF", &entities)?;

        let has_content = !self.options.leading_comments.is_empty()
            || !self.options.trailing_comments.is_empty()
            || index.subjects.iter().any(|s| {
                !matches!(&s.subject, Subject::BlankNode(b) if self.inline_plan.is_inlineable(b))
            });

        w.start_element("rdf:RDF")?;
        if let Some(base) = base_iri {
            w.write_attribute("xml:base", base)?;
        }
        self.write_namespace_declarations(&mut w)?;
        w.finish_start_tag(!has_content)?;

        if has_content {
            for comment in &self.options.leading_comments {
                w.comment(comment)?;
            }

            for subject in &index.subjects {
                if let Subject::BlankNode(b) = &subject.subject {
                    if self.inline_plan.is_inlineable(b) {
                        continue;
                    }
                }
                self.write_subject(&mut w, &subject.subject, &subject.predicates, base_iri)?;
            }

            for comment in &self.options.trailing_comments {
                w.comment(comment)?;
            }

            w.end_element()?;
        }
        Ok(())
    }

    /// Walks every IRI the document will render, resolving it against the namespace
    /// table so prefixes/entities are known before the root element opens.
    fn preresolve(&mut self, index: &SortedIndex) {
        for subject in &index.subjects {
            if let Subject::NamedNode(n) = &subject.subject {
                self.namespaces.resolve(n.as_str());
            }
            for predicate in &subject.predicates {
                self.namespaces.resolve(predicate.predicate.as_str());
                for object in &predicate.objects {
                    self.preresolve_term(object);
                }
            }
        }
    }

    fn preresolve_term(&mut self, term: &Term) {
        match term {
            Term::NamedNode(n) => {
                self.namespaces.resolve(n.as_str());
            }
            Term::Literal(l) => {
                self.namespaces.resolve(l.datatype().as_str());
            }
            Term::BlankNode(b) => {
                if let Some(collection) = self.collections.get(b) {
                    let members = collection.members.clone();
                    for member in &members {
                        self.preresolve_term(member);
                    }
                } else if let Some(predicates) = self.blank_node_predicates.get(b).cloned() {
                    for predicate in &predicates {
                        self.namespaces.resolve(predicate.predicate.as_str());
                        for object in &predicate.objects {
                            self.preresolve_term(object);
                        }
                    }
                }
            }
        }
    }

    fn write_namespace_declarations(&self, w: &mut XmlWriter<'_, String>) -> SerializeResult<()> {
        let mut declared_rdf = false;
        for (prefix, namespace) in self.namespaces.prefixes() {
            if prefix == "rdf" {
                declared_rdf = true;
            }
            if prefix.is_empty() {
                w.write_attribute("xmlns", namespace)?;
            } else {
                w.write_attribute(&format!("xmlns:{prefix}"), namespace)?;
            }
        }
        if !declared_rdf {
            w.write_attribute("xmlns:rdf", rdf::TYPE.as_str().trim_end_matches("type"))?;
        }
        Ok(())
    }

    /// Writes an IRI-valued attribute, using a split entity-ref/text attribute when
    /// the DTD subset is active and a prefix is available for the IRI's namespace.
    fn write_resource_attribute(&mut self, w: &mut XmlWriter<'_, String>, name: &str, iri: &str) -> SerializeResult<()> {
        if self.options.use_dtd_subset {
            if let Some((namespace, local)) = NamespaceTable::split(iri) {
                if let Some(qname) = self.namespaces.resolve(iri) {
                    if qname.namespace == namespace {
                        w.start_attribute(name)?;
                        w.write_attribute_entity_ref(&qname.prefix)?;
                        w.write_attribute_characters(local)?;
                        w.end_attribute()?;
                        return Ok(());
                    }
                }
            }
        }
        w.write_attribute(name, iri)?;
        Ok(())
    }

    fn element_name_for_types(&mut self, predicates: &[SortedPredicate]) -> (String, Vec<usize>) {
        let Some(type_predicate) = predicates
            .iter()
            .position(|p| p.predicate.as_str() == rdf::TYPE.as_str())
        else {
            return ("rdf:Description".to_string(), Vec::new());
        };
        let types = &predicates[type_predicate].objects;
        let non_thing: Vec<(usize, &str)> = types
            .iter()
            .enumerate()
            .filter_map(|(i, t)| t.as_named_node().map(|n| (i, n.as_str())))
            .filter(|&(_, iri)| iri != owl::THING.as_str())
            .collect();

        let mut best: Option<(usize, usize)> = None;
        for &(i, iri) in &non_thing {
            if let Some(rank) = owl::preferred_type_rank(iri) {
                if best.is_none_or(|(_, best_rank)| rank < best_rank) {
                    best = Some((i, rank));
                }
            }
        }
        if let Some((i, _)) = best {
            let iri = types[i].as_named_node().unwrap().as_str().to_string();
            if let Some(qname) = self.namespaces.resolve(&iri) {
                return (format!("{}:{}", qname.prefix, qname.local_name), vec![i]);
            }
        }
        if non_thing.len() == 1 {
            let (i, iri) = non_thing[0];
            if let Some(qname) = self.namespaces.resolve(iri) {
                return (format!("{}:{}", qname.prefix, qname.local_name), vec![i]);
            }
        }
        ("rdf:Description".to_string(), Vec::new())
    }

    fn write_subject(
        &mut self,
        w: &mut XmlWriter<'_, String>,
        subject: &Subject,
        predicates: &[SortedPredicate],
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        let (element_name, consumed_type_objects) = self.element_name_for_types(predicates);
        w.start_element(&element_name)?;
        match subject {
            Subject::NamedNode(n) => {
                let value = base_iri
                    .and_then(|b| n.as_str().strip_prefix(b))
                    .map_or_else(|| n.as_str().to_string(), ToString::to_string);
                self.write_resource_attribute(w, "rdf:about", &value)?;
            }
            Subject::BlankNode(b) => {
                w.write_attribute("rdf:nodeID", b.as_str())?;
            }
        }
        w.finish_start_tag(predicates.is_empty())?;
        if !predicates.is_empty() {
            self.write_predicates(w, predicates, &consumed_type_objects, base_iri)?;
            w.end_element()?;
        }
        Ok(())
    }

    fn write_predicates(
        &mut self,
        w: &mut XmlWriter<'_, String>,
        predicates: &[SortedPredicate],
        consumed_type_objects: &[usize],
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        for predicate in predicates {
            let is_type = predicate.predicate.as_str() == rdf::TYPE.as_str();
            for (i, object) in predicate.objects.iter().enumerate() {
                if is_type && consumed_type_objects.contains(&i) {
                    continue;
                }
                self.write_predicate_object(w, &predicate.predicate, object, base_iri)?;
            }
        }
        Ok(())
    }

    fn predicate_qname(&mut self, predicate: &NamedNode) -> String {
        self.namespaces
            .resolve(predicate.as_str())
            .map_or_else(|| predicate.as_str().to_string(), |q| format!("{}:{}", q.prefix, q.local_name))
    }

    fn write_predicate_object(
        &mut self,
        w: &mut XmlWriter<'_, String>,
        predicate: &NamedNode,
        object: &Term,
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        let name = self.predicate_qname(predicate);
        match object {
            Term::NamedNode(n) => {
                w.start_element(&name)?;
                self.write_resource_attribute(w, "rdf:resource", n.as_str())?;
                w.finish_start_tag(true)?;
            }
            Term::Literal(l) => self.write_literal_property(w, &name, l)?,
            Term::BlankNode(b) => self.write_blank_node_property(w, &name, b, base_iri)?,
        }
        Ok(())
    }

    fn write_literal_property(&mut self, w: &mut XmlWriter<'_, String>, name: &str, literal: &Literal) -> SerializeResult<()> {
        w.start_element(name)?;
        if let Some(lang) = literal.language() {
            w.write_attribute("xml:lang", &super::normalize_language_tag(lang))?;
        } else if literal.datatype() == xsd::STRING {
            if let Some(lang) = &self.options.override_string_language {
                w.write_attribute("xml:lang", lang)?;
            }
        }
        let explicit_string = literal.datatype() == xsd::STRING && self.options.string_data_type == StringDataType::Explicit;
        if (literal.datatype() != xsd::STRING && literal.datatype() != rdf::LANG_STRING) || explicit_string {
            let datatype = literal.datatype().into_owned();
            self.write_resource_attribute(w, "rdf:datatype", datatype.as_str())?;
        }
        w.finish_start_tag(false)?;
        // Downstream XML parsers discard leading/trailing whitespace in element text;
        // trimming here keeps a round trip through such a parser stable, at the cost
        // of losing literals whose significant content has surrounding whitespace.
        w.text(literal.value().trim())?;
        w.end_element()?;
        Ok(())
    }

    fn write_blank_node_property(
        &mut self,
        w: &mut XmlWriter<'_, String>,
        name: &str,
        node: &BlankNode,
        base_iri: Option<&str>,
    ) -> SerializeResult<()> {
        w.start_element(name)?;
        let collection = self
            .collections
            .get(node)
            .filter(|c| c.members.iter().all(|m| !matches!(m, Term::Literal(_))));
        if let Some(collection) = collection {
            let members = collection.members.clone();
            w.write_attribute("rdf:parseType", "Collection")?;
            w.finish_start_tag(members.is_empty())?;
            for member in &members {
                self.write_collection_member(w, member, base_iri)?;
            }
            if !members.is_empty() {
                w.end_element()?;
            }
        } else if self.inline_plan.is_inlineable(node) {
            let predicates = self.blank_node_predicates.get(node).cloned().unwrap_or_default();
            w.finish_start_tag(predicates.is_empty())?;
            if !predicates.is_empty() {
                let (inner_name, consumed) = self.element_name_for_types(&predicates);
                w.start_element(&inner_name)?;
                w.finish_start_tag(false)?;
                self.write_predicates(w, &predicates, &consumed, base_iri)?;
                w.end_element()?;
                w.end_element()?;
            }
        } else {
            w.write_attribute("rdf:nodeID", node.as_str())?;
            w.finish_start_tag(true)?;
        }
        Ok(())
    }

    fn write_collection_member(&mut self, w: &mut XmlWriter<'_, String>, member: &Term, base_iri: Option<&str>) -> SerializeResult<()> {
        match member {
            Term::NamedNode(n) => {
                w.start_element("rdf:Description")?;
                let value = base_iri
                    .and_then(|b| n.as_str().strip_prefix(b))
                    .map_or_else(|| n.as_str().to_string(), ToString::to_string);
                self.write_resource_attribute(w, "rdf:about", &value)?;
                w.finish_start_tag(true)?;
            }
            Term::BlankNode(b) => {
                let predicates = self.blank_node_predicates.get(b).cloned().unwrap_or_default();
                let (inner_name, consumed) = self.element_name_for_types(&predicates);
                w.start_element(&inner_name)?;
                w.write_attribute("rdf:nodeID", b.as_str())?;
                w.finish_start_tag(predicates.is_empty())?;
                if !predicates.is_empty() {
                    self.write_predicates(w, &predicates, &consumed, base_iri)?;
                    w.end_element()?;
                }
            }
            Term::Literal(_) => {
                // Collections with literal members have no Resource form in RDF/XML;
                // detect_collections doesn't restrict membership, so this is reachable
                // in principle, but such a collection is never offered for inlining by
                // the base writer's RDF/XML path (see module docs).
            }
        }
        Ok(())
    }
}
