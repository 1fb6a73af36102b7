//! Resolve raw vocabulary records into [`ResolvedType`]s.
//!
//! Every property is classified once; types then reference the shared
//! [`ResolvedProperty`] records. Dangling property or ancestor ids are
//! reported as malformed input.

use std::collections::BTreeMap;

use super::vocabulary_loader::LoadError;
use crate::model::vocabulary::{
    AncestorRef, ResolvedProperty, ResolvedType, ScalarType, Vocabulary,
};

/// Classified properties and type URLs of a vocabulary.
pub struct SchemaTerms<'a> {
    vocabulary: &'a Vocabulary,
    properties: BTreeMap<&'a str, ResolvedProperty>,
    type_urls: BTreeMap<&'a str, &'a str>,
}

impl<'a> SchemaTerms<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        let properties = vocabulary
            .properties
            .iter()
            .map(|(key, prop)| {
                let resolved = ResolvedProperty {
                    id: prop.id.clone(),
                    scalar: ScalarType::from_ranges(&prop.ranges),
                    doc: prop.comment_plain.clone(),
                };
                (key.as_str(), resolved)
            })
            .collect();

        let type_urls = vocabulary
            .types
            .iter()
            .map(|(key, ty)| (key.as_str(), ty.url.as_str()))
            .collect();

        Self {
            vocabulary,
            properties,
            type_urls,
        }
    }

    pub fn property(&self, id: &str) -> Option<&ResolvedProperty> {
        self.properties.get(id)
    }

    pub fn type_url(&self, id: &str) -> Option<&'a str> {
        self.type_urls.get(id).copied()
    }

    /// Resolve every type, in id order.
    pub fn resolve_all(&self) -> Result<Vec<ResolvedType>, LoadError> {
        self.vocabulary
            .types
            .keys()
            .map(|id| self.resolve(id))
            .collect()
    }

    /// Resolve one type by id.
    pub fn resolve(&self, id: &str) -> Result<ResolvedType, LoadError> {
        let ty = self
            .vocabulary
            .types
            .get(id)
            .ok_or_else(|| LoadError::UnknownType(id.to_string()))?;

        let ancestors = ty
            .ancestors
            .iter()
            .map(|ancestor| -> Result<AncestorRef, LoadError> {
                let url = self
                    .type_url(ancestor)
                    .ok_or_else(|| LoadError::UnknownAncestor {
                        type_id: ty.id.clone(),
                        ancestor: ancestor.clone(),
                    })?;
                Ok(AncestorRef {
                    id: ancestor.clone(),
                    url: url.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let properties = ty
            .specific_properties
            .iter()
            .map(|prop| {
                self.property(prop)
                    .cloned()
                    .ok_or_else(|| LoadError::UnknownProperty {
                        type_id: ty.id.clone(),
                        property: prop.clone(),
                    })
            })
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(ResolvedType {
            id: ty.id.clone(),
            url: ty.url.clone(),
            ancestors,
            properties,
            comment: ty.comment_plain.clone(),
        })
    }
}
