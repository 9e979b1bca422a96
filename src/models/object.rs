//! CRM records and the associations between them.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::collections::HashMap;
use std::fmt;

/// The CRM object kinds this client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Contact,
    Company,
    Deal,
}

impl ObjectType {
    /// Path segment used by the `/crm/v3/objects/{type}` endpoints.
    pub fn plural(self) -> &'static str {
        match self {
            ObjectType::Contact => "contacts",
            ObjectType::Company => "companies",
            ObjectType::Deal => "deals",
        }
    }

    /// Name used when requesting associations of this kind.
    pub fn singular(self) -> &'static str {
        match self {
            ObjectType::Contact => "contact",
            ObjectType::Company => "company",
            ObjectType::Deal => "deal",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.plural())
    }
}

/// Flat property map of a CRM record.
///
/// HubSpot sends every property as a string but uses `null` for unset values;
/// those are dropped on decode so a present key always has a value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PropertyMap(BTreeMap<String, String>);

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Set a property, returning the previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.0.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }

    /// Parse a `"true"`/`"false"` property.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(|v| v.parse().ok())
    }
}

impl<'de> Deserialize<'de> for PropertyMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: BTreeMap<String, serde_json::Value> = BTreeMap::deserialize(deserializer)?;
        let properties = raw
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some((name, s)),
                other => Some((name, other.to_string())),
            })
            .collect();
        Ok(PropertyMap(properties))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PropertyMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a PropertyMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// One side of an association as returned by HubSpot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationRef {
    /// Id of the associated record
    pub id: String,

    /// Relation-type tag (e.g. `contact_to_company`)
    #[serde(rename = "type", default)]
    pub association_type: String,
}

/// A list of associations of one kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AssociationList {
    #[serde(default)]
    pub results: Vec<AssociationRef>,
}

/// A CRM record (contact, company or deal).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub id: String,

    #[serde(default)]
    pub properties: PropertyMap,

    /// Associations keyed by the plural name of the related kind
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub associations: HashMap<String, AssociationList>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,

    #[serde(default)]
    pub archived: bool,
}

impl CrmObject {
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name)
    }

    /// Associated records of the given kind; empty when none were returned.
    pub fn associated(&self, kind: ObjectType) -> &[AssociationRef] {
        self.associations
            .get(kind.plural())
            .map(|list| list.results.as_slice())
            .unwrap_or(&[])
    }
}

/// Outcome of looking up an optional, at-most-one association.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Association {
    /// Exactly one related record exists
    Found(String),

    /// The relation is unset
    NotAssociated,
}

impl Association {
    pub fn id(&self) -> Option<&str> {
        match self {
            Association::Found(id) => Some(id),
            Association::NotAssociated => None,
        }
    }

    pub fn into_id(self) -> Option<String> {
        match self {
            Association::Found(id) => Some(id),
            Association::NotAssociated => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Association::Found(_))
    }
}
