//! The fixed set of canonical properties shared by every repository.
//!
//! Every crosswalk entry defines exactly these 27 slots, in this order.
//! Adding or removing a property is a breaking change for every entry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Number of canonical properties.
pub const CANONICAL_PROPERTY_COUNT: usize = 27;

/// Normalized field name shared across all repositories.
///
/// # Example
///
/// ```
/// use xwalk_model::CanonicalProperty;
///
/// let prop: CanonicalProperty = "file_size".parse().unwrap();
/// assert_eq!(prop, CanonicalProperty::FileSize);
/// assert_eq!(prop.index(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalProperty {
    UniqueIdentifier,
    License,
    Description,
    Methods,
    PublicationDate,
    FileSize,
    Url,
    DatasetSize,
    Domain,
    TechnicalDetails,
    Keyword,
    GeographicKeyword,
    ScientificKeyword,
    FundingAgency,
    Views,
    Downloads,
    CitationCount,
    ResourceType,
    FileExtension,
    FileFormat,
    MediaType,
    RelatedResourceType,
    RelatedResourceIdentifier,
    OriginalDataUrl,
    PrimaryManuscript,
    RelatedResourceRelationType,
    Citation,
}

impl CanonicalProperty {
    /// All canonical properties in slot order.
    pub const ALL: [Self; CANONICAL_PROPERTY_COUNT] = [
        Self::UniqueIdentifier,
        Self::License,
        Self::Description,
        Self::Methods,
        Self::PublicationDate,
        Self::FileSize,
        Self::Url,
        Self::DatasetSize,
        Self::Domain,
        Self::TechnicalDetails,
        Self::Keyword,
        Self::GeographicKeyword,
        Self::ScientificKeyword,
        Self::FundingAgency,
        Self::Views,
        Self::Downloads,
        Self::CitationCount,
        Self::ResourceType,
        Self::FileExtension,
        Self::FileFormat,
        Self::MediaType,
        Self::RelatedResourceType,
        Self::RelatedResourceIdentifier,
        Self::OriginalDataUrl,
        Self::PrimaryManuscript,
        Self::RelatedResourceRelationType,
        Self::Citation,
    ];

    /// Slot position within a crosswalk entry.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UniqueIdentifier => "unique_identifier",
            Self::License => "license",
            Self::Description => "description",
            Self::Methods => "methods",
            Self::PublicationDate => "publication_date",
            Self::FileSize => "file_size",
            Self::Url => "url",
            Self::DatasetSize => "dataset_size",
            Self::Domain => "domain",
            Self::TechnicalDetails => "technical_details",
            Self::Keyword => "keyword",
            Self::GeographicKeyword => "geographic_keyword",
            Self::ScientificKeyword => "scientific_keyword",
            Self::FundingAgency => "funding_agency",
            Self::Views => "views",
            Self::Downloads => "downloads",
            Self::CitationCount => "citation_count",
            Self::ResourceType => "resource_type",
            Self::FileExtension => "file_extension",
            Self::FileFormat => "file_format",
            Self::MediaType => "media_type",
            Self::RelatedResourceType => "related_resource_type",
            Self::RelatedResourceIdentifier => "related_resource_identifier",
            Self::OriginalDataUrl => "original_data_url",
            Self::PrimaryManuscript => "primary_manuscript",
            Self::RelatedResourceRelationType => "related_resource_relation_type",
            Self::Citation => "citation",
        }
    }
}

impl fmt::Display for CanonicalProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CanonicalProperty {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|prop| prop.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownProperty {
                name: s.to_string(),
            })
    }
}
