//! The caregiver-resource record and its validation rules.
//!
//! `CareResource` is the one domain entity: a flat set of named fields the
//! LLM fills from page content. Records are validated immediately after
//! extraction; a record missing any required field is discarded, never
//! kept partially.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Broad category a resource type falls into.
///
/// Fixed set; expanded resource-type strings ("Home Care Assistance",
/// "Legal Aid & Advice", ...) are classified onto one of these via
/// [`ResourceCategory::classify`]. Anything unrecognized is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// Home care, skilled nursing, hospice, palliative, geriatric care management
    DirectCare,
    /// Support groups, dementia education, forums, counseling, caregiver wellness
    SupportEducation,
    /// Financial assistance, legal aid, benefits counseling, estate planning
    FinancialLegal,
    /// Respite, adult day care, transportation, meals, assistive tech, home modification
    PracticalAssistance,
    /// Activities, social clubs, recreational therapy
    SocialRecreational,
    /// Emergency resources, alert systems, home safety
    EmergencySafety,
    /// Directories, helplines, information portals
    InformationReferral,
    /// Fallback
    Other,
}

/// The fixed resource-type vocabulary the extraction instruction names,
/// each with its category. Lowercased for case-insensitive lookup.
const CANONICAL_TYPES: [(&str, ResourceCategory); 30] = [
    ("home care assistance", ResourceCategory::DirectCare),
    ("skilled nursing care", ResourceCategory::DirectCare),
    ("hospice care", ResourceCategory::DirectCare),
    ("palliative care", ResourceCategory::DirectCare),
    ("geriatric care management", ResourceCategory::DirectCare),
    ("caregiver support groups", ResourceCategory::SupportEducation),
    ("dementia education programs", ResourceCategory::SupportEducation),
    ("online forums & communities", ResourceCategory::SupportEducation),
    ("counseling & therapy (for caregivers)", ResourceCategory::SupportEducation),
    ("wellness programs (for caregivers)", ResourceCategory::SupportEducation),
    ("financial assistance programs", ResourceCategory::FinancialLegal),
    ("legal aid & advice", ResourceCategory::FinancialLegal),
    ("benefits counseling", ResourceCategory::FinancialLegal),
    ("estate planning resources", ResourceCategory::FinancialLegal),
    ("respite care", ResourceCategory::PracticalAssistance),
    ("adult day care", ResourceCategory::PracticalAssistance),
    ("transportation services", ResourceCategory::PracticalAssistance),
    ("meal delivery services", ResourceCategory::PracticalAssistance),
    ("assistive technology resources", ResourceCategory::PracticalAssistance),
    ("home modification resources", ResourceCategory::PracticalAssistance),
    (
        "activities for people with dementia and caregivers",
        ResourceCategory::SocialRecreational,
    ),
    ("social clubs & programs for seniors", ResourceCategory::SocialRecreational),
    ("recreational therapy", ResourceCategory::SocialRecreational),
    ("dementia-specific emergency resources", ResourceCategory::EmergencySafety),
    ("emergency alert systems", ResourceCategory::EmergencySafety),
    ("safety assessment & home safety resources", ResourceCategory::EmergencySafety),
    ("resource directories & databases", ResourceCategory::InformationReferral),
    ("helplines & hotlines", ResourceCategory::InformationReferral),
    ("information websites & portals", ResourceCategory::InformationReferral),
    ("other", ResourceCategory::Other),
];

impl ResourceCategory {
    /// Classify an expanded resource-type string onto a category.
    ///
    /// Canonical type strings from the vocabulary are matched exactly
    /// (case-insensitive); anything else falls back to keyword matching.
    /// Keyword order matters: the narrower financial and recreational
    /// needles run before the broad counseling/therapy ones, so
    /// "benefits counseling services" does not misgroup.
    pub fn classify(resource_type: &str) -> Self {
        let t = resource_type.trim().to_lowercase();

        if let Some((_, category)) = CANONICAL_TYPES.iter().find(|(name, _)| *name == t) {
            return *category;
        }

        let matches_any = |needles: &[&str]| needles.iter().any(|n| t.contains(n));

        if matches_any(&["home care", "nursing", "hospice", "palliative", "geriatric"]) {
            Self::DirectCare
        } else if matches_any(&["financial", "legal", "benefit", "estate"]) {
            Self::FinancialLegal
        } else if matches_any(&[
            "respite",
            "adult day",
            "transport",
            "meal",
            "assistive",
            "home modification",
        ]) {
            Self::PracticalAssistance
        } else if matches_any(&["activit", "social club", "recreational", "senior"]) {
            Self::SocialRecreational
        } else if matches_any(&["emergency", "alert", "safety"]) {
            Self::EmergencySafety
        } else if matches_any(&["support group", "education", "forum", "counsel", "therapy", "wellness"]) {
            Self::SupportEducation
        } else if matches_any(&["director", "helpline", "hotline", "portal", "database", "website"]) {
            Self::InformationReferral
        } else {
            Self::Other
        }
    }

    /// Human-readable category label (used in CSV output).
    pub fn label(&self) -> &'static str {
        match self {
            Self::DirectCare => "Direct Care",
            Self::SupportEducation => "Support & Education",
            Self::FinancialLegal => "Financial & Legal",
            Self::PracticalAssistance => "Practical Assistance",
            Self::SocialRecreational => "Social & Recreational",
            Self::EmergencySafety => "Emergency & Safety",
            Self::InformationReferral => "Information & Referral",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One structured entry describing a caregiver resource.
///
/// Every field the LLM fills is optional: completeness is enforced
/// afterwards against the configured required-field list, not by the
/// deserializer. `source_url` and `category` are stamped by the pipeline,
/// not trusted from the LLM.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CareResource {
    /// Official name of the resource or service
    pub name: Option<String>,

    /// Organization providing the resource
    pub provider: Option<String>,

    /// Expanded resource type (e.g. "Home Care Assistance", "Legal Aid & Advice")
    pub resource_type: Option<String>,

    /// Broad category derived from `resource_type`
    pub category: Option<ResourceCategory>,

    /// City where the resource is based, if applicable
    pub location_city: Option<String>,

    /// State where the resource is based, if applicable
    pub location_state: Option<String>,

    /// Country where the resource is based, if applicable
    pub location_country: Option<String>,

    /// Contact phone number
    pub contact_phone: Option<String>,

    /// Contact email address
    pub contact_email: Option<String>,

    /// Primary website for the resource
    pub website: Option<String>,

    /// Brief summary of the resource or service
    pub description: Option<String>,

    /// Schedule, dates, times, or frequency (e.g. "Meets Tuesdays 2-4 PM")
    pub schedule: Option<String>,

    /// Target age group (e.g. "18+", "65 and older")
    pub age_range: Option<String>,

    /// Cost info (e.g. "Free", "Sliding scale", "Insurance accepted")
    pub cost: Option<String>,

    /// Requirements to access this resource
    pub eligibility: Option<String>,

    /// Languages offered, comma-separated (e.g. "English, Spanish")
    pub languages: Option<String>,

    /// Delivery format (e.g. "In-person", "Virtual", "Hybrid")
    pub resource_format: Option<String>,

    /// Exact URL this resource was extracted from
    pub source_url: Option<String>,
}

impl CareResource {
    /// CSV field order. One column per record field, schema order.
    pub const FIELD_NAMES: [&'static str; 18] = [
        "name",
        "provider",
        "resource_type",
        "category",
        "location_city",
        "location_state",
        "location_country",
        "contact_phone",
        "contact_email",
        "website",
        "description",
        "schedule",
        "age_range",
        "cost",
        "eligibility",
        "languages",
        "resource_format",
        "source_url",
    ];

    /// Create an empty record with just a name (convenient in tests).
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Set the resource type.
    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the source URL.
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Look up a field's value by name, as it will appear in output.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => self.name.clone(),
            "provider" => self.provider.clone(),
            "resource_type" => self.resource_type.clone(),
            "category" => self.category.map(|c| c.label().to_string()),
            "location_city" => self.location_city.clone(),
            "location_state" => self.location_state.clone(),
            "location_country" => self.location_country.clone(),
            "contact_phone" => self.contact_phone.clone(),
            "contact_email" => self.contact_email.clone(),
            "website" => self.website.clone(),
            "description" => self.description.clone(),
            "schedule" => self.schedule.clone(),
            "age_range" => self.age_range.clone(),
            "cost" => self.cost.clone(),
            "eligibility" => self.eligibility.clone(),
            "languages" => self.languages.clone(),
            "resource_format" => self.resource_format.clone(),
            "source_url" => self.source_url.clone(),
            _ => None,
        }
    }

    /// Whether `name` is a real field of this record.
    pub fn is_known_field(name: &str) -> bool {
        Self::FIELD_NAMES.contains(&name)
    }

    /// Project the record onto a CSV row in [`Self::FIELD_NAMES`] order.
    pub fn to_row(&self) -> Vec<String> {
        Self::FIELD_NAMES
            .iter()
            .map(|f| self.field(f).unwrap_or_default())
            .collect()
    }

    /// Trim whitespace and collapse empty strings to `None`; derive the
    /// category from `resource_type` when the LLM did not supply one.
    pub fn normalize(mut self) -> Self {
        fn clean(field: &mut Option<String>) {
            if let Some(v) = field {
                let trimmed = v.trim();
                if trimmed.is_empty() {
                    *field = None;
                } else if trimmed.len() != v.len() {
                    *field = Some(trimmed.to_string());
                }
            }
        }

        clean(&mut self.name);
        clean(&mut self.provider);
        clean(&mut self.resource_type);
        clean(&mut self.location_city);
        clean(&mut self.location_state);
        clean(&mut self.location_country);
        clean(&mut self.contact_phone);
        clean(&mut self.contact_email);
        clean(&mut self.website);
        clean(&mut self.description);
        clean(&mut self.schedule);
        clean(&mut self.age_range);
        clean(&mut self.cost);
        clean(&mut self.eligibility);
        clean(&mut self.languages);
        clean(&mut self.resource_format);
        clean(&mut self.source_url);

        if self.category.is_none() {
            if let Some(ref t) = self.resource_type {
                self.category = Some(ResourceCategory::classify(t));
            }
        }

        self
    }

    /// Completeness check: every required field present and non-empty.
    pub fn is_complete(&self, required_fields: &[String]) -> bool {
        required_fields.iter().all(|f| {
            self.field(f)
                .map(|v| !v.trim().is_empty())
                .unwrap_or(false)
        })
    }
}

/// Envelope the LLM fills: a list of records extracted from one page.
///
/// The JSON schema of this type is what the extraction strategy hands to
/// the LLM's structured-output mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct CareResourceBatch {
    /// Records found on the page (empty when the page has none)
    pub resources: Vec<CareResource>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> Vec<String> {
        ["name", "resource_type", "description", "source_url"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_complete_record_passes() {
        let record = CareResource::named("Memory Cafe")
            .with_resource_type("Caregiver Support Groups")
            .with_description("Monthly gathering for caregivers")
            .with_source_url("https://example.org/resources");

        assert!(record.is_complete(&required()));
    }

    #[test]
    fn test_missing_required_field_fails() {
        let record = CareResource::named("Memory Cafe")
            .with_resource_type("Caregiver Support Groups")
            .with_source_url("https://example.org/resources");

        // No description
        assert!(!record.is_complete(&required()));
    }

    #[test]
    fn test_whitespace_only_field_is_incomplete() {
        let record = CareResource::named("Memory Cafe")
            .with_resource_type("Caregiver Support Groups")
            .with_description("   ")
            .with_source_url("https://example.org/resources");

        assert!(!record.is_complete(&required()));
    }

    #[test]
    fn test_normalize_trims_and_drops_empty() {
        let record = CareResource {
            name: Some("  Memory Cafe  ".to_string()),
            contact_phone: Some("".to_string()),
            description: Some(" \t ".to_string()),
            ..Default::default()
        }
        .normalize();

        assert_eq!(record.name.as_deref(), Some("Memory Cafe"));
        assert_eq!(record.contact_phone, None);
        assert_eq!(record.description, None);
    }

    #[test]
    fn test_normalize_derives_category() {
        let record = CareResource::named("Helping Hands")
            .with_resource_type("Home Care Assistance")
            .normalize();

        assert_eq!(record.category, Some(ResourceCategory::DirectCare));
    }

    #[test]
    fn test_classify_whole_vocabulary() {
        // Every type in the vocabulary, with its expected grouping.
        let expected = [
            ("Home Care Assistance", ResourceCategory::DirectCare),
            ("Skilled Nursing Care", ResourceCategory::DirectCare),
            ("Hospice Care", ResourceCategory::DirectCare),
            ("Palliative Care", ResourceCategory::DirectCare),
            ("Geriatric Care Management", ResourceCategory::DirectCare),
            ("Caregiver Support Groups", ResourceCategory::SupportEducation),
            ("Dementia Education Programs", ResourceCategory::SupportEducation),
            ("Online Forums & Communities", ResourceCategory::SupportEducation),
            (
                "Counseling & Therapy (for caregivers)",
                ResourceCategory::SupportEducation,
            ),
            (
                "Wellness Programs (for caregivers)",
                ResourceCategory::SupportEducation,
            ),
            ("Financial Assistance Programs", ResourceCategory::FinancialLegal),
            ("Legal Aid & Advice", ResourceCategory::FinancialLegal),
            ("Benefits Counseling", ResourceCategory::FinancialLegal),
            ("Estate Planning Resources", ResourceCategory::FinancialLegal),
            ("Respite Care", ResourceCategory::PracticalAssistance),
            ("Adult Day Care", ResourceCategory::PracticalAssistance),
            ("Transportation Services", ResourceCategory::PracticalAssistance),
            ("Meal Delivery Services", ResourceCategory::PracticalAssistance),
            (
                "Assistive Technology Resources",
                ResourceCategory::PracticalAssistance,
            ),
            (
                "Home Modification Resources",
                ResourceCategory::PracticalAssistance,
            ),
            (
                "Activities for People with Dementia and Caregivers",
                ResourceCategory::SocialRecreational,
            ),
            (
                "Social Clubs & Programs for Seniors",
                ResourceCategory::SocialRecreational,
            ),
            ("Recreational Therapy", ResourceCategory::SocialRecreational),
            (
                "Dementia-Specific Emergency Resources",
                ResourceCategory::EmergencySafety,
            ),
            ("Emergency Alert Systems", ResourceCategory::EmergencySafety),
            (
                "Safety Assessment & Home Safety Resources",
                ResourceCategory::EmergencySafety,
            ),
            (
                "Resource Directories & Databases",
                ResourceCategory::InformationReferral,
            ),
            ("Helplines & Hotlines", ResourceCategory::InformationReferral),
            (
                "Information Websites & Portals",
                ResourceCategory::InformationReferral,
            ),
            ("Other", ResourceCategory::Other),
        ];

        assert_eq!(expected.len(), CANONICAL_TYPES.len());
        for (name, category) in expected {
            assert_eq!(
                ResourceCategory::classify(name),
                category,
                "misgrouped: {name}"
            );
        }
    }

    #[test]
    fn test_classify_keyword_fallback() {
        // Non-canonical phrasings still land in the right group; the
        // financial and recreational checks must beat the broad
        // counseling/therapy needles.
        assert_eq!(
            ResourceCategory::classify("Benefits counseling services"),
            ResourceCategory::FinancialLegal
        );
        assert_eq!(
            ResourceCategory::classify("Weekly recreational therapy program"),
            ResourceCategory::SocialRecreational
        );
        assert_eq!(
            ResourceCategory::classify("Grief counseling"),
            ResourceCategory::SupportEducation
        );
        assert_eq!(
            ResourceCategory::classify("something unheard of"),
            ResourceCategory::Other
        );
    }

    #[test]
    fn test_row_matches_field_order() {
        let record = CareResource::named("Memory Cafe")
            .with_resource_type("Caregiver Support Groups")
            .normalize();

        let row = record.to_row();
        assert_eq!(row.len(), CareResource::FIELD_NAMES.len());
        assert_eq!(row[0], "Memory Cafe");
        assert_eq!(row[2], "Caregiver Support Groups");
        assert_eq!(row[3], "Support & Education");
    }

    #[test]
    fn test_unknown_field_lookup() {
        let record = CareResource::named("Memory Cafe");
        assert_eq!(record.field("no_such_field"), None);
        assert!(!CareResource::is_known_field("no_such_field"));
        assert!(CareResource::is_known_field("contact_email"));
    }

    #[test]
    fn test_batch_deserializes_with_missing_fields() {
        let json = r#"{"resources": [{"name": "A", "resource_type": "Respite Care"}]}"#;
        let batch: CareResourceBatch = serde_json::from_str(json).unwrap();
        assert_eq!(batch.resources.len(), 1);
        assert_eq!(batch.resources[0].name.as_deref(), Some("A"));
        assert_eq!(batch.resources[0].description, None);
    }
}
