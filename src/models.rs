use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decodes `null` as the type's default instead of failing.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============ Response Envelopes ============

/// Top-level `status` of a response: an integer code in the current API,
/// a string (`"success"`) in older generations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseStatus {
    Code(u16),
    Text(String),
}

/// Credit usage reported alongside a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub used: i64,
    #[serde(default)]
    pub limit: i64,
}

/// Standard `{status, data}` response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub developer_message: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// One entry of a bulk response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct BulkItem<T> {
    /// Per-item HTTP-like status; absent on some endpoints.
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: T,
}

impl<T> BulkItem<T> {
    /// Items without a status are treated as successful.
    pub fn is_success(&self) -> bool {
        self.status.map_or(true, |s| s == 200)
    }

    /// Only an explicit 200 counts.
    pub fn is_resolved(&self) -> bool {
        self.status == Some(200)
    }
}

/// Wrapped form of a bulk response. Unlike [`Envelope`], `data` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct BulkEnvelope<T> {
    #[serde(default)]
    pub status: Option<ResponseStatus>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<BulkItem<T>>,
    #[serde(default)]
    pub usage: Option<Usage>,
    #[serde(default)]
    pub developer_message: Option<String>,
}

/// Bulk responses come either wrapped in an envelope or as a bare array.
#[derive(Debug, Clone)]
pub enum BulkResponse<T> {
    Bare(Vec<BulkItem<T>>),
    Wrapped(BulkEnvelope<T>),
}

// Branches on the JSON shape so decode failures keep serde's message.
impl<'de, T> Deserialize<'de> for BulkResponse<T>
where
    T: DeserializeOwned + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if value.is_array() {
            serde_json::from_value(value)
                .map(BulkResponse::Bare)
                .map_err(de::Error::custom)
        } else {
            serde_json::from_value(value)
                .map(BulkResponse::Wrapped)
                .map_err(de::Error::custom)
        }
    }
}

impl<T> BulkResponse<T> {
    pub fn into_items(self) -> Vec<BulkItem<T>> {
        match self {
            BulkResponse::Bare(items) => items,
            BulkResponse::Wrapped(envelope) => envelope.data,
        }
    }

    /// Payloads of the items that succeeded, in response order.
    pub fn into_successful(self) -> Vec<T> {
        self.filter_items(BulkItem::is_success)
    }

    /// Payloads of the items carrying status 200; status-less items are
    /// dropped.
    pub fn into_resolved(self) -> Vec<T> {
        self.filter_items(BulkItem::is_resolved)
    }

    fn filter_items(self, keep: fn(&BulkItem<T>) -> bool) -> Vec<T> {
        self.into_items()
            .into_iter()
            .filter(|item| keep(item))
            .map(|item| item.data)
            .collect()
    }
}

/// Body of every bulk call: `{"requests": [...]}`.
#[derive(Debug, Serialize)]
pub(crate) struct BulkRequest<'a, T: Serialize> {
    pub requests: &'a [T],
}

/// One candidate returned by person identification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdentifyMatch {
    /// Which supplied attributes this candidate matched on.
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched_on: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Person,
}

// ============ Person ============

/// A person profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub birth_year: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub work_email: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub personal_emails: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<EmailAddress>,
    #[serde(default)]
    pub mobile_phone: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_numbers: Vec<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_last_updated: Option<String>,
    #[serde(default)]
    pub location_country: Option<String>,
    #[serde(default, rename = "inferred_years_of_experience")]
    pub inferred_experience: Option<i64>,
    #[serde(default)]
    pub inferred_salary: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub job_title_role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub job_title_levels: Vec<String>,
    #[serde(default)]
    pub job_start_date: Option<String>,
    #[serde(default)]
    pub job_company_name: Option<String>,
    #[serde(default, rename = "job_company_website")]
    pub job_company_url: Option<String>,
    #[serde(default)]
    pub job_company_founded: Option<String>,
    #[serde(default)]
    pub job_company_size: Option<String>,
    #[serde(default)]
    pub job_company_linkedin_url: Option<String>,
    #[serde(default)]
    pub job_last_updated: Option<String>,
    #[serde(default)]
    pub job_summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub interests: Vec<String>,
    #[serde(default)]
    pub linkedin_username: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub linkedin_id: Option<String>,
    #[serde(default)]
    pub linkedin_connections: Option<i64>,
    #[serde(default)]
    pub facebook_username: Option<String>,
    #[serde(default)]
    pub facebook_url: Option<String>,
    #[serde(default)]
    pub facebook_id: Option<String>,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub twitter_url: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profiles: Vec<SocialLink>,
    #[serde(default)]
    pub linkedin_summary: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub education: Vec<Education>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificates: Vec<Certificate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<Language>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub proficiency: i64,
}

/// An email address attached to a person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailAddress {
    /// One of personal, professional, educational, disposable.
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(default, rename = "address", deserialize_with = "null_as_default")]
    pub full: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(default, deserialize_with = "null_as_default")]
    pub network: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    #[serde(default, deserialize_with = "null_as_default")]
    pub majors: Vec<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school: Option<School>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub linkedin_id: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<JobTitle>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTitle {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub sub_role: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
}

/// Result of an enrichment preview: a few identifying values plus a flag per
/// field saying whether the full record has it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonPreview {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub job_title: Option<String>,
    pub location_name: Option<String>,
    pub job_company_name: Option<String>,

    pub gender: bool,
    pub age: bool,
    pub birth_year: bool,
    pub birth_date: bool,
    pub work_email: bool,
    pub personal_emails: bool,
    pub emails: bool,
    pub mobile_phone: bool,
    pub phone_numbers: bool,
    pub industry: bool,
    pub location_last_updated: bool,
    pub location_country: bool,
    #[serde(rename = "inferred_years_of_experience")]
    pub inferred_experience: bool,
    pub inferred_salary: bool,
    pub job_title_role: bool,
    pub job_title_levels: bool,
    pub job_start_date: bool,
    #[serde(rename = "job_company_website")]
    pub job_company_url: bool,
    pub job_company_founded: bool,
    pub job_company_size: bool,
    pub job_company_linkedin_url: bool,
    pub job_last_updated: bool,
    pub job_summary: bool,
    pub skills: bool,
    pub interests: bool,
    pub linkedin_username: bool,
    pub linkedin_url: bool,
    pub linkedin_id: bool,
    pub linkedin_connections: bool,
    pub facebook_username: bool,
    pub facebook_url: bool,
    pub facebook_id: bool,
    pub twitter_username: bool,
    pub twitter_url: bool,
    pub github_username: bool,
    pub github_url: bool,
    pub profiles: bool,
    pub linkedin_summary: bool,
    pub education: bool,
    pub experience: bool,
    pub certificates: bool,
    pub languages: bool,
}

// ============ Company ============

/// A company profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: Option<String>,
    pub employee_count_from: Option<i64>,
    pub employee_count_to: Option<i64>,
    pub size: Option<String>,
    pub name: Option<String>,
    pub industry: Option<String>,
    pub founded: Option<i64>,
    pub website_url: Option<String>,
    pub linkedin_id: Option<String>,
    pub linkedin_name: Option<String>,
    pub twitter_name: Option<String>,
    pub facebook_name: Option<String>,
    pub location_country: Option<String>,
    pub location_geo: Option<String>,
    pub location_continent: Option<String>,
    pub location_name: Option<String>,
    pub location_region: Option<String>,
    pub updated_at: Option<String>,
}

// ============ Email ============

/// Outcome of an email verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// e.g. "valid", "invalid", "catchall".
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub flags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggested_correction: String,
    /// Milliseconds spent verifying.
    #[serde(default, deserialize_with = "null_as_default")]
    pub execution_time: i64,
}
