//! Endpoints and schemas of the earlier API generation.
//!
//! These responses carry a string `status` and report failure in the body
//! (`"success"` or not) rather than through the HTTP status code, so every
//! call here decodes the body first and then checks the field. Any failure
//! collapses to [`NymeriaError::InvalidRequest`].

use crate::client::NymeriaClient;
use crate::errors::{NymeriaError, Result};
use crate::models::{null_as_default, Usage};
use crate::query::{with_query, Query};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value of `status` on a successful response.
pub const SUCCESS: &str = "success";

/// Enrichment filter that drops professional emails from the result.
pub const PROFESSIONAL_EMAIL_FILTER: &str = "professional-emails";

/// Implemented by every response of this API generation.
pub trait LegacyResponse {
    fn status(&self) -> &str;

    fn is_success(&self) -> bool {
        self.status() == SUCCESS
    }
}

fn ensure_success<T: LegacyResponse>(response: T) -> Result<T> {
    if response.is_success() {
        Ok(response)
    } else {
        tracing::debug!("Legacy API returned status {:?}", response.status());
        Err(NymeriaError::InvalidRequest)
    }
}

// ============ Schemas ============

/// Lookup parameters for an enrichment; echoed back as `meta`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichParams {
    pub url: String,
    pub email: String,
    pub identifier: String,
    pub filter: String,
    pub require: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bio {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub location: String,
    pub country: String,
    pub company: String,
    pub company_website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileEmail {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub domain: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhoneNumber {
    pub number: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialProfile {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub url: String,
}

/// Contact data unlocked by an enrichment or reveal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio: Bio,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emails: Vec<ProfileEmail>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone_numbers: Vec<PhoneNumber>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub social: Vec<SocialProfile>,
}

/// Result of an enrichment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: EnrichParams,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: Usage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Profile,
}

impl LegacyResponse for Enrichment {
    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct BulkEnrichmentItem {
    #[serde(default, deserialize_with = "null_as_default")]
    meta: EnrichParams,
    #[serde(default, deserialize_with = "null_as_default")]
    result: Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct BulkEnrichment {
    #[serde(default)]
    status: String,
    #[serde(default)]
    developer_message: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    usage: Usage,
    #[serde(default, deserialize_with = "null_as_default")]
    data: Vec<BulkEnrichmentItem>,
}

impl LegacyResponse for BulkEnrichment {
    fn status(&self) -> &str {
        &self.status
    }
}

impl BulkEnrichment {
    /// Spreads a bulk response into one `Enrichment` per entry, each carrying
    /// the shared status, message and usage.
    fn into_enrichments(self) -> Vec<Enrichment> {
        let BulkEnrichment {
            status,
            developer_message,
            usage,
            data,
        } = self;

        data.into_iter()
            .map(|item| Enrichment {
                status: status.clone(),
                developer_message: developer_message.clone(),
                meta: item.meta,
                usage,
                data: item.result,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationMeta {
    pub email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationData {
    /// "valid" or "invalid".
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: String,
    /// e.g. has_dns_mx, smtp_connectable, accepts_all.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// Result of a verification against `/verify`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: VerificationMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: Usage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: VerificationData,
}

impl LegacyResponse for Verification {
    fn status(&self) -> &str {
        &self.status
    }
}

/// People search query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleQuery {
    pub start: i64,
    pub q: String,
    pub location: String,
    pub country: String,
    pub title: String,
    pub company: String,
    pub skills: Vec<String>,
    pub has_email: bool,
    pub has_phone: bool,
}

impl PeopleQuery {
    pub fn to_query(&self) -> String {
        let mut query = Query::new();
        if self.start > 0 {
            query.push("start", &self.start.to_string());
        }
        query
            .push_opt("q", &self.q)
            .push_opt("location", &self.location)
            .push_opt("country", &self.country)
            .push_opt("title", &self.title)
            .push_opt("company", &self.company);
        if self.has_email {
            query.push("has_email", "true");
        }
        if self.has_phone {
            query.push("has_phone", "true");
        }
        if !self.skills.is_empty() {
            query.push("skills", &self.skills.join(","));
        }
        query.finish()
    }
}

/// A person found by the people search, with a list of which data points
/// could be revealed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeoplePreview {
    pub uuid: String,
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub country: String,
    pub available_data: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EchoedQuery {
    pub rows: i64,
    pub start: i64,
    pub q: String,
    pub location: String,
    pub company: String,
    pub title: String,
    pub has_email: bool,
    pub has_phone: bool,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultCount {
    pub total: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeopleMeta {
    pub query: EchoedQuery,
    pub results: ResultCount,
}

/// Raw people search response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeopleResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: PeopleMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<PeoplePreview>,
}

impl LegacyResponse for PeopleResponse {
    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealMeta {
    pub uuids: Vec<String>,
}

/// People whose contact data has been unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedPeople {
    #[serde(default)]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: RevealMeta,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usage: Usage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Profile>,
}

impl LegacyResponse for RevealedPeople {
    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Deserialize)]
struct StatusOnly {
    #[serde(default)]
    status: String,
}

impl LegacyResponse for StatusOnly {
    fn status(&self) -> &str {
        &self.status
    }
}

#[derive(Debug, Serialize)]
struct BulkPayload<'a> {
    people: &'a [EnrichParams],
}

#[derive(Debug, Serialize)]
struct RevealPayload<'a> {
    uuids: &'a [String],
}

// ============ Endpoints ============

/// Legacy endpoints, obtained from [`NymeriaClient::legacy`].
pub struct LegacyApi<'a> {
    client: &'a NymeriaClient,
}

impl<'a> LegacyApi<'a> {
    pub(crate) fn new(client: &'a NymeriaClient) -> Self {
        Self { client }
    }

    async fn get<T>(&self, path: &str) -> Result<T>
    where
        T: LegacyResponse + serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .call_unchecked::<(), T>(Method::GET, path, None)
            .await?;
        ensure_success(response)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: LegacyResponse + serde::de::DeserializeOwned,
    {
        let response = self
            .client
            .call_unchecked(Method::POST, path, Some(body))
            .await?;
        ensure_success(response)
    }

    /// Asks the server whether the configured key is valid. A rejected key
    /// yields [`NymeriaError::InvalidAuthKey`].
    pub async fn check_authentication(&self) -> Result<()> {
        match self.get::<StatusOnly>("/check-authentication").await {
            Ok(_) => Ok(()),
            Err(NymeriaError::InvalidRequest) => Err(NymeriaError::InvalidAuthKey),
            Err(e) => Err(e),
        }
    }

    /// Verifies a professional email address.
    pub async fn verify(&self, email: &str) -> Result<Verification> {
        let mut query = Query::new();
        query.push("email", email);
        self.get(&with_query("/verify", &query.finish())).await
    }

    /// Enriches a person from a profile URL.
    pub async fn enrich_url(&self, url: &str) -> Result<Enrichment> {
        let mut query = Query::new();
        query.push("url", url);
        self.get(&with_query("/enrich", &query.finish())).await
    }

    /// Enriches one or more people. A single set of parameters goes to
    /// `/enrich`; several go to `/bulk-enrich` in one request.
    pub async fn enrich(&self, params: &[EnrichParams]) -> Result<Vec<Enrichment>> {
        match params {
            [] => Err(NymeriaError::InvalidRequest),
            [single] => {
                let enrichment: Enrichment = self.post("/enrich", single).await?;
                Ok(vec![enrichment])
            }
            many => {
                let response: BulkEnrichment = self
                    .post("/bulk-enrich", &BulkPayload { people: many })
                    .await?;
                Ok(response.into_enrichments())
            }
        }
    }

    /// Searches for people and returns previews of the matches.
    pub async fn people(&self, query: &PeopleQuery) -> Result<PeopleResponse> {
        self.get(&with_query("/people", &query.to_query())).await
    }

    /// Unlocks contact data for the given people. Each reveal consumes one
    /// credit.
    pub async fn reveal_people(&self, uuids: &[String]) -> Result<RevealedPeople> {
        if uuids.is_empty() {
            return Err(NymeriaError::InvalidRequest);
        }
        self.post("/people", &RevealPayload { uuids }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_people_query() {
        let query = PeopleQuery {
            q: "rust developer".to_string(),
            country: "germany".to_string(),
            skills: vec!["rust".to_string(), "go".to_string()],
            has_email: true,
            ..Default::default()
        };
        assert_eq!(
            query.to_query(),
            "q=rust+developer&country=germany&has_email=true&skills=rust%2Cgo"
        );
        assert_eq!(PeopleQuery::default().to_query(), "");
    }

    #[test]
    fn test_status_check() {
        let ok: StatusOnly = serde_json::from_value(json!({"status": "success"})).unwrap();
        assert!(ensure_success(ok).is_ok());

        let failed: StatusOnly = serde_json::from_value(json!({"status": "failure"})).unwrap();
        assert!(matches!(
            ensure_success(failed),
            Err(NymeriaError::InvalidRequest)
        ));

        let missing: StatusOnly = serde_json::from_value(json!({})).unwrap();
        assert!(!missing.is_success());
    }

    #[test]
    fn test_bulk_enrichment_spreads_shared_fields() {
        let bulk: BulkEnrichment = serde_json::from_value(json!({
            "status": "success",
            "usage": {"used": 3, "limit": 100},
            "data": [
                {"meta": {"url": "github.com/a"}, "result": {"bio": {"first_name": "A"}}},
                {"meta": {"url": "github.com/b"}, "result": {"bio": {"first_name": "B"}}}
            ]
        }))
        .unwrap();

        let enrichments = bulk.into_enrichments();
        assert_eq!(enrichments.len(), 2);
        assert_eq!(enrichments[1].meta.url, "github.com/b");
        assert_eq!(enrichments[1].data.bio.first_name, "B");
        assert_eq!(enrichments[0].usage, Usage { used: 3, limit: 100 });
        assert!(enrichments.iter().all(|e| e.is_success()));
    }
}
