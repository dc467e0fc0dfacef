use crate::client::NymeriaClient;
use crate::errors::{NymeriaError, Result};
use crate::models::{
    BulkRequest, BulkResponse, Envelope, IdentifyMatch, Person, PersonPreview,
};
use crate::query::{clamp_limit, with_query, Query};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============ Parameters ============

/// Filters for a person search. At least one of first name, last name,
/// title, company, country or industry is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub company: String,
    pub country: String,
    pub location: String,
    pub industry: String,
    /// Page size; out-of-range values fall back to 10.
    pub limit: i64,
    /// Index of the first record to return.
    pub offset: i64,
}

impl SearchParams {
    pub fn is_invalid(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.title.is_empty()
            && self.company.is_empty()
            && self.country.is_empty()
            && self.industry.is_empty()
    }

    pub fn to_query(&self) -> String {
        let mut query = Query::new();
        query
            .push("limit", &clamp_limit(self.limit).to_string())
            .push("offset", &self.offset.to_string())
            .push_opt("first_name", &self.first_name)
            .push_opt("last_name", &self.last_name)
            .push_opt("title", &self.title)
            .push_opt("company", &self.company)
            .push_opt("location", &self.location)
            .push_opt("country", &self.country)
            .push_opt("industry", &self.industry);
        query.finish()
    }
}

/// Identifiers for an enrichment or preview: a profile URL, an email or a
/// LinkedIn id (at least one).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichParams {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub profile: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub email: String,
    #[serde(rename = "lid", alias = "linkedin_id", skip_serializing_if = "String::is_empty")]
    pub linkedin_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub filter: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub require: String,
}

/// Previews take the same identifiers as enrichments.
pub type PreviewParams = EnrichParams;

impl EnrichParams {
    pub fn is_invalid(&self) -> bool {
        self.profile.is_empty() && self.email.is_empty() && self.linkedin_id.is_empty()
    }

    pub fn to_query(&self) -> String {
        let mut query = Query::new();
        query
            .push_opt("profile", &self.profile)
            .push_opt("email", &self.email)
            .push_opt("lid", &self.linkedin_id)
            .push_opt("filter", &self.filter)
            .push_opt("require", &self.require);
        query.finish()
    }
}

/// One entry of a bulk enrichment. `metadata` is echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkEnrichParams {
    pub params: EnrichParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl From<EnrichParams> for BulkEnrichParams {
    fn from(params: EnrichParams) -> Self {
        Self {
            params,
            metadata: None,
        }
    }
}

/// Attributes for a reverse lookup. At least one of first name, last name,
/// full name, location or country is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifyParams {
    pub first_name: String,
    pub last_name: String,
    /// Full name.
    pub name: String,
    pub location: String,
    pub country: String,
    pub filter: String,
    pub require: String,
}

impl IdentifyParams {
    pub fn is_invalid(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.name.is_empty()
            && self.location.is_empty()
            && self.country.is_empty()
    }

    /// Every key is sent, empty or not.
    pub fn to_query(&self) -> String {
        let mut query = Query::new();
        query
            .push("first_name", &self.first_name)
            .push("last_name", &self.last_name)
            .push("name", &self.name)
            .push("location", &self.location)
            .push("country", &self.country)
            .push("filter", &self.filter)
            .push("require", &self.require);
        query.finish()
    }
}

/// One entry of a bulk retrieval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkRetrieveParams {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl BulkRetrieveParams {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: None,
        }
    }
}

// ============ Endpoints ============

/// Person endpoints, obtained from [`NymeriaClient::person`].
pub struct PersonApi<'a> {
    client: &'a NymeriaClient,
}

impl<'a> PersonApi<'a> {
    pub(crate) fn new(client: &'a NymeriaClient) -> Self {
        Self { client }
    }

    /// Searches for people matching the filters.
    pub async fn search(&self, params: &SearchParams) -> Result<Vec<Person>> {
        if params.is_invalid() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = with_query("/person/search", &params.to_query());
        let response: Envelope<Vec<Person>> = self.client.get(&path).await?;

        tracing::debug!(
            "Person search returned {} records (total: {:?})",
            response.data.len(),
            response.total
        );
        Ok(response.data)
    }

    /// Enriches a single person from a profile URL, email or LinkedIn id.
    pub async fn enrich(&self, params: &EnrichParams) -> Result<Person> {
        if params.is_invalid() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = with_query("/person/enrich", &params.to_query());
        let response: Envelope<Person> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Enriches several people in one call. Only successful entries are
    /// returned.
    pub async fn bulk_enrich(&self, params: &[BulkEnrichParams]) -> Result<Vec<Person>> {
        if params.is_empty() || params.iter().any(|p| p.params.is_invalid()) {
            return Err(NymeriaError::InvalidParameters);
        }

        let body = BulkRequest { requests: params };
        let response: BulkResponse<Person> =
            self.client.post("/person/enrich/bulk", &body).await?;
        Ok(response.into_successful())
    }

    /// Reports which fields an enrichment would return, without their values.
    pub async fn preview(&self, params: &PreviewParams) -> Result<PersonPreview> {
        if params.is_invalid() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = with_query("/person/enrich/preview", &params.to_query());
        let response: Envelope<PersonPreview> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Finds candidate profiles from descriptive attributes.
    pub async fn identify(&self, params: &IdentifyParams) -> Result<Vec<Person>> {
        Ok(self
            .identify_matches(params)
            .await?
            .into_iter()
            .map(|m| m.data)
            .collect())
    }

    /// Like [`PersonApi::identify`], keeping the attributes each candidate
    /// matched on.
    pub async fn identify_matches(&self, params: &IdentifyParams) -> Result<Vec<IdentifyMatch>> {
        if params.is_invalid() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = with_query("/person/identify", &params.to_query());
        self.client.get(&path).await
    }

    /// Fetches a person by Nymeria id.
    pub async fn retrieve(&self, id: &str) -> Result<Person> {
        let id = id.trim();
        if id.is_empty() {
            return Err(NymeriaError::InvalidParameters);
        }

        let path = format!("/person/retrieve/{}", urlencoding::encode(id));
        let response: Envelope<Person> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Fetches several people by id. Only entries with item status 200 are
    /// returned; failed and status-less entries are dropped.
    pub async fn bulk_retrieve(&self, params: &[BulkRetrieveParams]) -> Result<Vec<Person>> {
        if params.is_empty() || params.iter().any(|p| p.id.trim().is_empty()) {
            return Err(NymeriaError::InvalidParameters);
        }

        let body = BulkRequest { requests: params };
        let response: BulkResponse<Person> =
            self.client.post("/person/retrieve/bulk", &body).await?;
        Ok(response.into_resolved())
    }
}
