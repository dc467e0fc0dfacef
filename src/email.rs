use crate::client::NymeriaClient;
use crate::errors::{NymeriaError, Result};
use crate::models::{BulkResponse, Envelope, Verification};
use crate::query::{with_query, Query};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Trims and lower-cases an email address.
pub fn normalize(email: &str) -> String {
    email.trim().to_lowercase()
}

/// One entry of a bulk verification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkVerifyParams {
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl BulkVerifyParams {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            metadata: None,
        }
    }
}

/// Wire shape of a bulk verification entry: `{"params": {"email"}, "metadata"}`.
#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    params: VerifyRequestParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<&'a Value>,
}

#[derive(Debug, Serialize)]
struct VerifyRequestParams {
    email: String,
}

#[derive(Debug, Serialize)]
struct BulkVerifyRequest<'a> {
    requests: Vec<VerifyRequest<'a>>,
}

/// Email endpoints, obtained from [`NymeriaClient::email`].
pub struct EmailApi<'a> {
    client: &'a NymeriaClient,
}

impl<'a> EmailApi<'a> {
    pub(crate) fn new(client: &'a NymeriaClient) -> Self {
        Self { client }
    }

    /// Checks the deliverability of an email address.
    pub async fn verify(&self, email: &str) -> Result<Verification> {
        let email = normalize(email);
        if email.is_empty() {
            return Err(NymeriaError::InvalidParameters);
        }

        let mut query = Query::new();
        query.push("email", &email);
        let path = with_query("/email/verify", &query.finish());

        let response: Envelope<Verification> = self.client.get(&path).await?;
        Ok(response.data)
    }

    /// Verifies several addresses in one call. Every address is normalized
    /// first; an empty list or a blank address is rejected.
    pub async fn bulk_verify(&self, params: &[BulkVerifyParams]) -> Result<Vec<Verification>> {
        let requests: Vec<VerifyRequest<'_>> = params
            .iter()
            .map(|p| VerifyRequest {
                params: VerifyRequestParams {
                    email: normalize(&p.email),
                },
                metadata: p.metadata.as_ref(),
            })
            .collect();

        if requests.is_empty() || requests.iter().any(|r| r.params.email.is_empty()) {
            return Err(NymeriaError::InvalidParameters);
        }

        let body = BulkVerifyRequest { requests };
        let response: BulkResponse<Verification> =
            self.client.post("/email/verify/bulk", &body).await?;
        Ok(response.into_successful())
    }
}
