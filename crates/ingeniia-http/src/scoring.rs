//! Credit-scoring service client.

use tracing::{debug, instrument};

use ingeniia_core::content::{CreditRiskInput, CreditRiskOutput};
use ingeniia_core::{BaseUrl, Result};

use crate::client::ApiClient;
use crate::endpoints::PREDICT;

/// Client for the credit-risk model. The model itself is a black box
/// behind `POST /v1/predict`.
#[derive(Debug, Clone)]
pub struct CreditScoringService {
    client: ApiClient,
    base: BaseUrl,
}

impl CreditScoringService {
    pub fn new(client: ApiClient, base: BaseUrl) -> Self {
        Self { client, base }
    }

    /// Score an applicant profile.
    ///
    /// # Errors
    ///
    /// Returns an invalid input error for out-of-range fields before any
    /// request is made, and for a probability outside `0..=1` in the
    /// response.
    #[instrument(skip(self, input), fields(scoring = %self.base))]
    pub async fn predict(&self, input: &CreditRiskInput) -> Result<CreditRiskOutput> {
        input.validate()?;

        let output: CreditRiskOutput = self.client.post(&self.base.endpoint(PREDICT), input).await?;
        output.validate()?;

        debug!(prediction = ?output.prediction, probability = output.probability, "Scored applicant");
        Ok(output)
    }
}
