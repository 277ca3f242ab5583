//! Credit-risk prediction payloads.
//!
//! Field names on the wire follow the German credit dataset the scoring
//! model was trained on, spaces included.

use serde::{Deserialize, Serialize};

use crate::error::{Error, InvalidInputError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Housing {
    Own,
    Rent,
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingAccounts {
    #[serde(rename = "NA")]
    NotAvailable,
    #[serde(rename = "little")]
    Little,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "quite rich")]
    QuiteRich,
    #[serde(rename = "rich")]
    Rich,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckingAccount {
    #[serde(rename = "NA")]
    NotAvailable,
    #[serde(rename = "little")]
    Little,
    #[serde(rename = "moderate")]
    Moderate,
    #[serde(rename = "rich")]
    Rich,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purpose {
    #[serde(rename = "car")]
    Car,
    #[serde(rename = "furniture/equipment")]
    FurnitureEquipment,
    #[serde(rename = "radio/TV")]
    RadioTv,
    #[serde(rename = "domestic appliances")]
    DomesticAppliances,
    #[serde(rename = "repairs")]
    Repairs,
    #[serde(rename = "education")]
    Education,
    #[serde(rename = "business")]
    Business,
    #[serde(rename = "vacation/others")]
    VacationOthers,
}

/// Applicant profile sent to `POST /v1/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRiskInput {
    #[serde(rename = "Age")]
    pub age: u32,
    #[serde(rename = "Sex")]
    pub sex: Sex,
    /// Skill level, 0 (unskilled non-resident) to 3 (highly skilled).
    #[serde(rename = "Job")]
    pub job: u8,
    #[serde(rename = "Housing")]
    pub housing: Housing,
    #[serde(rename = "Saving accounts")]
    pub saving_accounts: SavingAccounts,
    #[serde(rename = "Checking account")]
    pub checking_account: CheckingAccount,
    #[serde(rename = "Credit amount")]
    pub credit_amount: f64,
    /// Loan duration in months.
    #[serde(rename = "Duration")]
    pub duration: u32,
    #[serde(rename = "Purpose")]
    pub purpose: Purpose,
}

impl CreditRiskInput {
    pub const MIN_AGE: u32 = 18;
    pub const MAX_AGE: u32 = 99;
    pub const MAX_JOB: u8 = 3;
    pub const MIN_CREDIT_AMOUNT: f64 = 250.0;
    pub const MIN_DURATION: u32 = 4;

    /// Check the form constraints before submitting.
    pub fn validate(&self) -> Result<(), Error> {
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&self.age) {
            return Err(out_of_range(
                "Age",
                format!("{} not in {}..={}", self.age, Self::MIN_AGE, Self::MAX_AGE),
            ));
        }
        if self.job > Self::MAX_JOB {
            return Err(out_of_range(
                "Job",
                format!("{} not in 0..={}", self.job, Self::MAX_JOB),
            ));
        }
        if !self.credit_amount.is_finite() || self.credit_amount < Self::MIN_CREDIT_AMOUNT {
            return Err(out_of_range(
                "Credit amount",
                format!("must be at least {}", Self::MIN_CREDIT_AMOUNT),
            ));
        }
        if self.duration < Self::MIN_DURATION {
            return Err(out_of_range(
                "Duration",
                format!("must be at least {} months", Self::MIN_DURATION),
            ));
        }
        Ok(())
    }
}

impl Default for CreditRiskInput {
    fn default() -> Self {
        Self {
            age: 35,
            sex: Sex::Male,
            job: 1,
            housing: Housing::Own,
            saving_accounts: SavingAccounts::Little,
            checking_account: CheckingAccount::Moderate,
            credit_amount: 5000.0,
            duration: 24,
            purpose: Purpose::Car,
        }
    }
}

fn out_of_range(field: &'static str, reason: String) -> Error {
    InvalidInputError::OutOfRange { field, reason }.into()
}

/// Model verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    Good,
    Bad,
}

/// Response from `POST /v1/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditRiskOutput {
    pub prediction: Prediction,
    /// Probability in `0..=1`.
    pub probability: f64,
}

impl CreditRiskOutput {
    /// Reject responses whose probability is not in `0..=1`.
    pub fn validate(&self) -> Result<(), Error> {
        if !(0.0..=1.0).contains(&self.probability) {
            return Err(out_of_range(
                "probability",
                format!("{} not in 0..=1", self.probability),
            ));
        }
        Ok(())
    }

    /// Probability as a percentage.
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_dataset_field_names() {
        let input = CreditRiskInput {
            saving_accounts: SavingAccounts::QuiteRich,
            checking_account: CheckingAccount::NotAvailable,
            purpose: Purpose::RadioTv,
            ..CreditRiskInput::default()
        };

        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(
            value,
            json!({
                "Age": 35,
                "Sex": "male",
                "Job": 1,
                "Housing": "own",
                "Saving accounts": "quite rich",
                "Checking account": "NA",
                "Credit amount": 5000.0,
                "Duration": 24,
                "Purpose": "radio/TV"
            })
        );
    }

    #[test]
    fn default_input_is_valid() {
        assert!(CreditRiskInput::default().validate().is_ok());
    }

    #[test]
    fn rejects_job_above_three() {
        let input = CreditRiskInput {
            job: 4,
            ..CreditRiskInput::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn rejects_underage_applicant() {
        let input = CreditRiskInput {
            age: 17,
            ..CreditRiskInput::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn output_probability_bounds() {
        let output: CreditRiskOutput =
            serde_json::from_value(json!({ "prediction": "bad", "probability": 0.27 })).unwrap();
        assert_eq!(output.prediction, Prediction::Bad);
        assert!(output.validate().is_ok());

        let broken = CreditRiskOutput {
            prediction: Prediction::Good,
            probability: 1.5,
        };
        assert!(broken.validate().is_err());
    }
}
