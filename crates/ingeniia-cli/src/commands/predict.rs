//! Predict command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::de::DeserializeOwned;

use ingeniia_core::content::{
    CheckingAccount, CreditRiskInput, Housing, Prediction, Purpose, SavingAccounts, Sex,
};

use crate::config::ConfigArgs;
use crate::output;

/// Applicant data. Omitted fields take the values of a typical applicant.
#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Age in years (18-99)
    #[arg(long)]
    pub age: Option<u32>,

    /// male or female
    #[arg(long, value_parser = parse_wire::<Sex>)]
    pub sex: Option<Sex>,

    /// Job skill level (0-3)
    #[arg(long)]
    pub job: Option<u8>,

    /// own, rent or free
    #[arg(long, value_parser = parse_wire::<Housing>)]
    pub housing: Option<Housing>,

    /// NA, little, moderate, "quite rich" or rich
    #[arg(long, value_parser = parse_wire::<SavingAccounts>)]
    pub saving_accounts: Option<SavingAccounts>,

    /// NA, little, moderate or rich
    #[arg(long, value_parser = parse_wire::<CheckingAccount>)]
    pub checking_account: Option<CheckingAccount>,

    /// Requested amount
    #[arg(long)]
    pub credit_amount: Option<f64>,

    /// Duration in months
    #[arg(long)]
    pub duration: Option<u32>,

    /// car, furniture/equipment, radio/TV, domestic appliances, repairs,
    /// education, business or vacation/others
    #[arg(long, value_parser = parse_wire::<Purpose>)]
    pub purpose: Option<Purpose>,

    /// Print the prediction as JSON
    #[arg(long)]
    pub json: bool,
}

impl PredictArgs {
    fn input(&self) -> CreditRiskInput {
        let defaults = CreditRiskInput::default();
        CreditRiskInput {
            age: self.age.unwrap_or(defaults.age),
            sex: self.sex.unwrap_or(defaults.sex),
            job: self.job.unwrap_or(defaults.job),
            housing: self.housing.unwrap_or(defaults.housing),
            saving_accounts: self.saving_accounts.unwrap_or(defaults.saving_accounts),
            checking_account: self.checking_account.unwrap_or(defaults.checking_account),
            credit_amount: self.credit_amount.unwrap_or(defaults.credit_amount),
            duration: self.duration.unwrap_or(defaults.duration),
            purpose: self.purpose.unwrap_or(defaults.purpose),
        }
    }
}

/// Parse an enum from the string the scoring service uses for it.
fn parse_wire<T: DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|_| format!("unrecognized value '{}'", s))
}

pub async fn run(args: PredictArgs, config: &ConfigArgs) -> Result<()> {
    let scoring = config.scoring_service()?;
    let input = args.input();

    output::progress("Scoring applicant...");

    let result = scoring
        .predict(&input)
        .await
        .context("Failed to get prediction")?;

    if args.json {
        return output::json_pretty(&result);
    }

    let verdict = match result.prediction {
        Prediction::Good => "good".green().bold(),
        Prediction::Bad => "bad".red().bold(),
    };
    println!("Credit risk: {}", verdict);
    output::field("Probability", &format!("{:.1}%", result.percent()));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: PredictArgs,
    }

    #[test]
    fn omitted_fields_use_defaults() {
        let harness = Harness::try_parse_from(["predict", "--age", "52"]).unwrap();
        let input = harness.args.input();

        assert_eq!(input.age, 52);
        assert_eq!(input.purpose, CreditRiskInput::default().purpose);
    }

    #[test]
    fn wire_values_are_accepted() {
        let harness = Harness::try_parse_from([
            "predict",
            "--saving-accounts",
            "quite rich",
            "--purpose",
            "radio/TV",
        ])
        .unwrap();
        let input = harness.args.input();

        assert_eq!(input.saving_accounts, SavingAccounts::QuiteRich);
        assert_eq!(input.purpose, Purpose::RadioTv);
    }

    #[test]
    fn unknown_value_is_rejected() {
        assert!(Harness::try_parse_from(["predict", "--housing", "castle"]).is_err());
    }
}
