//! Data served by the content and credit-scoring services.

mod credit;
mod media;

pub use credit::{
    CheckingAccount, CreditRiskInput, CreditRiskOutput, Housing, Prediction, Purpose,
    SavingAccounts, Sex,
};
pub use media::{CodeSnippetData, VideoData, WhiteboardData};
