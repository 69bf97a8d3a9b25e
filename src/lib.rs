//! oftgen — pre-filled email template generator for data-collection outreach.
//!
//! Turns a spreadsheet of case records into three escalation-stage email
//! templates per row (subject, HTML body, To/CC/BCC), packaged into an
//! archive of `.oft` artifacts by an external materializer.

pub mod archive;
pub mod artifact;
pub mod config;
pub mod error;
pub mod filter;
pub mod input;
pub mod processor;
pub mod recipients;
pub mod render;
pub mod row;
pub mod templates;
