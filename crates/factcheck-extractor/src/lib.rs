//! Factcheck Extractor
//!
//! Pulls tagged fields out of free-form model output.
//!
//! # Overview
//!
//! Models are asked to answer with simple tags such as `<fact>...</fact>` or
//! `<result>true</result>`, but nothing guarantees they do. Extraction runs
//! in two tiers:
//!
//! 1. **Strict**: the reply is wrapped in a synthetic root element and parsed
//!    as markup; every direct child with the requested tag name is collected
//!    in document order.
//! 2. **Heuristic** (single boolean only): when the strict pass finds no
//!    usable value, the reply counts as `true` if it contains the substring
//!    `"true"` in any letter case.
//!
//! Multi-value extraction has no heuristic tier. A parse failure is
//! returned to the caller, which decides whether to ask again.
//!
//! # Example Usage
//!
//! ```
//! use factcheck_extractor::{extract_all, extract_flag, FlagExtraction};
//!
//! let facts = extract_all("<fact>One</fact>\n<fact>Two</fact>", "fact").unwrap();
//! assert_eq!(facts, vec!["One", "Two"]);
//!
//! assert_eq!(extract_flag("<result>false</result>", "result"), FlagExtraction::Strict(false));
//! assert_eq!(extract_flag("It is TRUE, mostly", "result"), FlagExtraction::Heuristic(true));
//! ```

#![warn(missing_docs)]

mod error;
mod parser;

pub use error::ExtractError;
pub use parser::{extract_all, extract_flag, FlagExtraction, ROOT_TAG};
