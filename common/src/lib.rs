//! Term Tagger Common Library
//!
//! キーワード展開（表記ゆれ候補の抽出と承認）と行タグ付けのコア。
//! I/Oを持たない純粋関数のみで構成し、CLIから利用される。

pub mod error;
pub mod keyword;
pub mod tokenizer;
pub mod threshold;
pub mod similarity;
pub mod matcher;
pub mod term_set;
pub mod tagger;
pub mod session;

pub use error::{Error, Result};
pub use keyword::parse_keywords;
pub use tokenizer::{tokenize, tokenize_with, TOKEN_DELIMITER};
pub use threshold::threshold_for;
pub use similarity::ratio;
pub use matcher::{
    fuzzy_matches, fuzzy_matches_with, propose, FuzzyMatch, KeywordMatches, MatchOptions,
    MatchProposal, DEFAULT_CANDIDATE_LIMIT,
};
pub use term_set::{build_term_set, Approvals, TermSet};
pub use tagger::{tag_rows, TermMatcher, TAG_SEPARATOR};
pub use session::{AcceptAll, ApprovalPolicy, Expansion, Pipeline, PresetApprovals, RejectAll};
