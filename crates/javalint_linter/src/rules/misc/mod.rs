//! Miscellaneous rules.

mod match_xpath;

pub use match_xpath::MatchXpath;
