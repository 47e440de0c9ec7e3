//! Search layer tests
//!
//! Ranking, filtering and response shape of similarity queries.
