// Résumé profile view: entry structuring and relevance ranking.
// The core (structurer, ranking, view) is pure; handlers are the only HTTP-facing part.

pub mod handlers;
pub mod models;
pub mod ranking;
pub mod structurer;
pub mod view;
