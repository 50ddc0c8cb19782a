// Match Scoring Engine.
// Implements: tokenization, text aggregation, overlap scoring,
// experience-fit adjustment, ATS breakdown, batch recalculation.
// All persistence goes through `store`; no SQL in the scoring math.

pub mod aggregate;
pub mod ats;
pub mod batch;
pub mod engine;
pub mod handlers;
pub mod service;
pub mod tokenize;
