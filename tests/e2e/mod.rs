// End-to-end integration tests for the POI Narrator API
//
// Each test starts the real router on an ephemeral port with its own
// temporary audio root and a seeded in-memory POI catalog. Text generation
// and speech synthesis are replaced by in-process mocks that count calls,
// so tests can assert exactly when generation happens.

mod helpers;
mod test_llm;
mod test_poi;
