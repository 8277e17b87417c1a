//! Unit tests for the client board store and view interface.
