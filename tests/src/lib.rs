//! Integration tests for the Folia expression engine live in `tests/`.
