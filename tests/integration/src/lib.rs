//! Integration tests for the Realty trust layer live in `tests/`.
