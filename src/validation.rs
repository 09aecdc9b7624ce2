//! Range validation for user-entered clinical measurements.
//!
//! Pure lookups against the static per-domain field tables. A lookup
//! on a field name the domain does not declare is a programming error
//! and panics; it can never be triggered by user input because the
//! pipeline iterates the declared tables.

use crate::models::{Domain, FieldSpec};

/// True iff `value` lies within the named field's declared inclusive
/// range.
///
/// # Panics
/// Panics if `field` is not declared for `domain`.
pub fn validate(domain: Domain, field: &str, value: f64) -> bool {
    spec_for(domain, field).contains(value)
}

/// Checks every component of `values` against the domain's field
/// table, in field order. Returns the first offending field name.
///
/// # Panics
/// Panics if `values` does not match the domain's field count; callers
/// establish arity before validating.
pub fn validate_vector(domain: Domain, values: &[f64]) -> Result<(), &'static str> {
    let specs = domain.field_specs();
    assert_eq!(
        values.len(),
        specs.len(),
        "feature vector arity mismatch for {domain} domain"
    );
    for (spec, &value) in specs.iter().zip(values) {
        if !spec.contains(value) {
            return Err(spec.name);
        }
    }
    Ok(())
}

fn spec_for(domain: Domain, field: &str) -> &'static FieldSpec {
    domain
        .field_specs()
        .iter()
        .find(|s| s.name == field)
        .unwrap_or_else(|| panic!("unknown field '{field}' for {domain} domain"))
}
